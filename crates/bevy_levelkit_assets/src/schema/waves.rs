//! Level wave spec: spawn distribution, room extras, wave sequence and
//! special wave compositions.
//!
//! The TOML form looks like this:
//!
//! ```toml
//! waves = [[5, 20], [8, 20], ["extra_fun", 3]]
//!
//! [mobs_probabilities]
//! mob1 = 0.6
//! mob2 = 0.4
//!
//! [mobs_extras.mob2]
//! 3 = 2
//!
//! [special_waves.extra_fun]
//! mob1 = 2
//! mob2 = 3
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::{SchemaError, check_probability};

/// First element of a wave entry: either a mob count drawn from the
/// probability table or the label of a special wave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WaveSize {
    Count(u32),
    Special(String),
}

/// One timed batch of spawns.
///
/// Stored in TOML as a two element array: `[count_or_label, duration_seconds]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "(WaveSize, f32)", into = "(WaveSize, f32)")]
pub struct Wave {
    pub size: WaveSize,
    /// Seconds until the next wave starts
    pub duration: f32,
}

impl Wave {
    /// A wave of `count` mobs sampled from `mobs_probabilities`.
    pub fn count(count: u32, duration: f32) -> Self {
        Self {
            size: WaveSize::Count(count),
            duration,
        }
    }

    /// A wave spawning the composition stored under `label` in `special_waves`.
    pub fn special(label: impl Into<String>, duration: f32) -> Self {
        Self {
            size: WaveSize::Special(label.into()),
            duration,
        }
    }

    /// Label of the special wave, if this is one.
    pub fn special_label(&self) -> Option<&str> {
        match &self.size {
            WaveSize::Special(label) => Some(label),
            WaveSize::Count(_) => None,
        }
    }
}

impl From<(WaveSize, f32)> for Wave {
    fn from((size, duration): (WaveSize, f32)) -> Self {
        Self { size, duration }
    }
}

impl From<Wave> for (WaveSize, f32) {
    fn from(wave: Wave) -> Self {
        (wave.size, wave.duration)
    }
}

/// A wave with its special composition looked up.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedWave<'a> {
    /// Sample this many mobs from `mobs_probabilities`
    Count(u32),
    /// Spawn exactly these mobs
    Special {
        label: &'a str,
        mobs: &'a BTreeMap<String, u32>,
    },
}

/// Validated wave configuration of a level.
///
/// Authored offline and treated as immutable once loaded.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "WaveSpecFile", into = "WaveSpecFile")]
pub struct LevelWaveSpec {
    /// Default spawn weights per mob name. Not required to sum to 1.
    pub mobs_probabilities: BTreeMap<String, f32>,
    /// Bonus spawns: mob name -> room number -> extra count
    pub mobs_extras: BTreeMap<String, BTreeMap<u32, u32>>,
    /// Spawn order
    pub waves: Vec<Wave>,
    /// Authored compositions: label -> mob name -> exact count
    pub special_waves: BTreeMap<String, BTreeMap<String, u32>>,
}

impl LevelWaveSpec {
    /// Parse and validate a level spec from TOML.
    pub fn from_toml_str(source: &str) -> Result<Self, SchemaError> {
        let file: WaveSpecFile =
            toml::from_str(source).map_err(|e| SchemaError::Parse(e.to_string()))?;
        Self::try_from(file)
    }

    /// Serialize back to TOML.
    pub fn to_toml_string(&self) -> Result<String, SchemaError> {
        toml::to_string(&WaveSpecFile::from(self.clone()))
            .map_err(|e| SchemaError::Parse(e.to_string()))
    }

    /// Check referential integrity and value ranges.
    pub fn validate(&self) -> Result<(), SchemaError> {
        for (mob, probability) in &self.mobs_probabilities {
            check_probability(&format!("mob '{mob}'"), *probability)?;
        }

        for (mob, rooms) in &self.mobs_extras {
            if rooms.contains_key(&0) {
                return Err(SchemaError::Range(format!(
                    "extras for mob '{mob}' reference room 0, rooms are numbered from 1"
                )));
            }
        }

        for (index, wave) in self.waves.iter().enumerate() {
            if !(wave.duration.is_finite() && wave.duration > 0.0) {
                return Err(SchemaError::Range(format!(
                    "wave {index} has duration {}, expected a positive number of seconds",
                    wave.duration
                )));
            }
            if let Some(label) = wave.special_label()
                && !self.special_waves.contains_key(label)
            {
                return Err(SchemaError::Reference(format!(
                    "wave {index} references unknown special wave '{label}'"
                )));
            }
        }

        Ok(())
    }

    /// Wave at `index`, in spawn order.
    pub fn wave(&self, index: usize) -> Option<&Wave> {
        self.waves.get(index)
    }

    /// Number of waves in the level.
    #[inline]
    pub fn len(&self) -> usize {
        self.waves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }

    /// Authored composition (mob name to count) of a special wave.
    pub fn special_wave(&self, label: &str) -> Option<&BTreeMap<String, u32>> {
        self.special_waves.get(label)
    }

    /// Look up the composition of wave `index`.
    pub fn resolve(&self, index: usize) -> Result<ResolvedWave<'_>, SchemaError> {
        let wave = self.wave(index).ok_or_else(|| {
            SchemaError::Reference(format!(
                "wave {index} does not exist, the level has {} waves",
                self.len()
            ))
        })?;

        match &wave.size {
            WaveSize::Count(count) => Ok(ResolvedWave::Count(*count)),
            WaveSize::Special(label) => {
                let mobs = self.special_wave(label).ok_or_else(|| {
                    SchemaError::Reference(format!("unknown special wave '{label}'"))
                })?;
                Ok(ResolvedWave::Special { label, mobs })
            }
        }
    }

    /// Bonus spawns configured for `room`, as `(mob, count)` pairs.
    pub fn extras_for_room(&self, room: u32) -> Vec<(&str, u32)> {
        self.mobs_extras
            .iter()
            .filter_map(|(mob, rooms)| rooms.get(&room).map(|count| (mob.as_str(), *count)))
            .collect()
    }

    /// Sum of all wave durations in seconds.
    pub fn total_duration(&self) -> f32 {
        self.waves.iter().map(|wave| wave.duration).sum()
    }
}

/// On-disk layout. Room numbers are table keys, hence strings.
///
/// `waves` comes first so it is written before any table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct WaveSpecFile {
    waves: Vec<Wave>,
    #[serde(default)]
    mobs_probabilities: BTreeMap<String, f32>,
    #[serde(default)]
    mobs_extras: BTreeMap<String, BTreeMap<String, u32>>,
    #[serde(default)]
    special_waves: BTreeMap<String, BTreeMap<String, u32>>,
}

impl TryFrom<WaveSpecFile> for LevelWaveSpec {
    type Error = SchemaError;

    fn try_from(file: WaveSpecFile) -> Result<Self, Self::Error> {
        let mut mobs_extras = BTreeMap::new();
        for (mob, rooms) in file.mobs_extras {
            let mut parsed = BTreeMap::new();
            for (room, count) in rooms {
                let room: u32 = room.trim().parse().map_err(|_| {
                    SchemaError::Parse(format!(
                        "extras for mob '{mob}' use '{room}' as a room number"
                    ))
                })?;
                parsed.insert(room, count);
            }
            mobs_extras.insert(mob, parsed);
        }

        let spec = LevelWaveSpec {
            mobs_probabilities: file.mobs_probabilities,
            mobs_extras,
            waves: file.waves,
            special_waves: file.special_waves,
        };
        spec.validate()?;
        Ok(spec)
    }
}

impl From<LevelWaveSpec> for WaveSpecFile {
    fn from(spec: LevelWaveSpec) -> Self {
        let mobs_extras = spec
            .mobs_extras
            .into_iter()
            .map(|(mob, rooms)| {
                let rooms = rooms
                    .into_iter()
                    .map(|(room, count)| (room.to_string(), count))
                    .collect();
                (mob, rooms)
            })
            .collect();

        Self {
            waves: spec.waves,
            mobs_probabilities: spec.mobs_probabilities,
            mobs_extras,
            special_waves: spec.special_waves,
        }
    }
}
