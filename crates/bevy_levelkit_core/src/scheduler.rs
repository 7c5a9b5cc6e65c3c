//! Turns a [`LevelWaveSpec`] into concrete spawn lists, one wave at a time.

use bevy_levelkit_assets::schema::{LevelWaveSpec, ResolvedWave, SchemaError};
use rand::{
    Rng,
    distr::{Distribution, weighted::WeightedIndex},
    seq::SliceRandom,
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WaveError {
    /// Every wave of the level has already been handed out.
    #[error("No more waves defined for this level ({count} waves)")]
    Exhausted { count: usize },

    /// A count wave needs at least one mob with a positive spawn weight.
    #[error("Wave {index} samples mobs but no mob has a positive spawn probability")]
    NoSpawnWeights { index: usize },

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Mobs to spawn for one wave.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveSpawn {
    /// Position of the wave in the level (0-based)
    pub index: usize,
    /// One entry per mob to spawn, in spawn order
    pub mobs: Vec<String>,
    /// Seconds until the next wave
    pub duration: f32,
    /// Label of the special wave, if the composition was authored
    pub special: Option<String>,
}

/// Cursor over the waves of a level.
///
/// Count waves draw mob names with replacement, using `mobs_probabilities` as
/// relative weights. Special waves spawn their exact composition in random
/// order.
#[derive(Debug, Clone)]
pub struct WaveScheduler {
    spec: LevelWaveSpec,
    cursor: usize,
}

impl WaveScheduler {
    pub fn new(spec: LevelWaveSpec) -> Self {
        Self { spec, cursor: 0 }
    }

    pub fn spec(&self) -> &LevelWaveSpec {
        &self.spec
    }

    /// Index of the wave the next call to [`next_wave`](Self::next_wave) returns.
    #[inline]
    pub fn current_index(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.spec.len().saturating_sub(self.cursor)
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.remaining() == 0
    }

    /// Rewind to the first wave.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Produce the spawn list of the current wave and move to the next one.
    ///
    /// On error the cursor stays where it is.
    pub fn next_wave<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<WaveSpawn, WaveError> {
        let index = self.cursor;
        if self.is_finished() {
            return Err(WaveError::Exhausted {
                count: self.spec.len(),
            });
        }

        let (mobs, special) = match self.spec.resolve(index)? {
            ResolvedWave::Count(count) => (self.sample_mobs(index, count, rng)?, None),
            ResolvedWave::Special { label, mobs } => {
                let mut expanded: Vec<String> = mobs
                    .iter()
                    .flat_map(|(mob, count)| std::iter::repeat_n(mob.clone(), *count as usize))
                    .collect();
                expanded.shuffle(rng);
                (expanded, Some(label.to_string()))
            }
        };

        let duration = self.spec.waves[index].duration;
        self.cursor += 1;

        Ok(WaveSpawn {
            index,
            mobs,
            duration,
            special,
        })
    }

    /// Bonus spawns for `room`, one entry per mob.
    ///
    /// Extras come on top of the waves; they never change the wave
    /// distribution.
    pub fn room_extras(&self, room: u32) -> Vec<String> {
        self.spec
            .extras_for_room(room)
            .into_iter()
            .flat_map(|(mob, count)| std::iter::repeat_n(mob.to_string(), count as usize))
            .collect()
    }

    fn sample_mobs<R: Rng + ?Sized>(
        &self,
        index: usize,
        count: u32,
        rng: &mut R,
    ) -> Result<Vec<String>, WaveError> {
        if count == 0 {
            return Ok(Vec::new());
        }

        let (names, weights): (Vec<&String>, Vec<f32>) = self
            .spec
            .mobs_probabilities
            .iter()
            .map(|(mob, weight)| (mob, *weight))
            .unzip();

        let distribution =
            WeightedIndex::new(&weights).map_err(|_| WaveError::NoSpawnWeights { index })?;

        Ok((0..count)
            .map(|_| names[distribution.sample(rng)].clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use bevy_levelkit_assets::schema::Wave;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    const LEVEL1: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../assets/levels/level1.waves.toml"
    ));

    fn level1() -> WaveScheduler {
        WaveScheduler::new(LevelWaveSpec::from_toml_str(LEVEL1).unwrap())
    }

    fn counts(mobs: &[String]) -> BTreeMap<&str, u32> {
        let mut counts = BTreeMap::new();
        for mob in mobs {
            *counts.entry(mob.as_str()).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn test_count_wave_draws_requested_number() {
        let mut scheduler = level1();
        let mut rng = StdRng::seed_from_u64(42);

        let spawn = scheduler.next_wave(&mut rng).unwrap();
        assert_eq!(spawn.index, 0);
        assert_eq!(spawn.mobs.len(), 5);
        assert_eq!(spawn.duration, 20.0);
        assert!(spawn.special.is_none());
        assert!(
            spawn
                .mobs
                .iter()
                .all(|mob| scheduler.spec().mobs_probabilities.contains_key(mob))
        );
    }

    #[test]
    fn test_special_wave_spawns_exact_composition() {
        let mut scheduler = level1();
        let mut rng = StdRng::seed_from_u64(42);
        scheduler.next_wave(&mut rng).unwrap();
        scheduler.next_wave(&mut rng).unwrap();

        let spawn = scheduler.next_wave(&mut rng).unwrap();
        assert_eq!(spawn.index, 2);
        assert_eq!(spawn.special.as_deref(), Some("extra_fun"));
        assert_eq!(spawn.duration, 3.0);
        let expected: BTreeMap<&str, u32> = [("mob1", 2), ("mob2", 3), ("mobn", 1)].into();
        assert_eq!(counts(&spawn.mobs), expected);
    }

    #[test]
    fn test_exhausted_keeps_cursor() {
        let mut scheduler = level1();
        let mut rng = StdRng::seed_from_u64(1);
        let total = scheduler.spec().len();
        for _ in 0..total {
            scheduler.next_wave(&mut rng).unwrap();
        }
        assert!(scheduler.is_finished());
        assert_eq!(
            scheduler.next_wave(&mut rng),
            Err(WaveError::Exhausted { count: total })
        );
        assert_eq!(scheduler.current_index(), total);

        scheduler.reset();
        assert_eq!(scheduler.remaining(), total);
    }

    #[test]
    fn test_zero_weight_mobs_never_drawn() {
        let spec = LevelWaveSpec {
            mobs_probabilities: [("ghost".to_string(), 0.0), ("slime".to_string(), 0.3)].into(),
            waves: vec![Wave::count(200, 5.0)],
            ..Default::default()
        };
        let mut scheduler = WaveScheduler::new(spec);
        let spawn = scheduler.next_wave(&mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(spawn.mobs.len(), 200);
        assert!(spawn.mobs.iter().all(|mob| mob == "slime"));
    }

    #[test]
    fn test_weights_need_not_sum_to_one() {
        let spec = LevelWaveSpec {
            mobs_probabilities: [("a".to_string(), 0.1), ("b".to_string(), 0.1)].into(),
            waves: vec![Wave::count(1000, 5.0)],
            ..Default::default()
        };
        let mut scheduler = WaveScheduler::new(spec);
        let spawn = scheduler.next_wave(&mut StdRng::seed_from_u64(9)).unwrap();
        let counts = counts(&spawn.mobs);
        assert!(counts["a"] > 350 && counts["b"] > 350);
    }

    #[test]
    fn test_no_weights_is_an_error() {
        let spec = LevelWaveSpec {
            waves: vec![Wave::count(0, 5.0), Wave::count(3, 5.0)],
            ..Default::default()
        };
        let mut scheduler = WaveScheduler::new(spec);
        let mut rng = StdRng::seed_from_u64(0);

        // an empty wave needs no weights
        assert!(scheduler.next_wave(&mut rng).unwrap().mobs.is_empty());
        assert_eq!(
            scheduler.next_wave(&mut rng),
            Err(WaveError::NoSpawnWeights { index: 1 })
        );
        assert_eq!(scheduler.current_index(), 1);
    }

    #[test]
    fn test_unvalidated_dangling_label() {
        let spec = LevelWaveSpec {
            waves: vec![Wave::special("missing", 5.0)],
            ..Default::default()
        };
        let mut scheduler = WaveScheduler::new(spec);
        let err = scheduler.next_wave(&mut StdRng::seed_from_u64(0)).unwrap_err();
        assert!(matches!(err, WaveError::Schema(SchemaError::Reference(_))));
    }

    #[test]
    fn test_room_extras_are_expanded() {
        let scheduler = level1();
        assert_eq!(scheduler.room_extras(6), vec!["mobn", "mobn"]);
        assert_eq!(scheduler.room_extras(3), vec!["mob2", "mob2"]);
        assert!(scheduler.room_extras(1).is_empty());
    }
}
