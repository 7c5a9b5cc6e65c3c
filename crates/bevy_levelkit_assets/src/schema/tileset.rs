//! Tile catalog for image-collection tilesets.
//!
//! Every tile has its own image. Tile ids are unique but not necessarily
//! contiguous; gaps are left as they are.

use std::path::{Path, PathBuf};

use rand::{
    Rng,
    distr::{Distribution, weighted::WeightedIndex},
};

use super::error::{SchemaError, check_probability};

/// A single addressable terrain/object image in the level grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    /// Local tile id, unique within its tileset
    pub id: u32,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Image path relative to the directory containing the tileset file
    pub image_path: PathBuf,
    /// Relative selection weight for random tile skins.
    ///
    /// `None` means the tile is not a random-variant member.
    pub probability: Option<f32>,
}

impl Tile {
    /// Create a plain (non-variant) tile.
    pub fn new(id: u32, width: u32, height: u32, image_path: impl Into<PathBuf>) -> Self {
        Self {
            id,
            width,
            height,
            image_path: image_path.into(),
            probability: None,
        }
    }

    /// Mark this tile as a random variant with the given weight.
    pub fn with_probability(mut self, probability: f32) -> Self {
        self.probability = Some(probability);
        self
    }

    /// Whether the tile takes part in random skin selection.
    #[inline]
    pub fn is_variant(&self) -> bool {
        self.probability.is_some()
    }

    /// File name of the tile image (e.g. `nether_entrance.png`).
    pub fn file_name(&self) -> Option<&str> {
        self.image_path.file_name().and_then(|name| name.to_str())
    }
}

/// Ordered collection of tiles loaded from a tileset file.
#[derive(Debug, Clone, PartialEq)]
pub struct Tileset {
    pub name: String,
    /// Nominal tile width declared by the tileset
    pub tile_width: u32,
    /// Nominal tile height declared by the tileset
    pub tile_height: u32,
    /// Always 0: each tile carries its own image rather than an atlas cell
    pub columns: u32,
    /// Sorted by ascending id
    tiles: Vec<Tile>,
}

impl Tileset {
    /// Build a tileset, sorting tiles by id and validating them.
    pub fn new(
        name: impl Into<String>,
        tile_width: u32,
        tile_height: u32,
        mut tiles: Vec<Tile>,
    ) -> Result<Self, SchemaError> {
        tiles.sort_by_key(|tile| tile.id);
        let tileset = Self {
            name: name.into(),
            tile_width,
            tile_height,
            columns: 0,
            tiles,
        };
        tileset.validate()?;
        Ok(tileset)
    }

    /// Check the tileset invariants: unique ids, positive sizes and
    /// probabilities within `[0, 1]`.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.tile_width == 0 || self.tile_height == 0 {
            return Err(SchemaError::Range(format!(
                "tileset '{}' declares a {}x{} tile size",
                self.name, self.tile_width, self.tile_height
            )));
        }

        // tiles are sorted, so duplicates are neighbours
        if let Some(pair) = self.tiles.windows(2).find(|pair| pair[0].id == pair[1].id) {
            return Err(SchemaError::DuplicateTileId(pair[0].id));
        }

        for tile in &self.tiles {
            if tile.width == 0 || tile.height == 0 {
                return Err(SchemaError::Range(format!(
                    "tile {} has a {}x{} image",
                    tile.id, tile.width, tile.height
                )));
            }
            if let Some(probability) = tile.probability {
                check_probability(&format!("tile {}", tile.id), probability)?;
            }
        }

        Ok(())
    }

    /// Verify that every tile image exists below `base_dir`.
    ///
    /// `base_dir` is the directory containing the tileset file.
    pub fn check_images(&self, base_dir: &Path) -> Result<(), SchemaError> {
        match self
            .tiles
            .iter()
            .find(|tile| !base_dir.join(&tile.image_path).is_file())
        {
            Some(tile) => Err(SchemaError::Reference(format!(
                "tile {} references missing image {}",
                tile.id,
                tile.image_path.display()
            ))),
            None => Ok(()),
        }
    }

    /// Look up a tile by id.
    pub fn tile(&self, id: u32) -> Option<&Tile> {
        self.tiles
            .binary_search_by_key(&id, |tile| tile.id)
            .ok()
            .map(|index| &self.tiles[index])
    }

    /// Tiles in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Tile ids in ascending order. Gaps are kept as authored.
    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.tiles.iter().map(|tile| tile.id)
    }

    /// Number of tiles.
    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Value written to the `tilecount` attribute.
    ///
    /// Saturates at `u32::MAX`.
    pub fn tilecount(&self) -> u32 {
        u32::try_from(self.tiles.len()).unwrap_or(u32::MAX)
    }

    /// Tiles that take part in random skin selection.
    pub fn variants(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().filter(|tile| tile.is_variant())
    }

    /// Pick a random variant tile, weighted by probability.
    ///
    /// Returns `None` if no variant carries a positive weight.
    pub fn choose_variant<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Tile> {
        let variants: Vec<&Tile> = self.variants().collect();
        let weights = variants.iter().map(|tile| tile.probability.unwrap_or(0.0));
        let distribution = WeightedIndex::new(weights).ok()?;
        Some(variants[distribution.sample(rng)])
    }
}

impl<'a> IntoIterator for &'a Tileset {
    type Item = &'a Tile;
    type IntoIter = std::slice::Iter<'a, Tile>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiles.iter()
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn grass_tiles() -> Vec<Tile> {
        vec![
            Tile::new(3, 38, 38, "grass_tall.png").with_probability(0.2),
            Tile::new(0, 38, 38, "grass.png"),
            Tile::new(1, 38, 38, "grass_flowers.png").with_probability(0.1),
            Tile::new(11, 38, 38, "sand.png"),
        ]
    }

    #[test]
    fn test_new_sorts_by_id_and_keeps_gaps() {
        let tileset = Tileset::new("grass", 38, 38, grass_tiles()).unwrap();
        assert_eq!(tileset.ids().collect::<Vec<_>>(), vec![0, 1, 3, 11]);
        assert!(tileset.tile(10).is_none());
        assert_eq!(tileset.tile(11).unwrap().file_name(), Some("sand.png"));
        assert_eq!(tileset.tilecount(), 4);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut tiles = grass_tiles();
        tiles.push(Tile::new(1, 38, 38, "other.png"));
        assert_eq!(
            Tileset::new("grass", 38, 38, tiles),
            Err(SchemaError::DuplicateTileId(1))
        );
    }

    #[test]
    fn test_probability_out_of_range_rejected() {
        let tiles = vec![Tile::new(0, 38, 38, "grass.png").with_probability(1.5)];
        let err = Tileset::new("grass", 38, 38, tiles).unwrap_err();
        assert!(matches!(err, SchemaError::Range(_)));
    }

    #[test]
    fn test_zero_sized_tile_rejected() {
        let tiles = vec![Tile::new(0, 0, 38, "grass.png")];
        assert!(matches!(
            Tileset::new("grass", 38, 38, tiles),
            Err(SchemaError::Range(_))
        ));
    }

    #[test]
    fn test_choose_variant_only_returns_variants() {
        let tileset = Tileset::new("grass", 38, 38, grass_tiles()).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let tile = tileset.choose_variant(&mut rng).unwrap();
            assert!(tile.id == 1 || tile.id == 3);
        }
    }

    #[test]
    fn test_choose_variant_without_weights() {
        let tiles = vec![
            Tile::new(0, 38, 38, "grass.png"),
            Tile::new(1, 38, 38, "grass_flowers.png").with_probability(0.0),
        ];
        let tileset = Tileset::new("grass", 38, 38, tiles).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        assert!(tileset.choose_variant(&mut rng).is_none());
    }

    #[test]
    fn test_check_images_reports_missing_file() {
        let tileset = Tileset::new("grass", 38, 38, grass_tiles()).unwrap();
        let err = tileset
            .check_images(Path::new("/nonexistent/levelkit"))
            .unwrap_err();
        assert!(matches!(err, SchemaError::Reference(_)));
    }
}
