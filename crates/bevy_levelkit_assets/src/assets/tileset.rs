use bevy::{platform::collections::HashMap, prelude::*};

use crate::schema::Tileset;

/// Bevy asset wrapper for tilesets (.tsx files)
///
/// Only image collection tilesets are supported: every tile has its own image.
#[derive(TypePath, Asset, Debug)]
pub struct TilesetAsset {
    /// Validated tile catalog, ordered by tile id
    pub tileset: Tileset,

    /// Individual tile images
    ///
    /// Key: Local tile ID (as written in the tileset, gaps included)
    /// Value: Handle to the tile's image
    pub tile_images: HashMap<u32, Handle<Image>>,

    /// Nominal tile size in pixels (width, height)
    pub tile_size: UVec2,
}

impl TilesetAsset {
    /// Get the image handle for a specific tile
    ///
    /// # Returns
    /// * `Some(&Handle<Image>)` - The image handle for this tile
    /// * `None` - If no tile with this id exists
    pub fn get_tile_image(&self, tile_id: u32) -> Option<&Handle<Image>> {
        self.tile_images.get(&tile_id)
    }

    /// Pick a random skin among the variant tiles and return its id and image.
    pub fn choose_variant_image<R: rand::Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Option<(u32, &Handle<Image>)> {
        let tile = self.tileset.choose_variant(rng)?;
        self.get_tile_image(tile.id).map(|handle| (tile.id, handle))
    }
}
