//! Reading and writing Tiled `.tsx` image-collection tilesets.
//!
//! Reading goes through the `tiled` crate. Writing produces the subset of the
//! format the game uses: tileset size attributes, `columns="0"` and one
//! `<tile>` with an `<image>` per entry.

use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;
use tiled::ResourceReader;
use xml::reader::{EventReader, XmlEvent as ReadEvent};
use xml::writer::{EmitterConfig, XmlEvent};

use crate::schema::{SchemaError, Tile, Tileset};

#[derive(Debug, Error)]
pub enum TsxError {
    #[error("Failed to parse tileset: {0}")]
    Tiled(#[from] tiled::Error),

    #[error("Failed to write tileset: {0}")]
    Xml(#[from] xml::writer::Error),

    #[error("Failed to scan tileset XML: {0}")]
    XmlRead(#[from] xml::reader::Error),

    #[error("Tileset written with invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Tileset '{0}' uses a single atlas image, expected one image per tile")]
    AtlasTileset(String),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Serves the tileset bytes to `tiled` so parsing never touches the filesystem.
struct InMemoryReader<'a> {
    path: &'a Path,
    bytes: &'a [u8],
}

impl<'a> ResourceReader for InMemoryReader<'a> {
    type Resource = &'a [u8];
    type Error = std::io::Error;

    fn read_from(&mut self, path: &Path) -> Result<Self::Resource, Self::Error> {
        if path == self.path {
            Ok(self.bytes)
        } else {
            Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} is not available to the tileset parser", path.display()),
            ))
        }
    }
}

/// Ids of the `<tile>` elements that carry a `probability` attribute.
///
/// `tiled` fills in 1.0 when the attribute is missing, so presence has to be
/// read from the XML itself.
fn tiles_with_probability(bytes: &[u8]) -> Result<HashSet<u32>, TsxError> {
    let mut ids = HashSet::new();
    let mut depth = 0usize;

    for event in EventReader::new(bytes) {
        match event? {
            ReadEvent::StartElement {
                name, attributes, ..
            } => {
                // direct children of <tileset> only
                if depth == 1 && name.local_name == "tile" {
                    let attr = |key: &str| {
                        attributes
                            .iter()
                            .find(|attr| attr.name.local_name == key)
                            .map(|attr| attr.value.as_str())
                    };
                    if attr("probability").is_some()
                        && let Some(id) = attr("id").and_then(|id| id.parse().ok())
                    {
                        ids.insert(id);
                    }
                }
                depth += 1;
            }
            ReadEvent::EndElement { .. } => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    Ok(ids)
}

/// Parse a `.tsx` tileset held in memory.
///
/// `path` is only used to name the file and to express image paths relative
/// to the tileset's directory.
pub fn parse_tsx(path: &Path, bytes: &[u8]) -> Result<Tileset, TsxError> {
    let mut loader = tiled::Loader::with_reader(InMemoryReader { path, bytes });
    let raw = loader.load_tsx_tileset(path)?;

    if raw.image.is_some() {
        return Err(TsxError::AtlasTileset(raw.name.clone()));
    }

    let authored = tiles_with_probability(bytes)?;

    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    let mut tiles = Vec::new();

    for (id, tile) in raw.tiles() {
        let Some(image) = &tile.image else {
            return Err(SchemaError::Reference(format!("tile {id} has no image")).into());
        };

        let (Ok(width), Ok(height)) = (u32::try_from(image.width), u32::try_from(image.height))
        else {
            return Err(SchemaError::Range(format!(
                "tile {id} has a {}x{} image",
                image.width, image.height
            ))
            .into());
        };

        // tiled joins image sources onto the tileset directory; undo that
        let image_path = image
            .source
            .strip_prefix(base_dir)
            .unwrap_or(&image.source)
            .to_path_buf();

        let probability = authored.contains(&id).then_some(tile.probability);

        tiles.push(Tile {
            id,
            width,
            height,
            image_path,
            probability,
        });
    }

    Tileset::new(raw.name.clone(), raw.tile_width, raw.tile_height, tiles).map_err(TsxError::from)
}

/// Write a tileset in `.tsx` form.
pub fn write_tsx(tileset: &Tileset) -> Result<String, TsxError> {
    let mut out = Vec::new();
    let mut writer = EmitterConfig::new()
        .perform_indent(true)
        .indent_string(" ")
        .create_writer(&mut out);

    let tile_width = tileset.tile_width.to_string();
    let tile_height = tileset.tile_height.to_string();
    let tilecount = tileset.tilecount().to_string();
    let columns = tileset.columns.to_string();

    writer.write(
        XmlEvent::start_element("tileset")
            .attr("version", "1.10")
            .attr("name", &tileset.name)
            .attr("tilewidth", &tile_width)
            .attr("tileheight", &tile_height)
            .attr("tilecount", &tilecount)
            .attr("columns", &columns),
    )?;

    for tile in tileset {
        let id = tile.id.to_string();
        let width = tile.width.to_string();
        let height = tile.height.to_string();
        let source = tile.image_path.to_string_lossy().replace('\\', "/");
        let probability = tile.probability.as_ref().map(ToString::to_string);

        let mut start = XmlEvent::start_element("tile").attr("id", &id);
        if let Some(probability) = &probability {
            start = start.attr("probability", probability);
        }
        writer.write(start)?;
        writer.write(
            XmlEvent::start_element("image")
                .attr("width", &width)
                .attr("height", &height)
                .attr("source", &source),
        )?;
        writer.write(XmlEvent::end_element())?;
        writer.write(XmlEvent::end_element())?;
    }

    writer.write(XmlEvent::end_element())?;
    drop(writer);

    Ok(String::from_utf8(out)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const V1: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../assets/tilesets/deltaworld_v1.tsx"
    ));
    const V2: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../assets/tilesets/deltaworld_v2.tsx"
    ));

    fn v1() -> Tileset {
        parse_tsx(Path::new("tilesets/deltaworld_v1.tsx"), V1.as_bytes()).unwrap()
    }

    #[test]
    fn test_v1_has_18_tiles_without_id_10() {
        let tileset = v1();
        assert_eq!(tileset.len(), 18);
        let expected: Vec<u32> = (0..=9).chain(11..=18).collect();
        assert_eq!(tileset.ids().collect::<Vec<_>>(), expected);
        assert!(tileset.tile(10).is_none());
    }

    #[test]
    fn test_v1_tile_8_is_nether_entrance() {
        let tileset = v1();
        let tile = tileset.tile(8).unwrap();
        assert_eq!(tile.file_name(), Some("nether_entrance.png"));
        assert_eq!(
            tile.image_path,
            Path::new("../textures/tiles/nether_entrance.png")
        );
        assert!(!tile.is_variant());
    }

    #[test]
    fn test_v1_tiles_are_square_38() {
        let tileset = v1();
        assert_eq!((tileset.tile_width, tileset.tile_height), (38, 38));
        assert!(tileset.iter().all(|tile| tile.width == 38 && tile.height == 38));
    }

    #[test]
    fn test_v1_variant_probabilities() {
        let tileset = v1();
        let variants: Vec<(u32, f32)> = tileset
            .variants()
            .map(|tile| (tile.id, tile.probability.unwrap()))
            .collect();
        assert_eq!(variants, vec![(1, 0.1), (2, 0.05), (3, 0.2), (12, 0.1)]);
        assert!(
            tileset
                .variants()
                .all(|tile| (0.0..=1.0).contains(&tile.probability.unwrap()))
        );
    }

    #[test]
    fn test_v2_also_skips_id_10() {
        let tileset = parse_tsx(Path::new("tilesets/deltaworld_v2.tsx"), V2.as_bytes()).unwrap();
        assert!(tileset.tile(10).is_none());
        assert_eq!(tileset.tile(8).unwrap().file_name(), Some("nether_entrance.png"));
    }

    #[test]
    fn test_round_trip() {
        let tileset = v1();
        let written = write_tsx(&tileset).unwrap();
        assert!(written.contains(r#"columns="0""#));
        let reparsed = parse_tsx(Path::new("tilesets/deltaworld_v1.tsx"), written.as_bytes()).unwrap();
        assert_eq!(reparsed, tileset);
    }

    #[test]
    fn test_round_trip_keeps_full_weight_variant() {
        let tileset = Tileset::new(
            "weights",
            38,
            38,
            vec![
                Tile::new(0, 38, 38, "plain.png"),
                Tile::new(1, 38, 38, "always.png").with_probability(1.0),
                Tile::new(2, 38, 38, "never.png").with_probability(0.0),
            ],
        )
        .unwrap();

        let written = write_tsx(&tileset).unwrap();
        let reparsed = parse_tsx(Path::new("weights.tsx"), written.as_bytes()).unwrap();
        assert_eq!(reparsed.tile(0).unwrap().probability, None);
        assert_eq!(reparsed.tile(1).unwrap().probability, Some(1.0));
        assert_eq!(reparsed.tile(2).unwrap().probability, Some(0.0));
        assert_eq!(reparsed, tileset);
    }

    #[test]
    fn test_atlas_tileset_rejected() {
        let source = r#"<?xml version="1.0" encoding="UTF-8"?>
<tileset version="1.10" name="atlas" tilewidth="16" tileheight="16" tilecount="4" columns="2">
 <image source="atlas.png" width="32" height="32"/>
</tileset>"#;
        let err = parse_tsx(Path::new("atlas.tsx"), source.as_bytes()).unwrap_err();
        assert!(matches!(err, TsxError::AtlasTileset(_)));
    }

    #[test]
    fn test_malformed_xml() {
        let err = parse_tsx(Path::new("broken.tsx"), b"<tileset name=").unwrap_err();
        assert!(matches!(err, TsxError::Tiled(_)));
    }
}
