//! Validation errors shared by tilesets and level wave specs.

use thiserror::Error;

/// Broad category of a [`SchemaError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The file could not be parsed at all.
    Parse,
    /// Something points at an entry (or asset) that does not exist.
    Reference,
    /// A numeric value lies outside its allowed range.
    Range,
}

/// Error raised when level data violates the schema.
///
/// None of these are recovered silently: loaders surface them to the caller
/// and the offending asset fails to load.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// Malformed TOML/XML.
    #[error("Failed to parse level data: {0}")]
    Parse(String),

    /// Dangling special-wave label or missing image asset.
    #[error("Unresolved reference: {0}")]
    Reference(String),

    /// Probability outside `[0, 1]`, non-positive duration, etc.
    #[error("Value out of range: {0}")]
    Range(String),

    /// Two tiles in the same tileset share an id.
    #[error("Duplicate tile id {0} in tileset")]
    DuplicateTileId(u32),
}

impl SchemaError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SchemaError::Parse(_) => ErrorKind::Parse,
            SchemaError::Reference(_) | SchemaError::DuplicateTileId(_) => ErrorKind::Reference,
            SchemaError::Range(_) => ErrorKind::Range,
        }
    }
}

/// Check that `value` is a finite probability in `[0, 1]`.
pub(crate) fn check_probability(what: &str, value: f32) -> Result<(), SchemaError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SchemaError::Range(format!(
            "probability of {what} is {value}, expected a value in [0, 1]"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_groups_duplicate_ids_with_references() {
        assert_eq!(SchemaError::DuplicateTileId(3).kind(), ErrorKind::Reference);
        assert_eq!(SchemaError::Parse("x".into()).kind(), ErrorKind::Parse);
        assert_eq!(SchemaError::Range("x".into()).kind(), ErrorKind::Range);
    }

    #[test]
    fn test_check_probability_bounds() {
        assert!(check_probability("a", 0.0).is_ok());
        assert!(check_probability("a", 1.0).is_ok());
        assert!(check_probability("a", 1.01).is_err());
        assert!(check_probability("a", -0.1).is_err());
        assert!(check_probability("a", f32::NAN).is_err());
    }
}
