//! Construction-time errors.
//!
//! Nothing in the per-frame path returns an error: missing durations,
//! untouched triggers and exhausted pull-out searches all degrade silently.
//! Only building a level or loading configuration can fail, and it fails
//! before the first frame runs.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PixelkinError {
    /// A file could not be read or written.
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A level file is not valid JSON for the level format.
    #[error("Failed to parse level: {0}")]
    Parse(#[from] serde_json::Error),

    /// The INI configuration could not be loaded or saved.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Layer '{0}' is not a terrain layer (solid, platform, water)")]
    UnknownTerrainLayer(String),

    #[error("Tile ({x}, {y}) in layer '{layer}' is outside the map")]
    TileOutOfBounds { layer: String, x: u32, y: u32 },

    /// An entity refers to a sprite sheet the level does not declare.
    #[error("Sprite sheet '{0}' is not declared by the level")]
    MissingSpriteSheet(String),

    /// A behavior refers to a trigger volume the level does not declare.
    #[error("Trigger volume '{0}' is not declared by the level")]
    MissingTrigger(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_names_the_culprit() {
        let err = PixelkinError::TileOutOfBounds {
            layer: "solid".to_string(),
            x: 40,
            y: 2,
        };
        assert_eq!(err.to_string(), "Tile (40, 2) in layer 'solid' is outside the map");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_parse_error_converts_and_keeps_source() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: PixelkinError = json_err.into();
        assert!(matches!(err, PixelkinError::Parse(_)));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_io_error_keeps_source() {
        let err = PixelkinError::Io {
            path: PathBuf::from("levels/missing.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().starts_with("Failed to access levels/missing.json"));
        assert!(err.source().is_some());
    }
}
