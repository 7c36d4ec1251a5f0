//! Level file format.
//!
//! A level is a small JSON document holding the tile grid, the named trigger
//! volumes, the sprite sheet metadata and the NPCs to spawn. Tile and pixel
//! coordinates are y-up: row `0` is the bottom row of the map.
//!
//! ```json
//! {
//!   "tile_size": 16, "map_width": 40, "map_height": 15,
//!   "layers": [ { "name": "solid", "positions": [ { "x": 0, "y": 0 } ] } ],
//!   "triggers": [ { "name": "bird_nest_right", "x": 560, "y": 16, "width": 32, "height": 64 } ],
//!   "sprites": { "bird": { "tags": { "idle": 400 } } },
//!   "patrols": [ { "x": 80, "y": 16, "sprite": "bird" } ]
//! }
//! ```

use std::path::Path;

use log::info;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::PixelkinError;
use crate::resources::collisionworld::TerrainKind;
use crate::resources::spritesheetstore::SpriteSheet;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tileposition {
    pub x: u32,
    pub y: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tilelayer {
    pub name: String,
    pub positions: Vec<Tileposition>,
}

/// Named trigger rectangle in pixels; `(x, y)` is the bottom-left corner.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TriggerRect {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

fn default_patrol_width() -> f32 {
    28.0
}

fn default_patrol_height() -> f32 {
    24.0
}

fn default_nest_left() -> String {
    "bird_nest_left".to_string()
}

fn default_nest_right() -> String {
    "bird_nest_right".to_string()
}

fn default_idle_tag() -> String {
    "idle".to_string()
}

/// A patrolling flyer to spawn. Its spawn altitude becomes the altitude it
/// tries to hold while flying.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PatrolSpawn {
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_patrol_width")]
    pub width: f32,
    #[serde(default = "default_patrol_height")]
    pub height: f32,
    pub sprite: String,
    #[serde(default = "default_nest_left")]
    pub nest_left: String,
    #[serde(default = "default_nest_right")]
    pub nest_right: String,
    #[serde(default = "default_idle_tag")]
    pub wait_tag: String,
    #[serde(default = "default_idle_tag")]
    pub fly_tag: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Level {
    pub tile_size: u32,
    pub map_width: u32,
    pub map_height: u32,
    #[serde(default)]
    pub layers: Vec<Tilelayer>,
    #[serde(default)]
    pub triggers: Vec<TriggerRect>,
    #[serde(default)]
    pub sprites: FxHashMap<String, SpriteSheet>,
    #[serde(default)]
    pub patrols: Vec<PatrolSpawn>,
}

impl Level {
    pub fn from_json_str(json: &str) -> Result<Self, PixelkinError> {
        let level: Level = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    /// Read, parse and validate a level file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PixelkinError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| PixelkinError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let level = Self::from_json_str(&json)?;
        info!(
            "Loaded level {}: {}x{} tiles of {}px, {} triggers, {} patrols",
            path.display(),
            level.map_width,
            level.map_height,
            level.tile_size,
            level.triggers.len(),
            level.patrols.len()
        );
        Ok(level)
    }

    /// Check every cross reference so that spawning can never hit a hole.
    pub fn validate(&self) -> Result<(), PixelkinError> {
        for layer in &self.layers {
            if TerrainKind::from_layer_name(&layer.name).is_none() {
                return Err(PixelkinError::UnknownTerrainLayer(layer.name.clone()));
            }
            if let Some(tile) = layer
                .positions
                .iter()
                .find(|p| p.x >= self.map_width || p.y >= self.map_height)
            {
                return Err(PixelkinError::TileOutOfBounds {
                    layer: layer.name.clone(),
                    x: tile.x,
                    y: tile.y,
                });
            }
        }
        for patrol in &self.patrols {
            if !self.sprites.contains_key(&patrol.sprite) {
                return Err(PixelkinError::MissingSpriteSheet(patrol.sprite.clone()));
            }
            for nest in [&patrol.nest_left, &patrol.nest_right] {
                if !self.triggers.iter().any(|t| &t.name == nest) {
                    return Err(PixelkinError::MissingTrigger(nest.clone()));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVEL: &str = r#"{
        "tile_size": 16, "map_width": 10, "map_height": 5,
        "layers": [ { "name": "solid", "positions": [ { "x": 0, "y": 0 }, { "x": 1, "y": 0 } ] } ],
        "triggers": [
            { "name": "bird_nest_left", "x": 0, "y": 16, "width": 16, "height": 32 },
            { "name": "bird_nest_right", "x": 144, "y": 16, "width": 16, "height": 32 }
        ],
        "sprites": { "bird": { "tags": { "idle": 400 } } },
        "patrols": [ { "x": 40, "y": 16, "sprite": "bird" } ]
    }"#;

    #[test]
    fn test_parse_applies_patrol_defaults() {
        let level = Level::from_json_str(LEVEL).unwrap();
        let patrol = &level.patrols[0];
        assert_eq!(patrol.width, 28.0);
        assert_eq!(patrol.height, 24.0);
        assert_eq!(patrol.nest_right, "bird_nest_right");
        assert_eq!(patrol.fly_tag, "idle");
    }

    #[test]
    fn test_missing_sprite_sheet_fails_fast() {
        let json = LEVEL.replace(r#""sprite": "bird""#, r#""sprite": "owl""#);
        match Level::from_json_str(&json) {
            Err(PixelkinError::MissingSpriteSheet(key)) => assert_eq!(key, "owl"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_missing_trigger_fails_fast() {
        let json = LEVEL.replace("bird_nest_left", "nest_west");
        match Level::from_json_str(&json) {
            Err(PixelkinError::MissingTrigger(name)) => assert_eq!(name, "bird_nest_left"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_layer_and_bounds() {
        let json = LEVEL.replace(r#""name": "solid""#, r#""name": "lava""#);
        assert!(matches!(
            Level::from_json_str(&json),
            Err(PixelkinError::UnknownTerrainLayer(_))
        ));
        let json = LEVEL.replace(r#"{ "x": 1, "y": 0 }"#, r#"{ "x": 10, "y": 0 }"#);
        assert!(matches!(
            Level::from_json_str(&json),
            Err(PixelkinError::TileOutOfBounds { x: 10, .. })
        ));
    }
}
