//! Sprite sheet metadata registry.
//!
//! Sheets are registered once at level load and never mutated by systems.
//! The only metadata the engine needs from a sheet is the total duration of
//! each animation tag in milliseconds; frames and pixels belong to the
//! renderer.

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Tag durations of one sprite sheet, in milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpriteSheet {
    pub tags: FxHashMap<String, f32>,
}

impl SpriteSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tag(mut self, tag: impl Into<String>, duration_ms: f32) -> Self {
        self.tags.insert(tag.into(), duration_ms);
        self
    }

    /// Duration of a tag, or `None` when the sheet has no such tag.
    pub fn duration(&self, tag: &str) -> Option<f32> {
        self.tags.get(tag).copied()
    }
}

/// Central registry of sprite sheets keyed by string IDs.
#[derive(Resource, Debug, Default)]
pub struct SpriteSheetStore {
    pub sheets: FxHashMap<String, SpriteSheet>,
}

impl SpriteSheetStore {
    pub fn insert(&mut self, key: impl Into<String>, sheet: SpriteSheet) {
        self.sheets.insert(key.into(), sheet);
    }

    pub fn get(&self, key: &str) -> Option<&SpriteSheet> {
        self.sheets.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.sheets.contains_key(key)
    }

    pub fn duration(&self, key: &str, tag: &str) -> Option<f32> {
        self.get(key).and_then(|sheet| sheet.duration(tag))
    }
}
