//! Tile-grid implementation of [`CollisionWorld`].
//!
//! The grid is y-up: tile `(col, row)` covers the pixels
//! `[col * tile_size, (col + 1) * tile_size)` horizontally and
//! `[row * tile_size, (row + 1) * tile_size)` vertically. Anything outside
//! the map is open air.
//!
//! Besides tiles the world can hold [`SolidBody`] rectangles owned by an
//! entity (crates, doors, lifts). They block like terrain of their kind,
//! except for queries that list their owner in `ignore_entities`.

use std::sync::Arc;

use bevy_ecs::prelude::{Entity, Resource};
use glam::Vec2;

use crate::error::PixelkinError;
use crate::resources::collisionworld::{CollisionWorld, TerrainKind, TriggerHits};
use crate::resources::level::Level;

/// Axis-aligned rectangle in pixels, `min` inclusive and `max` exclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x < self.max.x && point.y >= self.min.y && point.y < self.max.y
    }

    pub fn overlaps(&self, min: Vec2, max: Vec2) -> bool {
        self.min.x < max.x && self.max.x > min.x && self.min.y < max.y && self.max.y > min.y
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TriggerVolume {
    pub name: Arc<str>,
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolidBody {
    pub owner: Entity,
    pub rect: Rect,
    pub kind: TerrainKind,
}

#[derive(Resource, Debug, Clone)]
pub struct TileWorld {
    tile_size: f32,
    columns: u32,
    rows: u32,
    tiles: Vec<Option<TerrainKind>>,
    solids: Vec<SolidBody>,
    triggers: Vec<TriggerVolume>,
}

impl TileWorld {
    /// Empty world of `columns` x `rows` tiles.
    pub fn new(tile_size: u32, columns: u32, rows: u32) -> Self {
        Self {
            tile_size: tile_size.max(1) as f32,
            columns,
            rows,
            tiles: vec![None; (columns as usize) * (rows as usize)],
            solids: Vec::new(),
            triggers: Vec::new(),
        }
    }

    /// Build the world geometry and trigger volumes of a level.
    pub fn from_level(level: &Level) -> Result<Self, PixelkinError> {
        let mut world = Self::new(level.tile_size, level.map_width, level.map_height);
        for layer in &level.layers {
            let kind = TerrainKind::from_layer_name(&layer.name)
                .ok_or_else(|| PixelkinError::UnknownTerrainLayer(layer.name.clone()))?;
            for tile in &layer.positions {
                if !world.set_tile(tile.x, tile.y, Some(kind)) {
                    return Err(PixelkinError::TileOutOfBounds {
                        layer: layer.name.clone(),
                        x: tile.x,
                        y: tile.y,
                    });
                }
            }
        }
        for trigger in &level.triggers {
            world.add_trigger(
                trigger.name.as_str(),
                Rect::new(trigger.x, trigger.y, trigger.width, trigger.height),
            );
        }
        Ok(world)
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Set a tile. Returns false when the coordinates are outside the map.
    pub fn set_tile(&mut self, col: u32, row: u32, kind: Option<TerrainKind>) -> bool {
        if col >= self.columns || row >= self.rows {
            return false;
        }
        let index = (row * self.columns + col) as usize;
        self.tiles[index] = kind;
        true
    }

    /// Fill a rectangle of tiles, clipped to the map.
    pub fn fill(&mut self, col: u32, row: u32, width: u32, height: u32, kind: TerrainKind) {
        for r in row..row.saturating_add(height) {
            for c in col..col.saturating_add(width) {
                self.set_tile(c, r, Some(kind));
            }
        }
    }

    pub fn add_trigger(&mut self, name: impl Into<Arc<str>>, rect: Rect) {
        self.triggers.push(TriggerVolume {
            name: name.into(),
            rect,
        });
    }

    pub fn add_solid(&mut self, owner: Entity, rect: Rect, kind: TerrainKind) {
        self.solids.push(SolidBody { owner, rect, kind });
    }

    /// Remove every solid body owned by `owner`.
    pub fn remove_solids(&mut self, owner: Entity) {
        self.solids.retain(|solid| solid.owner != owner);
    }

    pub fn triggers(&self) -> &[TriggerVolume] {
        &self.triggers
    }

    pub fn has_trigger(&self, name: &str) -> bool {
        self.triggers.iter().any(|t| &*t.name == name)
    }

    /// Terrain kind of the tile containing the pixel, if any.
    pub fn tile_at(&self, x: f32, y: f32) -> Option<TerrainKind> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let col = (x / self.tile_size).floor() as u32;
        let row = (y / self.tile_size).floor() as u32;
        if col >= self.columns || row >= self.rows {
            return None;
        }
        self.tiles[(row * self.columns + col) as usize]
    }
}

impl CollisionWorld for TileWorld {
    fn height(&self) -> f32 {
        self.rows as f32 * self.tile_size
    }

    fn width(&self) -> f32 {
        self.columns as f32 * self.tile_size
    }

    fn collides_at(
        &self,
        x: f32,
        y: f32,
        ignore_entities: &[Entity],
        ignore: &[TerrainKind],
    ) -> bool {
        if let Some(kind) = self.tile_at(x, y) {
            if !ignore.contains(&kind) {
                return true;
            }
        }
        let point = Vec2::new(x, y);
        self.solids.iter().any(|solid| {
            !ignore_entities.contains(&solid.owner)
                && !ignore.contains(&solid.kind)
                && solid.rect.contains(point)
        })
    }

    fn triggers_at(&self, min: Vec2, max: Vec2) -> TriggerHits {
        self.triggers
            .iter()
            .filter(|t| t.rect.overlaps(min, max))
            .map(|t| t.name.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::world::World;

    fn floor_world() -> TileWorld {
        // 10 x 5 tiles of 16px, solid bottom row, water at column 5 row 1,
        // platform at column 7 row 2.
        let mut world = TileWorld::new(16, 10, 5);
        world.fill(0, 0, 10, 1, TerrainKind::Solid);
        world.set_tile(5, 1, Some(TerrainKind::Water));
        world.set_tile(7, 2, Some(TerrainKind::Platform));
        world
    }

    #[test]
    fn test_dimensions() {
        let world = floor_world();
        assert_eq!(world.width(), 160.0);
        assert_eq!(world.height(), 80.0);
    }

    #[test]
    fn test_tile_lookup_is_y_up() {
        let world = floor_world();
        assert_eq!(world.tile_at(3.0, 15.9), Some(TerrainKind::Solid));
        assert_eq!(world.tile_at(3.0, 16.0), None);
        assert_eq!(world.tile_at(-1.0, 5.0), None);
        assert_eq!(world.tile_at(500.0, 5.0), None);
    }

    #[test]
    fn test_ignored_kinds_do_not_collide() {
        let world = floor_world();
        assert!(world.collides_at(85.0, 20.0, &[], &[]));
        assert!(!world.collides_at(85.0, 20.0, &[], &[TerrainKind::Water]));
        assert!(world.collides_at(115.0, 40.0, &[], &[TerrainKind::Water]));
        assert!(!world.collides_at(
            115.0,
            40.0,
            &[],
            &[TerrainKind::Platform, TerrainKind::Water]
        ));
    }

    #[test]
    fn test_solid_bodies_respect_ignored_owner() {
        let mut ecs = World::new();
        let owner = ecs.spawn_empty().id();
        let other = ecs.spawn_empty().id();
        let mut world = floor_world();
        world.add_solid(owner, Rect::new(40.0, 16.0, 16.0, 16.0), TerrainKind::Solid);
        assert!(world.collides_at(45.0, 20.0, &[other], &[]));
        assert!(!world.collides_at(45.0, 20.0, &[owner], &[]));
        world.remove_solids(owner);
        assert!(!world.collides_at(45.0, 20.0, &[other], &[]));
    }

    #[test]
    fn test_triggers_at() {
        let mut world = floor_world();
        world.add_trigger("nest", Rect::new(100.0, 16.0, 20.0, 20.0));
        let hits = world.triggers_at(Vec2::new(90.0, 16.0), Vec2::new(101.0, 30.0));
        assert_eq!(hits.len(), 1);
        assert_eq!(&*hits[0], "nest");
        assert!(world
            .triggers_at(Vec2::new(0.0, 16.0), Vec2::new(10.0, 30.0))
            .is_empty());
        assert!(world.has_trigger("nest"));
    }
}
