use cyma_core::music::midi_to_hz;
use cyma_core::{GridConfig, NoteName, Scale};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable tile identifier. Valid until the grid is regenerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(pub u32);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tile#{}", self.0)
    }
}

/// A musical floor cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub id: TileId,
    pub position: Vec3,
    pub frequency: f32,
}

impl Tile {
    pub fn new(id: TileId, position: Vec3, frequency: f32) -> Self {
        Self { id, position, frequency }
    }
}

/// Nearest tile to `point` measured in the X-Z plane. First minimum wins.
/// A non-finite point matches nothing.
pub fn nearest_tile(tiles: &[Tile], point: Vec3) -> Option<&Tile> {
    if !point.x.is_finite() || !point.z.is_finite() {
        return None;
    }
    let mut best: Option<(&Tile, f32)> = None;
    for tile in tiles {
        let dx = tile.position.x - point.x;
        let dz = tile.position.z - point.z;
        let dist = dx * dx + dz * dz;
        if best.map_or(true, |(_, d)| dist < d) {
            best = Some((tile, dist));
        }
    }
    best.map(|(tile, _)| tile)
}

/// Frequency of grid cell `(gx, gz)`.
///
/// The scale degree walks diagonally across the grid while the octave climbs
/// every `4 * scale length` cells counted from the far row. Cells outside the
/// grid are clamped onto its last row and column.
pub fn tile_frequency(gx: usize, gz: usize, grid_div: usize, intervals: &[i32], base_frequency: f32) -> f32 {
    if intervals.is_empty() {
        return base_frequency;
    }
    let grid_div = grid_div.max(1);
    let gx = gx.min(grid_div - 1);
    let gz = gz.min(grid_div - 1);
    let len = intervals.len();
    let note_index = (gx + gz * 2) % len;
    let octave = ((gx + (grid_div - 1 - gz) * grid_div) / (len * 4)) % 4;
    let semitones = 12 * octave as i32 + intervals[note_index];
    base_frequency * 2.0f32.powf(semitones as f32 / 12.0)
}

/// The full floor: `grid_div x grid_div` tiles centred on the origin.
#[derive(Debug, Clone)]
pub struct TileGrid {
    tiles: Vec<Tile>,
    config: GridConfig,
    root: NoteName,
    scale: Scale,
}

impl TileGrid {
    pub fn generate(config: GridConfig, root: NoteName, scale: Scale) -> Self {
        let div = config.grid_div.max(1);
        let tile_size = config.grid_size / div as f32;
        let origin = -config.grid_size / 2.0 + tile_size / 2.0;
        let base_frequency = midi_to_hz(root.midi(config.base_octave));

        let mut tiles = Vec::with_capacity(div * div);
        for gx in 0..div {
            for gz in 0..div {
                let position = Vec3::new(
                    origin + gx as f32 * tile_size,
                    config.ground_y,
                    origin + gz as f32 * tile_size,
                );
                let frequency = tile_frequency(gx, gz, div, scale.intervals(), base_frequency);
                tiles.push(Tile::new(TileId((gx * div + gz) as u32), position, frequency));
            }
        }

        Self { tiles, config, root, scale }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.0 as usize).filter(|t| t.id == id)
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn root(&self) -> NoteName {
        self.root
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    pub fn tile_size(&self) -> f32 {
        self.config.grid_size / self.config.grid_div.max(1) as f32
    }
}
