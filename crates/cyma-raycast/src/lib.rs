pub mod tile;
pub mod fan;
pub mod tracker;
pub mod caster;

pub use tile::{nearest_tile, tile_frequency, Tile, TileGrid, TileId};
pub use fan::RayFan;
pub use tracker::{diff, HitDiff, HitTracker, HotTileSet};
pub use caster::{FrameInput, FrameResult, RayCaster, RayPath};
