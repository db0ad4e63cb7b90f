use cyma_core::{nearest_sample, refract, LensSurface, Ray, AIR_INDEX};
use glam::Vec3;

use crate::fan::RayFan;
use crate::tile::{nearest_tile, Tile, TileId};
use crate::tracker::{HitTracker, HotTileSet};

/// Everything one raycast pass reads.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    pub light: Vec3,
    pub lens1: &'a LensSurface,
    pub lens2: Option<&'a LensSurface>,
    pub floor_y: f32,
    pub tiles: &'a [Tile],
    pub fan: RayFan,
}

/// Polyline of one ray for the renderer: light, lens hits, then the floor hit
/// when there is one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RayPath {
    pub points: Vec<Vec3>,
    pub floor_hit: Option<Vec3>,
    pub tile: Option<TileId>,
}

impl RayPath {
    pub fn reached_floor(&self) -> bool {
        self.floor_hit.is_some()
    }
}

/// Output of one raycast pass.
#[derive(Debug, Clone, Default)]
pub struct FrameResult {
    pub newly_hot: Vec<TileId>,
    pub newly_dead: Vec<TileId>,
    pub hot: HotTileSet,
    pub paths: Vec<RayPath>,
}

/// Casts the ray fan through the lenses onto the floor and tracks which tiles
/// change state between frames.
#[derive(Debug, Clone)]
pub struct RayCaster {
    tracker: HitTracker,
    /// Sample a lens even when its plane lies behind the ray origin.
    pub look_behind: bool,
}

impl Default for RayCaster {
    fn default() -> Self {
        Self { tracker: HitTracker::new(), look_behind: true }
    }
}

impl RayCaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_look_behind(mut self, look_behind: bool) -> Self {
        self.look_behind = look_behind;
        self
    }

    pub fn tracker(&self) -> &HitTracker {
        &self.tracker
    }

    /// Drop the hot-tile history, returning the tiles that were hot.
    pub fn reset(&mut self) -> Vec<TileId> {
        self.tracker.reset()
    }

    pub fn cast_frame(&mut self, input: &FrameInput) -> FrameResult {
        let mut hot = HotTileSet::new();
        let mut paths = Vec::with_capacity(input.fan.ray_count());

        for (i, direction) in input.fan.directions().enumerate() {
            match self.trace_ray(input, direction) {
                Some(path) => {
                    if let Some(tile) = path.tile {
                        hot.insert(tile);
                    }
                    paths.push(path);
                }
                None => log::trace!("ray {i} dropped"),
            }
        }

        let diff = self.tracker.update(hot.clone());
        for id in &diff.newly_hot {
            log::debug!("{id} hot");
        }
        for id in &diff.newly_dead {
            log::debug!("{id} dead");
        }

        FrameResult {
            newly_hot: diff.newly_hot,
            newly_dead: diff.newly_dead,
            hot,
            paths,
        }
    }

    /// Follow one ray from the light through the lenses to the floor.
    ///
    /// `None` means the ray is dropped for this frame: it missed lens 1 or was
    /// totally internally reflected. Lens 2 is treated as bordered by air on
    /// both faces.
    pub fn trace_ray(&self, input: &FrameInput, direction: Vec3) -> Option<RayPath> {
        let ray = Ray::new(input.light, direction);
        let mut points = vec![ray.origin];

        let hit1 = nearest_sample(input.lens1, &ray, self.look_behind)?;
        points.push(hit1.position);
        let dir1 = refract(
            ray.direction,
            hit1.normal,
            AIR_INDEX,
            input.lens1.params.refractive_index,
        )?;
        let mut exit = Ray::new(hit1.position, dir1);

        if let Some(lens2) = input.lens2 {
            let Some(hit2) = nearest_sample(lens2, &exit, self.look_behind) else {
                return Some(RayPath { points, floor_hit: None, tile: None });
            };
            points.push(hit2.position);
            let dir2 = refract(exit.direction, hit2.normal, AIR_INDEX, lens2.params.refractive_index)?;
            exit = Ray::new(hit2.position, dir2);
        }

        let floor_hit = exit
            .plane_parameter(input.floor_y)
            .filter(|t| *t > 0.0)
            .map(|t| exit.at(t));
        let tile = floor_hit.and_then(|hit| {
            points.push(hit);
            nearest_tile(input.tiles, hit).map(|tile| tile.id)
        });

        Some(RayPath { points, floor_hit, tile })
    }
}
