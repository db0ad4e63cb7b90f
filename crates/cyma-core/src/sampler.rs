use glam::Vec3;

use crate::lens::LensSurface;
use crate::optics::Ray;

/// The surface vertex standing in for a ray/lens intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSample {
    pub index: usize,
    pub position: Vec3,
    pub normal: Vec3,
}

/// Find the lens vertex nearest (in X-Z) to where `ray` crosses the lens plane.
///
/// The crossing is taken against the plane at the lens's world Y, ignoring the
/// wave displacement. With `look_behind` set, a plane behind the ray origin
/// still yields a sample; otherwise it is a miss. A non-finite crossing point
/// is always a miss.
pub fn nearest_sample(surface: &LensSurface, ray: &Ray, look_behind: bool) -> Option<SurfaceSample> {
    let t = ray.plane_parameter(surface.position.y)?;
    if !look_behind && t <= 0.0 {
        return None;
    }
    let target = ray.at(t);
    if !target.is_finite() {
        return None;
    }

    let mut best: Option<(usize, f32)> = None;
    for i in 0..surface.vertex_count() {
        let world = surface.world_position(i);
        let dx = world.x - target.x;
        let dz = world.z - target.z;
        let dist = dx * dx + dz * dz;
        if best.map_or(true, |(_, d)| dist < d) {
            best = Some((i, dist));
        }
    }

    best.map(|(index, _)| SurfaceSample {
        index,
        position: surface.world_position(index),
        normal: surface.world_normal(index),
    })
}
