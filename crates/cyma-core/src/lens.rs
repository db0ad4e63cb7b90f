use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, TAU};

use crate::wave::{WaveField, WaveParams};

/// Per-lens controls: wave shape, clock, optics and placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LensParams {
    pub frequency: f32,
    pub amplitude: f32,
    pub time: f32,
    pub speed: f32,
    #[serde(alias = "n")]
    pub refractive_index: f32,
    /// World Y of the lens plane.
    pub y: f32,
    pub bpm: f32,
    #[serde(alias = "bpmSyncEnabled")]
    pub bpm_sync: bool,
}

impl Default for LensParams {
    fn default() -> Self {
        Self {
            frequency: 440.0,
            amplitude: 1.0,
            time: 0.0,
            speed: 1.0,
            refractive_index: 1.33,
            y: 0.0,
            bpm: 120.0,
            bpm_sync: false,
        }
    }
}

impl LensParams {
    /// Defaults for the optional second lens, which hangs below the first.
    pub fn second_lens() -> Self {
        Self { y: -1.5, ..Self::default() }
    }

    pub fn wave(&self) -> WaveParams {
        WaveParams::new(self.frequency, self.amplitude, self.time)
    }

    /// Advance the wave clock by `delta` seconds.
    ///
    /// With BPM sync on, one beat is one full wave cycle (2*pi).
    pub fn advance(&mut self, delta: f32) {
        if self.bpm_sync {
            self.time += (self.bpm / 60.0) * TAU * delta;
        } else {
            self.time += delta * self.speed;
        }
    }
}

/// Plane dimensions and placement used when a lens is created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LensGeometry {
    pub width: f32,
    pub height: f32,
    pub segments: usize,
    pub position: [f32; 3],
    /// Euler XYZ rotation in radians.
    pub rotation: [f32; 3],
}

impl Default for LensGeometry {
    fn default() -> Self {
        Self {
            width: 6.0,
            height: 6.0,
            segments: 32,
            position: [0.0, 0.0, 0.0],
            rotation: [-FRAC_PI_2, 0.0, 0.0],
        }
    }
}

impl LensGeometry {
    pub fn rotation_quat(&self) -> Quat {
        Quat::from_euler(
            glam::EulerRot::XYZ,
            self.rotation[0],
            self.rotation[1],
            self.rotation[2],
        )
    }
}

/// A deformable lens plane.
///
/// Vertices are laid out row by row starting at the top edge of the local XY
/// plane; displacement happens along local Z. `base` is captured once at
/// construction and never written again.
#[derive(Debug, Clone)]
pub struct LensSurface {
    pub params: LensParams,
    pub position: Vec3,
    pub rotation: Quat,
    segments: usize,
    base: Vec<Vec3>,
    current: Vec<Vec3>,
    normals: Vec<Vec3>,
    indices: Vec<[u32; 3]>,
}

impl LensSurface {
    pub fn new(geometry: &LensGeometry, params: LensParams) -> Self {
        let segments = geometry.segments.max(1);
        let (base, indices) = plane_grid(geometry.width, geometry.height, segments);
        let position = Vec3::new(geometry.position[0], params.y, geometry.position[2]);

        let mut surface = Self {
            params,
            position,
            rotation: geometry.rotation_quat(),
            segments,
            current: base.clone(),
            normals: vec![Vec3::Z; base.len()],
            base,
            indices,
        };
        surface.compute_normals();
        surface
    }

    pub fn segments(&self) -> usize {
        self.segments
    }

    pub fn vertex_count(&self) -> usize {
        self.current.len()
    }

    pub fn base_positions(&self) -> &[Vec3] {
        &self.base
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.current
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn indices(&self) -> &[[u32; 3]] {
        &self.indices
    }

    /// Move the plane to the Y stored in its parameters.
    pub fn sync_height(&mut self) {
        self.position.y = self.params.y;
    }

    /// Displace every vertex by the wave field, then rebuild normals.
    pub fn deform(&mut self, field: &WaveField) {
        let wave = self.params.wave();
        for (current, base) in self.current.iter_mut().zip(&self.base) {
            current.x = base.x;
            current.y = base.y;
            current.z = field.height(base.x, base.y, &wave);
        }
        self.compute_normals();
    }

    /// Area-weighted vertex normals from the triangle list.
    pub fn compute_normals(&mut self) {
        for n in self.normals.iter_mut() {
            *n = Vec3::ZERO;
        }

        for tri in &self.indices {
            let [a, b, c] = tri.map(|i| i as usize);
            let pa = self.current[a];
            let pb = self.current[b];
            let pc = self.current[c];
            let face = (pc - pb).cross(pa - pb);
            self.normals[a] += face;
            self.normals[b] += face;
            self.normals[c] += face;
        }

        for n in self.normals.iter_mut() {
            *n = n.normalize_or_zero();
        }
    }

    pub fn world_position(&self, index: usize) -> Vec3 {
        self.position + self.rotation * self.current[index]
    }

    pub fn world_normal(&self, index: usize) -> Vec3 {
        (self.rotation * self.normals[index]).normalize_or_zero()
    }
}

/// Deform a lens that may not exist. Absent lenses are skipped.
pub fn deform_optional(surface: Option<&mut LensSurface>, field: &WaveField) {
    if let Some(surface) = surface {
        surface.deform(field);
    }
}

fn plane_grid(width: f32, height: f32, segments: usize) -> (Vec<Vec3>, Vec<[u32; 3]>) {
    let half_w = width / 2.0;
    let half_h = height / 2.0;
    let seg_w = width / segments as f32;
    let seg_h = height / segments as f32;
    let row = segments + 1;

    let mut vertices = Vec::with_capacity(row * row);
    for iy in 0..row {
        let y = iy as f32 * seg_h - half_h;
        for ix in 0..row {
            let x = ix as f32 * seg_w - half_w;
            vertices.push(Vec3::new(x, -y, 0.0));
        }
    }

    let mut indices = Vec::with_capacity(segments * segments * 2);
    for iy in 0..segments {
        for ix in 0..segments {
            let a = (ix + row * iy) as u32;
            let b = (ix + row * (iy + 1)) as u32;
            let c = (ix + 1 + row * (iy + 1)) as u32;
            let d = (ix + 1 + row * iy) as u32;
            indices.push([a, b, d]);
            indices.push([b, c, d]);
        }
    }

    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_lens() -> LensSurface {
        let params = LensParams { amplitude: 0.0, ..LensParams::default() };
        LensSurface::new(&LensGeometry::default(), params)
    }

    #[test]
    fn test_grid_sizes() {
        let lens = flat_lens();
        assert_eq!(lens.vertex_count(), 33 * 33);
        assert_eq!(lens.base_positions().len(), lens.positions().len());
        assert_eq!(lens.normals().len(), lens.positions().len());
        assert_eq!(lens.indices().len(), 32 * 32 * 2);
    }

    #[test]
    fn test_grid_starts_at_top_left() {
        let lens = flat_lens();
        let first = lens.base_positions()[0];
        assert!((first.x + 3.0).abs() < 1e-6);
        assert!((first.y - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_flat_normals_point_up_in_world() {
        let lens = flat_lens();
        for i in 0..lens.vertex_count() {
            assert!((lens.normals()[i] - Vec3::Z).length() < 1e-5);
            assert!((lens.world_normal(i) - Vec3::Y).length() < 1e-5);
        }
    }

    #[test]
    fn test_zero_amplitude_restores_base() {
        let mut lens = flat_lens();
        lens.params.amplitude = 1.0;
        lens.params.frequency = 3.0;
        lens.params.time = 0.7;
        lens.deform(&WaveField::default());
        assert!(lens.positions().iter().any(|p| p.z.abs() > 1e-3));

        lens.params.amplitude = 0.0;
        lens.deform(&WaveField::default());
        assert_eq!(lens.positions(), lens.base_positions());
        assert!((lens.normals()[100] - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_deform_recomputes_normals() {
        let mut lens = flat_lens();
        lens.params.amplitude = 1.0;
        lens.params.frequency = 0.2;
        lens.deform(&WaveField::default());
        assert!(lens.normals().iter().any(|n| (*n - Vec3::Z).length() > 1e-3));
        for n in lens.normals() {
            assert!((n.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_deform_keeps_xy() {
        let mut lens = flat_lens();
        lens.params.amplitude = 2.0;
        lens.deform(&WaveField::default());
        for (p, b) in lens.positions().iter().zip(lens.base_positions()) {
            assert_eq!(p.x, b.x);
            assert_eq!(p.y, b.y);
        }
    }

    #[test]
    fn test_world_position_maps_local_y_to_world_z() {
        let mut lens = flat_lens();
        lens.params.y = 1.0;
        lens.sync_height();
        let p = lens.world_position(0);
        assert!((p.x + 3.0).abs() < 1e-5);
        assert!((p.y - 1.0).abs() < 1e-5);
        assert!((p.z + 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_deform_optional_none_is_noop() {
        deform_optional(None, &WaveField::default());
    }

    #[test]
    fn test_advance_free_running() {
        let mut p = LensParams { speed: 2.0, ..LensParams::default() };
        p.advance(0.5);
        assert!((p.time - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_advance_bpm_sync() {
        let mut p = LensParams { bpm: 60.0, bpm_sync: true, ..LensParams::default() };
        p.advance(1.0);
        assert!((p.time - TAU).abs() < 1e-5);
    }
}
