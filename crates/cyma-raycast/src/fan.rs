use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// The set of rays cast from the light each frame: one central ray straight
/// down plus `count - 1` rays spread evenly in azimuth on a cone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RayFan {
    #[serde(alias = "rayCount")]
    pub count: usize,
    /// Cone half-angle from vertical, in radians.
    #[serde(alias = "rayConeAngle")]
    pub cone_angle: f32,
}

impl Default for RayFan {
    fn default() -> Self {
        Self { count: 7, cone_angle: 0.35 }
    }
}

impl RayFan {
    pub fn new(count: usize, cone_angle: f32) -> Self {
        Self { count, cone_angle }
    }

    /// Number of rays actually cast. Never less than one.
    pub fn ray_count(&self) -> usize {
        self.count.max(1)
    }

    /// Direction of ray `index`.
    pub fn direction(&self, index: usize) -> Vec3 {
        if index == 0 {
            return Vec3::NEG_Y;
        }
        let spread = (self.ray_count() - 1) as f32;
        let theta = TAU * (index - 1) as f32 / spread;
        let (sin_c, cos_c) = self.cone_angle.sin_cos();
        Vec3::new(sin_c * theta.cos(), -cos_c, sin_c * theta.sin()).normalize()
    }

    pub fn directions(&self) -> impl Iterator<Item = Vec3> + '_ {
        (0..self.ray_count()).map(move |i| self.direction(i))
    }
}
