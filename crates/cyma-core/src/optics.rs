use glam::Vec3;

/// Refractive index of the medium between the light, the lenses and the floor.
pub const AIR_INDEX: f32 = 1.0;

/// A ray with a unit direction. Built fresh for every fan member each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction: direction.normalize_or_zero() }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Parameter at which the ray crosses the horizontal plane `y = plane_y`.
    ///
    /// `None` when the ray runs parallel to the plane or the result is not finite.
    pub fn plane_parameter(&self, plane_y: f32) -> Option<f32> {
        if self.direction.y == 0.0 || !self.direction.y.is_finite() {
            return None;
        }
        let t = (plane_y - self.origin.y) / self.direction.y;
        t.is_finite().then_some(t)
    }
}

/// Bend `incident` through a boundary from index `n1` into index `n2`.
///
/// `normal` must face against the incident ray. Returns `None` on total
/// internal reflection.
pub fn refract(incident: Vec3, normal: Vec3, n1: f32, n2: f32) -> Option<Vec3> {
    let n = n1 / n2;
    let cos_i = -normal.dot(incident);
    let sin2_t = n * n * (1.0 - cos_i * cos_i);
    if sin2_t > 1.0 {
        return None;
    }
    let cos_t = (1.0 - sin2_t).sqrt();
    Some((incident * n + normal * (n * cos_i - cos_t)).normalize())
}
