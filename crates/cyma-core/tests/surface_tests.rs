use cyma_core::{
    deform_optional, nearest_sample, refract, LensGeometry, LensParams, LensSurface, Ray,
    WaveField, AIR_INDEX,
};
use glam::Vec3;

// ── Helpers ──────────────────────────────────────────────────────

fn wavy_lens(time: f32) -> LensSurface {
    let params = LensParams {
        frequency: 0.3,
        amplitude: 1.0,
        time,
        ..LensParams::default()
    };
    let mut lens = LensSurface::new(&LensGeometry::default(), params);
    lens.deform(&WaveField::default());
    lens
}

fn is_unit(v: Vec3) -> bool {
    (v.length() - 1.0).abs() < 1e-4
}

// ── 1. Deformation ───────────────────────────────────────────────

#[test]
fn deformation_is_reproducible() {
    let a = wavy_lens(1.5);
    let b = wavy_lens(1.5);
    assert_eq!(a.positions(), b.positions());
    assert_eq!(a.normals(), b.normals());
}

#[test]
fn deformation_follows_time() {
    let a = wavy_lens(0.0);
    let b = wavy_lens(1.0);
    assert_ne!(a.positions(), b.positions());
}

#[test]
fn deform_optional_updates_present_lens() {
    let mut lens = LensSurface::new(&LensGeometry::default(), LensParams::default());
    lens.params.frequency = 0.3;
    deform_optional(Some(&mut lens), &WaveField::default());
    assert!(lens.positions().iter().any(|p| p.z != 0.0));
}

// ── 2. Sampling a deformed surface ───────────────────────────────

#[test]
fn sample_normals_are_unit_and_upward() {
    let lens = wavy_lens(0.4);
    for i in 0..20 {
        let x = i as f32 * 0.25 - 2.5;
        let ray = Ray::new(Vec3::new(x, 3.0, 0.5), Vec3::NEG_Y);
        let sample = nearest_sample(&lens, &ray, true).expect("lens should be hit");
        assert!(is_unit(sample.normal));
        assert!(sample.normal.y > 0.0);
    }
}

#[test]
fn sample_position_carries_displacement() {
    let lens = wavy_lens(0.4);
    let ray = Ray::new(Vec3::new(1.1, 3.0, 0.7), Vec3::NEG_Y);
    let sample = nearest_sample(&lens, &ray, true).unwrap();
    // World Y is the displaced local Z of that vertex.
    let local = lens.positions()[sample.index];
    assert!((sample.position.y - local.z).abs() < 1e-5);
}

// ── 3. Refraction through a deformed surface ─────────────────────

#[test]
fn refracted_rays_keep_travelling_down() {
    let lens = wavy_lens(2.0);
    for i in 0..20 {
        let z = i as f32 * 0.2 - 2.0;
        let ray = Ray::new(Vec3::new(0.0, 3.0, z), Vec3::NEG_Y);
        let sample = nearest_sample(&lens, &ray, true).unwrap();
        let out = refract(ray.direction, sample.normal, AIR_INDEX, 1.33)
            .expect("air into water never reflects totally");
        assert!(is_unit(out));
        assert!(out.y < 0.0);
    }
}
