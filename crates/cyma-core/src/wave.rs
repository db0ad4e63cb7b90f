use serde::{Deserialize, Serialize};

/// Inputs the wave field reads for a single evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveParams {
    pub frequency: f32,
    pub amplitude: f32,
    pub time: f32,
}

impl WaveParams {
    pub fn new(frequency: f32, amplitude: f32, time: f32) -> Self {
        Self { frequency, amplitude, time }
    }
}

/// Standing-wave displacement field applied to the lens planes.
///
/// `height(x, y) = sin(x * f * kx + t) * cos(y * f * ky) * amplitude * ka`
///
/// The multipliers shape the visual character of the ripple and are not
/// exposed to the user. `radial_multiplier` and `theta_multiplier` are kept
/// for configuration parity with saved setups; the field does not read them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveField {
    pub freq_multiplier_x: f32,
    pub freq_multiplier_y: f32,
    pub radial_multiplier: f32,
    pub theta_multiplier: f32,
    pub amplitude_factor: f32,
}

impl Default for WaveField {
    fn default() -> Self {
        Self {
            freq_multiplier_x: 22.2,
            freq_multiplier_y: 22.2,
            radial_multiplier: 44.1,
            theta_multiplier: 4.0,
            amplitude_factor: 0.2,
        }
    }
}

impl WaveField {
    /// Displacement along the surface's local normal axis at `(x, y)`.
    pub fn height(&self, x: f32, y: f32, params: &WaveParams) -> f32 {
        let dx = x * params.frequency * self.freq_multiplier_x + params.time;
        let dy = y * params.frequency * self.freq_multiplier_y;
        dx.sin() * dy.cos() * params.amplitude * self.amplitude_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_is_deterministic() {
        let field = WaveField::default();
        let params = WaveParams::new(440.0, 1.0, 1.25);
        let a = field.height(0.37, -1.2, &params);
        let b = field.height(0.37, -1.2, &params);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_zero_amplitude_is_flat() {
        let field = WaveField::default();
        let params = WaveParams::new(440.0, 0.0, 3.0);
        for i in 0..20 {
            let x = i as f32 * 0.3 - 3.0;
            assert_eq!(field.height(x, x * 0.5, &params), 0.0);
        }
    }

    #[test]
    fn test_small_time_step_changes_height_continuously() {
        let field = WaveField::default();
        let x = 0.4;
        let y = 0.1;
        let mut prev = field.height(x, y, &WaveParams::new(2.0, 1.0, 0.0));
        for step in 1..200 {
            let t = step as f32 * 1e-3;
            let h = field.height(x, y, &WaveParams::new(2.0, 1.0, t));
            // |dh/dt| <= amplitude * ka, so a 1ms step moves at most 0.2e-3
            assert!((h - prev).abs() <= 0.2e-3 + 1e-6);
            prev = h;
        }
    }

    #[test]
    fn test_height_bounded_by_amplitude() {
        let field = WaveField::default();
        let params = WaveParams::new(7.0, 2.5, 0.9);
        let bound = 2.5 * field.amplitude_factor + 1e-6;
        for i in 0..100 {
            let x = i as f32 * 0.061 - 3.0;
            let y = 3.0 - i as f32 * 0.043;
            assert!(field.height(x, y, &params).abs() <= bound);
        }
    }

    #[test]
    fn test_reference_value() {
        let field = WaveField::default();
        let params = WaveParams::new(1.0, 1.0, 0.0);
        let x = std::f32::consts::FRAC_PI_2 / 22.2;
        // sin(pi/2) * cos(0) * 1 * 0.2
        assert!((field.height(x, 0.0, &params) - 0.2).abs() < 1e-5);
    }
}
