use cyma_raycast::TileId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Base tile opacity when no zap is running.
pub const BASE_OPACITY: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZapSettings {
    /// Seconds a zap stays visible.
    pub duration: f32,
    /// Colour multiplier at the moment a tile is hit.
    #[serde(alias = "peakIntensity")]
    pub peak_intensity: f32,
}

impl Default for ZapSettings {
    fn default() -> Self {
        Self { duration: 0.4, peak_intensity: 10.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZapRecord {
    pub start_time: f32,
    pub frequency: f32,
}

/// What the renderer needs to draw a zapped tile this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZapState {
    pub tile: TileId,
    pub intensity: f32,
    pub opacity: f32,
}

/// Visual decay of recently triggered tiles.
#[derive(Debug, Clone, Default)]
pub struct ZapTracker {
    pub settings: ZapSettings,
    zaps: BTreeMap<TileId, ZapRecord>,
}

impl ZapTracker {
    pub fn new(settings: ZapSettings) -> Self {
        Self { settings, zaps: BTreeMap::new() }
    }

    /// Start (or restart) a zap on `tile` at time `now`.
    pub fn start(&mut self, tile: TileId, now: f32, frequency: f32) {
        self.zaps.insert(tile, ZapRecord { start_time: now, frequency });
    }

    pub fn get(&self, tile: TileId) -> Option<&ZapRecord> {
        self.zaps.get(&tile)
    }

    pub fn len(&self) -> usize {
        self.zaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zaps.is_empty()
    }

    pub fn clear(&mut self) {
        self.zaps.clear();
    }

    /// Current look of every live zap; zaps older than the duration are removed.
    pub fn update(&mut self, now: f32) -> Vec<ZapState> {
        let settings = self.settings;
        self.zaps.retain(|_, zap| now - zap.start_time < settings.duration);
        self.zaps
            .iter()
            .map(|(&tile, zap)| {
                let (intensity, opacity) = zap_curve(&settings, now - zap.start_time);
                ZapState { tile, intensity, opacity }
            })
            .collect()
    }
}

/// Ease-out decay from `peak_intensity` to 1 over the zap duration.
pub fn zap_curve(settings: &ZapSettings, elapsed: f32) -> (f32, f32) {
    if settings.duration <= 0.0 || elapsed >= settings.duration {
        return (1.0, BASE_OPACITY);
    }
    let progress = (elapsed / settings.duration).max(0.0);
    let eased = 1.0 - progress.sqrt();
    let intensity = 1.0 + (settings.peak_intensity - 1.0) * eased;
    let opacity = BASE_OPACITY + 0.4 * eased;
    (intensity, opacity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_endpoints() {
        let settings = ZapSettings::default();
        let (i0, o0) = zap_curve(&settings, 0.0);
        assert!((i0 - 10.0).abs() < 1e-6);
        assert!((o0 - 0.9).abs() < 1e-6);
        assert_eq!(zap_curve(&settings, 0.4), (1.0, BASE_OPACITY));
    }

    #[test]
    fn test_curve_is_ease_out() {
        let settings = ZapSettings::default();
        // A quarter of the way in, sqrt(0.25) = 0.5 of the decay is done.
        let (i, _) = zap_curve(&settings, 0.1);
        assert!((i - 5.5).abs() < 1e-4);
    }

    #[test]
    fn test_tracker_expires_zaps() {
        let mut zaps = ZapTracker::new(ZapSettings::default());
        zaps.start(TileId(1), 0.0, 220.0);
        zaps.start(TileId(2), 0.3, 330.0);
        let states = zaps.update(0.35);
        assert_eq!(states.len(), 2);
        let states = zaps.update(0.5);
        assert_eq!(states.len(), 1);
        assert_eq!(states[0].tile, TileId(2));
        assert!(zaps.get(TileId(1)).is_none());
        zaps.update(1.0);
        assert!(zaps.is_empty());
    }

    #[test]
    fn test_restart_resets_start_time() {
        let mut zaps = ZapTracker::new(ZapSettings::default());
        zaps.start(TileId(1), 0.0, 220.0);
        zaps.start(TileId(1), 0.35, 220.0);
        assert_eq!(zaps.update(0.5).len(), 1);
    }
}
