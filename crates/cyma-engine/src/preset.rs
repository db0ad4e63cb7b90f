use cyma_core::LensParams;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io;
use std::path::Path;

use crate::midi::MidiSettings;
use crate::scene::Controls;
use crate::settings::{AudioSettings, BloomSettings};
use crate::zap::ZapSettings;

pub const PRESET_VERSION: u32 = 1;

/// Lens keys that older files keep flat inside `params`.
const FLAT_LENS_KEYS: &[&str] = &[
    "frequency",
    "amplitude",
    "time",
    "y",
    "n",
    "speed",
    "bpm",
    "bpmSyncEnabled",
];
/// Ray fan keys that older files keep flat inside `params`.
const FLAT_FAN_KEYS: &[&str] = &["rayCount", "rayConeAngle"];

fn default_version() -> u32 {
    PRESET_VERSION
}

/// On-disk preset format.
///
/// Every section is optional; a section missing from the file leaves the
/// scene's current value alone when the preset is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub params: Option<Controls>,
    #[serde(default)]
    pub lens2_enabled: Option<bool>,
    #[serde(default, alias = "lens2Params")]
    pub lens2_params: Option<LensParams>,
    #[serde(default)]
    pub light_position: Option<[f32; 3]>,
    #[serde(default, alias = "bloomParams")]
    pub bloom: Option<BloomSettings>,
    #[serde(default)]
    pub audio: Option<AudioSettings>,
    #[serde(default)]
    pub midi: Option<MidiSettings>,
    #[serde(default, alias = "tileZap")]
    pub tile_zap: Option<ZapSettings>,
}

impl Default for Preset {
    fn default() -> Self {
        Self {
            version: PRESET_VERSION,
            params: None,
            lens2_enabled: None,
            lens2_params: None,
            light_position: None,
            bloom: None,
            audio: None,
            midi: None,
            tile_zap: None,
        }
    }
}

impl Preset {
    /// True when no section is present.
    pub fn is_empty(&self) -> bool {
        self.params.is_none()
            && self.lens2_enabled.is_none()
            && self.lens2_params.is_none()
            && self.light_position.is_none()
            && self.bloom.is_none()
            && self.audio.is_none()
            && self.midi.is_none()
            && self.tile_zap.is_none()
    }
}

/// Move flat lens and ray fan keys in `params` into `params.lens` and
/// `params.fan`. Already nested files are left alone.
fn nest_flat_params(value: &mut Value) {
    let Some(params) = value.get_mut("params").and_then(Value::as_object_mut) else {
        return;
    };
    for (section, keys) in [("lens", FLAT_LENS_KEYS), ("fan", FLAT_FAN_KEYS)] {
        if params.contains_key(section) {
            continue;
        }
        let moved: Map<String, Value> = keys
            .iter()
            .filter_map(|key| params.remove(*key).map(|v| (key.to_string(), v)))
            .collect();
        if !moved.is_empty() {
            params.insert(section.to_string(), Value::Object(moved));
        }
    }
}

pub fn preset_to_json(preset: &Preset) -> io::Result<String> {
    serde_json::to_string_pretty(preset).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

pub fn preset_from_json(json: &str) -> io::Result<Preset> {
    let mut value: Value =
        serde_json::from_str(json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    nest_flat_params(&mut value);
    let has_keys = value.as_object().is_some_and(|o| !o.is_empty());
    let preset: Preset =
        serde_json::from_value(value).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    if has_keys && preset.is_empty() {
        log::warn!("preset has no recognised sections, nothing will be applied");
    }
    if preset.version > PRESET_VERSION {
        log::warn!("preset version {} is newer than {PRESET_VERSION}", preset.version);
    }
    Ok(preset)
}

/// Save a preset to disk as JSON.
pub fn save_preset(path: &Path, preset: &Preset) -> io::Result<()> {
    let json = preset_to_json(preset)?;
    std::fs::write(path, json)?;
    log::info!("saved preset to {}", path.display());
    Ok(())
}

/// Load a preset from disk.
pub fn load_preset(path: &Path) -> io::Result<Preset> {
    let json = std::fs::read_to_string(path)?;
    let preset = preset_from_json(&json)?;
    log::info!("loaded preset from {}", path.display());
    Ok(preset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_empty_preset() {
        let preset = preset_from_json("{}").unwrap();
        assert_eq!(preset, Preset::default());
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let preset = preset_from_json(r#"{"bloom": {"strength": 1.5}, "params": {"scale": "blues"}}"#).unwrap();
        let bloom = preset.bloom.unwrap();
        assert_eq!(bloom.strength, 1.5);
        assert_eq!(bloom.radius, 0.43);
        let params = preset.params.unwrap();
        assert_eq!(params.scale, cyma_core::Scale::Blues);
        assert_eq!(params.lens.refractive_index, 1.33);
        assert!(preset.audio.is_none());
    }

    #[test]
    fn test_malformed_json_is_invalid_data() {
        let err = preset_from_json("{ not json").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_camel_case_file_layout() {
        let json = r#"{
            "params": {
                "frequency": 220, "n": 1.5, "bpmSyncEnabled": true,
                "rayCount": 12, "rayConeAngle": 0.5,
                "chordMagnetEnabled": true, "chordMagnetStrength": 0.5,
                "rootNote": "A", "scale": "major"
            },
            "lens2Params": { "y": -1.0, "n": 1.1 },
            "bloomParams": { "strength": 0.8 },
            "audio": { "filterType": "highpass", "masterVolume": 0.4 },
            "midi": { "enabled": true, "outputId": null, "channel": 4 },
            "tileZap": { "peakIntensity": 4.0 }
        }"#;
        let preset = preset_from_json(json).unwrap();
        let params = preset.params.unwrap();
        assert_eq!(params.lens.frequency, 220.0);
        assert_eq!(params.lens.refractive_index, 1.5);
        assert!(params.lens.bpm_sync);
        assert_eq!(params.fan.count, 12);
        assert_eq!(params.fan.cone_angle, 0.5);
        assert!(params.chord_magnet_enabled);
        assert_eq!(params.chord_magnet_strength, 0.5);
        assert_eq!(params.root_note, cyma_core::NoteName::A);
        assert_eq!(params.scale, cyma_core::Scale::Major);

        let lens2 = preset.lens2_params.unwrap();
        assert_eq!(lens2.y, -1.0);
        assert_eq!(lens2.refractive_index, 1.1);
        assert_eq!(preset.bloom.unwrap().strength, 0.8);
        let audio = preset.audio.unwrap();
        assert_eq!(audio.filter_type, crate::settings::FilterType::Highpass);
        assert_eq!(audio.master_volume, 0.4);
        assert_eq!(preset.midi.unwrap().channel, 4);
        assert_eq!(preset.tile_zap.unwrap().peak_intensity, 4.0);
    }

    #[test]
    fn test_unrecognised_sections_leave_preset_empty() {
        let preset = preset_from_json(r#"{"something": {"else": 1}}"#).unwrap();
        assert!(preset.is_empty());
    }

    #[test]
    fn test_round_trip_through_json() {
        let preset = Preset {
            lens2_enabled: Some(true),
            lens2_params: Some(LensParams { frequency: 880.0, ..LensParams::second_lens() }),
            midi: Some(MidiSettings { enabled: true, channel: 10, velocity: 64 }),
            ..Preset::default()
        };
        let json = preset_to_json(&preset).unwrap();
        assert_eq!(preset_from_json(&json).unwrap(), preset);
    }
}
