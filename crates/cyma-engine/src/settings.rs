use serde::{Deserialize, Serialize};

/// Bloom post-processing values handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BloomSettings {
    pub enabled: bool,
    /// Range: 0.0..3.0
    pub strength: f32,
    /// Range: 0.0..1.0
    pub radius: f32,
    /// Range: 0.0..1.0
    pub threshold: f32,
}

impl Default for BloomSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            strength: 0.19,
            radius: 0.43,
            threshold: 0.07,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    Lowpass,
    Highpass,
    Bandpass,
    Notch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OscillatorType {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// Synth voice and master-chain values handed to the audio engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Seconds.
    pub attack: f32,
    /// Seconds.
    pub decay: f32,
    /// Fraction of peak gain. Range: 0.0..1.0
    pub sustain: f32,
    /// Seconds.
    pub release: f32,
    #[serde(alias = "peakGain")]
    pub peak_gain: f32,
    pub oscillator: OscillatorType,
    #[serde(alias = "filterEnabled")]
    pub filter_enabled: bool,
    #[serde(alias = "filterType")]
    pub filter_type: FilterType,
    /// Hz.
    #[serde(alias = "filterFrequency")]
    pub filter_frequency: f32,
    #[serde(alias = "filterQ")]
    pub filter_q: f32,
    /// Range: 0.0..1.0
    #[serde(alias = "masterVolume")]
    pub master_volume: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            attack: 0.02,
            decay: 0.16,
            sustain: 0.0,
            release: 0.0,
            peak_gain: 0.05,
            oscillator: OscillatorType::Sine,
            filter_enabled: true,
            filter_type: FilterType::Lowpass,
            filter_frequency: 1200.0,
            filter_q: 1.0,
            master_volume: 0.7,
        }
    }
}
