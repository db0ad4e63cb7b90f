use serde::{Deserialize, Serialize};
use std::fmt;

/// Octave used for the root when building scale frequency tables.
pub const SCALE_ROOT_OCTAVE: i32 = 4;

/// Convert a MIDI note number to Hz (A4 = 69 = 440 Hz).
pub fn midi_to_hz(note: i32) -> f32 {
    440.0 * 2.0f32.powf((note as f32 - 69.0) / 12.0)
}

/// Nearest MIDI note for a frequency, clamped to the valid 0..=127 range.
pub fn freq_to_midi(frequency: f32) -> u8 {
    if frequency <= 0.0 || !frequency.is_finite() {
        return 0;
    }
    let note = 69.0 + 12.0 * (frequency / 440.0).log2();
    note.round().clamp(0.0, 127.0) as u8
}

/// Musical scales offered for the tile grid and the chord magnet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    Major,
    Minor,
    Pentatonic,
    Blues,
    Chromatic,
}

impl Scale {
    pub const ALL: [Scale; 5] = [
        Scale::Major,
        Scale::Minor,
        Scale::Pentatonic,
        Scale::Blues,
        Scale::Chromatic,
    ];

    /// Semitone offsets from the root.
    pub fn intervals(&self) -> &'static [i32] {
        match self {
            Scale::Major => &[0, 2, 4, 5, 7, 9, 11],
            Scale::Minor => &[0, 2, 3, 5, 7, 8, 10],
            Scale::Pentatonic => &[0, 2, 4, 7, 9],
            Scale::Blues => &[0, 3, 5, 6, 7, 10],
            Scale::Chromatic => &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Scale::Major => "major",
            Scale::Minor => "minor",
            Scale::Pentatonic => "pentatonic",
            Scale::Blues => "blues",
            Scale::Chromatic => "chromatic",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.name().eq_ignore_ascii_case(name))
    }
}

/// A pitch class (C = 0 .. B = 11), written as `C`, `F#`, `Bb`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NoteName(u8);

const SHARP_NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];

impl NoteName {
    pub const C: NoteName = NoteName(0);
    pub const D: NoteName = NoteName(2);
    pub const A: NoteName = NoteName(9);

    pub fn from_pitch_class(pc: u8) -> Self {
        Self(pc % 12)
    }

    pub fn pitch_class(&self) -> u8 {
        self.0
    }

    /// MIDI note of this pitch class in the given octave (C4 = 60).
    pub fn midi(&self, octave: i32) -> i32 {
        12 * (octave + 1) + self.0 as i32
    }

    pub fn parse(text: &str) -> Result<Self, String> {
        let text = text.trim();
        let mut chars = text.chars();
        let letter = chars
            .next()
            .ok_or_else(|| "empty note name".to_string())?
            .to_ascii_uppercase();
        let base: i32 = match letter {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            other => return Err(format!("unknown note letter '{other}' in '{text}'")),
        };
        let mut offset = 0;
        for c in chars {
            match c {
                '#' | '♯' => offset += 1,
                'b' | '♭' => offset -= 1,
                other => return Err(format!("unexpected '{other}' in note name '{text}'")),
            }
        }
        Ok(Self((base + offset).rem_euclid(12) as u8))
    }
}

impl Default for NoteName {
    fn default() -> Self {
        Self::D
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(SHARP_NAMES[self.0 as usize])
    }
}

impl TryFrom<String> for NoteName {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<NoteName> for String {
    fn from(value: NoteName) -> Self {
        value.to_string()
    }
}

/// Every note of `scale` over `octaves` octaves starting at the root in
/// octave 4, capped by the root one octave past the top. Sorted ascending.
pub fn scale_frequencies(root: NoteName, scale: Scale, octaves: u32) -> Vec<f32> {
    let root_midi = root.midi(SCALE_ROOT_OCTAVE);
    let mut frequencies = Vec::new();

    for octave in 0..octaves as i32 {
        for interval in scale.intervals() {
            let note = root_midi + octave * 12 + interval;
            if note <= 127 {
                frequencies.push(midi_to_hz(note));
            }
        }
    }

    let top = root_midi + octaves as i32 * 12;
    if top <= 127 {
        frequencies.push(midi_to_hz(top));
    }

    frequencies.sort_by(|a, b| a.total_cmp(b));
    frequencies
}

/// The entry of `list` nearest to `target`; `target` itself for an empty list.
pub fn closest_frequency(target: f32, list: &[f32]) -> f32 {
    list.iter()
        .copied()
        .reduce(|best, f| if (f - target).abs() < (best - target).abs() { f } else { best })
        .unwrap_or(target)
}

/// Pull `frequency` toward the nearest scale note by `strength` (0 = off, 1 = snap).
pub fn chord_magnet(frequency: f32, scale_frequencies: &[f32], strength: f32) -> f32 {
    let target = closest_frequency(frequency, scale_frequencies);
    frequency + (target - frequency) * strength
}
