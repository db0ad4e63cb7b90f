use cyma_core::music::freq_to_midi;
use cyma_raycast::TileId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::notes::NoteSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MidiSettings {
    pub enabled: bool,
    /// 1..=16
    pub channel: u8,
    pub velocity: u8,
}

impl Default for MidiSettings {
    fn default() -> Self {
        Self { enabled: false, channel: 1, velocity: 100 }
    }
}

impl MidiSettings {
    /// Zero-based channel nibble, clamped to 0..=15.
    fn channel_nibble(&self) -> u8 {
        self.channel.clamp(1, 16) - 1
    }
}

pub fn note_on_message(settings: &MidiSettings, note: u8) -> [u8; 3] {
    [0x90 + settings.channel_nibble(), note.min(127), settings.velocity.min(127)]
}

pub fn note_off_message(settings: &MidiSettings, note: u8) -> [u8; 3] {
    [0x80 + settings.channel_nibble(), note.min(127), 0]
}

/// Encodes tile notes as raw MIDI messages.
///
/// Messages are queued until the host takes them with [`MidiOutput::drain`].
#[derive(Debug, Default)]
pub struct MidiOutput {
    pub settings: MidiSettings,
    active: HashMap<TileId, f32>,
    queue: Vec<[u8; 3]>,
}

impl MidiOutput {
    pub fn new(settings: MidiSettings) -> Self {
        Self { settings, ..Self::default() }
    }

    pub fn drain(&mut self) -> Vec<[u8; 3]> {
        std::mem::take(&mut self.queue)
    }

    pub fn active_notes(&self) -> usize {
        self.active.len()
    }
}

impl NoteSink for MidiOutput {
    fn note_on(&mut self, frequency: f32, tile: TileId) {
        self.active.insert(tile, frequency);
        if self.settings.enabled {
            self.queue.push(note_on_message(&self.settings, freq_to_midi(frequency)));
        }
    }

    fn note_off(&mut self, tile: TileId) {
        let Some(frequency) = self.active.remove(&tile) else {
            return;
        };
        if self.settings.enabled {
            self.queue.push(note_off_message(&self.settings, freq_to_midi(frequency)));
        }
    }
}
