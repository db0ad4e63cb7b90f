use crossbeam::channel::Sender;
use cyma_raycast::TileId;

/// Note events emitted when tiles light up or go dark.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoteEvent {
    On { tile: TileId, frequency: f32 },
    Off { tile: TileId },
}

impl NoteEvent {
    pub fn tile(&self) -> TileId {
        match self {
            NoteEvent::On { tile, .. } | NoteEvent::Off { tile } => *tile,
        }
    }
}

/// Receiver of note-on/note-off calls, keyed by the tile that caused them.
pub trait NoteSink {
    fn note_on(&mut self, frequency: f32, tile: TileId);
    fn note_off(&mut self, tile: TileId);
}

impl NoteSink for Vec<NoteEvent> {
    fn note_on(&mut self, frequency: f32, tile: TileId) {
        self.push(NoteEvent::On { tile, frequency });
    }

    fn note_off(&mut self, tile: TileId) {
        self.push(NoteEvent::Off { tile });
    }
}

/// Forward events to another thread (typically the audio thread).
///
/// A disconnected receiver drops the event; the frame loop keeps running.
impl NoteSink for Sender<NoteEvent> {
    fn note_on(&mut self, frequency: f32, tile: TileId) {
        if self.send(NoteEvent::On { tile, frequency }).is_err() {
            log::warn!("note receiver disconnected, dropping note-on for {tile}");
        }
    }

    fn note_off(&mut self, tile: TileId) {
        if self.send(NoteEvent::Off { tile }).is_err() {
            log::warn!("note receiver disconnected, dropping note-off for {tile}");
        }
    }
}

/// Send every event to both sinks, e.g. the synth and a MIDI port.
impl<A: NoteSink, B: NoteSink> NoteSink for (A, B) {
    fn note_on(&mut self, frequency: f32, tile: TileId) {
        self.0.note_on(frequency, tile);
        self.1.note_on(frequency, tile);
    }

    fn note_off(&mut self, tile: TileId) {
        self.0.note_off(tile);
        self.1.note_off(tile);
    }
}
