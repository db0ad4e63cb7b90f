pub mod settings;
pub mod sweep;
pub mod notes;
pub mod zap;
pub mod midi;
pub mod command;
pub mod preset;
pub mod scene;

pub use command::{LensSlot, SceneCommand};
pub use midi::{MidiOutput, MidiSettings};
pub use notes::{NoteEvent, NoteSink};
pub use preset::{load_preset, save_preset, Preset};
pub use scene::{Controls, FrameOutput, Scene};
pub use settings::{AudioSettings, BloomSettings};
pub use sweep::{FrequencySweep, SweepDirection};
pub use zap::{ZapSettings, ZapState, ZapTracker};
