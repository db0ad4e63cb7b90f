use cyma_core::{LensParams, NoteName, Scale};
use glam::Vec3;

use crate::preset::Preset;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LensSlot {
    First,
    Second,
}

/// Commands sent from the UI thread to the frame loop via a crossbeam channel.
///
/// Commands are drained at the start of each step, so their effects land on
/// frame boundaries.
#[derive(Debug, Clone)]
pub enum SceneCommand {
    /// Replace the parameters of a lens. Ignored for lens 2 while it is absent,
    /// apart from being remembered for when it is re-created.
    SetLensParams { slot: LensSlot, params: LensParams },
    /// Create or destroy the second lens.
    ToggleLens2,
    /// Move the light source.
    MoveLight(Vec3),
    /// Change the ray fan.
    SetRayFan { count: usize, cone_angle: f32 },
    /// Change the root note; regenerates the tile grid.
    SetRootNote(NoteName),
    /// Change the scale; regenerates the tile grid.
    SetScale(Scale),
    /// Turn a lens's frequency sweep on or off.
    SetSweep { slot: LensSlot, enabled: bool },
    SetChordMagnet { enabled: bool, strength: f32 },
    ApplyPreset(Box<Preset>),
}
