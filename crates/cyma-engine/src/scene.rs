use crossbeam::channel::{unbounded, Receiver, Sender};
use cyma_core::music::{chord_magnet, scale_frequencies};
use cyma_core::{deform_optional, LensParams, LensSurface, NoteName, Scale, SceneConfig};
use cyma_raycast::{FrameInput, RayCaster, RayFan, RayPath, TileGrid, TileId};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::command::{LensSlot, SceneCommand};
use crate::midi::MidiSettings;
use crate::notes::NoteSink;
use crate::preset::{Preset, PRESET_VERSION};
use crate::settings::{AudioSettings, BloomSettings};
use crate::sweep::FrequencySweep;
use crate::zap::{ZapSettings, ZapState, ZapTracker};

/// Octaves of scale notes the chord magnet can snap to.
const MAGNET_OCTAVES: u32 = 4;

/// User-facing controls for lens 1 and the global musical settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Controls {
    pub lens: LensParams,
    pub fan: RayFan,
    #[serde(alias = "chordMagnetEnabled")]
    pub chord_magnet_enabled: bool,
    /// Range: 0.0..1.0
    #[serde(alias = "chordMagnetStrength")]
    pub chord_magnet_strength: f32,
    #[serde(alias = "rootNote")]
    pub root_note: NoteName,
    pub scale: Scale,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            lens: LensParams::default(),
            fan: RayFan::default(),
            chord_magnet_enabled: false,
            chord_magnet_strength: 1.0,
            root_note: NoteName::D,
            scale: Scale::Minor,
        }
    }
}

/// Everything one step produced, for the renderer and the audio host.
#[derive(Debug, Clone, Default)]
pub struct FrameOutput {
    /// Scene time after the step, in seconds.
    pub time: f32,
    /// Tiles that lit up this frame with the frequency that was played.
    pub newly_hot: Vec<(TileId, f32)>,
    pub newly_dead: Vec<TileId>,
    pub paths: Vec<RayPath>,
    pub zaps: Vec<ZapState>,
}

/// The whole simulation: lenses, light, floor grid, hit tracking and the
/// note/zap bookkeeping around them.
pub struct Scene {
    config: SceneConfig,
    pub light: Vec3,
    controls: Controls,
    lens1: LensSurface,
    lens2: Option<LensSurface>,
    /// Lens 2 parameters, kept while the lens is absent.
    lens2_params: LensParams,
    grid: TileGrid,
    scale_notes: Vec<f32>,
    caster: RayCaster,
    sweeps: [FrequencySweep; 2],
    zaps: ZapTracker,
    /// Tiles released by a grid regeneration, turned off on the next step.
    pending_release: Vec<TileId>,
    elapsed: f32,
    pub bloom: BloomSettings,
    pub audio: AudioSettings,
    pub midi: MidiSettings,
    command_tx: Sender<SceneCommand>,
    command_rx: Receiver<SceneCommand>,
}

impl Scene {
    pub fn new(config: SceneConfig) -> Self {
        let controls = Controls {
            root_note: config.root_note,
            scale: config.scale,
            ..Controls::default()
        };
        let lens1 = LensSurface::new(&config.lens, controls.lens);
        let grid = TileGrid::generate(config.grid, controls.root_note, controls.scale);
        let scale_notes = scale_frequencies(controls.root_note, controls.scale, MAGNET_OCTAVES);
        let (command_tx, command_rx) = unbounded();

        log::info!(
            "scene: {} tiles, root {} {}",
            grid.len(),
            controls.root_note,
            controls.scale.name()
        );

        Self {
            light: Vec3::from_array(config.light_position),
            controls,
            lens1,
            lens2: None,
            lens2_params: LensParams::second_lens(),
            grid,
            scale_notes,
            caster: RayCaster::new(),
            sweeps: [FrequencySweep::new(), FrequencySweep::new()],
            zaps: ZapTracker::new(ZapSettings::default()),
            pending_release: Vec::new(),
            elapsed: 0.0,
            bloom: BloomSettings::default(),
            audio: AudioSettings::default(),
            midi: MidiSettings::default(),
            command_tx,
            command_rx,
            config,
        }
    }

    /// A sender the UI thread can use to queue commands for the next step.
    pub fn command_sender(&self) -> Sender<SceneCommand> {
        self.command_tx.clone()
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn lens1(&self) -> &LensSurface {
        &self.lens1
    }

    pub fn lens2(&self) -> Option<&LensSurface> {
        self.lens2.as_ref()
    }

    pub fn lens2_params(&self) -> &LensParams {
        &self.lens2_params
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn caster(&self) -> &RayCaster {
        &self.caster
    }

    pub fn caster_mut(&mut self) -> &mut RayCaster {
        &mut self.caster
    }

    pub fn zaps(&self) -> &ZapTracker {
        &self.zaps
    }

    pub fn sweep(&self, slot: LensSlot) -> &FrequencySweep {
        &self.sweeps[slot_index(slot)]
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Create lens 2 if absent, destroy it otherwise. Returns whether it now exists.
    pub fn toggle_lens2(&mut self) -> bool {
        self.set_lens2(self.lens2.is_none());
        self.lens2.is_some()
    }

    fn set_lens2(&mut self, enabled: bool) {
        match (enabled, self.lens2.is_some()) {
            (true, false) => {
                self.lens2 = Some(LensSurface::new(&self.config.lens, self.lens2_params));
                log::debug!("lens 2 created at y={}", self.lens2_params.y);
            }
            (false, true) => {
                self.lens2 = None;
                log::debug!("lens 2 removed");
            }
            _ => {}
        }
    }

    pub fn apply_command(&mut self, command: SceneCommand) {
        match command {
            SceneCommand::SetLensParams { slot: LensSlot::First, params } => {
                self.controls.lens = params;
            }
            SceneCommand::SetLensParams { slot: LensSlot::Second, params } => {
                self.lens2_params = params;
            }
            SceneCommand::ToggleLens2 => {
                self.toggle_lens2();
            }
            SceneCommand::MoveLight(position) => self.move_light(position),
            SceneCommand::SetRayFan { count, cone_angle } => {
                self.controls.fan = RayFan::new(count, cone_angle);
            }
            SceneCommand::SetRootNote(root) => {
                if root != self.controls.root_note {
                    self.controls.root_note = root;
                    self.regenerate_grid();
                }
            }
            SceneCommand::SetScale(scale) => {
                if scale != self.controls.scale {
                    self.controls.scale = scale;
                    self.regenerate_grid();
                }
            }
            SceneCommand::SetSweep { slot, enabled } => {
                self.sweeps[slot_index(slot)].set_enabled(enabled);
            }
            SceneCommand::SetChordMagnet { enabled, strength } => {
                self.controls.chord_magnet_enabled = enabled;
                self.controls.chord_magnet_strength = strength.clamp(0.0, 1.0);
            }
            SceneCommand::ApplyPreset(preset) => self.apply_preset(&preset),
        }
    }

    fn move_light(&mut self, position: Vec3) {
        if position.is_finite() {
            self.light = position;
        } else {
            log::warn!("ignoring non-finite light position {position}");
        }
    }

    /// Apply every section present in `preset`.
    pub fn apply_preset(&mut self, preset: &Preset) {
        if let Some(controls) = preset.params {
            let regenerate =
                controls.root_note != self.controls.root_note || controls.scale != self.controls.scale;
            self.controls = controls;
            self.controls.chord_magnet_strength = controls.chord_magnet_strength.clamp(0.0, 1.0);
            if regenerate {
                self.regenerate_grid();
            }
        }
        if let Some(params) = preset.lens2_params {
            self.lens2_params = params;
        }
        if let Some(enabled) = preset.lens2_enabled {
            self.set_lens2(enabled);
        }
        if let Some(light) = preset.light_position {
            self.move_light(Vec3::from_array(light));
        }
        if let Some(bloom) = preset.bloom {
            self.bloom = bloom;
        }
        if let Some(audio) = preset.audio {
            self.audio = audio;
        }
        if let Some(midi) = preset.midi {
            self.midi = midi;
        }
        if let Some(tile_zap) = preset.tile_zap {
            self.zaps.settings = tile_zap;
        }
    }

    /// Snapshot the current state as a preset with every section filled in.
    pub fn preset(&self) -> Preset {
        Preset {
            version: PRESET_VERSION,
            params: Some(self.controls),
            lens2_enabled: Some(self.lens2.is_some()),
            lens2_params: Some(self.lens2_params),
            light_position: Some(self.light.to_array()),
            bloom: Some(self.bloom),
            audio: Some(self.audio),
            midi: Some(self.midi),
            tile_zap: Some(self.zaps.settings),
        }
    }

    fn regenerate_grid(&mut self) {
        let root = self.controls.root_note;
        let scale = self.controls.scale;
        self.grid = TileGrid::generate(self.config.grid, root, scale);
        self.scale_notes = scale_frequencies(root, scale, MAGNET_OCTAVES);
        self.pending_release.extend(self.caster.reset());
        self.zaps.clear();
        log::debug!("tile grid regenerated for {root} {}", scale.name());
    }

    /// Advance the scene by `delta` seconds and cast one frame.
    pub fn step(&mut self, delta: f32, notes: &mut dyn NoteSink) -> FrameOutput {
        while let Ok(command) = self.command_rx.try_recv() {
            self.apply_command(command);
        }
        let mut newly_dead: Vec<TileId> = self.pending_release.drain(..).collect();
        for &tile in &newly_dead {
            notes.note_off(tile);
        }

        let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
        self.elapsed += delta;

        self.controls.lens.advance(delta);
        if let Some(frequency) = self.sweeps[0].advance(delta) {
            self.controls.lens.frequency = frequency;
        }
        if self.lens2.is_some() {
            self.lens2_params.advance(delta);
            if let Some(frequency) = self.sweeps[1].advance(delta) {
                self.lens2_params.frequency = frequency;
            }
        }

        self.lens1.params = self.controls.lens;
        self.lens1.sync_height();
        if let Some(lens2) = self.lens2.as_mut() {
            lens2.params = self.lens2_params;
            lens2.sync_height();
        }
        self.lens1.deform(&self.config.wave);
        deform_optional(self.lens2.as_mut(), &self.config.wave);

        let input = FrameInput {
            light: self.light,
            lens1: &self.lens1,
            lens2: self.lens2.as_ref(),
            floor_y: self.config.grid.ground_y,
            tiles: self.grid.tiles(),
            fan: self.controls.fan,
        };
        let result = self.caster.cast_frame(&input);

        let mut newly_hot = Vec::with_capacity(result.newly_hot.len());
        for tile in result.newly_hot {
            let Some(frequency) = self.grid.get(tile).map(|t| t.frequency) else {
                continue;
            };
            let frequency = if self.controls.chord_magnet_enabled {
                chord_magnet(frequency, &self.scale_notes, self.controls.chord_magnet_strength)
            } else {
                frequency
            };
            notes.note_on(frequency, tile);
            self.zaps.start(tile, self.elapsed, frequency);
            newly_hot.push((tile, frequency));
        }
        for &tile in &result.newly_dead {
            notes.note_off(tile);
        }
        newly_dead.extend(result.newly_dead);
        newly_dead.sort();
        newly_dead.dedup();

        FrameOutput {
            time: self.elapsed,
            newly_hot,
            newly_dead,
            paths: result.paths,
            zaps: self.zaps.update(self.elapsed),
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}

fn slot_index(slot: LensSlot) -> usize {
    match slot {
        LensSlot::First => 0,
        LensSlot::Second => 1,
    }
}
