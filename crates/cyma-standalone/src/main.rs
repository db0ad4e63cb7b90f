use crossbeam::channel::unbounded;
use cyma_core::SceneConfig;
use cyma_engine::{load_preset, MidiOutput, NoteEvent, Scene};
use std::path::PathBuf;
use std::process::ExitCode;

const FRAME_DELTA: f32 = 1.0 / 60.0;
const DEFAULT_FRAMES: u32 = 600;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let frames = match args.next().map(|a| a.parse::<u32>()) {
        None => DEFAULT_FRAMES,
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::error!("invalid frame count: {e}");
            eprintln!("usage: cymatics [frames] [preset.json]");
            return ExitCode::FAILURE;
        }
    };
    let preset_path = args.next().map(PathBuf::from);

    let mut scene = Scene::new(SceneConfig::default());
    if let Some(path) = preset_path {
        match load_preset(&path) {
            Ok(preset) => scene.apply_preset(&preset),
            Err(e) => {
                log::error!("failed to load preset {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        }
    }

    // The note channel stands in for the audio thread.
    let (note_tx, note_rx) = unbounded::<NoteEvent>();
    let mut sinks = (note_tx, MidiOutput::new(scene.midi));

    let mut notes_on = 0usize;
    let mut notes_off = 0usize;
    for frame in 0..frames {
        let out = scene.step(FRAME_DELTA, &mut sinks);
        for event in note_rx.try_iter() {
            match event {
                NoteEvent::On { tile, frequency } => {
                    notes_on += 1;
                    log::info!("frame {frame}: {tile} on at {frequency:.2} Hz");
                }
                NoteEvent::Off { tile } => {
                    notes_off += 1;
                    log::info!("frame {frame}: {tile} off");
                }
            }
        }
        for message in sinks.1.drain() {
            log::debug!("midi {:02x} {:02x} {:02x}", message[0], message[1], message[2]);
        }
        log::trace!("frame {frame}: {} paths, {} zaps", out.paths.len(), out.zaps.len());
    }

    log::info!(
        "{frames} frames ({:.1} s): {notes_on} note-ons, {notes_off} note-offs, {} tiles still hot",
        scene.elapsed(),
        scene.caster().tracker().hot().len()
    );
    ExitCode::SUCCESS
}
