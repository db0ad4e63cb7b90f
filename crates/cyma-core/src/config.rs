use serde::{Deserialize, Serialize};

use crate::lens::LensGeometry;
use crate::music::{NoteName, Scale};
use crate::wave::WaveField;

/// Floor grid layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Edge length of the square grid in world units.
    pub grid_size: f32,
    /// Tiles per edge.
    pub grid_div: usize,
    /// World Y of the floor plane.
    pub ground_y: f32,
    /// Octave of the root note used as the bottom tile frequency (D2 by default).
    pub base_octave: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            grid_size: 6.0,
            grid_div: 16,
            ground_y: -2.5,
            base_octave: 2,
        }
    }
}

/// Static scene configuration, fixed for the lifetime of a scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub grid: GridConfig,
    pub lens: LensGeometry,
    pub wave: WaveField,
    /// Initial light position.
    pub light_position: [f32; 3],
    pub root_note: NoteName,
    pub scale: Scale,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            lens: LensGeometry::default(),
            wave: WaveField::default(),
            light_position: [0.0, 3.0, 0.0],
            root_note: NoteName::D,
            scale: Scale::Minor,
        }
    }
}
