pub mod wave;
pub mod lens;
pub mod optics;
pub mod sampler;
pub mod music;
pub mod config;

pub use wave::{WaveField, WaveParams};
pub use lens::{deform_optional, LensGeometry, LensParams, LensSurface};
pub use optics::{refract, Ray, AIR_INDEX};
pub use sampler::{nearest_sample, SurfaceSample};
pub use music::{NoteName, Scale};
pub use config::{GridConfig, SceneConfig};
