pub mod cli;
pub mod config;
pub mod enhancer;
pub mod error;
pub mod model;
pub mod partition;
pub mod patch;
pub mod pipeline;
pub mod surface;

// Re-export the types a typical consumer needs
pub use enhancer::{ImageEnhancer, DEFAULT_PATCH_SIZE};
pub use error::{EnhanceError, LoadError, ResolveError, StoreError};
pub use model::{RemoteUpscaler, ResampleUpscaler, Upscaler, DEFAULT_SCALING_FACTOR};
pub use partition::{split_axis, AxisPartition, PatchGrid, PatchRegion};
pub use patch::{Patch, PatchStore};
pub use surface::Compositor;
