use image::RgbaImage;

use crate::error::ResolveError;

pub mod remote;
pub mod resample;
mod wire;

pub use remote::RemoteUpscaler;
pub use resample::ResampleUpscaler;

/// Scaling factor of the reference super-resolution model.
pub const DEFAULT_SCALING_FACTOR: u32 = 4;

/// Contract every upscaling collaborator implements, whether it runs
/// on-device or behind an HTTP service.
pub trait Upscaler {
    /// Fixed multiplier applied to both dimensions by one `resolve` call.
    /// Constant for the lifetime of the value.
    fn scaling_factor(&self) -> u32;

    /// Upscale one patch. The output is exactly `input x scaling_factor` in
    /// both dimensions, the input is left untouched, and identical input
    /// bytes produce identical output bytes.
    fn resolve(
        &self,
        input: &RgbaImage,
    ) -> impl std::future::Future<Output = Result<RgbaImage, ResolveError>>;

    /// Release native or network resources. Idempotent; `resolve` after
    /// `close` fails with [`ResolveError::Closed`].
    fn close(&mut self);
}
