use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::error::ResolveError;
use crate::model::Upscaler;

/// CPU fallback collaborator: classical Catmull-Rom interpolation at the
/// same contract as the neural service. Deterministic, runs anywhere, and
/// useful when no inference endpoint is available.
pub struct ResampleUpscaler {
    scaling_factor: u32,
    closed: bool,
}

impl ResampleUpscaler {
    pub fn new(scaling_factor: u32) -> Self {
        assert!(scaling_factor > 0, "scaling factor must be positive");
        Self {
            scaling_factor,
            closed: false,
        }
    }
}

impl Upscaler for ResampleUpscaler {
    fn scaling_factor(&self) -> u32 {
        self.scaling_factor
    }

    async fn resolve(&self, input: &RgbaImage) -> Result<RgbaImage, ResolveError> {
        if self.closed {
            return Err(ResolveError::Closed);
        }
        Ok(imageops::resize(
            input,
            input.width() * self.scaling_factor,
            input.height() * self.scaling_factor,
            FilterType::CatmullRom,
        ))
    }

    fn close(&mut self) {
        self.closed = true;
    }
}
