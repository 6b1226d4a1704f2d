use thiserror::Error;

/// Failure to install a new source image or open a collaborator endpoint.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to decode source image")]
    Decode(#[from] image::ImageError),

    #[error("source image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("invalid upscaling endpoint {url:?}: {reason}")]
    BadEndpoint { url: String, reason: String },
}

/// A single patch failed to upscale.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("upscaler is closed")]
    Closed,

    #[error("transport failure")]
    Transport(#[from] reqwest::Error),

    #[error("service returned HTTP status {0}")]
    Status(u16),

    #[error("payload size mismatch: expected {expected} bytes, got {actual}")]
    Payload { expected: usize, actual: usize },

    #[error("output is {actual_width}x{actual_height}, expected {expected_width}x{expected_height}")]
    OutputSize {
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },
}

/// Violation of the patch store's one-way lifecycle.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("patch index {0} out of range")]
    UnknownIndex(usize),

    #[error("patch {0} is already enhanced")]
    AlreadyEnhanced(usize),

    #[error("generation {stale} is stale, store is at {current}")]
    StaleGeneration { stale: u64, current: u64 },
}

/// Failure of an enhancement run. Patches enhanced before the failure stay
/// enhanced; the rest keep showing their original layer.
#[derive(Debug, Error)]
pub enum EnhanceError {
    #[error("patch {index} failed to upscale")]
    Resolve {
        index: usize,
        #[source]
        source: ResolveError,
    },

    #[error("collaborator scales by {actual}, surface was sized for {expected}")]
    ScaleMismatch { expected: u32, actual: u32 },

    #[error(transparent)]
    Store(#[from] StoreError),
}
