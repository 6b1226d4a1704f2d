use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::enhancer::DEFAULT_PATCH_SIZE;
use crate::model::DEFAULT_SCALING_FACTOR;

/// On-disk run configuration. Command-line flags take precedence over the
/// values loaded here.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Maximum patch edge in source pixels.
    pub patch_size: u32,
    /// Integer scaling factor of the collaborator.
    pub scaling_factor: u32,
    /// Upscaling service base URL; when absent, the CPU resampler is used.
    pub endpoint: Option<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            patch_size: DEFAULT_PATCH_SIZE,
            scaling_factor: DEFAULT_SCALING_FACTOR,
            endpoint: None,
        }
    }
}

impl RunConfig {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("failed to open config file {}", path.display()))?;
        let config = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_reference_model() {
        let config = RunConfig::default();
        assert_eq!(config.patch_size, 128);
        assert_eq!(config.scaling_factor, 4);
        assert!(config.endpoint.is_none());
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"endpoint": "http://localhost:8080"}}"#).unwrap();

        let config = RunConfig::from_path(file.path()).unwrap();
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:8080"));
        assert_eq!(config.patch_size, 128);
        assert_eq!(config.scaling_factor, 4);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"patch_sise": 64}}"#).unwrap();
        assert!(RunConfig::from_path(file.path()).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(RunConfig::from_path("/nonexistent/tilescale.json").is_err());
    }
}
