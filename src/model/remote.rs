use image::RgbaImage;
use log::debug;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};

use super::wire;
use crate::error::{LoadError, ResolveError};
use crate::model::Upscaler;

/// Upscaling collaborator backed by an HTTP inference service.
///
/// Each `resolve` posts one patch to `<base>/api/v1/upscale` as planar RGB
/// and reads the upscaled planar RGB back. The service is trusted to apply
/// the configured scaling factor; a payload of any other size is rejected.
#[derive(Debug)]
pub struct RemoteUpscaler {
    endpoint: Url,
    client: Option<Client>,
    scaling_factor: u32,
}

impl RemoteUpscaler {
    /// Connect to the service at `base_url` (scheme and authority, e.g.
    /// `http://localhost:8080`). The URL must parse; transport problems only
    /// surface on the first `resolve`.
    pub fn open(base_url: &str, scaling_factor: u32) -> Result<Self, LoadError> {
        assert!(scaling_factor > 0, "scaling factor must be positive");

        let endpoint = format!("{}/api/v1/upscale", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&endpoint).map_err(|err| LoadError::BadEndpoint {
            url: base_url.to_string(),
            reason: err.to_string(),
        })?;

        Ok(Self {
            endpoint,
            client: Some(Client::new()),
            scaling_factor,
        })
    }
}

impl Upscaler for RemoteUpscaler {
    fn scaling_factor(&self) -> u32 {
        self.scaling_factor
    }

    async fn resolve(&self, input: &RgbaImage) -> Result<RgbaImage, ResolveError> {
        let client = self.client.as_ref().ok_or(ResolveError::Closed)?;
        let (width, height) = input.dimensions();

        let response = client
            .post(self.endpoint.clone())
            .query(&[("width", width), ("height", height)])
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(wire::to_planar_rgb(input))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::Status(status.as_u16()));
        }

        let payload = response.bytes().await?;
        debug!(
            "upscaled {}x{} patch, {} bytes received",
            width,
            height,
            payload.len()
        );
        wire::from_planar_rgb(
            &payload,
            width * self.scaling_factor,
            height * self.scaling_factor,
        )
    }

    fn close(&mut self) {
        self.client = None;
    }
}
