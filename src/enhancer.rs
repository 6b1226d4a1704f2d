use std::path::Path;
use std::time::Instant;

use image::imageops;
use image::RgbaImage;
use log::info;

use crate::error::{EnhanceError, LoadError};
use crate::model::Upscaler;
use crate::partition::PatchGrid;
use crate::patch::{Patch, PatchStore};
use crate::pipeline;
use crate::surface::Compositor;

/// Maximum patch edge the reference super-resolution model accepts.
pub const DEFAULT_PATCH_SIZE: u32 = 128;

/// Consumer-facing facade: partitions a source image into model-sized
/// patches, drives the upscaling collaborator over them, and composites
/// the results onto its surface while the originals stay visible
/// underneath.
pub struct ImageEnhancer {
    store: PatchStore,
    compositor: Compositor,
    max_patch: u32,
}

impl ImageEnhancer {
    /// Create an enhancer for collaborators with the given scaling factor,
    /// using the default maximum patch size.
    pub fn new(scaling_factor: u32) -> Self {
        Self::with_patch_size(scaling_factor, DEFAULT_PATCH_SIZE)
    }

    pub fn with_patch_size(scaling_factor: u32, max_patch: u32) -> Self {
        assert!(max_patch > 0, "max patch size must be positive");
        Self {
            store: PatchStore::new(),
            compositor: Compositor::new(scaling_factor),
            max_patch,
        }
    }

    /// Install a new source image: partition it into a patch grid, replace
    /// the previous patch generation, size the surface, and draw every
    /// original patch as the base layer.
    ///
    /// On failure the previous generation is left fully intact: the new
    /// image is validated and cut into patches before anything is replaced.
    pub fn load(&mut self, image: &RgbaImage) -> Result<(), LoadError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(LoadError::EmptyImage { width, height });
        }

        let grid = PatchGrid::compute(width, height, self.max_patch);
        let mut patches = Vec::with_capacity(grid.patch_count());
        for region in grid.regions() {
            let original =
                imageops::crop_imm(image, region.x, region.y, region.width, region.height)
                    .to_image();
            patches.push(Patch::new(region, original));
        }

        self.store.replace(patches);
        self.compositor.resize_for(&grid);
        for patch in self.store.patches() {
            self.compositor.draw_original_patch(patch);
        }

        info!(
            "new image loaded: {}x{}, {} patches of {}x{}",
            width,
            height,
            self.store.len(),
            grid.horizontal.step_size,
            grid.vertical.step_size
        );
        Ok(())
    }

    /// Decode an image file and load it.
    pub fn load_path<P: AsRef<Path>>(&mut self, path: P) -> Result<(), LoadError> {
        let image = image::open(path)?.to_rgba8();
        self.load(&image)
    }

    /// Run the serialized enhancement pipeline against `model`. Patches
    /// already enhanced when a later patch fails remain enhanced.
    pub async fn enhance<U: Upscaler>(&mut self, model: &U) -> Result<(), EnhanceError> {
        let actual = model.scaling_factor();
        let expected = self.compositor.scale();
        if actual != expected {
            return Err(EnhanceError::ScaleMismatch { expected, actual });
        }

        let started = Instant::now();
        pipeline::run(&mut self.store, &mut self.compositor, model).await?;
        info!(
            "enhance completed in {} ms",
            started.elapsed().as_millis()
        );
        Ok(())
    }

    /// Flip the enhanced layer between hidden and its last visible opacity,
    /// redrawing the surface.
    pub fn toggle_enhanced_visibility(&mut self) {
        self.compositor.toggle_enhanced(&self.store);
    }

    /// The composited surface at upscaled resolution.
    pub fn surface(&self) -> &RgbaImage {
        self.compositor.surface()
    }

    /// Logical on-screen size (the tiled source region, unscaled).
    pub fn display_size(&self) -> (u32, u32) {
        self.compositor.display_size()
    }

    /// Current generation of patches, row-major.
    pub fn patches(&self) -> &[Patch] {
        self.store.patches()
    }

    pub fn opacity(&self) -> f32 {
        self.compositor.opacity()
    }

    pub fn scaling_factor(&self) -> u32 {
        self.compositor.scale()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn gradient(width: u32, height: u32) -> RgbaImage {
        let mut image = RgbaImage::new(width, height);
        for (x, y, pixel) in image.enumerate_pixels_mut() {
            *pixel = Rgba([(x % 256) as u8, (y % 256) as u8, 7, 255]);
        }
        image
    }

    #[test]
    fn load_builds_grid_and_base_layer() {
        let mut enhancer = ImageEnhancer::new(4);
        enhancer.load(&gradient(260, 260)).unwrap();

        assert_eq!(enhancer.patches().len(), 9);
        assert_eq!(enhancer.surface().dimensions(), (1032, 1032));
        assert_eq!(enhancer.display_size(), (258, 258));

        // Base layer present: pixel (0, 0) replicates the source corner.
        assert_eq!(enhancer.surface().get_pixel(0, 0), &Rgba([0, 0, 7, 255]));
    }

    #[test]
    fn load_rejects_empty_image() {
        let mut enhancer = ImageEnhancer::new(4);
        let err = enhancer.load(&RgbaImage::new(0, 0)).unwrap_err();
        assert!(matches!(err, LoadError::EmptyImage { .. }));
    }

    #[test]
    fn failed_load_keeps_previous_generation() {
        let mut enhancer = ImageEnhancer::new(4);
        enhancer.load(&gradient(100, 100)).unwrap();
        let patches_before = enhancer.patches().len();

        enhancer.load(&RgbaImage::new(0, 5)).unwrap_err();
        assert_eq!(enhancer.patches().len(), patches_before);
        assert_eq!(enhancer.display_size(), (100, 100));
    }

    #[test]
    fn reload_replaces_generation() {
        let mut enhancer = ImageEnhancer::new(4);
        enhancer.load(&gradient(300, 100)).unwrap();
        assert_eq!(enhancer.patches().len(), 3);

        enhancer.load(&gradient(100, 100)).unwrap();
        assert_eq!(enhancer.patches().len(), 1);
        assert_eq!(enhancer.surface().dimensions(), (400, 400));
    }

    #[test]
    fn patches_cover_trimmed_region() {
        let mut enhancer = ImageEnhancer::new(4);
        enhancer.load(&gradient(131, 67)).unwrap();

        for patch in enhancer.patches() {
            assert_eq!(patch.original().dimensions(), (65, 67));
        }
        assert_eq!(enhancer.display_size(), (130, 67));
    }
}
