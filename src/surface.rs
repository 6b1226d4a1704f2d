use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use log::info;

use crate::partition::PatchGrid;
use crate::patch::{Patch, PatchStore};

/// Draws patch layers onto an owned RGBA surface.
///
/// The surface holds the upscaled composition: originals blitted with a
/// non-interpolating filter as the base layer, enhanced bitmaps blended on
/// top at the current layer opacity. Resizing reallocates the buffer, which
/// clears it, so a resize is always followed by a full redraw.
pub struct Compositor {
    surface: RgbaImage,
    display_width: u32,
    display_height: u32,
    scale: u32,
    opacity: f32,
    last_opacity: f32,
}

impl Compositor {
    pub fn new(scale: u32) -> Self {
        assert!(scale > 0, "scaling factor must be positive");
        Self {
            surface: RgbaImage::new(0, 0),
            display_width: 0,
            display_height: 0,
            scale,
            opacity: 1.0,
            last_opacity: 1.0,
        }
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Current opacity of the enhanced layer: 0.0 when hidden, otherwise the
    /// last visible value (1.0 initially).
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// The composited surface at upscaled resolution.
    pub fn surface(&self) -> &RgbaImage {
        &self.surface
    }

    /// Logical on-screen size: the tiled region at source resolution. The
    /// backing surface is this times the scaling factor.
    pub fn display_size(&self) -> (u32, u32) {
        (self.display_width, self.display_height)
    }

    /// Size the surface for a freshly computed grid. The old contents are
    /// discarded; the caller must redraw everything afterwards.
    pub fn resize_for(&mut self, grid: &PatchGrid) {
        let (width, height) = grid.tiled_size();
        self.display_width = width;
        self.display_height = height;
        self.surface = RgbaImage::new(width * self.scale, height * self.scale);
    }

    /// Blit a patch's original bitmap, scaled up without interpolation so
    /// the base layer stays faithful to the source pixels.
    pub fn draw_original_patch(&mut self, patch: &Patch) {
        let original = patch.original();
        let scaled = imageops::resize(
            original,
            original.width() * self.scale,
            original.height() * self.scale,
            FilterType::Nearest,
        );
        self.blit(
            &scaled,
            patch.top_left_x * self.scale,
            patch.top_left_y * self.scale,
            1.0,
        );
    }

    /// Blend a patch's enhanced bitmap over its original at the current
    /// layer opacity. Does nothing while the patch has no enhanced bitmap.
    pub fn draw_enhanced_patch(&mut self, patch: &Patch) {
        if let Some(enhanced) = patch.enhanced() {
            self.blit(
                enhanced,
                patch.top_left_x * self.scale,
                patch.top_left_y * self.scale,
                self.opacity,
            );
        }
    }

    /// Clear the surface and redraw every patch: original first, then the
    /// enhanced layer where present. Needed after a resize or an opacity
    /// change, since neither can be applied to a single patch.
    pub fn redraw_all(&mut self, store: &PatchStore) {
        for pixel in self.surface.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
        for patch in store.patches() {
            self.draw_original_patch(patch);
            self.draw_enhanced_patch(patch);
        }
    }

    /// Flip the enhanced layer between hidden and its last visible opacity,
    /// then redraw the whole surface under the new blend state.
    pub fn toggle_enhanced(&mut self, store: &PatchStore) {
        if self.opacity != 0.0 {
            self.last_opacity = self.opacity;
            self.opacity = 0.0;
            info!("enhanced layer off");
        } else {
            self.opacity = self.last_opacity;
            info!("enhanced layer on");
        }
        self.redraw_all(store);
    }

    /// Source-over blit of `src` at `(dst_x, dst_y)` with a uniform opacity.
    fn blit(&mut self, src: &RgbaImage, dst_x: u32, dst_y: u32, opacity: f32) {
        if opacity <= 0.0 {
            return;
        }
        for (sx, sy, pixel) in src.enumerate_pixels() {
            let x = dst_x + sx;
            let y = dst_y + sy;
            if x >= self.surface.width() || y >= self.surface.height() {
                continue;
            }
            if opacity >= 1.0 {
                self.surface.put_pixel(x, y, *pixel);
            } else {
                let below = self.surface.get_pixel(x, y);
                let blended = blend(*pixel, *below, opacity);
                self.surface.put_pixel(x, y, blended);
            }
        }
    }
}

/// Per-channel source-over: `out = src * a + dst * (1 - a)`.
fn blend(src: Rgba<u8>, dst: Rgba<u8>, alpha: f32) -> Rgba<u8> {
    let mut out = [0u8; 4];
    for channel in 0..4 {
        let s = src[channel] as f32;
        let d = dst[channel] as f32;
        out[channel] = (s * alpha + d * (1.0 - alpha)).round() as u8;
    }
    Rgba(out)
}
