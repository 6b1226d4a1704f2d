use image::RgbaImage;

use crate::error::StoreError;
use crate::partition::PatchRegion;

/// One grid cell of the source image and its enhancement state.
///
/// The original bitmap is present from construction; the enhanced bitmap is
/// absent until the pipeline sets it, and is never cleared except by
/// replacing the whole patch generation.
pub struct Patch {
    pub grid_x: u32,
    pub grid_y: u32,
    /// Top-left corner in source-image coordinates.
    pub top_left_x: u32,
    pub top_left_y: u32,
    original: RgbaImage,
    enhanced: Option<RgbaImage>,
}

impl Patch {
    pub fn new(region: PatchRegion, original: RgbaImage) -> Self {
        Self {
            grid_x: region.grid_x,
            grid_y: region.grid_y,
            top_left_x: region.x,
            top_left_y: region.y,
            original,
            enhanced: None,
        }
    }

    pub fn original(&self) -> &RgbaImage {
        &self.original
    }

    pub fn enhanced(&self) -> Option<&RgbaImage> {
        self.enhanced.as_ref()
    }

    pub fn is_enhanced(&self) -> bool {
        self.enhanced.is_some()
    }
}

/// Owner of the current generation of patches.
///
/// Generations are replaced as a whole; `replace` drops every bitmap of the
/// outgoing generation (originals and enhanced alike) before installing the
/// new one. The generation counter lets a pipeline that started against an
/// older generation detect that its results are stale.
#[derive(Default)]
pub struct PatchStore {
    patches: Vec<Patch>,
    generation: u64,
}

impl PatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Install `patches` as the new generation, releasing the previous one.
    /// Returns the new generation number.
    pub fn replace(&mut self, patches: Vec<Patch>) -> u64 {
        self.patches = patches;
        self.generation += 1;
        self.generation
    }

    /// Record the enhanced bitmap for one patch. The transition is one-way:
    /// a second call for the same patch is rejected, as is an unknown index
    /// or a generation that no longer matches the store.
    pub fn set_enhanced(
        &mut self,
        generation: u64,
        index: usize,
        image: RgbaImage,
    ) -> Result<(), StoreError> {
        if generation != self.generation {
            return Err(StoreError::StaleGeneration {
                stale: generation,
                current: self.generation,
            });
        }
        let patch = self
            .patches
            .get_mut(index)
            .ok_or(StoreError::UnknownIndex(index))?;
        if patch.enhanced.is_some() {
            return Err(StoreError::AlreadyEnhanced(index));
        }
        patch.enhanced = Some(image);
        Ok(())
    }

    /// Read-only view of the current generation, in row-major order.
    pub fn patches(&self) -> &[Patch] {
        &self.patches
    }

    pub fn len(&self) -> usize {
        self.patches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }
}
