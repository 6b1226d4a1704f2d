/// Per-axis decomposition of an image edge into equally sized patch steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisPartition {
    /// Edge length of every patch along this axis, in source pixels.
    pub step_size: u32,
    /// Number of patches along this axis.
    pub step_count: u32,
    /// Pixels cropped from the trailing edge before tiling.
    pub trimmed: u32,
}

impl AxisPartition {
    /// Length of the tiled region: `step_size * step_count`.
    pub fn tiled_length(&self) -> u32 {
        self.step_size * self.step_count
    }
}

/// Split an axis of `length` pixels into steps of at most `max_patch`.
///
/// When the length does not divide evenly, one extra step is added and the
/// step size is shrunk so that all steps stay equal; the few pixels that
/// still do not fit are trimmed from the trailing edge. Equal steps keep
/// seam artifacts uniform instead of concentrating them in one odd-sized
/// patch at the border.
///
/// Both arguments must be positive; passing zero is a caller bug.
pub fn split_axis(length: u32, max_patch: u32) -> AxisPartition {
    assert!(length > 0, "axis length must be positive");
    assert!(max_patch > 0, "max patch size must be positive");

    let full_steps = length / max_patch;
    if full_steps == 0 {
        // Image smaller than one patch: a single step covers the whole axis.
        return AxisPartition {
            step_size: length,
            step_count: 1,
            trimmed: 0,
        };
    }
    if length % max_patch == 0 {
        return AxisPartition {
            step_size: max_patch,
            step_count: full_steps,
            trimmed: 0,
        };
    }

    let step_count = full_steps + 1;
    let step_size = length / step_count;
    AxisPartition {
        step_size,
        step_count,
        trimmed: length - step_size * step_count,
    }
}

/// Rectangular source region assigned to one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchRegion {
    pub grid_x: u32,
    pub grid_y: u32,
    /// Top-left corner in source-image coordinates.
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Two-axis partition of an image into model-sized patches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchGrid {
    pub horizontal: AxisPartition,
    pub vertical: AxisPartition,
}

impl PatchGrid {
    /// Partition a `width` x `height` image, each axis independently.
    pub fn compute(width: u32, height: u32, max_patch: u32) -> Self {
        Self {
            horizontal: split_axis(width, max_patch),
            vertical: split_axis(height, max_patch),
        }
    }

    /// Total number of patches in the grid.
    pub fn patch_count(&self) -> usize {
        self.horizontal.step_count as usize * self.vertical.step_count as usize
    }

    /// Dimensions of the tiled (post-trim) region in source pixels.
    pub fn tiled_size(&self) -> (u32, u32) {
        (
            self.horizontal.tiled_length(),
            self.vertical.tiled_length(),
        )
    }

    /// Enumerate patch regions in row-major order: left to right within a
    /// row, rows top to bottom.
    pub fn regions(&self) -> impl Iterator<Item = PatchRegion> + '_ {
        let h = self.horizontal;
        let v = self.vertical;
        (0..v.step_count).flat_map(move |grid_y| {
            (0..h.step_count).map(move |grid_x| PatchRegion {
                grid_x,
                grid_y,
                x: grid_x * h.step_size,
                y: grid_y * v.step_size,
                width: h.step_size,
                height: v.step_size,
            })
        })
    }
}
