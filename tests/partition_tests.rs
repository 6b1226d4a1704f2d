use tilescale::{split_axis, PatchGrid};

#[test]
fn split_axis_invariants_hold_across_the_range() {
    // Every axis length up to 10k against every max patch size up to 1k.
    for length in 1..=10_000u32 {
        for max_patch in 1..=1_000u32 {
            let p = split_axis(length, max_patch);

            assert!(p.step_size >= 1, "length={length} max={max_patch}");
            assert!(p.step_count >= 1, "length={length} max={max_patch}");
            assert!(
                p.step_size * p.step_count <= length,
                "tiled region exceeds axis: length={length} max={max_patch}"
            );
            assert_eq!(
                p.trimmed,
                length - p.step_size * p.step_count,
                "length={length} max={max_patch}"
            );
            assert!(
                p.trimmed < p.step_count,
                "systematic under-tiling: length={length} max={max_patch} trimmed={}",
                p.trimmed
            );
        }
    }
}

#[test]
fn step_size_never_exceeds_max_patch() {
    for length in 1..=2_000u32 {
        for max_patch in [1, 2, 3, 64, 127, 128, 129, 1_000] {
            let p = split_axis(length, max_patch);
            assert!(
                p.step_size <= max_patch,
                "length={length} max={max_patch} step={}",
                p.step_size
            );
        }
    }
}

#[test]
fn documented_examples() {
    let exact = split_axis(300, 128);
    assert_eq!(
        (exact.step_count, exact.step_size, exact.trimmed),
        (3, 100, 0)
    );

    let remainder = split_axis(131, 128);
    assert_eq!(
        (remainder.step_count, remainder.step_size, remainder.trimmed),
        (2, 65, 1)
    );
}

#[test]
fn grid_covers_every_source_pixel_of_the_tiled_region() {
    // Paint each region onto a coverage map; every cell of the tiled region
    // must be covered exactly once (no gaps, no overlaps).
    let grid = PatchGrid::compute(517, 260, 128);
    let (width, height) = grid.tiled_size();
    let mut coverage = vec![0u8; width as usize * height as usize];

    for region in grid.regions() {
        for y in region.y..region.y + region.height {
            for x in region.x..region.x + region.width {
                coverage[(y * width + x) as usize] += 1;
            }
        }
    }

    assert!(coverage.iter().all(|&count| count == 1));
}
