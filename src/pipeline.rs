use std::time::Instant;

use log::debug;

use crate::error::{EnhanceError, ResolveError, StoreError};
use crate::model::Upscaler;
use crate::patch::PatchStore;
use crate::surface::Compositor;

/// Drive the collaborator over every patch in row-major order, with at most
/// one `resolve` call in flight, compositing each result as soon as it
/// lands. Serializing the calls bounds peak accelerator/network memory at
/// the cost of total latency scaling with patch count.
///
/// The first failure aborts the remaining iteration; patches enhanced
/// before it stay enhanced and drawn. Results arriving for a generation the
/// store has since replaced are discarded.
pub async fn run<U: Upscaler>(
    store: &mut PatchStore,
    compositor: &mut Compositor,
    model: &U,
) -> Result<(), EnhanceError> {
    let generation = store.generation();
    let total = store.len();

    for index in 0..total {
        let patch = &store.patches()[index];
        let (width, height) = patch.original().dimensions();

        let started = Instant::now();
        let enhanced = model
            .resolve(patch.original())
            .await
            .map_err(|source| EnhanceError::Resolve { index, source })?;
        debug!(
            "patch {}/{} resolved in {} ms",
            index + 1,
            total,
            started.elapsed().as_millis()
        );

        let expected = (width * model.scaling_factor(), height * model.scaling_factor());
        if enhanced.dimensions() != expected {
            let (actual_width, actual_height) = enhanced.dimensions();
            return Err(EnhanceError::Resolve {
                index,
                source: ResolveError::OutputSize {
                    expected_width: expected.0,
                    expected_height: expected.1,
                    actual_width,
                    actual_height,
                },
            });
        }

        match store.set_enhanced(generation, index, enhanced) {
            Ok(()) => {}
            Err(StoreError::StaleGeneration { .. }) => {
                debug!("discarding enhancement result for a replaced image");
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        }

        // Only this patch's rectangle is touched; earlier draws stay valid.
        compositor.draw_enhanced_patch(&store.patches()[index]);
    }

    Ok(())
}
