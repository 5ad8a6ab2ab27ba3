//! Rayon-parallel correlator (feature-gated).
//!
//! Rows of the surface are scored on the rayon pool; every placement uses the
//! same arithmetic as [`ScalarCorrelator`](crate::kernel::scalar::ScalarCorrelator),
//! so both produce identical surfaces.

use crate::kernel::{Correlator, Surface};
use crate::search::MatchMetric;
use crate::template::TemplatePlan;
use crate::util::CorrLocateResult;
use crate::ImageView;
use rayon::prelude::*;

/// Row-parallel correlator.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParallelCorrelator;

impl Correlator for ParallelCorrelator {
    fn correlate(
        &self,
        image: ImageView<'_, u8>,
        template: ImageView<'_, u8>,
        metric: MatchMetric,
    ) -> CorrLocateResult<Surface> {
        let plan = TemplatePlan::from_view(template)?;
        let (out_width, out_height) = plan.surface_size(image)?;

        let mut data = vec![0.0f32; out_width * out_height];
        data.par_chunks_mut(out_width)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, slot) in row.iter_mut().enumerate() {
                    let sums = plan.window_sums(image, x, y);
                    *slot = plan.score(metric, sums);
                }
            });

        Surface::new(data, out_width, out_height)
    }
}
