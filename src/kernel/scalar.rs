//! Scalar reference correlator.

use crate::kernel::{Correlator, Surface};
use crate::search::MatchMetric;
use crate::template::TemplatePlan;
use crate::util::CorrLocateResult;
use crate::ImageView;

/// Single-threaded correlator evaluating every placement directly.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScalarCorrelator;

impl Correlator for ScalarCorrelator {
    fn correlate(
        &self,
        image: ImageView<'_, u8>,
        template: ImageView<'_, u8>,
        metric: MatchMetric,
    ) -> CorrLocateResult<Surface> {
        let plan = TemplatePlan::from_view(template)?;
        let (out_width, out_height) = plan.surface_size(image)?;

        let mut data = Vec::with_capacity(out_width * out_height);
        for y in 0..out_height {
            for x in 0..out_width {
                let sums = plan.window_sums(image, x, y);
                data.push(plan.score(metric, sums));
            }
        }

        Surface::new(data, out_width, out_height)
    }
}
