//! Single- and multi-match locators.

use crate::candidate::{to_rects, Location, MatchRect, ScoredLocation};
use crate::image::OwnedImage;
use crate::kernel::scalar::ScalarCorrelator;
use crate::kernel::Correlator;
use crate::search::normalize::normalize;
use crate::search::suppress::suppress;
use crate::search::{DebugMode, LocateConfig};
use crate::trace::{trace_event, trace_span};
use crate::util::{CorrLocateError, CorrLocateResult, MatchStage};
use crate::ImageView;

/// Template locator bound to a correlator and a configuration.
///
/// A locator holds no mutable state; concurrent calls are independent as
/// each multi-match call searches its own copy of the source.
#[derive(Clone, Debug)]
pub struct Locator<C = ScalarCorrelator> {
    correlator: C,
    cfg: LocateConfig,
}

impl Default for Locator<ScalarCorrelator> {
    fn default() -> Self {
        Self {
            correlator: ScalarCorrelator,
            cfg: LocateConfig::default(),
        }
    }
}

impl Locator<ScalarCorrelator> {
    /// Creates a scalar locator with the default metric and `confidence`.
    pub fn new(confidence: f32) -> Self {
        Self::default().with_config(LocateConfig {
            confidence,
            ..LocateConfig::default()
        })
    }
}

impl<C: Correlator> Locator<C> {
    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: LocateConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Swaps the correlation primitive, keeping the configuration.
    pub fn with_correlator<D: Correlator>(self, correlator: D) -> Locator<D> {
        Locator {
            correlator,
            cfg: self.cfg,
        }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &LocateConfig {
        &self.cfg
    }

    /// Returns the correlation primitive.
    pub fn correlator(&self) -> &C {
        &self.correlator
    }

    /// Finds the best placement of `template`, if it clears the threshold.
    pub fn locate(
        &self,
        source: ImageView<'_, u8>,
        template: ImageView<'_, u8>,
    ) -> CorrLocateResult<Option<Location>> {
        Ok(self.locate_scored(source, template)?.map(|hit| hit.location))
    }

    /// Like [`Locator::locate`], also returning the accepted confidence.
    pub fn locate_scored(
        &self,
        source: ImageView<'_, u8>,
        template: ImageView<'_, u8>,
    ) -> CorrLocateResult<Option<ScoredLocation>> {
        self.cfg.validate()?;
        let _span = trace_span!("locate", metric = self.cfg.metric.name()).entered();
        self.search_once(source, template, self.cfg.effective_confidence())
    }

    /// Finds every non-overlapping placement that clears the threshold,
    /// in discovery order.
    pub fn locate_all(
        &self,
        source: ImageView<'_, u8>,
        template: ImageView<'_, u8>,
    ) -> CorrLocateResult<Vec<Location>> {
        self.cfg.validate()?;
        let _span = trace_span!("locate_all", metric = self.cfg.metric.name()).entered();

        let threshold = self.cfg.effective_confidence();
        let (tpl_width, tpl_height) = (template.width(), template.height());
        let mut working = OwnedImage::from_view(source);
        let mut found: Vec<Location> = Vec::new();

        while let Some(hit) = self.search_once(working.view(), template, threshold)? {
            // Suppression is idempotent, so a repeated placement means the
            // working copy stopped changing.
            if found.contains(&hit.location) {
                break;
            }
            found.push(hit.location);
            if self.cfg.max_matches.is_some_and(|limit| found.len() >= limit) {
                break;
            }
            suppress(
                &mut working,
                hit.location,
                tpl_width,
                tpl_height,
                self.cfg.fill_value,
            );
        }

        trace_event!("locate_all_done", matches = found.len());
        Ok(found)
    }

    /// Finds the bounding rectangle of the best placement.
    pub fn locate_rect(
        &self,
        source: ImageView<'_, u8>,
        template: ImageView<'_, u8>,
    ) -> CorrLocateResult<Option<MatchRect>> {
        let loc = self.locate(source, template)?;
        Ok(loc.map(|loc| MatchRect::from_location(loc, template.width(), template.height())))
    }

    /// Finds the bounding rectangles of all placements, in discovery order.
    pub fn locate_all_rects(
        &self,
        source: ImageView<'_, u8>,
        template: ImageView<'_, u8>,
    ) -> CorrLocateResult<Vec<MatchRect>> {
        let locs = self.locate_all(source, template)?;
        Ok(to_rects(&locs, template.width(), template.height()))
    }

    fn search_once(
        &self,
        image: ImageView<'_, u8>,
        template: ImageView<'_, u8>,
        threshold: f32,
    ) -> CorrLocateResult<Option<ScoredLocation>> {
        let metric = self.cfg.metric;
        let extremes = self
            .correlator
            .extremes(image, template, metric)
            .map_err(|err| err.in_stage(MatchStage::Correlation))?;
        trace_event!(
            "extremes",
            min_value = extremes.min_value,
            max_value = extremes.max_value
        );

        let (confidence, location) = normalize(extremes, metric);
        if !confidence.is_finite() {
            return Err(CorrLocateError::NonFiniteScore { value: confidence }
                .in_stage(MatchStage::Normalization));
        }

        let accepted = confidence >= threshold;
        self.report(confidence, threshold, accepted);
        Ok(accepted.then_some(ScoredLocation {
            location,
            confidence,
        }))
    }

    fn report(&self, confidence: f32, threshold: f32, accepted: bool) {
        let wanted = match self.cfg.debug {
            DebugMode::Off => false,
            DebugMode::EachMatch => true,
            DebugMode::NotMatch => !accepted,
        };
        if wanted {
            trace_event!(
                "confidence",
                current = confidence,
                expected = threshold,
                accepted = accepted
            );
        }
    }
}
