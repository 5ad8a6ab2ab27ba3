//! Python bindings for the corrlocate template location library.
//!
//! Images cross the boundary as 2D `uint8` numpy arrays (height x width).

use numpy::{PyReadonlyArray2, PyUntypedArrayMethods};
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use corrlocate::{
    CorrLocateError, DebugMode, ImageView, LocateConfig, Location as RustLocation,
    Locator as RustLocator, MatchMetric, MatchRect as RustMatchRect, ParallelCorrelator,
};

/// Convert a CorrLocateError to a Python exception.
fn to_py_err(err: CorrLocateError) -> PyErr {
    match err.root() {
        CorrLocateError::InvalidConfig { .. }
        | CorrLocateError::InvalidDimensions { .. }
        | CorrLocateError::TemplateTooLarge { .. } => PyValueError::new_err(err.to_string()),
        _ => PyRuntimeError::new_err(err.to_string()),
    }
}

fn view<'a>(array: &'a PyReadonlyArray2<'_, u8>) -> PyResult<ImageView<'a, u8>> {
    let shape = array.shape();
    let (height, width) = (shape[0], shape[1]);
    let data = array.as_slice()?;
    ImageView::from_slice(data, width, height).map_err(to_py_err)
}

fn parse_metric(name: &str) -> PyResult<MatchMetric> {
    MatchMetric::from_name(&name.to_lowercase()).ok_or_else(|| {
        PyValueError::new_err(
            "metric must be one of 'sq_diff', 'sq_diff_normed', 'ccorr', 'ccorr_normed', \
             'ccoeff', 'ccoeff_normed'",
        )
    })
}

fn parse_debug(name: &str) -> PyResult<DebugMode> {
    match name.to_lowercase().as_str() {
        "off" => Ok(DebugMode::Off),
        "each_match" => Ok(DebugMode::EachMatch),
        "not_match" => Ok(DebugMode::NotMatch),
        _ => Err(PyValueError::new_err(
            "debug must be 'off', 'each_match' or 'not_match'",
        )),
    }
}

/// Top-left corner of an accepted placement.
#[pyclass]
#[derive(Clone)]
pub struct Location {
    #[pyo3(get)]
    pub x: usize,
    #[pyo3(get)]
    pub y: usize,
}

#[pymethods]
impl Location {
    fn __repr__(&self) -> String {
        format!("Location(x={}, y={})", self.x, self.y)
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl From<RustLocation> for Location {
    fn from(loc: RustLocation) -> Self {
        Self { x: loc.x, y: loc.y }
    }
}

/// Axis-aligned rectangle covering an accepted placement.
#[pyclass]
#[derive(Clone)]
pub struct MatchRect {
    #[pyo3(get)]
    pub x: usize,
    #[pyo3(get)]
    pub y: usize,
    #[pyo3(get)]
    pub width: usize,
    #[pyo3(get)]
    pub height: usize,
}

#[pymethods]
impl MatchRect {
    /// Top-left corner.
    #[getter]
    fn min(&self) -> Location {
        Location {
            x: self.x,
            y: self.y,
        }
    }

    /// Exclusive bottom-right corner.
    #[getter]
    fn max(&self) -> Location {
        Location {
            x: self.x + self.width,
            y: self.y + self.height,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "MatchRect(x={}, y={}, width={}, height={})",
            self.x, self.y, self.width, self.height
        )
    }
}

impl From<RustMatchRect> for MatchRect {
    fn from(rect: RustMatchRect) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        }
    }
}

/// Template locator with a fixed metric and acceptance threshold.
#[pyclass]
pub struct Locator {
    cfg: LocateConfig,
    parallel: bool,
}

impl Locator {
    fn scalar(&self) -> RustLocator {
        RustLocator::default().with_config(self.cfg.clone())
    }

    fn parallel(&self) -> RustLocator<ParallelCorrelator> {
        self.scalar().with_correlator(ParallelCorrelator)
    }

    fn find_one(
        &self,
        image: &PyReadonlyArray2<'_, u8>,
        template: &PyReadonlyArray2<'_, u8>,
    ) -> PyResult<Option<RustLocation>> {
        let (src, tpl) = (view(image)?, view(template)?);
        let found = if self.parallel {
            self.parallel().locate(src, tpl)
        } else {
            self.scalar().locate(src, tpl)
        };
        found.map_err(to_py_err)
    }

    fn find_all(
        &self,
        image: &PyReadonlyArray2<'_, u8>,
        template: &PyReadonlyArray2<'_, u8>,
    ) -> PyResult<Vec<RustLocation>> {
        let (src, tpl) = (view(image)?, view(template)?);
        let found = if self.parallel {
            self.parallel().locate_all(src, tpl)
        } else {
            self.scalar().locate_all(src, tpl)
        };
        found.map_err(to_py_err)
    }
}

#[pymethods]
impl Locator {
    /// Create a new Locator.
    ///
    /// Args:
    ///     confidence: Acceptance threshold; values above 1 act as 1 (default: 0.95)
    ///     metric: Similarity metric name (default: "ccoeff_normed")
    ///     max_matches: Upper bound on multi-match results (default: None)
    ///     fill_value: Intensity painted over accepted regions (default: 255)
    ///     parallel: Correlate rows in parallel (default: False)
    ///     debug: "off", "each_match" or "not_match" (default: "off")
    #[new]
    #[pyo3(signature = (confidence=0.95, metric="ccoeff_normed", max_matches=None, fill_value=255, parallel=false, debug="off"))]
    fn new(
        confidence: f32,
        metric: &str,
        max_matches: Option<usize>,
        fill_value: u8,
        parallel: bool,
        debug: &str,
    ) -> PyResult<Self> {
        let cfg = LocateConfig {
            metric: parse_metric(metric)?,
            confidence,
            fill_value,
            max_matches,
            debug: parse_debug(debug)?,
        };
        cfg.validate().map_err(to_py_err)?;
        Ok(Self { cfg, parallel })
    }

    #[getter]
    fn confidence(&self) -> f32 {
        self.cfg.confidence
    }

    #[getter]
    fn metric(&self) -> &'static str {
        self.cfg.metric.name()
    }

    /// Best placement of `template` in `image`, or None.
    fn locate(
        &self,
        image: PyReadonlyArray2<'_, u8>,
        template: PyReadonlyArray2<'_, u8>,
    ) -> PyResult<Option<Location>> {
        Ok(self.find_one(&image, &template)?.map(Location::from))
    }

    /// Every non-overlapping placement, in discovery order.
    fn locate_all(
        &self,
        image: PyReadonlyArray2<'_, u8>,
        template: PyReadonlyArray2<'_, u8>,
    ) -> PyResult<Vec<Location>> {
        Ok(self
            .find_all(&image, &template)?
            .into_iter()
            .map(Location::from)
            .collect())
    }

    /// Bounding rectangle of the best placement, or None.
    fn locate_rect(
        &self,
        image: PyReadonlyArray2<'_, u8>,
        template: PyReadonlyArray2<'_, u8>,
    ) -> PyResult<Option<MatchRect>> {
        let shape = template.shape();
        let (height, width) = (shape[0], shape[1]);
        Ok(self
            .find_one(&image, &template)?
            .map(|loc| RustMatchRect::from_location(loc, width, height).into()))
    }

    /// Bounding rectangles of every placement, in discovery order.
    fn locate_all_rects(
        &self,
        image: PyReadonlyArray2<'_, u8>,
        template: PyReadonlyArray2<'_, u8>,
    ) -> PyResult<Vec<MatchRect>> {
        let shape = template.shape();
        let (height, width) = (shape[0], shape[1]);
        let locs = self.find_all(&image, &template)?;
        Ok(corrlocate::to_rects(&locs, width, height)
            .into_iter()
            .map(MatchRect::from)
            .collect())
    }

    fn __repr__(&self) -> String {
        format!(
            "Locator(confidence={}, metric='{}', parallel={})",
            self.cfg.confidence,
            self.cfg.metric.name(),
            self.parallel
        )
    }
}

/// Best placement of `template` in `image` under CCOEFF_NORMED.
///
/// Args:
///     image: 2D uint8 numpy array (height x width)
///     template: 2D uint8 numpy array (height x width)
///     confidence: Acceptance threshold (default: 0.95)
#[pyfunction]
#[pyo3(signature = (image, template, confidence = 0.95))]
fn find_location(
    image: PyReadonlyArray2<'_, u8>,
    template: PyReadonlyArray2<'_, u8>,
    confidence: f32,
) -> PyResult<Option<Location>> {
    Locator::new(confidence, "ccoeff_normed", None, 255, false, "off")?.locate(image, template)
}

/// Every non-overlapping placement of `template` in `image`.
#[pyfunction]
#[pyo3(signature = (image, template, confidence = 0.95))]
fn find_all_locations(
    image: PyReadonlyArray2<'_, u8>,
    template: PyReadonlyArray2<'_, u8>,
    confidence: f32,
) -> PyResult<Vec<Location>> {
    Locator::new(confidence, "ccoeff_normed", None, 255, false, "off")?
        .locate_all(image, template)
}

/// Bounding rectangle of the best placement.
#[pyfunction]
#[pyo3(signature = (image, template, confidence = 0.95))]
fn find_rect(
    image: PyReadonlyArray2<'_, u8>,
    template: PyReadonlyArray2<'_, u8>,
    confidence: f32,
) -> PyResult<Option<MatchRect>> {
    Locator::new(confidence, "ccoeff_normed", None, 255, false, "off")?
        .locate_rect(image, template)
}

/// Bounding rectangles of every placement.
#[pyfunction]
#[pyo3(signature = (image, template, confidence = 0.95))]
fn find_all_rects(
    image: PyReadonlyArray2<'_, u8>,
    template: PyReadonlyArray2<'_, u8>,
    confidence: f32,
) -> PyResult<Vec<MatchRect>> {
    Locator::new(confidence, "ccoeff_normed", None, 255, false, "off")?
        .locate_all_rects(image, template)
}

/// Python module for corrlocate template location.
#[pymodule]
fn _corrlocate(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Location>()?;
    m.add_class::<MatchRect>()?;
    m.add_class::<Locator>()?;
    m.add_function(wrap_pyfunction!(find_location, m)?)?;
    m.add_function(wrap_pyfunction!(find_all_locations, m)?)?;
    m.add_function(wrap_pyfunction!(find_rect, m)?)?;
    m.add_function(wrap_pyfunction!(find_all_rects, m)?)?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
