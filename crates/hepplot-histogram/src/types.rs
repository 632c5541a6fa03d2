//! Canonical histogram value objects
//!
//! [`Hist`] and [`Hist2D`] are the one internal representation every input
//! source is normalized into: bin contents, per-bin uncertainties, bin edges,
//! and the derived bin centers and half-widths. They own plain arrays, no
//! external resources, and are mutated in place only by re-binning and
//! normalization.

use crate::geometry;
use hepplot_core::{Error, Result};
use std::fmt;

/// Per-bin statistical uncertainty.
///
/// Count-like histograms carry one symmetric uncertainty per bin
/// (conventionally `sqrt(sum of squared weights)`). Efficiency-derived
/// histograms carry a two-sided interval per bin and cannot be re-binned.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorArray {
    /// One symmetric uncertainty per bin.
    Symmetric(Vec<f64>),
    /// Downward and upward uncertainties per bin, as magnitudes.
    Asymmetric { low: Vec<f64>, high: Vec<f64> },
}

impl ErrorArray {
    /// Number of bins covered by this error array.
    pub fn len(&self) -> usize {
        match self {
            ErrorArray::Symmetric(e) => e.len(),
            ErrorArray::Asymmetric { low, .. } => low.len(),
        }
    }

    /// Check if the error array covers no bins.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether this is a two-sided (efficiency-style) uncertainty.
    pub fn is_asymmetric(&self) -> bool {
        matches!(self, ErrorArray::Asymmetric { .. })
    }

    /// Symmetric uncertainties, if this array is symmetric.
    pub fn symmetric(&self) -> Option<&[f64]> {
        match self {
            ErrorArray::Symmetric(e) => Some(e),
            ErrorArray::Asymmetric { .. } => None,
        }
    }

    /// `(low, high)` uncertainty magnitudes, if this array is two-sided.
    pub fn asymmetric(&self) -> Option<(&[f64], &[f64])> {
        match self {
            ErrorArray::Symmetric(_) => None,
            ErrorArray::Asymmetric { low, high } => Some((low, high)),
        }
    }

    /// Divide every uncertainty by `denom`, following IEEE-754 semantics for
    /// degenerate denominators.
    pub(crate) fn divide_by(&mut self, denom: f64) {
        match self {
            ErrorArray::Symmetric(e) => {
                for v in e.iter_mut() {
                    *v /= denom;
                }
            }
            ErrorArray::Asymmetric { low, high } => {
                for v in low.iter_mut() {
                    *v /= denom;
                }
                for v in high.iter_mut() {
                    *v /= denom;
                }
            }
        }
    }
}

/// Validate an edge sequence: at least two edges, strictly increasing.
pub(crate) fn validate_edges(edges: &[f64], context: &str) -> Result<()> {
    if edges.len() < 2 {
        return Err(Error::too_few_edges(edges.len(), context));
    }
    if edges.windows(2).any(|w| !(w[0] < w[1])) {
        return Err(Error::edges_not_increasing(context));
    }
    Ok(())
}

/// A 1D histogram normalized into the canonical representation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hist {
    content: Vec<f64>,
    error: ErrorArray,
    bins: Vec<f64>,
    center: Vec<f64>,
    width: Vec<f64>,
}

impl Hist {
    /// Create a histogram from contents, symmetric errors, and bin edges.
    pub fn new(content: Vec<f64>, error: Vec<f64>, bins: Vec<f64>) -> Result<Self> {
        Self::from_parts(content, ErrorArray::Symmetric(error), bins)
    }

    /// Create a histogram from contents and bin edges, with Poisson errors
    /// `sqrt(content)`.
    pub fn from_content(content: Vec<f64>, bins: Vec<f64>) -> Result<Self> {
        let error = content.iter().map(|c| c.sqrt()).collect();
        Self::new(content, error, bins)
    }

    /// Create a histogram carrying a two-sided uncertainty per bin.
    ///
    /// `low` and `high` are magnitudes of the downward and upward
    /// uncertainties. Histograms built this way cannot be re-binned.
    pub fn with_asymmetric_errors(
        content: Vec<f64>,
        low: Vec<f64>,
        high: Vec<f64>,
        bins: Vec<f64>,
    ) -> Result<Self> {
        if low.len() != content.len() {
            return Err(Error::size_mismatch(content.len(), low.len(), "low errors"));
        }
        if high.len() != content.len() {
            return Err(Error::size_mismatch(content.len(), high.len(), "high errors"));
        }
        Self::from_parts(content, ErrorArray::Asymmetric { low, high }, bins)
    }

    fn from_parts(content: Vec<f64>, error: ErrorArray, bins: Vec<f64>) -> Result<Self> {
        validate_edges(&bins, "bin edges")?;
        if content.len() != bins.len() - 1 {
            return Err(Error::size_mismatch(
                bins.len() - 1,
                content.len(),
                "bin contents",
            ));
        }
        if error.len() != content.len() {
            return Err(Error::size_mismatch(content.len(), error.len(), "bin errors"));
        }
        let center = geometry::midpoints(&bins);
        let width = geometry::half_widths(&bins);
        Ok(Self {
            content,
            error,
            bins,
            center,
            width,
        })
    }

    /// Bin contents.
    pub fn content(&self) -> &[f64] {
        &self.content
    }

    /// Per-bin uncertainties.
    pub fn error(&self) -> &ErrorArray {
        &self.error
    }

    /// Bin edges (length `len() + 1`).
    pub fn bins(&self) -> &[f64] {
        &self.bins
    }

    /// Bin centers.
    pub fn center(&self) -> &[f64] {
        &self.center
    }

    /// Bin half-widths.
    pub fn width(&self) -> &[f64] {
        &self.width
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Check if the histogram has no bins.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Sum of bin contents.
    pub fn integral(&self) -> f64 {
        self.content.iter().sum()
    }

    /// Scale contents and errors so the total integral is 1.
    ///
    /// Total-count normalization only, not per-bin-width density. A zero
    /// integral divides through per IEEE-754; the result is not sanitized.
    pub fn normalize(&mut self) {
        let integral = self.integral();
        for c in self.content.iter_mut() {
            *c /= integral;
        }
        self.error.divide_by(integral);
    }

    /// Swap in a new binning, recomputing centers and half-widths.
    ///
    /// Callers must pass arrays that already satisfy the length invariants.
    pub(crate) fn replace_binning(&mut self, content: Vec<f64>, error: ErrorArray, bins: Vec<f64>) {
        debug_assert_eq!(content.len() + 1, bins.len());
        debug_assert_eq!(error.len(), content.len());
        self.center = geometry::midpoints(&bins);
        self.width = geometry::half_widths(&bins);
        self.content = content;
        self.error = error;
        self.bins = bins;
    }
}

impl fmt::Display for Hist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Hist({} bins, integral={:.3}, range=[{:.3}, {:.3}])",
            self.len(),
            self.integral(),
            self.bins[0],
            self.bins[self.bins.len() - 1]
        )
    }
}

/// A 2D histogram normalized into the canonical representation.
///
/// Contents and errors are flattened row-major (x-major): entry
/// `ix * ny + iy` is bin `(ix, iy)`, matching the order produced by
/// [`geometry::outer_pairs`] over the per-axis bin centers.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hist2D {
    content: Vec<f64>,
    error: ErrorArray,
    xbins: Vec<f64>,
    ybins: Vec<f64>,
    xcenter: Vec<f64>,
    ycenter: Vec<f64>,
    xwidth: Vec<f64>,
    ywidth: Vec<f64>,
}

impl Hist2D {
    /// Create a 2D histogram from flattened contents, symmetric errors, and
    /// per-axis bin edges.
    pub fn new(
        content: Vec<f64>,
        error: Vec<f64>,
        xbins: Vec<f64>,
        ybins: Vec<f64>,
    ) -> Result<Self> {
        Self::from_parts(content, ErrorArray::Symmetric(error), xbins, ybins)
    }

    /// Create a 2D histogram from flattened contents and per-axis edges,
    /// with Poisson errors `sqrt(content)`.
    pub fn from_content(content: Vec<f64>, xbins: Vec<f64>, ybins: Vec<f64>) -> Result<Self> {
        let error = content.iter().map(|c| c.sqrt()).collect();
        Self::new(content, error, xbins, ybins)
    }

    /// Create a 2D histogram carrying a two-sided uncertainty per bin.
    pub fn with_asymmetric_errors(
        content: Vec<f64>,
        low: Vec<f64>,
        high: Vec<f64>,
        xbins: Vec<f64>,
        ybins: Vec<f64>,
    ) -> Result<Self> {
        if low.len() != content.len() {
            return Err(Error::size_mismatch(content.len(), low.len(), "low errors"));
        }
        if high.len() != content.len() {
            return Err(Error::size_mismatch(content.len(), high.len(), "high errors"));
        }
        Self::from_parts(content, ErrorArray::Asymmetric { low, high }, xbins, ybins)
    }

    fn from_parts(
        content: Vec<f64>,
        error: ErrorArray,
        xbins: Vec<f64>,
        ybins: Vec<f64>,
    ) -> Result<Self> {
        validate_edges(&xbins, "x bin edges")?;
        validate_edges(&ybins, "y bin edges")?;
        let nx = xbins.len() - 1;
        let ny = ybins.len() - 1;
        if content.len() != nx * ny {
            return Err(Error::size_mismatch(nx * ny, content.len(), "bin contents"));
        }
        if error.len() != content.len() {
            return Err(Error::size_mismatch(content.len(), error.len(), "bin errors"));
        }
        let xcenter = geometry::midpoints(&xbins);
        let ycenter = geometry::midpoints(&ybins);
        let xwidth = geometry::half_widths(&xbins);
        let ywidth = geometry::half_widths(&ybins);
        Ok(Self {
            content,
            error,
            xbins,
            ybins,
            xcenter,
            ycenter,
            xwidth,
            ywidth,
        })
    }

    /// Flattened bin contents, row-major (x-major).
    pub fn content(&self) -> &[f64] {
        &self.content
    }

    /// Per-bin uncertainties, in the same flattened order as contents.
    pub fn error(&self) -> &ErrorArray {
        &self.error
    }

    /// x-axis bin edges (length `nx() + 1`).
    pub fn xbins(&self) -> &[f64] {
        &self.xbins
    }

    /// y-axis bin edges (length `ny() + 1`).
    pub fn ybins(&self) -> &[f64] {
        &self.ybins
    }

    /// x-axis bin centers.
    pub fn xcenter(&self) -> &[f64] {
        &self.xcenter
    }

    /// y-axis bin centers.
    pub fn ycenter(&self) -> &[f64] {
        &self.ycenter
    }

    /// x-axis bin half-widths.
    pub fn xwidth(&self) -> &[f64] {
        &self.xwidth
    }

    /// y-axis bin half-widths.
    pub fn ywidth(&self) -> &[f64] {
        &self.ywidth
    }

    /// Number of x bins.
    pub fn nx(&self) -> usize {
        self.xbins.len() - 1
    }

    /// Number of y bins.
    pub fn ny(&self) -> usize {
        self.ybins.len() - 1
    }

    /// Total number of bins.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Check if the histogram has no bins.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Content of bin `(ix, iy)`.
    pub fn value(&self, ix: usize, iy: usize) -> f64 {
        self.content[geometry::flat_index(ix, iy, self.ny())]
    }

    /// Per-bin `(x, y)` center coordinates in flattened order, one pair per
    /// content entry.
    pub fn centers_flat(&self) -> (Vec<f64>, Vec<f64>) {
        geometry::outer_pairs(&self.xcenter, &self.ycenter)
    }

    /// Sum of bin contents.
    pub fn integral(&self) -> f64 {
        self.content.iter().sum()
    }

    /// Scale contents and errors so the total integral is 1.
    ///
    /// Total-count normalization only, not per-bin-area density. A zero
    /// integral divides through per IEEE-754; the result is not sanitized.
    pub fn normalize(&mut self) {
        let integral = self.integral();
        for c in self.content.iter_mut() {
            *c /= integral;
        }
        self.error.divide_by(integral);
    }

    /// Swap in a new binning, recomputing per-axis centers and half-widths.
    pub(crate) fn replace_binning(
        &mut self,
        content: Vec<f64>,
        error: ErrorArray,
        xbins: Vec<f64>,
        ybins: Vec<f64>,
    ) {
        debug_assert_eq!(content.len(), (xbins.len() - 1) * (ybins.len() - 1));
        debug_assert_eq!(error.len(), content.len());
        self.xcenter = geometry::midpoints(&xbins);
        self.ycenter = geometry::midpoints(&ybins);
        self.xwidth = geometry::half_widths(&xbins);
        self.ywidth = geometry::half_widths(&ybins);
        self.content = content;
        self.error = error;
        self.xbins = xbins;
        self.ybins = ybins;
    }
}

impl fmt::Display for Hist2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Hist2D({}x{} bins, integral={:.3}, x=[{:.3}, {:.3}], y=[{:.3}, {:.3}])",
            self.nx(),
            self.ny(),
            self.integral(),
            self.xbins[0],
            self.xbins[self.xbins.len() - 1],
            self.ybins[0],
            self.ybins[self.ybins.len() - 1]
        )
    }
}
