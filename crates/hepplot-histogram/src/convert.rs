//! Converters from raw and external sources into the canonical histograms
//!
//! One converter type per source kind — raw arrays, externally-owned binned
//! histograms, efficiency objects — so the dispatch happens once, statically,
//! at this boundary. Converters are configured up front (binning,
//! normalization, optional re-binning) and then applied, and they never
//! mutate the source they read from.

use crate::rebin::{hist2d_count, hist2d_weighted, hist_count, hist_weighted, Rebin, Rebin2D};
use crate::traits::{BinnedSource, BinnedSource2D, EfficiencySource, EfficiencySource2D};
use crate::types::{validate_edges, Hist, Hist2D};
use hepplot_core::{Error, Result};
use tracing::debug;

/// Specification of a histogram axis.
#[derive(Debug, Clone, PartialEq)]
pub enum Binning {
    /// `n` equal-width bins spanning the data range.
    Count(usize),
    /// Equal-width bins over an explicit range.
    Range { bins: usize, low: f64, high: f64 },
    /// Explicit, strictly increasing bin edges.
    Edges(Vec<f64>),
}

impl Binning {
    /// Resolve the specification into concrete edges for the given sample.
    fn resolve(&self, data: &[f64], context: &str) -> Result<Vec<f64>> {
        match self {
            Binning::Count(bins) => {
                if data.is_empty() {
                    return Err(Error::InsufficientData {
                        expected: 1,
                        actual: 0,
                    });
                }
                let mut low = f64::INFINITY;
                let mut high = f64::NEG_INFINITY;
                for &v in data {
                    low = low.min(v);
                    high = high.max(v);
                }
                if low == high {
                    // all entries identical: widen to a unit range around them
                    low -= 0.5;
                    high += 0.5;
                }
                equal_width_edges(*bins, low, high, context)
            }
            Binning::Range { bins, low, high } => {
                if !(low < high) {
                    return Err(Error::InvalidBinning(format!(
                        "{context}: range [{low}, {high}] is not increasing"
                    )));
                }
                equal_width_edges(*bins, *low, *high, context)
            }
            Binning::Edges(edges) => {
                validate_edges(edges, context)?;
                Ok(edges.clone())
            }
        }
    }
}

fn equal_width_edges(bins: usize, low: f64, high: f64, context: &str) -> Result<Vec<f64>> {
    if bins == 0 {
        return Err(Error::InvalidBinning(format!(
            "{context}: need at least 1 bin"
        )));
    }
    let width = (high - low) / bins as f64;
    let mut edges: Vec<f64> = (0..bins).map(|i| low + i as f64 * width).collect();
    edges.push(high);
    Ok(edges)
}

/// Per-bin quadrature sum of weights: `sqrt(sum of w^2)` over the entries
/// landing in each bin.
fn sumw2_errors(data: &[f64], weights: &[f64], edges: &[f64]) -> Vec<f64> {
    let squared: Vec<f64> = weights.iter().map(|w| w * w).collect();
    hist_weighted(data, &squared, edges)
        .iter()
        .map(|s| s.sqrt())
        .collect()
}

/// Convert raw unbinned 1D samples into a [`Hist`].
///
/// Unweighted samples get Poisson errors `sqrt(content)`; weighted samples
/// get the per-bin quadrature sum of weights. Optional re-binning runs after
/// construction, normalization last.
#[derive(Debug, Clone)]
pub struct ArrayConverter {
    binning: Binning,
    normed: bool,
    rebin: Option<Rebin>,
}

impl ArrayConverter {
    /// Create a converter with the given axis specification.
    pub fn new(binning: Binning) -> Self {
        Self {
            binning,
            normed: false,
            rebin: None,
        }
    }

    /// Normalize the converted histogram to unit integral.
    pub fn normed(mut self, normed: bool) -> Self {
        self.normed = normed;
        self
    }

    /// Re-bin the converted histogram.
    pub fn rebin(mut self, spec: Rebin) -> Self {
        self.rebin = Some(spec);
        self
    }

    /// Bin an unweighted sample.
    pub fn convert(&self, data: &[f64]) -> Result<Hist> {
        self.build(data, None)
    }

    /// Bin a sample with one weight per entry.
    pub fn convert_weighted(&self, data: &[f64], weights: &[f64]) -> Result<Hist> {
        if weights.len() != data.len() {
            return Err(Error::size_mismatch(data.len(), weights.len(), "weights"));
        }
        self.build(data, Some(weights))
    }

    fn build(&self, data: &[f64], weights: Option<&[f64]>) -> Result<Hist> {
        let edges = self.binning.resolve(data, "binning")?;
        let (content, error) = match weights {
            Some(w) => (
                hist_weighted(data, w, &edges),
                sumw2_errors(data, w, &edges),
            ),
            None => {
                let content = hist_count(data, &edges);
                let error = content.iter().map(|c| c.sqrt()).collect();
                (content, error)
            }
        };
        let mut hist = Hist::new(content, error, edges)?;
        if let Some(spec) = &self.rebin {
            hist.rebin(spec)?;
        }
        if self.normed {
            hist.normalize();
        }
        Ok(hist)
    }
}

/// Convert raw unbinned 2D samples into a [`Hist2D`].
#[derive(Debug, Clone)]
pub struct ArrayConverter2D {
    x_binning: Binning,
    y_binning: Binning,
    normed: bool,
    rebin: Option<Rebin2D>,
}

impl ArrayConverter2D {
    /// Create a converter with per-axis specifications.
    pub fn new(x_binning: Binning, y_binning: Binning) -> Self {
        Self {
            x_binning,
            y_binning,
            normed: false,
            rebin: None,
        }
    }

    /// Normalize the converted histogram to unit integral.
    pub fn normed(mut self, normed: bool) -> Self {
        self.normed = normed;
        self
    }

    /// Re-bin the converted histogram.
    pub fn rebin(mut self, spec: Rebin2D) -> Self {
        self.rebin = Some(spec);
        self
    }

    /// Bin unweighted `(x, y)` samples given as parallel slices.
    pub fn convert(&self, xs: &[f64], ys: &[f64]) -> Result<Hist2D> {
        self.build(xs, ys, None)
    }

    /// Bin `(x, y)` samples with one weight per entry.
    pub fn convert_weighted(&self, xs: &[f64], ys: &[f64], weights: &[f64]) -> Result<Hist2D> {
        if weights.len() != xs.len() {
            return Err(Error::size_mismatch(xs.len(), weights.len(), "weights"));
        }
        self.build(xs, ys, Some(weights))
    }

    fn build(&self, xs: &[f64], ys: &[f64], weights: Option<&[f64]>) -> Result<Hist2D> {
        if ys.len() != xs.len() {
            return Err(Error::size_mismatch(xs.len(), ys.len(), "y sample"));
        }
        let x_edges = self.x_binning.resolve(xs, "x binning")?;
        let y_edges = self.y_binning.resolve(ys, "y binning")?;
        let (content, error) = match weights {
            Some(w) => {
                let content = hist2d_weighted(xs, ys, w, &x_edges, &y_edges);
                let squared: Vec<f64> = w.iter().map(|w| w * w).collect();
                let error = hist2d_weighted(xs, ys, &squared, &x_edges, &y_edges)
                    .iter()
                    .map(|s| s.sqrt())
                    .collect();
                (content, error)
            }
            None => {
                let content = hist2d_count(xs, ys, &x_edges, &y_edges);
                let error = content.iter().map(|c| c.sqrt()).collect();
                (content, error)
            }
        };
        let mut hist = Hist2D::new(content, error, x_edges, y_edges)?;
        if let Some(spec) = &self.rebin {
            hist.rebin(spec)?;
        }
        if self.normed {
            hist.normalize();
        }
        Ok(hist)
    }
}

/// Adapt an externally-owned 1D binned histogram into a [`Hist`].
///
/// The source is only read. Re-binning, when requested, runs on the
/// converted value, never through the source's own facilities.
#[derive(Debug, Clone, Default)]
pub struct BinnedConverter {
    normed: bool,
    rebin: Option<Rebin>,
}

impl BinnedConverter {
    /// Create a converter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize the converted histogram to unit integral.
    pub fn normed(mut self, normed: bool) -> Self {
        self.normed = normed;
        self
    }

    /// Re-bin the converted histogram.
    pub fn rebin(mut self, spec: Rebin) -> Self {
        self.rebin = Some(spec);
        self
    }

    /// Read the source and build the canonical histogram.
    pub fn convert<S: BinnedSource>(&self, source: &S) -> Result<Hist> {
        let content = source.contents();
        let edges = source.edges();
        let error = match source.variances() {
            Some(variances) => variances.iter().map(|v| v.sqrt()).collect(),
            None => {
                debug!("source has no variances, falling back to sqrt(content) errors");
                content.iter().map(|c| c.sqrt()).collect()
            }
        };
        let mut hist = Hist::new(content, error, edges)?;
        if let Some(spec) = &self.rebin {
            hist.rebin(spec)?;
        }
        if self.normed {
            hist.normalize();
        }
        Ok(hist)
    }
}

/// Adapt an externally-owned 2D binned histogram into a [`Hist2D`].
#[derive(Debug, Clone, Default)]
pub struct BinnedConverter2D {
    normed: bool,
    rebin: Option<Rebin2D>,
}

impl BinnedConverter2D {
    /// Create a converter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize the converted histogram to unit integral.
    pub fn normed(mut self, normed: bool) -> Self {
        self.normed = normed;
        self
    }

    /// Re-bin the converted histogram.
    pub fn rebin(mut self, spec: Rebin2D) -> Self {
        self.rebin = Some(spec);
        self
    }

    /// Read the source and build the canonical histogram.
    pub fn convert<S: BinnedSource2D>(&self, source: &S) -> Result<Hist2D> {
        let content = source.contents();
        let error = match source.variances() {
            Some(variances) => variances.iter().map(|v| v.sqrt()).collect(),
            None => {
                debug!("source has no variances, falling back to sqrt(content) errors");
                content.iter().map(|c| c.sqrt()).collect()
            }
        };
        let mut hist = Hist2D::new(content, error, source.x_edges(), source.y_edges())?;
        if let Some(spec) = &self.rebin {
            hist.rebin(spec)?;
        }
        if self.normed {
            hist.normalize();
        }
        Ok(hist)
    }
}

/// Adapt an efficiency object into a [`Hist`] / [`Hist2D`].
///
/// The content is the per-bin efficiency and the error the two-sided interval
/// carried by the source, passed through untouched. No re-binning option
/// exists here, and re-binning the produced histogram fails fast: intervals
/// cannot be re-derived without the raw counts.
#[derive(Debug, Clone, Default)]
pub struct EfficiencyConverter;

impl EfficiencyConverter {
    /// Create the converter.
    pub fn new() -> Self {
        Self
    }

    /// Read a 1D efficiency source.
    pub fn convert<S: EfficiencySource>(&self, source: &S) -> Result<Hist> {
        let edges = source.edges();
        validate_edges(&edges, "efficiency edges")?;
        let nbins = edges.len() - 1;
        let mut content = Vec::with_capacity(nbins);
        let mut low = Vec::with_capacity(nbins);
        let mut high = Vec::with_capacity(nbins);
        for i in 0..nbins {
            content.push(source.efficiency(i));
            low.push(source.error_low(i));
            high.push(source.error_up(i));
        }
        Hist::with_asymmetric_errors(content, low, high, edges)
    }

    /// Read a 2D efficiency source into the row-major flattened layout.
    pub fn convert_2d<S: EfficiencySource2D>(&self, source: &S) -> Result<Hist2D> {
        let x_edges = source.x_edges();
        let y_edges = source.y_edges();
        validate_edges(&x_edges, "efficiency x edges")?;
        validate_edges(&y_edges, "efficiency y edges")?;
        let nx = x_edges.len() - 1;
        let ny = y_edges.len() - 1;
        let mut content = Vec::with_capacity(nx * ny);
        let mut low = Vec::with_capacity(nx * ny);
        let mut high = Vec::with_capacity(nx * ny);
        for ix in 0..nx {
            for iy in 0..ny {
                content.push(source.efficiency(ix, iy));
                low.push(source.error_low(ix, iy));
                high.push(source.error_up(ix, iy));
            }
        }
        Hist2D::with_asymmetric_errors(content, low, high, x_edges, y_edges)
    }

    /// Build an efficiency histogram from raw per-bin passed/total counts.
    ///
    /// Contents are `passed / total` with raw IEEE division semantics (a zero
    /// total yields inf/NaN, not an error). Uncertainties are Clopper-Pearson
    /// central intervals at the conventional 1-sigma level.
    #[cfg(feature = "intervals")]
    pub fn from_counts(&self, passed: &[f64], total: &[f64], edges: &[f64]) -> Result<Hist> {
        use crate::intervals::{clopper_pearson, ONE_SIGMA};

        validate_edges(edges, "efficiency edges")?;
        if passed.len() != edges.len() - 1 {
            return Err(Error::size_mismatch(
                edges.len() - 1,
                passed.len(),
                "passed counts",
            ));
        }
        if total.len() != passed.len() {
            return Err(Error::size_mismatch(passed.len(), total.len(), "total counts"));
        }

        let mut content = Vec::with_capacity(passed.len());
        let mut low = Vec::with_capacity(passed.len());
        let mut high = Vec::with_capacity(passed.len());
        for (&p, &t) in passed.iter().zip(total) {
            let eff = p / t;
            let (lo, hi) = clopper_pearson(p, t, ONE_SIGMA)?;
            content.push(eff);
            low.push(eff - lo);
            high.push(hi - eff);
        }
        Hist::with_asymmetric_errors(content, low, high, edges.to_vec())
    }
}
