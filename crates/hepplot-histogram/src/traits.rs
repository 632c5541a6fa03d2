//! Capability traits for externally-owned histogram sources
//!
//! Converters accept any type implementing these traits, so the binned
//! backend (ROOT-style, columnar, in-memory) is chosen by the caller through
//! dependency injection. There is no ambient backend detection and no global
//! state.

/// A dense 1D binned histogram owned elsewhere.
///
/// Contents and edges exclude under/overflow bins. Variances are the per-bin
/// sums of squared weights; sources that do not track them return `None` and
/// the converter degrades to Poisson errors.
pub trait BinnedSource {
    /// Bin contents, length `edges().len() - 1`.
    fn contents(&self) -> Vec<f64>;

    /// Bin edges, strictly increasing.
    fn edges(&self) -> Vec<f64>;

    /// Per-bin variances (sum of squared weights), if tracked.
    fn variances(&self) -> Option<Vec<f64>> {
        None
    }
}

/// A dense 2D binned histogram owned elsewhere.
///
/// Contents (and variances, when tracked) are flattened row-major (x-major):
/// entry `ix * ny + iy` is bin `(ix, iy)`.
pub trait BinnedSource2D {
    /// Flattened bin contents, length `(x_edges - 1) * (y_edges - 1)`.
    fn contents(&self) -> Vec<f64>;

    /// x-axis bin edges, strictly increasing.
    fn x_edges(&self) -> Vec<f64>;

    /// y-axis bin edges, strictly increasing.
    fn y_edges(&self) -> Vec<f64>;

    /// Flattened per-bin variances, if tracked.
    fn variances(&self) -> Option<Vec<f64>> {
        None
    }
}

/// A 1D efficiency (passed/total ratio per bin) owned elsewhere.
///
/// Bin edges come from the underlying "passed" histogram; per-bin values are
/// the efficiency and its two-sided confidence interval, indexed from 0.
pub trait EfficiencySource {
    /// Bin edges of the underlying passed histogram.
    fn edges(&self) -> Vec<f64>;

    /// Efficiency in `bin`.
    fn efficiency(&self, bin: usize) -> f64;

    /// Upward uncertainty magnitude in `bin`.
    fn error_up(&self, bin: usize) -> f64;

    /// Downward uncertainty magnitude in `bin`.
    fn error_low(&self, bin: usize) -> f64;
}

/// A 2D efficiency owned elsewhere, indexed per axis from 0.
pub trait EfficiencySource2D {
    /// x-axis bin edges of the underlying passed histogram.
    fn x_edges(&self) -> Vec<f64>;

    /// y-axis bin edges of the underlying passed histogram.
    fn y_edges(&self) -> Vec<f64>;

    /// Efficiency in bin `(ix, iy)`.
    fn efficiency(&self, ix: usize, iy: usize) -> f64;

    /// Upward uncertainty magnitude in bin `(ix, iy)`.
    fn error_up(&self, ix: usize, iy: usize) -> f64;

    /// Downward uncertainty magnitude in bin `(ix, iy)`.
    fn error_low(&self, ix: usize, iy: usize) -> f64;
}
