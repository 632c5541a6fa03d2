//! Histogram normalization and re-binning for HEP-style plotting
//!
//! This crate converts heterogeneous binned and unbinned inputs into one
//! canonical histogram representation — contents, per-bin uncertainties, bin
//! edges, centers, and half-widths, in 1D and 2D — ready to hand to a
//! rendering layer. It is the data side of a plotting stack: no figures, no
//! axes, no text.
//!
//! # Key Features
//!
//! - **One representation**: raw samples, external binned histograms, and
//!   efficiency objects all normalize into [`Hist`] / [`Hist2D`]
//! - **Merge re-binning with quadrature errors**: integer merge factors or
//!   explicit matched edges; uncertainties combine as `sqrt(sum of squares)`
//! - **Weighted samples**: per-bin quadrature sums of weights in 1D and 2D
//! - **Efficiency intervals**: asymmetric per-bin errors carried through, or
//!   built from raw counts with Clopper-Pearson intervals (feature
//!   `intervals`, on by default)
//! - **Injection-friendly**: external backends plug in through small
//!   capability traits, chosen by the caller
//!
//! # Examples
//!
//! ## Binning a raw sample
//!
//! ```rust
//! use hepplot_histogram::{ArrayConverter, Binning};
//!
//! let hist = ArrayConverter::new(Binning::Edges(vec![0.0, 1.0, 2.0]))
//!     .convert(&[0.5, 0.5, 1.5, 1.5, 1.5])
//!     .unwrap();
//!
//! assert_eq!(hist.content(), &[2.0, 3.0]);
//! assert_eq!(hist.center(), &[0.5, 1.5]);
//! ```
//!
//! ## Merge re-binning with error propagation
//!
//! ```rust
//! use hepplot_histogram::{Hist, Rebin};
//!
//! let mut hist = Hist::from_content(
//!     vec![2.0, 4.0, 6.0, 8.0],
//!     vec![0.0, 1.0, 2.0, 3.0, 4.0],
//! ).unwrap();
//!
//! hist.rebin(&Rebin::Factor(2)).unwrap();
//!
//! assert_eq!(hist.bins(), &[0.0, 2.0, 4.0]);
//! assert_eq!(hist.content(), &[6.0, 14.0]);
//! ```
//!
//! ## Adapting an external histogram
//!
//! ```rust
//! use hepplot_histogram::{BinnedConverter, BinnedSource};
//!
//! struct MyHisto;
//!
//! impl BinnedSource for MyHisto {
//!     fn contents(&self) -> Vec<f64> { vec![5.0, 7.0] }
//!     fn edges(&self) -> Vec<f64> { vec![0.0, 10.0, 20.0] }
//! }
//!
//! let hist = BinnedConverter::new().convert(&MyHisto).unwrap();
//! assert_eq!(hist.integral(), 12.0);
//! ```

pub mod convert;
pub mod geometry;
pub mod rebin;
pub mod traits;
pub mod types;

#[cfg(feature = "intervals")]
pub mod intervals;

// Re-export main types and traits
pub use convert::{
    ArrayConverter, ArrayConverter2D, BinnedConverter, BinnedConverter2D, Binning,
    EfficiencyConverter,
};
pub use rebin::{propagate_errors, propagate_errors_2d, Rebin, Rebin2D};
pub use traits::{BinnedSource, BinnedSource2D, EfficiencySource, EfficiencySource2D};
pub use types::{ErrorArray, Hist, Hist2D};

pub use hepplot_core::{Error, Result};

// Convenience functions

/// Bin a raw unweighted sample into `bins` equal-width bins spanning the
/// data.
pub fn array_to_hist(data: &[f64], bins: usize) -> Result<Hist> {
    ArrayConverter::new(Binning::Count(bins)).convert(data)
}

/// Bin raw unweighted `(x, y)` samples into `bins` equal-width bins per axis.
pub fn array_to_hist_2d(xs: &[f64], ys: &[f64], bins: usize) -> Result<Hist2D> {
    ArrayConverter2D::new(Binning::Count(bins), Binning::Count(bins)).convert(xs, ys)
}

/// Adapt an externally-owned binned histogram with default options.
pub fn binned_to_hist<S: BinnedSource>(source: &S) -> Result<Hist> {
    BinnedConverter::new().convert(source)
}

/// Adapt an externally-owned 2D binned histogram with default options.
pub fn binned_to_hist_2d<S: BinnedSource2D>(source: &S) -> Result<Hist2D> {
    BinnedConverter2D::new().convert(source)
}

/// Adapt an externally-owned efficiency object.
pub fn efficiency_to_hist<S: EfficiencySource>(source: &S) -> Result<Hist> {
    EfficiencyConverter::new().convert(source)
}

/// Adapt an externally-owned 2D efficiency object.
pub fn efficiency_to_hist_2d<S: EfficiencySource2D>(source: &S) -> Result<Hist2D> {
    EfficiencyConverter::new().convert_2d(source)
}
