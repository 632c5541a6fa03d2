//! hepplot — histogram data preparation for HEP-style plotting
//!
//! Facade crate re-exporting the workspace members. Most users only need the
//! converters and the [`Hist`] / [`Hist2D`] value objects:
//!
//! ```rust
//! use hepplot::{ArrayConverter, Binning, Rebin};
//!
//! let hist = ArrayConverter::new(Binning::Range { bins: 4, low: 0.0, high: 4.0 })
//!     .rebin(Rebin::Factor(2))
//!     .convert(&[0.5, 1.5, 2.5, 3.5])
//!     .unwrap();
//!
//! assert_eq!(hist.bins(), &[0.0, 2.0, 4.0]);
//! assert_eq!(hist.content(), &[2.0, 2.0]);
//! ```

pub use hepplot_core::{Error, Result};
pub use hepplot_histogram::*;
