//! Binomial efficiency intervals
//!
//! Clopper-Pearson central intervals via Beta quantiles, the exact
//! construction ROOT uses by default for per-bin efficiencies. Converters
//! use the 1-sigma central level unless told otherwise.

use hepplot_core::{Error, Result};
use statrs::distribution::{Beta, ContinuousCDF};

/// Central 68.2689% coverage, the conventional 1-sigma error bar.
pub const ONE_SIGMA: f64 = 0.682_689_492_137_085_9;

/// Clopper-Pearson central interval for `passed` successes out of `total`
/// trials at the given coverage level.
///
/// Returns `(lower, upper)` bounds on the efficiency. Edge cases follow the
/// exact construction: zero passed pins the lower bound to 0, full passed
/// pins the upper bound to 1, and zero trials yield the uninformative
/// interval `(0, 1)`.
pub fn clopper_pearson(passed: f64, total: f64, level: f64) -> Result<(f64, f64)> {
    if !(0.0..1.0).contains(&level) || level == 0.0 {
        return Err(Error::InvalidInput(format!(
            "coverage level {level} must be in (0, 1)"
        )));
    }
    if total <= 0.0 {
        return Ok((0.0, 1.0));
    }
    if passed < 0.0 || passed > total {
        return Err(Error::InvalidInput(format!(
            "passed count {passed} must be in [0, {total}]"
        )));
    }

    let alpha = 1.0 - level;
    let lower = if passed <= 0.0 {
        0.0
    } else {
        Beta::new(passed, total - passed + 1.0)
            .map_err(|e| Error::Computation(format!("beta quantile for lower bound: {e}")))?
            .inverse_cdf(alpha / 2.0)
    };
    let upper = if passed >= total {
        1.0
    } else {
        Beta::new(passed + 1.0, total - passed)
            .map_err(|e| Error::Computation(format!("beta quantile for upper bound: {e}")))?
            .inverse_cdf(1.0 - alpha / 2.0)
    };
    Ok((lower, upper))
}
