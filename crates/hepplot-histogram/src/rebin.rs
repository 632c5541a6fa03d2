//! Re-binning and quadrature error propagation
//!
//! Re-binning is merge-only: the requested binning must be expressible from
//! the current edges, either by an integer merge factor or by an explicit
//! edge sequence whose every value already exists in the current edge set.
//! An incompatible request is a recoverable usage error: the operation keeps
//! the histogram untouched and reports on the `tracing` warning channel,
//! matching skip-and-continue batch plotting workflows.
//!
//! On success, content is re-derived by aggregating the old bin centers
//! weighted by the old contents into the new edges, and errors are combined
//! in quadrature per destination bin.

use crate::geometry;
use crate::types::{ErrorArray, Hist, Hist2D};
use hepplot_core::{Error, Result};
use tracing::warn;

/// Relative tolerance for matching a requested edge against existing edges.
///
/// Scale-aware so both O(1) observables and O(10^3) edge values behave;
/// exact floating equality is never required.
pub const EDGE_MATCH_TOL: f64 = 1e-9;

/// A 1D re-binning request.
#[derive(Debug, Clone, PartialEq)]
pub enum Rebin {
    /// Merge every `k` adjacent bins; `k` must evenly divide the bin count.
    Factor(usize),
    /// Explicit new edges, each of which must match an existing edge.
    Edges(Vec<f64>),
}

/// A 2D re-binning request, applied per axis.
#[derive(Debug, Clone, PartialEq)]
pub enum Rebin2D {
    /// Merge every `k` adjacent bins on both axes.
    Factor(usize),
    /// Explicit new edges per axis, each matching an existing edge.
    Edges { x: Vec<f64>, y: Vec<f64> },
}

fn edges_match(a: f64, b: f64) -> bool {
    (a - b).abs() <= EDGE_MATCH_TOL * a.abs().max(b.abs()).max(1.0)
}

/// Subsample every `factor`-th edge, or `None` if `factor` does not evenly
/// divide the bin count.
fn merged_edges(edges: &[f64], factor: usize) -> Option<Vec<f64>> {
    let nbins = edges.len() - 1;
    if factor == 0 || nbins % factor != 0 {
        return None;
    }
    Some(edges.iter().copied().step_by(factor).collect())
}

/// Check a requested edge sequence is usable against the current edges:
/// strictly increasing, at least one bin, and every value present in the
/// current edge set (no interpolation across unmatched edges).
fn edges_compatible(current: &[f64], requested: &[f64]) -> bool {
    requested.len() >= 2
        && requested.windows(2).all(|w| w[0] < w[1])
        && requested
            .iter()
            .all(|&e| current.iter().any(|&c| edges_match(c, e)))
}

/// Weighted 1D histogram aggregation.
///
/// Entries outside the edge range are dropped (under/overflow truncation).
pub fn hist_weighted(values: &[f64], weights: &[f64], edges: &[f64]) -> Vec<f64> {
    let mut content = vec![0.0; edges.len().saturating_sub(1)];
    for (&v, &w) in values.iter().zip(weights) {
        if let Some(i) = geometry::bin_index(v, edges) {
            content[i] += w;
        }
    }
    content
}

/// Unweighted 1D histogram aggregation (unit weight per entry).
pub fn hist_count(values: &[f64], edges: &[f64]) -> Vec<f64> {
    let mut content = vec![0.0; edges.len().saturating_sub(1)];
    for &v in values {
        if let Some(i) = geometry::bin_index(v, edges) {
            content[i] += 1.0;
        }
    }
    content
}

/// Weighted 2D histogram aggregation into a row-major flattened grid.
pub fn hist2d_weighted(
    xs: &[f64],
    ys: &[f64],
    weights: &[f64],
    x_edges: &[f64],
    y_edges: &[f64],
) -> Vec<f64> {
    let ny = y_edges.len().saturating_sub(1);
    let nx = x_edges.len().saturating_sub(1);
    let mut content = vec![0.0; nx * ny];
    for ((&x, &y), &w) in xs.iter().zip(ys).zip(weights) {
        if let (Some(ix), Some(iy)) =
            (geometry::bin_index(x, x_edges), geometry::bin_index(y, y_edges))
        {
            content[geometry::flat_index(ix, iy, ny)] += w;
        }
    }
    content
}

/// Unweighted 2D histogram aggregation into a row-major flattened grid.
pub fn hist2d_count(xs: &[f64], ys: &[f64], x_edges: &[f64], y_edges: &[f64]) -> Vec<f64> {
    let ny = y_edges.len().saturating_sub(1);
    let nx = x_edges.len().saturating_sub(1);
    let mut content = vec![0.0; nx * ny];
    for (&x, &y) in xs.iter().zip(ys) {
        if let (Some(ix), Some(iy)) =
            (geometry::bin_index(x, x_edges), geometry::bin_index(y, y_edges))
        {
            content[geometry::flat_index(ix, iy, ny)] += 1.0;
        }
    }
    content
}

/// Combine per-entry uncertainties in quadrature per destination bin.
///
/// `new_errors[j] = sqrt(sum of errors[i]^2 over entries whose position
/// classifies into new bin j)`. Entries outside the new range contribute to
/// no destination bin.
pub fn propagate_errors(positions: &[f64], errors: &[f64], new_edges: &[f64]) -> Vec<f64> {
    let mut sumw2 = vec![0.0; new_edges.len().saturating_sub(1)];
    for (&p, &e) in positions.iter().zip(errors) {
        if let Some(i) = geometry::bin_index(p, new_edges) {
            sumw2[i] += e * e;
        }
    }
    sumw2.iter().map(|s| s.sqrt()).collect()
}

/// 2D quadrature combination into a row-major flattened grid.
///
/// Each entry is classified per axis into the new binning; its squared
/// uncertainty accumulates into the destination cell. A single pass over the
/// source entries, equivalent to the per-destination-bin membership scan up
/// to floating-point summation order.
pub fn propagate_errors_2d(
    xs: &[f64],
    ys: &[f64],
    errors: &[f64],
    x_edges: &[f64],
    y_edges: &[f64],
) -> Vec<f64> {
    let ny = y_edges.len().saturating_sub(1);
    let nx = x_edges.len().saturating_sub(1);
    let mut sumw2 = vec![0.0; nx * ny];
    for ((&x, &y), &e) in xs.iter().zip(ys).zip(errors) {
        if let (Some(ix), Some(iy)) =
            (geometry::bin_index(x, x_edges), geometry::bin_index(y, y_edges))
        {
            sumw2[geometry::flat_index(ix, iy, ny)] += e * e;
        }
    }
    sumw2.iter().map(|s| s.sqrt()).collect()
}

impl Hist {
    /// Re-bin in place.
    ///
    /// An incompatible request (non-dividing factor, edges absent from the
    /// current edge set) leaves the histogram unchanged and emits a warning.
    /// Re-binning an efficiency-derived histogram is rejected outright: no
    /// sound interval re-derivation exists without the raw counts.
    pub fn rebin(&mut self, spec: &Rebin) -> Result<()> {
        let old_errors = match self.error().symmetric() {
            Some(e) => e,
            None => {
                return Err(Error::RebinUnsupported(
                    "histogram carries asymmetric efficiency errors".to_string(),
                ))
            }
        };

        let new_edges = match spec {
            Rebin::Factor(factor) => match merged_edges(self.bins(), *factor) {
                Some(edges) => edges,
                None => {
                    warn!(
                        factor,
                        nbins = self.len(),
                        "factor must evenly divide the bin count, keeping current binning"
                    );
                    return Ok(());
                }
            },
            Rebin::Edges(requested) => {
                if !edges_compatible(self.bins(), requested) {
                    warn!(
                        ?requested,
                        "requested edges do not match the current edge set, keeping current binning"
                    );
                    return Ok(());
                }
                requested.clone()
            }
        };

        let content = hist_weighted(self.center(), self.content(), &new_edges);
        let error = propagate_errors(self.center(), old_errors, &new_edges);
        self.replace_binning(content, ErrorArray::Symmetric(error), new_edges);
        Ok(())
    }
}

impl Hist2D {
    /// Re-bin in place, per axis.
    ///
    /// Both axes must accept the request (a factor must divide both bin
    /// counts; explicit edges must match per axis), else the histogram is
    /// left unchanged with a warning. Content is re-aggregated over the
    /// outer-product bin-center grid; errors combine in quadrature.
    pub fn rebin(&mut self, spec: &Rebin2D) -> Result<()> {
        let old_errors = match self.error().symmetric() {
            Some(e) => e.to_vec(),
            None => {
                return Err(Error::RebinUnsupported(
                    "histogram carries asymmetric efficiency errors".to_string(),
                ))
            }
        };

        let (new_x, new_y) = match spec {
            Rebin2D::Factor(factor) => {
                match (
                    merged_edges(self.xbins(), *factor),
                    merged_edges(self.ybins(), *factor),
                ) {
                    (Some(x), Some(y)) => (x, y),
                    _ => {
                        warn!(
                            factor,
                            nx = self.nx(),
                            ny = self.ny(),
                            "factor must evenly divide both axes, keeping current binning"
                        );
                        return Ok(());
                    }
                }
            }
            Rebin2D::Edges { x, y } => {
                if !edges_compatible(self.xbins(), x) || !edges_compatible(self.ybins(), y) {
                    warn!(
                        "requested edges do not match the current edge sets, keeping current binning"
                    );
                    return Ok(());
                }
                (x.clone(), y.clone())
            }
        };

        let (cx, cy) = self.centers_flat();
        let content = hist2d_weighted(&cx, &cy, self.content(), &new_x, &new_y);
        let error = propagate_errors_2d(&cx, &cy, &old_errors, &new_x, &new_y);
        self.replace_binning(content, ErrorArray::Symmetric(error), new_x, new_y);
        Ok(())
    }
}
