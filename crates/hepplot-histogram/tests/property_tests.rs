//! Property-based tests for re-binning and normalization
//!
//! These pin down the conservation laws the engine promises: merge re-binning
//! never loses content, quadrature propagation matches the closed form for
//! uniform merges, and normalization is a pure rescaling.

use proptest::prelude::*;

use hepplot_histogram::{Hist, Rebin};

fn content_strategy(nbins: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0..1000.0f64, nbins)
}

fn unit_edges(nbins: usize) -> Vec<f64> {
    (0..=nbins).map(|i| i as f64).collect()
}

proptest! {
    // Content is conserved by any full-span merge
    #[test]
    fn prop_merge_conserves_content(
        factor in 1usize..5,
        groups in 1usize..7,
        content in content_strategy(24)
    ) {
        let nbins = factor * groups;
        let content = content[..nbins].to_vec();
        let mut hist = Hist::from_content(content, unit_edges(nbins)).unwrap();
        let total = hist.integral();

        hist.rebin(&Rebin::Factor(factor)).unwrap();

        prop_assert_eq!(hist.len(), groups);
        prop_assert!((hist.integral() - total).abs() <= 1e-9 * total.max(1.0));
    }

    // Factor-1 re-binning is the identity
    #[test]
    fn prop_factor_one_identity(content in content_strategy(12)) {
        let mut hist = Hist::from_content(content, unit_edges(12)).unwrap();
        let before = hist.clone();
        hist.rebin(&Rebin::Factor(1)).unwrap();
        prop_assert_eq!(hist, before);
    }

    // Merged errors match the closed-form quadrature sum of the group
    #[test]
    fn prop_merge_errors_in_quadrature(
        factor in 1usize..5,
        groups in 1usize..5,
        errors in prop::collection::vec(0.0..50.0f64, 20)
    ) {
        let nbins = factor * groups;
        let errors = errors[..nbins].to_vec();
        let content = vec![1.0; nbins];
        let mut hist = Hist::new(content, errors.clone(), unit_edges(nbins)).unwrap();

        hist.rebin(&Rebin::Factor(factor)).unwrap();

        let merged = hist.error().symmetric().unwrap();
        for g in 0..groups {
            let expected: f64 = errors[g * factor..(g + 1) * factor]
                .iter()
                .map(|e| e * e)
                .sum::<f64>()
                .sqrt();
            prop_assert!((merged[g] - expected).abs() <= 1e-9 * expected.max(1.0));
        }
    }

    // Normalization yields unit integral and rescales errors by the same
    // factor as contents
    #[test]
    fn prop_normalize_round_trip(content in content_strategy(10)) {
        prop_assume!(content.iter().sum::<f64>() > 1e-6);
        let mut hist = Hist::from_content(content.clone(), unit_edges(10)).unwrap();
        let integral = hist.integral();

        hist.normalize();

        prop_assert!((hist.integral() - 1.0).abs() < 1e-9);
        let errors = hist.error().symmetric().unwrap();
        for (e, c) in errors.iter().zip(&content) {
            prop_assert!((e - c.sqrt() / integral).abs() < 1e-9);
        }
    }

    // Incompatible factors never mutate
    #[test]
    fn prop_bad_factor_is_noop(content in content_strategy(7)) {
        let mut hist = Hist::from_content(content, unit_edges(7)).unwrap();
        let before = hist.clone();
        for factor in [0usize, 2, 3, 4, 5, 6] {
            hist.rebin(&Rebin::Factor(factor)).unwrap();
            prop_assert_eq!(&hist, &before);
        }
    }
}
