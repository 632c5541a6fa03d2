//! End-to-end conversion and re-binning flows
//!
//! These exercise the whole path a plotting caller takes: raw data or an
//! external source in, a re-binned and/or normalized canonical histogram out.

use approx::assert_relative_eq;
use hepplot_histogram::{
    ArrayConverter, ArrayConverter2D, BinnedConverter, Binning, EfficiencyConverter, Hist, Rebin,
    Rebin2D,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

#[test]
fn raw_sample_to_rebinned_histogram() {
    // a typical workflow: fine analysis binning, coarser plotting binning
    let hist = ArrayConverter::new(Binning::Edges(vec![0.0, 1.0, 2.0, 3.0, 4.0]))
        .rebin(Rebin::Factor(2))
        .convert(&[0.2, 0.7, 1.1, 1.9, 2.4, 3.3, 3.8])
        .unwrap();

    assert_eq!(hist.bins(), &[0.0, 2.0, 4.0]);
    assert_eq!(hist.content(), &[4.0, 3.0]);
    assert_eq!(hist.center(), &[1.0, 3.0]);
    assert_eq!(hist.width(), &[1.0, 1.0]);
}

#[test]
fn gaussian_sample_statistics_survive_rebinning() {
    let mut rng = StdRng::seed_from_u64(42);
    let normal = Normal::new(0.0, 1.0).unwrap();
    let sample: Vec<f64> = (0..10_000).map(|_| normal.sample(&mut rng)).collect();

    let binning = Binning::Range {
        bins: 40,
        low: -4.0,
        high: 4.0,
    };
    let mut hist = ArrayConverter::new(binning).convert(&sample).unwrap();
    let total_before = hist.integral();

    hist.rebin(&Rebin::Factor(4)).unwrap();

    // entries within range are conserved by a full-span merge
    assert_relative_eq!(hist.integral(), total_before);
    assert_eq!(hist.len(), 10);

    // merged Poisson errors stay consistent with the merged contents
    for (c, e) in hist
        .content()
        .iter()
        .zip(hist.error().symmetric().unwrap())
    {
        assert_relative_eq!(*e, c.sqrt(), max_relative = 1e-12);
    }
}

#[test]
fn weighted_and_unweighted_agree_for_unit_weights() {
    let data = [0.3, 0.9, 1.2, 1.8, 1.9];
    let weights = vec![1.0; data.len()];
    let binning = Binning::Edges(vec![0.0, 1.0, 2.0]);

    let unweighted = ArrayConverter::new(binning.clone()).convert(&data).unwrap();
    let weighted = ArrayConverter::new(binning)
        .convert_weighted(&data, &weights)
        .unwrap();

    assert_eq!(unweighted.content(), weighted.content());
    assert_eq!(
        unweighted.error().symmetric().unwrap(),
        weighted.error().symmetric().unwrap()
    );
}

#[test]
fn two_dimensional_flow_with_explicit_edge_rebin() {
    let xs = [0.5, 1.5, 2.5, 3.5, 0.5, 1.5];
    let ys = [0.5, 0.5, 1.5, 1.5, 1.5, 1.5];

    let mut hist = ArrayConverter2D::new(
        Binning::Edges(vec![0.0, 1.0, 2.0, 3.0, 4.0]),
        Binning::Edges(vec![0.0, 1.0, 2.0]),
    )
    .convert(&xs, &ys)
    .unwrap();

    hist.rebin(&Rebin2D::Edges {
        x: vec![0.0, 2.0, 4.0],
        y: vec![0.0, 2.0],
    })
    .unwrap();

    assert_eq!(hist.nx(), 2);
    assert_eq!(hist.ny(), 1);
    assert_eq!(hist.content(), &[4.0, 2.0]);
    assert_relative_eq!(hist.integral(), xs.len() as f64);
}

#[test]
fn incompatible_rebin_requests_leave_the_histogram_usable() {
    let base = ArrayConverter::new(Binning::Edges(vec![0.0, 1.0, 2.0, 3.0, 4.0]))
        .convert(&[0.5, 1.5, 2.5, 3.5])
        .unwrap();

    // a batch caller may feed bad factors; the histogram must survive intact
    for spec in [
        Rebin::Factor(3),
        Rebin::Factor(0),
        Rebin::Edges(vec![0.0, 2.5, 4.0]),
        Rebin::Edges(vec![4.0]),
    ] {
        let mut hist = base.clone();
        hist.rebin(&spec).unwrap();
        assert_eq!(hist, base);
    }
}

#[test]
fn external_source_normalization() {
    struct Stored;
    impl hepplot_histogram::BinnedSource for Stored {
        fn contents(&self) -> Vec<f64> {
            vec![2.0, 4.0, 6.0, 8.0]
        }
        fn edges(&self) -> Vec<f64> {
            vec![0.0, 1.0, 2.0, 3.0, 4.0]
        }
        fn variances(&self) -> Option<Vec<f64>> {
            Some(vec![2.0, 4.0, 6.0, 8.0])
        }
    }

    let hist = BinnedConverter::new().normed(true).convert(&Stored).unwrap();

    assert_relative_eq!(hist.integral(), 1.0);
    assert_eq!(hist.content(), &[0.1, 0.2, 0.3, 0.4]);
    // errors scale by the same integral as contents
    assert_relative_eq!(
        hist.error().symmetric().unwrap()[0],
        2.0_f64.sqrt() / 20.0
    );
}

#[cfg(feature = "intervals")]
#[test]
fn efficiency_from_counts_interval_contract() {
    let passed = [3.0, 50.0, 0.0, 10.0];
    let total = [10.0, 100.0, 8.0, 10.0];
    let edges = [0.0, 1.0, 2.0, 3.0, 4.0];

    let hist = EfficiencyConverter::new()
        .from_counts(&passed, &total, &edges)
        .unwrap();

    let (low, high) = hist.error().asymmetric().unwrap();
    for i in 0..hist.len() {
        let eff = hist.content()[i];
        assert_relative_eq!(eff, passed[i] / total[i]);
        // downward bar stays above zero efficiency, upward below one
        assert!(low[i] >= 0.0);
        assert!(high[i] >= 0.0);
        assert!(eff - low[i] >= -1e-12);
        assert!(eff + high[i] <= 1.0 + 1e-12);
    }
}

#[test]
fn efficiency_histograms_refuse_rebinning() {
    let mut hist = Hist::with_asymmetric_errors(
        vec![0.3, 0.8],
        vec![0.1, 0.2],
        vec![0.15, 0.1],
        vec![0.0, 1.0, 2.0],
    )
    .unwrap();

    assert!(hist.rebin(&Rebin::Factor(2)).is_err());
    assert_eq!(hist.content(), &[0.3, 0.8]);
}
