use super::metrics::{evaluate, ConfusionCounts};
use super::rules::{predict, BaselineRule};
use crate::error::ToolkitError;

#[test]
fn sustained_low_rule_matches_reference_behavior() {
    // Eight consecutive values below 60 (8 > 7) followed by a normal one.
    let values = vec![40.0, 40.0, 40.0, 40.0, 40.0, 40.0, 40.0, 40.0, 100.0];
    let predictions = predict(&values, &BaselineRule::sleep_low());
    assert_eq!(predictions, vec![1, 1, 1, 1, 1, 1, 1, 1, 0]);

    // A run of exactly 7 is not strictly longer than the floor.
    let short = vec![40.0; 7];
    assert_eq!(predict(&short, &BaselineRule::sleep_low()), vec![0; 7]);
}

#[test]
fn medium_spike_rule_accepts_only_three_or_four() {
    let rule = BaselineRule::medium_spike();

    let values = vec![100.0, 600.0, 600.0, 600.0, 100.0];
    assert_eq!(predict(&values, &rule), vec![0, 1, 1, 1, 0]);

    let too_long = vec![600.0; 5];
    assert_eq!(predict(&too_long, &rule), vec![0; 5]);
}

#[test]
fn boundary_values_are_outside_the_open_range() {
    let rule = BaselineRule::BoundedRange {
        lower: 530.0,
        upper: 700.0,
        lengths: vec![3],
    };
    // 530 and 700 sit on the bounds and must not join a run.
    let values = vec![530.0, 600.0, 600.0, 600.0, 700.0];
    assert_eq!(predict(&values, &rule), vec![0, 1, 1, 1, 0]);
}

#[test]
fn confusion_counts_and_rates() {
    let labels = vec![1, 1, 0, 0, 1];
    let predictions = vec![1, 0, 1, 0, 1];
    let counts = evaluate(&labels, &predictions).unwrap();
    assert_eq!(
        counts,
        ConfusionCounts {
            true_positives: 2,
            false_positives: 1,
            false_negatives: 1,
        }
    );
    assert!((counts.precision() - 2.0 / 3.0).abs() < 1e-9);
    assert!((counts.recall() - 2.0 / 3.0).abs() < 1e-9);
}

#[test]
fn zero_denominators_yield_zero_rates() {
    let counts = ConfusionCounts::default();
    assert_eq!(counts.precision(), 0.0);
    assert_eq!(counts.recall(), 0.0);
}

#[test]
fn length_mismatch_is_an_error() {
    let err = evaluate(&[1, 0], &[1]).unwrap_err();
    assert!(matches!(err, ToolkitError::LengthMismatch { .. }));
}
