//! Anomaly Interval Extractor.
//!
//! Each policy is a single linear scan over the materialized sequence and
//! yields ordered, non-overlapping intervals. Overlap between DIFFERENT
//! policies is legal and resolved by the labeler's OR-union.

use crate::dataset::Sample;

use super::types::{GracePolicy, Interval, LabelingConfig, Reason, StateTagPolicy, ThresholdPolicy};

/// Run every configured policy and collect the resulting intervals.
pub fn extract_intervals(samples: &[Sample], config: &LabelingConfig) -> Vec<Interval> {
    let mut intervals = Vec::new();
    for policy in &config.state_policies {
        intervals.extend(state_tag_runs(samples, policy));
    }
    for policy in &config.threshold_policies {
        intervals.extend(threshold_runs(samples, policy));
    }
    for policy in &config.grace_policies {
        intervals.extend(grace_runs(samples, policy));
    }
    intervals
}

/// Maximal runs of samples whose state matches the policy tag.
pub fn state_tag_runs(samples: &[Sample], policy: &StateTagPolicy) -> Vec<Interval> {
    let mut runs = Vec::new();
    let mut start = None;

    for (i, sample) in samples.iter().enumerate() {
        if policy.matches(&sample.state) {
            start.get_or_insert(i);
        } else if let Some(s) = start.take() {
            runs.push(Interval::new(s, i - 1, Reason::StateTag));
        }
    }
    // Sequence may end inside a run.
    if let Some(s) = start {
        runs.push(Interval::new(s, samples.len() - 1, Reason::StateTag));
    }
    runs
}

/// Maximal in-range value runs whose length the policy accepts.
///
/// Rejection is total: a run of any unaccepted length yields no interval,
/// never a truncated one. Missing values break runs.
pub fn threshold_runs(samples: &[Sample], policy: &ThresholdPolicy) -> Vec<Interval> {
    let mut runs = Vec::new();
    let mut start = None;

    for (i, sample) in samples.iter().enumerate() {
        let in_range = sample.value.map_or(false, |v| policy.contains(v));
        if in_range {
            start.get_or_insert(i);
        } else if let Some(s) = start.take() {
            push_accepted(&mut runs, policy, s, i - 1);
        }
    }
    if let Some(s) = start {
        push_accepted(&mut runs, policy, s, samples.len() - 1);
    }
    runs
}

fn push_accepted(runs: &mut Vec<Interval>, policy: &ThresholdPolicy, start: usize, end: usize) {
    if policy.acceptance.accepts(end - start + 1) {
        runs.push(Interval::new(start, end, Reason::ThresholdRange));
    }
}

/// State-tag runs extended through adjacent neutral-state samples.
///
/// Extension walks outward from each run until the first sample whose state
/// is neither the run tag nor the neutral tag, clamping at the sequence
/// boundaries. Extended runs that grow into each other are merged so a
/// single policy never reports overlapping intervals.
pub fn grace_runs(samples: &[Sample], policy: &GracePolicy) -> Vec<Interval> {
    let base = state_tag_runs(samples, &policy.as_state_policy());

    let mut extended = Vec::with_capacity(base.len());
    for run in base {
        let mut start = run.start;
        while start > 0 && samples[start - 1].state == policy.neutral_tag {
            start -= 1;
        }
        let mut end = run.end;
        while end + 1 < samples.len() && samples[end + 1].state == policy.neutral_tag {
            end += 1;
        }
        extended.push(Interval::new(start, end, Reason::GracePeriod));
    }

    merge_overlapping(extended)
}

/// Coalesce intervals that share at least one index. Input is ordered by
/// start, which every scan above guarantees.
fn merge_overlapping(intervals: Vec<Interval>) -> Vec<Interval> {
    let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        match merged.last_mut() {
            Some(last) if last.overlaps(&interval) => {
                last.end = last.end.max(interval.end);
            }
            _ => merged.push(interval),
        }
    }
    merged
}
