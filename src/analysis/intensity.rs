use super::error::{AnalysisError, Result};
use super::tic::find_peak_index;

// ---------------------------------------------------------------------------
// Normalisation at the apex
// ---------------------------------------------------------------------------

/// Intensity of every transition at time index `apex`.
///
/// A trace too short to reach `apex` reads as NaN.
pub fn raw_at<T: AsRef<[f64]>>(apex: usize, transitions: &[T]) -> Vec<f64> {
    transitions
        .iter()
        .map(|t| t.as_ref().get(apex).copied().unwrap_or(f64::NAN))
        .collect()
}

/// Scale `raw` so that its largest value becomes exactly 1.0.
///
/// Fails with [`AnalysisError::NoSignal`] when the largest value is not
/// strictly positive (including the empty and all-NaN cases).
pub fn normalize_to_max(raw: &[f64]) -> Result<Vec<f64>> {
    let max_value = raw.iter().copied().fold(f64::NAN, f64::max);
    if !(max_value > 0.0) {
        return Err(AnalysisError::NoSignal { max_value });
    }
    Ok(raw.iter().map(|v| v / max_value).collect())
}

/// Relative intensity of each transition at the apex of the total
/// intensity curve, in transition order.
pub fn compute_relative_intensities<T: AsRef<[f64]>>(transitions: &[T]) -> Result<Vec<f64>> {
    let apex = find_peak_index(transitions)?;
    normalize_to_max(&raw_at(apex, transitions))
}

// ---------------------------------------------------------------------------
// Threshold filter
// ---------------------------------------------------------------------------

/// Indices of `relative` values at or above `threshold`.
///
/// An empty result is [`AnalysisError::AllFilteredOut`].
pub fn indices_at_or_above(relative: &[f64], threshold: f64) -> Result<Vec<usize>> {
    let kept: Vec<usize> = relative
        .iter()
        .enumerate()
        .filter(|&(_, &rel)| rel >= threshold)
        .map(|(i, _)| i)
        .collect();
    if kept.is_empty() {
        return Err(AnalysisError::AllFilteredOut { threshold });
    }
    log::debug!(
        "{} of {} transitions pass relative intensity threshold {threshold}",
        kept.len(),
        relative.len()
    );
    Ok(kept)
}

/// Return indices of transitions whose relative intensity at the apex is
/// at least `threshold`.
pub fn passing_indices<T: AsRef<[f64]>>(transitions: &[T], threshold: f64) -> Result<Vec<usize>> {
    let relative = compute_relative_intensities(transitions)?;
    indices_at_or_above(&relative, threshold)
}

/// Keep the transitions whose relative intensity at the apex is at least
/// `threshold`, in their original order.
///
/// The boundary is inclusive. Thresholds outside `[0, 1]` are accepted and
/// simply keep everything or nothing.
pub fn filter_by_relative_intensity<T>(transitions: &[T], threshold: f64) -> Result<Vec<T>>
where
    T: AsRef<[f64]> + Clone,
{
    Ok(passing_indices(transitions, threshold)?
        .into_iter()
        .map(|i| transitions[i].clone())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_a() -> Vec<Vec<f64>> {
        vec![vec![1.0, 2.0, 1.0], vec![0.0, 1.0, 0.0]]
    }

    #[test]
    fn relative_intensities_of_scenario_a() {
        let traces = scenario_a();
        assert_eq!(raw_at(1, &traces), vec![2.0, 1.0]);
        assert_eq!(compute_relative_intensities(&traces), Ok(vec![1.0, 0.5]));
    }

    #[test]
    fn strongest_trace_is_anchored_at_one() {
        let traces = vec![
            vec![0.0, 3.0, 9.0, 1.0],
            vec![1.0, 7.0, 30.0, 2.0],
            vec![0.5, 2.0, 11.0, 0.0],
        ];
        let rel = compute_relative_intensities(&traces).unwrap();
        assert_eq!(rel.iter().filter(|&&r| r == 1.0).count(), 1);
        assert_eq!(rel[1], 1.0);
        assert!(rel.iter().all(|&r| (0.0..=1.0).contains(&r)));
    }

    #[test]
    fn all_zero_traces_have_no_signal() {
        let traces = vec![vec![0.0, 0.0], vec![0.0, 0.0]];
        assert_eq!(
            compute_relative_intensities(&traces),
            Err(AnalysisError::NoSignal { max_value: 0.0 })
        );
    }

    #[test]
    fn negative_maximum_has_no_signal() {
        let traces = vec![vec![-1.0, -2.0], vec![-3.0, -0.5]];
        assert!(matches!(
            compute_relative_intensities(&traces),
            Err(AnalysisError::NoSignal { .. })
        ));
    }

    #[test]
    fn negative_values_with_positive_maximum_are_usable() {
        let traces = vec![vec![0.0, 4.0], vec![0.0, -1.0]];
        assert_eq!(compute_relative_intensities(&traces), Ok(vec![1.0, -0.25]));
    }

    #[test]
    fn no_transitions_has_no_signal() {
        assert!(matches!(
            normalize_to_max(&[]),
            Err(AnalysisError::NoSignal { .. })
        ));
    }

    #[test]
    fn threshold_above_weak_trace() {
        let traces = scenario_a();
        assert_eq!(
            filter_by_relative_intensity(&traces, 0.6),
            Ok(vec![vec![1.0, 2.0, 1.0]])
        );
    }

    #[test]
    fn threshold_boundary_is_inclusive() {
        let traces = scenario_a();
        assert_eq!(filter_by_relative_intensity(&traces, 0.5), Ok(traces.clone()));
    }

    #[test]
    fn threshold_above_one_filters_everything() {
        assert_eq!(
            filter_by_relative_intensity(&scenario_a(), 1.5),
            Err(AnalysisError::AllFilteredOut { threshold: 1.5 })
        );
    }

    #[test]
    fn negative_threshold_keeps_everything() {
        let traces = scenario_a();
        assert_eq!(passing_indices(&traces, -2.0), Ok(vec![0, 1]));
    }

    #[test]
    fn filter_propagates_normalizer_failure() {
        let traces = vec![vec![0.0, 0.0], vec![0.0, 0.0]];
        assert_eq!(
            filter_by_relative_intensity(&traces, 0.1),
            Err(AnalysisError::NoSignal { max_value: 0.0 })
        );
        let empty: Vec<Vec<f64>> = vec![vec![], vec![]];
        assert_eq!(
            filter_by_relative_intensity(&empty, 0.1),
            Err(AnalysisError::EmptyData)
        );
    }

    #[test]
    fn filtering_is_idempotent() {
        let traces = vec![
            vec![1.0, 10.0, 2.0],
            vec![0.0, 3.0, 1.0],
            vec![2.0, 6.0, 0.0],
            vec![0.0, 0.5, 0.0],
        ];
        let once = filter_by_relative_intensity(&traces, 0.3).unwrap();
        let twice = filter_by_relative_intensity(&once, 0.3).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn raising_threshold_never_grows_output() {
        let traces = vec![
            vec![1.0, 10.0, 2.0],
            vec![0.0, 3.0, 1.0],
            vec![2.0, 6.0, 0.0],
            vec![0.0, 0.5, 0.0],
        ];
        let mut previous = usize::MAX;
        for step in 0..=10 {
            let threshold = step as f64 / 10.0;
            let kept = passing_indices(&traces, threshold).map_or(0, |k| k.len());
            assert!(kept <= previous, "threshold {threshold} kept {kept} > {previous}");
            previous = kept;
        }
    }
}
