use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::{self, AnalysisError};

// ---------------------------------------------------------------------------
// Transition – one intensity trace
// ---------------------------------------------------------------------------

/// A single monitored channel: intensity over time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// Column header from the source table.
    pub name: String,
    /// One value per time point.
    pub intensities: Vec<f64>,
}

impl Transition {
    pub fn new(name: impl Into<String>, intensities: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            intensities,
        }
    }

    /// Largest finite intensity, or `None` for an empty / all-NaN trace.
    pub fn max_intensity(&self) -> Option<f64> {
        self.intensities
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .reduce(f64::max)
    }
}

impl AsRef<[f64]> for Transition {
    fn as_ref(&self) -> &[f64] {
        &self.intensities
    }
}

// ---------------------------------------------------------------------------
// Shape validation
// ---------------------------------------------------------------------------

/// A transition whose length differs from the time axis.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Transition '{transition}' has {found} points but the time axis has {expected}")]
pub struct ShapeMismatchError {
    pub transition: String,
    pub expected: usize,
    pub found: usize,
}

// ---------------------------------------------------------------------------
// ChromatogramData – the complete loaded table
// ---------------------------------------------------------------------------

/// A time axis plus the transitions recorded against it.
///
/// Every transition has exactly `times.len()` points; this is checked in
/// [`ChromatogramData::try_new`] and cannot change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ChromatogramData {
    times: Vec<f64>,
    transitions: Vec<Transition>,
}

/// Where the apex is and how each transition compares there.
#[derive(Debug, Clone, PartialEq)]
pub struct ApexSummary {
    pub peak_index: usize,
    pub peak_time: f64,
    pub tic_at_apex: f64,
    /// Intensity of each transition at the apex, in transition order.
    pub raw: Vec<f64>,
    /// `raw` divided by its maximum.
    pub relative: Vec<f64>,
}

impl ChromatogramData {
    pub fn try_new(
        times: Vec<f64>,
        transitions: Vec<Transition>,
    ) -> Result<Self, ShapeMismatchError> {
        if let Some(bad) = transitions
            .iter()
            .find(|t| t.intensities.len() != times.len())
        {
            return Err(ShapeMismatchError {
                transition: bad.name.clone(),
                expected: times.len(),
                found: bad.intensities.len(),
            });
        }
        Ok(Self { times, transitions })
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Number of transitions.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// Whether there are no transitions.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Number of time points.
    pub fn n_points(&self) -> usize {
        self.times.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.transitions.iter().map(|t| t.name.as_str())
    }

    /// Total intensity curve, always `n_points()` long.
    pub fn tic(&self) -> Vec<f64> {
        analysis::tic_with_len(self.n_points(), &self.transitions)
    }

    pub fn peak_index(&self) -> analysis::Result<usize> {
        analysis::argmax_first(&self.tic())
    }

    pub fn peak_time(&self) -> analysis::Result<f64> {
        Ok(self.times[self.peak_index()?])
    }

    pub fn relative_intensities(&self) -> analysis::Result<Vec<f64>> {
        let apex = self.peak_index()?;
        analysis::normalize_to_max(&analysis::raw_at(apex, &self.transitions))
    }

    pub fn apex_summary(&self) -> analysis::Result<ApexSummary> {
        let tic = self.tic();
        let peak_index = analysis::argmax_first(&tic)?;
        let raw = analysis::raw_at(peak_index, &self.transitions);
        let relative = analysis::normalize_to_max(&raw)?;
        Ok(ApexSummary {
            peak_index,
            peak_time: self.times[peak_index],
            tic_at_apex: tic[peak_index],
            raw,
            relative,
        })
    }

    /// Indices of transitions at or above `threshold` relative intensity.
    pub fn passing_indices(&self, threshold: f64) -> analysis::Result<Vec<usize>> {
        analysis::indices_at_or_above(&self.relative_intensities()?, threshold)
    }

    /// A copy holding only the transitions that pass `threshold`, with the
    /// time axis unchanged.
    pub fn filter_by_relative_intensity(&self, threshold: f64) -> Result<Self, AnalysisError> {
        let transitions = self
            .passing_indices(threshold)?
            .into_iter()
            .map(|i| self.transitions[i].clone())
            .collect();
        Ok(Self {
            times: self.times.clone(),
            transitions,
        })
    }

    /// Split into the time axis and transitions.
    pub fn into_parts(self) -> (Vec<f64>, Vec<Transition>) {
        (self.times, self.transitions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_a() -> ChromatogramData {
        ChromatogramData::try_new(
            vec![0.0, 1.0, 2.0],
            vec![
                Transition::new("y7", vec![1.0, 2.0, 1.0]),
                Transition::new("b3", vec![0.0, 1.0, 0.0]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn rejects_ragged_transition() {
        let err = ChromatogramData::try_new(
            vec![0.0, 1.0, 2.0],
            vec![
                Transition::new("ok", vec![1.0, 2.0, 3.0]),
                Transition::new("short", vec![1.0, 2.0]),
            ],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ShapeMismatchError {
                transition: "short".into(),
                expected: 3,
                found: 2,
            }
        );
    }

    #[test]
    fn tic_without_transitions_is_zero_per_time_point() {
        let data = ChromatogramData::try_new(vec![0.0, 0.5, 1.0], Vec::new()).unwrap();
        assert_eq!(data.tic(), vec![0.0, 0.0, 0.0]);
        assert_eq!(data.peak_index(), Ok(0));
        assert!(matches!(
            data.relative_intensities(),
            Err(AnalysisError::NoSignal { .. })
        ));
    }

    #[test]
    fn apex_summary_of_scenario_a() {
        let summary = scenario_a().apex_summary().unwrap();
        assert_eq!(summary.peak_index, 1);
        assert_eq!(summary.peak_time, 1.0);
        assert_eq!(summary.tic_at_apex, 3.0);
        assert_eq!(summary.raw, vec![2.0, 1.0]);
        assert_eq!(summary.relative, vec![1.0, 0.5]);
    }

    #[test]
    fn filter_keeps_time_axis_and_order() {
        let data = scenario_a();
        let filtered = data.filter_by_relative_intensity(0.6).unwrap();
        assert_eq!(filtered.times(), data.times());
        assert_eq!(filtered.names().collect::<Vec<_>>(), vec!["y7"]);

        let both = data.filter_by_relative_intensity(0.5).unwrap();
        assert_eq!(both, data);
    }

    #[test]
    fn filter_failure_carries_threshold() {
        assert_eq!(
            scenario_a().filter_by_relative_intensity(1.5),
            Err(AnalysisError::AllFilteredOut { threshold: 1.5 })
        );
    }

    #[test]
    fn empty_time_axis_has_no_peak() {
        let data = ChromatogramData::try_new(
            Vec::new(),
            vec![Transition::new("a", Vec::new())],
        )
        .unwrap();
        assert_eq!(data.peak_time(), Err(AnalysisError::EmptyData));
    }

    #[test]
    fn max_intensity_ignores_nan() {
        let t = Transition::new("t", vec![1.0, f64::NAN, 4.0]);
        assert_eq!(t.max_intensity(), Some(4.0));
        assert_eq!(Transition::new("e", Vec::new()).max_intensity(), None);
    }
}
