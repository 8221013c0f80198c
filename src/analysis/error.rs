use thiserror::Error;

/// Failures of the apex / relative-intensity pipeline.
///
/// Every variant is terminal: the inputs are already in memory and the
/// computations are deterministic, so the caller reports and stops.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// No time points, so the total intensity curve has no maximum.
    #[error("No time points in the chromatogram, cannot locate a peak")]
    EmptyData,

    /// The largest transition intensity at the apex is not positive.
    #[error("No intensity in any transition (maximum at apex is {max_value})")]
    NoSignal { max_value: f64 },

    /// The threshold removed every transition.
    #[error(
        "Relative intensity threshold {threshold:.4} resulted in 0 transitions passing the filter"
    )]
    AllFilteredOut { threshold: f64 },
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_filtered_out_message_carries_threshold() {
        let err = AnalysisError::AllFilteredOut { threshold: 1.5 };
        assert_eq!(
            err.to_string(),
            "Relative intensity threshold 1.5000 resulted in 0 transitions passing the filter"
        );
    }
}
