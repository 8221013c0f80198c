use super::error::{AnalysisError, Result};

// ---------------------------------------------------------------------------
// Total intensity curve
// ---------------------------------------------------------------------------

/// Sum all transitions at each time point.
///
/// The number of time points is taken from the first trace, so an empty
/// transition set yields an empty curve. Use [`tic_with_len`] when the
/// time axis length is known independently.
pub fn compute_tic<T: AsRef<[f64]>>(transitions: &[T]) -> Vec<f64> {
    let n_points = transitions.first().map_or(0, |t| t.as_ref().len());
    tic_with_len(n_points, transitions)
}

/// Sum all transitions into a curve of exactly `n_points` values.
///
/// With no transitions every position is 0.0. Traces are added in order,
/// one after another, which matches plain sequential summation.
pub fn tic_with_len<T: AsRef<[f64]>>(n_points: usize, transitions: &[T]) -> Vec<f64> {
    let mut tic = vec![0.0; n_points];
    for trace in transitions {
        for (acc, &v) in tic.iter_mut().zip(trace.as_ref()) {
            *acc += v;
        }
    }
    tic
}

// ---------------------------------------------------------------------------
// Peak location
// ---------------------------------------------------------------------------

/// Index of the first maximum of `curve`.
///
/// NaN entries never win. Fails with [`AnalysisError::EmptyData`] when the
/// curve has no comparable value at all.
pub fn argmax_first(curve: &[f64]) -> Result<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in curve.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            // strict `>` keeps the lowest index on ties
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i).ok_or(AnalysisError::EmptyData)
}

/// Time index at which the total intensity curve is highest.
pub fn find_peak_index<T: AsRef<[f64]>>(transitions: &[T]) -> Result<usize> {
    let idx = argmax_first(&compute_tic(transitions))?;
    log::debug!("TIC apex at index {idx}");
    Ok(idx)
}
