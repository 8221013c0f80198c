//! Chromatogram analysis: apex detection and relative-intensity filtering.
//!
//! Pipeline (each step calls the one below it):
//! ```text
//!   filter_by_relative_intensity   keep traces with rel >= threshold
//!        │
//!        ▼
//!   compute_relative_intensities   trace[apex] / max(trace[apex])
//!        │
//!        ▼
//!   find_peak_index                first argmax of the TIC
//!        │
//!        ▼
//!   compute_tic                    element-wise sum of all traces
//! ```
//!
//! All functions are pure and accept any `&[T]` where `T: AsRef<[f64]>`.

pub mod error;
pub mod intensity;
pub mod tic;

pub use error::{AnalysisError, Result};
pub use intensity::{
    compute_relative_intensities, filter_by_relative_intensity, indices_at_or_above,
    normalize_to_max, passing_indices, raw_at,
};
pub use tic::{argmax_first, compute_tic, find_peak_index, tic_with_len};
