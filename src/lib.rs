//! Chromatogram transition analysis.
//!
//! [`data`] turns tabular files into a validated [`data::model::ChromatogramData`];
//! [`analysis`] locates the apex of the total intensity curve and filters
//! transitions by their relative intensity there.

pub mod analysis;
pub mod data;
