//! Data layer: core types and loading.
//!
//! Architecture:
//! ```text
//!  .tsv / .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → ChromatogramData (shape checked once)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────────────┐
//!   │ ChromatogramData │  times + Vec<Transition>
//!   └──────────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ analysis │  TIC → apex → relative intensities → threshold filter
//!   └──────────┘
//! ```

pub mod loader;
pub mod model;
