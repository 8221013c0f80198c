use std::path::Path;

use eframe::egui::Color32;
use rusty_chroma::analysis::indices_at_or_above;
use rusty_chroma::data::loader::load_file;
use rusty_chroma::data::model::{ApexSummary, ChromatogramData};

use crate::color::generate_palette;
use crate::config::ViewerConfig;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded chromatogram (None until user loads a file).
    pub dataset: Option<ChromatogramData>,

    /// Threshold, overlay and scaling settings.
    pub config: ViewerConfig,

    /// Apex of the loaded chromatogram, if it has one.
    pub summary: Option<ApexSummary>,

    /// Indices of transitions passing the current threshold (cached).
    pub visible_indices: Vec<usize>,

    /// Total intensity curve of the loaded chromatogram (cached).
    pub tic: Vec<f64>,

    /// One colour per transition, in transition order.
    pub colors: Vec<Color32>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            dataset: None,
            config,
            summary: None,
            visible_indices: Vec::new(),
            tic: Vec::new(),
            colors: Vec::new(),
            status_message: None,
        }
    }

    /// Load a file and make it the current dataset, or record the error.
    pub fn open(&mut self, path: &Path) {
        match load_file(path) {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a newly loaded dataset and recompute everything derived from it.
    pub fn set_dataset(&mut self, dataset: ChromatogramData) {
        self.colors = generate_palette(dataset.len());
        self.tic = dataset.tic();
        self.dataset = Some(dataset);
        self.status_message = None;
        self.reanalyze();
    }

    /// Recompute the apex summary and the visible transitions.
    ///
    /// On failure nothing is shown and the error goes to the status bar.
    pub fn reanalyze(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };

        self.summary = None;
        self.visible_indices.clear();

        let summary = match ds.apex_summary() {
            Ok(s) => s,
            Err(e) => {
                log::warn!("{e}");
                self.status_message = Some(format!("Error: {e}"));
                return;
            }
        };

        if self.config.apply_filter {
            match indices_at_or_above(&summary.relative, self.config.threshold) {
                Ok(kept) => {
                    self.visible_indices = kept;
                    self.status_message = None;
                }
                Err(e) => {
                    log::warn!("{e}");
                    self.status_message = Some(format!("Error: {e}"));
                }
            }
        } else {
            self.visible_indices = (0..ds.len()).collect();
            self.status_message = None;
        }
        self.summary = Some(summary);
    }

    pub fn set_threshold(&mut self, threshold: f64) {
        self.config.threshold = threshold;
        self.reanalyze();
    }

    pub fn set_apply_filter(&mut self, apply: bool) {
        self.config.apply_filter = apply;
        self.reanalyze();
    }

    pub fn is_visible(&self, idx: usize) -> bool {
        self.visible_indices.contains(&idx)
    }
}
