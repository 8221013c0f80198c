use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use rusty_chroma::data::loader::SUPPORTED_EXTENSIONS;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – threshold and transition table
// ---------------------------------------------------------------------------

/// Render the left panel: filter controls and per-transition intensities.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Relative intensity filter");
    ui.separator();

    let mut apply = state.config.apply_filter;
    if ui.checkbox(&mut apply, "Apply filter").changed() {
        state.set_apply_filter(apply);
    }

    let mut threshold = state.config.threshold;
    let slider = egui::Slider::new(&mut threshold, 0.0..=1.0)
        .text("threshold")
        .fixed_decimals(3);
    if ui.add_enabled(apply, slider).changed() {
        state.set_threshold(threshold);
    }
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No chromatogram loaded.");
        return;
    };

    let Some(summary) = &state.summary else {
        ui.label("No apex available.");
        return;
    };

    ui.label(format!(
        "Apex: index {} at {:.3} min",
        summary.peak_index, summary.peak_time
    ));
    ui.add_space(4.0);

    ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto())
            .column(Column::auto().at_least(80.0))
            .column(Column::auto())
            .column(Column::auto())
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("");
                });
                header.col(|ui| {
                    ui.strong("Transition");
                });
                header.col(|ui| {
                    ui.strong("Apex");
                });
                header.col(|ui| {
                    ui.strong("Rel.");
                });
            })
            .body(|mut body| {
                for (idx, transition) in dataset.transitions().iter().enumerate() {
                    let kept = state.is_visible(idx);
                    let text_color = if kept { None } else { Some(Color32::GRAY) };
                    body.row(18.0, |mut row| {
                        row.col(|ui| {
                            ui.label(RichText::new("■").color(state.colors[idx]));
                        });
                        row.col(|ui| {
                            ui.label(with_color(RichText::new(&transition.name), text_color));
                        });
                        row.col(|ui| {
                            let raw = format!("{:.1}", summary.raw[idx]);
                            ui.label(with_color(RichText::new(raw), text_color));
                        });
                        row.col(|ui| {
                            let rel = format!("{:.3}", summary.relative[idx]);
                            ui.label(with_color(RichText::new(rel), text_color));
                        });
                    });
                }
            });
    });
}

fn with_color(text: RichText, color: Option<Color32>) -> RichText {
    match color {
        Some(c) => text.color(c),
        None => text,
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} transitions loaded, {} visible, {} time points",
                ds.len(),
                state.visible_indices.len(),
                ds.n_points()
            ));
        }

        ui.separator();

        if ui
            .selectable_label(state.config.show_tic, "TIC")
            .clicked()
        {
            state.config.show_tic = !state.config.show_tic;
        }

        if ui
            .selectable_label(state.config.relative_scaling, "Relative Scaling")
            .clicked()
        {
            state.config.relative_scaling = !state.config.relative_scaling;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open chromatogram")
        .add_filter("Supported files", SUPPORTED_EXTENSIONS)
        .add_filter("Tab-separated", &["tsv", "txt", "tab"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}
