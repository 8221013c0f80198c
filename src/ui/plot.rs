use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints, VLine};

use crate::color::{APEX_COLOR, TIC_COLOR};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Chromatogram plot (central panel)
// ---------------------------------------------------------------------------

/// Render the visible transitions against time in the central panel.
pub fn chromatogram_plot(ui: &mut Ui, state: &AppState) {
    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a chromatogram to view transitions  (File → Open…)");
            });
            return;
        }
    };

    let times = dataset.times();
    let relative_scaling = state.config.relative_scaling;

    Plot::new("chromatogram_plot")
        .legend(Legend::default())
        .x_axis_label("Time (min)")
        .y_axis_label(if relative_scaling { "Relative intensity" } else { "Intensity" })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for &idx in &state.visible_indices {
                let transition = &dataset.transitions()[idx];

                let scale = if relative_scaling {
                    transition
                        .max_intensity()
                        .filter(|&m| m > 0.0)
                        .map_or(1.0, |m| 1.0 / m)
                } else {
                    1.0
                };

                let points: PlotPoints = times
                    .iter()
                    .zip(&transition.intensities)
                    .map(|(&t, &y)| [t, y * scale])
                    .collect();

                let line = Line::new(points)
                    .name(&transition.name)
                    .color(state.colors[idx])
                    .width(1.5);

                plot_ui.line(line);
            }

            if state.config.show_tic && !relative_scaling {
                let points: PlotPoints = times
                    .iter()
                    .zip(&state.tic)
                    .map(|(&t, &y)| [t, y])
                    .collect();
                plot_ui.line(Line::new(points).name("TIC").color(TIC_COLOR).width(1.0));
            }

            if let Some(summary) = &state.summary {
                plot_ui.vline(
                    VLine::new(summary.peak_time)
                        .name(format!("apex {:.3}", summary.peak_time))
                        .color(APEX_COLOR),
                );
            }
        });
}
