use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::error::Notice;
use crate::data::query;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// Central panel – company view
// ---------------------------------------------------------------------------

/// Render the company dashboard for the current selection.
pub fn dashboard(ui: &mut Ui, state: &mut AppState) {
    if let Some(err) = &state.load_error {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(
                RichText::new(format!("Unable to load data: {err}"))
                    .color(Color32::RED)
                    .heading(),
            );
        });
        return;
    }

    let notices = state.notices();
    let mut save_requested = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let Some(loaded) = &state.loaded else {
                ui.heading("No dataset loaded.");
                return;
            };
            let panel = &loaded.panel;

            ui.heading("Digital Transformation Index Query");
            for notice in notices.iter().filter(|n| n.is_warning()) {
                notice_label(ui, notice);
            }
            ui.separator();

            let rows = &state.selection;
            if let (Some(code), false) = (state.selected_code.as_deref(), rows.is_empty()) {
                // ---- Company header ----
                let name = query::display_name(panel, rows, code);
                if name == code {
                    ui.heading(code);
                } else {
                    ui.heading(format!("{name} ({code})"));
                }
                if let Some(industry) = query::industry_label(panel, rows) {
                    ui.label(industry);
                }
                ui.add_space(8.0);

                // ---- Headline metrics ----
                ui.strong("Digital transformation index");
                let metrics = query::headline_metrics(panel, rows);
                egui::Grid::new("headline_metrics")
                    .num_columns(3)
                    .spacing([32.0, 12.0])
                    .show(ui, |ui: &mut Ui| {
                        for (i, metric) in metrics.iter().enumerate() {
                            ui.vertical(|ui: &mut Ui| {
                                ui.small(&metric.name);
                                ui.heading(metric.value.to_string());
                            });
                            if i % 3 == 2 {
                                ui.end_row();
                            }
                        }
                    });
                ui.separator();

                // ---- Trend ----
                ui.strong("Index trend");
                match query::trend_series(panel, rows) {
                    Some(series) => {
                        let title = format!("{name} digital transformation index trend");
                        plot::trend_plot(ui, &title, &series, &state.color_map);
                    }
                    None => notice_label(ui, &Notice::InsufficientTrendData),
                }
                ui.separator();

                // ---- Raw data ----
                ui.strong("Raw data");
                table::data_table(ui, panel, rows);
                ui.add_space(8.0);
                if ui.button("Save CSV…").clicked() {
                    save_requested = true;
                }
            } else if notices.contains(&Notice::EmptySelection) {
                notice_label(ui, &Notice::EmptySelection);
            }
            ui.separator();

            // ---- Overview ----
            ui.strong("Data overview");
            let summary = query::summary(panel);
            egui::Grid::new("overview")
                .num_columns(3)
                .spacing([48.0, 4.0])
                .show(ui, |ui: &mut Ui| {
                    ui.small("Stocks");
                    ui.small("Year range");
                    ui.small("Rows");
                    ui.end_row();
                    ui.heading(summary.stock_count.to_string());
                    ui.heading(summary.year_range_label());
                    ui.heading(summary.row_count.to_string());
                    ui.end_row();
                });
        });

    if save_requested {
        panels::save_csv_dialog(state);
    }
}

fn notice_label(ui: &mut Ui, notice: &Notice) {
    let color = if notice.is_warning() {
        Color32::from_rgb(230, 160, 30)
    } else {
        Color32::LIGHT_BLUE
    };
    ui.label(RichText::new(notice.to_string()).color(color));
}
