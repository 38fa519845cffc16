use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::YearSelector;
use crate::data::pipeline::PanelSource;
use crate::state::AppState;

/// Codes shown in the picker at once; the search box narrows the rest.
const MAX_LISTED_CODES: usize = 500;

// ---------------------------------------------------------------------------
// Left side panel – stock / year selectors
// ---------------------------------------------------------------------------

/// Render the left query panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState, code_query: &mut String) {
    ui.heading("Query");
    ui.separator();

    if state.codes.is_empty() {
        ui.label("No dataset loaded.");
        return;
    }

    // ---- Stock picker ----
    ui.strong("Stock code");
    ui.add(egui::TextEdit::singleline(code_query).hint_text("Search code or name"));

    let current = state
        .selected_code
        .as_deref()
        .map(|c| state.code_label(c))
        .unwrap_or_default();
    let query = code_query.trim().to_string();
    let matches: Vec<String> = state
        .codes
        .iter()
        .filter(|c| query.is_empty() || state.code_label(c).contains(&query))
        .take(MAX_LISTED_CODES)
        .cloned()
        .collect();

    let mut picked = None;
    egui::ComboBox::from_id_salt("stock_code")
        .selected_text(current)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ScrollArea::vertical().max_height(400.0).show(ui, |ui: &mut Ui| {
                for code in &matches {
                    let selected = state.selected_code.as_deref() == Some(code.as_str());
                    if ui.selectable_label(selected, state.code_label(code)).clicked() {
                        picked = Some(code.clone());
                    }
                }
            });
        });
    if let Some(code) = picked {
        state.select_code(code);
    }
    ui.add_space(8.0);

    // ---- Year picker ----
    ui.strong("Year");
    let mut year = state.year;
    egui::ComboBox::from_id_salt("year")
        .selected_text(year.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut year, YearSelector::All, YearSelector::All.to_string());
            for &y in &state.years {
                ui.selectable_value(&mut year, YearSelector::Year(y), y.to_string());
            }
        });
    if year != state.year {
        state.select_year(year);
    }

    ui.separator();
    if let Some(loaded) = &state.loaded {
        let source = match &loaded.source {
            PanelSource::File(path) => path.display().to_string(),
            PanelSource::Sample => "built-in sample".to_string(),
        };
        ui.small(format!("Panel: {source}"));
        if let Some(path) = &loaded.industry_source {
            ui.small(format!("Industry: {}", path.display()));
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open panel file…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(loaded) = &state.loaded {
            ui.label(format!(
                "{} rows loaded, {} selected",
                loaded.panel.len(),
                state.selection.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                Color32::GREEN
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open panel data")
        .add_filter(
            "Supported files",
            &["xlsx", "xlsm", "xls", "ods", "csv", "json", "parquet", "pq"],
        )
        .add_filter("Spreadsheet", &["xlsx", "xlsm", "xls", "ods"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Opening panel file {}", path.display());
        state.open_panel_file(path);
        state.status_message = state.load_error.as_ref().map(|e| format!("Error: {e}"));
    }
}

pub fn save_csv_dialog(state: &mut AppState) {
    let Some(name) = state.export_file_name() else {
        return;
    };
    let file = rfd::FileDialog::new()
        .set_title("Save selection as CSV")
        .set_file_name(&name)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        state.status_message = Some(match state.export_selection(&path) {
            Ok(()) => format!("Saved {}", path.display()),
            Err(e) => {
                log::error!("Failed to export CSV: {e:#}");
                format!("Error: {e:#}")
            }
        });
    }
}
