use eframe::egui::{ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::Panel;

/// Raw rows of the selection, every column of the merged panel.
pub fn data_table(ui: &mut Ui, panel: &Panel, rows: &[usize]) {
    ScrollArea::horizontal()
        .id_salt("data_table_scroll")
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .vscroll(false)
                .columns(Column::auto().at_least(60.0), panel.columns.len())
                .header(22.0, |mut header| {
                    for name in &panel.columns {
                        header.col(|ui: &mut Ui| {
                            ui.strong(name);
                        });
                    }
                })
                .body(|body| {
                    body.rows(20.0, rows.len(), |mut row| {
                        let record = &panel.rows[rows[row.index()]];
                        for cell in &record.cells {
                            row.col(|ui: &mut Ui| {
                                if cell.is_null() {
                                    ui.weak("-");
                                } else {
                                    ui.label(cell.to_string());
                                }
                            });
                        }
                    });
                });
        });
}
