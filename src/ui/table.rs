use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;
const HEADER_HEIGHT: f32 = 20.0;

/// First rows of the uploaded table, shown as soon as it parses.
pub fn preview_table(ui: &mut Ui, state: &AppState) {
    let Some(preview) = &state.output.preview else {
        return;
    };

    ui.heading("Loaded data");
    ui.push_id("preview_table", |ui: &mut Ui| {
        egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .vscroll(false)
                .columns(Column::auto().at_least(60.0), preview.columns.len())
                .header(HEADER_HEIGHT, |mut header| {
                    for name in &preview.columns {
                        header.col(|ui| {
                            ui.strong(name);
                        });
                    }
                })
                .body(|mut body| {
                    for row in &preview.rows {
                        body.row(ROW_HEIGHT, |mut table_row| {
                            for cell in row {
                                table_row.col(|ui| {
                                    ui.label(cell.to_string());
                                });
                            }
                        });
                    }
                });
        });
    });
    ui.separator();
}

/// The future horizon: month, forecast, lower and upper bound.
pub fn forecast_table(ui: &mut Ui, state: &AppState) {
    let Some(view) = state.forecast_view() else {
        return;
    };

    ui.add_space(8.0);
    ui.heading(format!(
        "Forecast ({:.0}% interval)",
        view.forecast.interval_width * 100.0
    ));
    ui.push_id("forecast_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::auto().at_least(100.0))
            .columns(Column::auto().at_least(90.0), 3)
            .header(HEADER_HEIGHT, |mut header| {
                for title in ["Date", "Forecast", "Lower bound", "Upper bound"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for p in view.forecast.future() {
                    body.row(ROW_HEIGHT, |mut row| {
                        row.col(|ui| {
                            ui.label(p.ds.format("%Y-%m-%d").to_string());
                        });
                        for value in [p.yhat, p.yhat_lower, p.yhat_upper] {
                            row.col(|ui| {
                                ui.label(format!("{value:.2}"));
                            });
                        }
                    });
                }
            });
    });
}
