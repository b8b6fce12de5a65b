use demand_ai::UploadedFile;
use demand_ai::data::export;
use demand_ai::data::model::CellValue;
use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the left selection panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("DemandAI");
    ui.label("Open a file with your sales history.");
    ui.separator();

    let Some(choices) = state.choices().cloned() else {
        ui.label("No valid dataset loaded.");
        return;
    };

    ui.strong("Choose the product");
    if let Some(product) = value_combo(ui, "product", state.session.product.as_ref(), &choices.products) {
        state.select_product(product);
    }
    ui.add_space(8.0);

    ui.strong("Choose the branch");
    if let Some(branch) = value_combo(ui, "branch", state.session.branch.as_ref(), &choices.branches) {
        state.select_branch(branch);
    }
}

/// Single-choice combo box; returns the newly clicked value, if any.
fn value_combo(
    ui: &mut Ui,
    id: &str,
    current: Option<&CellValue>,
    options: &[CellValue],
) -> Option<CellValue> {
    let mut picked = None;
    let current_text = current.map(|v| v.to_string()).unwrap_or_default();
    egui::ComboBox::from_id_salt(id)
        .selected_text(current_text)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for value in options {
                if ui
                    .selectable_label(current == Some(value), value.to_string())
                    .clicked()
                {
                    picked = Some(value.clone());
                }
            }
        });
    picked
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
            let can_export = state.forecast_view().is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export forecast…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(name) = state.file_name() {
            ui.label(name);
        }

        ui.separator();

        if ui
            .selectable_label(state.show_bounds, "Uncertainty bounds")
            .clicked()
        {
            state.show_bounds = !state.show_bounds;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open sales history")
        .add_filter("Supported files", &["csv", "xlsx", "xls", "xlsm", "xlsb", "ods"])
        .add_filter("CSV", &["csv"])
        .add_filter("Excel", &["xlsx", "xls", "xlsm", "xlsb"])
        .pick_file();

    if let Some(path) = file {
        match std::fs::read(&path) {
            Ok(bytes) => {
                let name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or_default()
                    .to_string();
                state.set_upload(UploadedFile::new(name, bytes));
            }
            Err(e) => {
                log::error!("Failed to read {}: {e}", path.display());
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

fn export_dialog(state: &mut AppState) {
    let Some(view) = state.forecast_view() else {
        return;
    };
    let rows = view.forecast.future().to_vec();

    let target = rfd::FileDialog::new()
        .set_title("Export forecast")
        .set_file_name("forecast.csv")
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = target {
        match export::save_forecast_csv(&path, &rows) {
            Ok(()) => log::info!("Exported {} forecast rows to {}", rows.len(), path.display()),
            Err(e) => {
                log::error!("Failed to export forecast: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
