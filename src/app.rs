use std::sync::Arc;

use demand_ai::UploadedFile;
use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct DemandApp {
    pub state: AppState,
}

impl eframe::App for DemandApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        take_dropped_files(ctx, &mut self.state);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: product / branch selection ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // Selection changes above feed the central panel in the same frame.
        self.state.refresh();

        // ---- Central panel: preview, chart, forecast table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    table::preview_table(ui, &self.state);
                    plot::forecast_section(ui, &self.state);
                    table::forecast_table(ui, &self.state);
                });
        });
    }
}

/// Treat files dropped onto the window as uploads; the last one wins.
fn take_dropped_files(ctx: &egui::Context, state: &mut AppState) {
    let dropped = ctx.input(|i| i.raw.dropped_files.clone());
    for file in dropped {
        let name = match (&file.path, file.name.is_empty()) {
            (Some(path), true) => path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default()
                .to_string(),
            _ => file.name.clone(),
        };

        let bytes: Option<Arc<[u8]>> = match (&file.bytes, &file.path) {
            (Some(bytes), _) => Some(bytes.clone()),
            (None, Some(path)) => match std::fs::read(path) {
                Ok(bytes) => Some(bytes.into()),
                Err(e) => {
                    log::error!("Failed to read dropped file {}: {e}", path.display());
                    state.status_message = Some(format!("Error: {e}"));
                    None
                }
            },
            (None, None) => None,
        };

        if let Some(bytes) = bytes {
            state.set_upload(UploadedFile::new(name, bytes));
        }
    }
}
