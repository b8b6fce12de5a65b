use demand_ai::RunOutcome;
use demand_ai::forecast::ForecastPoint;
use demand_ai::forecast::calendar::{date_from_epoch_days, epoch_days};
use demand_ai::pipeline::ForecastView;
use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Legend, Line, LineStyle, MarkerShape, Plot, PlotPoints, Points};

use crate::color::ChartPalette;
use crate::state::AppState;

const PLOT_HEIGHT: f32 = 360.0;

// ---------------------------------------------------------------------------
// Forecast section (central panel)
// ---------------------------------------------------------------------------

/// Render the outcome of the last run: chart, error, or warning.
pub fn forecast_section(ui: &mut Ui, state: &AppState) {
    match &state.output.outcome {
        RunOutcome::Idle => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a CSV or Excel file to forecast  (File → Open…)");
            });
        }
        RunOutcome::Failed(e) => {
            ui.label(RichText::new(e.to_string()).color(Color32::RED));
        }
        RunOutcome::InsufficientData { points, min_points } => {
            let warn = ui.visuals().warn_fg_color;
            ui.label(
                RichText::new(format!(
                    "Too little data to forecast ({points} of {min_points} months). Add more history."
                ))
                .color(warn),
            );
        }
        RunOutcome::Forecast(view) => {
            ui.heading(view.title());
            ui.weak(format!("Model: {}", view.model_name));
            forecast_plot(ui, view, &state.palette, state.show_bounds);
        }
    }
}

/// Forecast line over history + horizon with the observed history as markers.
pub fn forecast_plot(ui: &mut Ui, view: &ForecastView, palette: &ChartPalette, show_bounds: bool) {
    let points = &view.forecast.points;

    Plot::new("forecast_plot")
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .x_axis_label("Month")
        .y_axis_label("Sales quantity")
        .x_axis_formatter(|mark, _range| {
            date_from_epoch_days(mark.value)
                .map(|d| d.format("%Y-%m").to_string())
                .unwrap_or_default()
        })
        .label_formatter(|name, value| {
            let date = date_from_epoch_days(value.x)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            if name.is_empty() {
                format!("{date}\n{:.2}", value.y)
            } else {
                format!("{name}\n{date}\n{:.2}", value.y)
            }
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let yhat: PlotPoints = points
                .iter()
                .map(|p| [epoch_days(p.ds), p.yhat])
                .collect();
            plot_ui.line(
                Line::new(yhat)
                    .name("Forecast")
                    .color(palette.forecast)
                    .width(2.0),
            );

            if show_bounds {
                let bounds: [(&str, fn(&ForecastPoint) -> f64); 2] = [
                    ("Lower bound", |p| p.yhat_lower),
                    ("Upper bound", |p| p.yhat_upper),
                ];
                for (name, value) in bounds {
                    let series: PlotPoints =
                        points.iter().map(|p| [epoch_days(p.ds), value(p)]).collect();
                    plot_ui.line(
                        Line::new(series)
                            .name(name)
                            .color(palette.bounds)
                            .style(LineStyle::dashed_loose())
                            .width(1.0),
                    );
                }
            }

            let history: PlotPoints = view
                .history
                .points
                .iter()
                .filter(|p| p.y.is_finite())
                .map(|p| [epoch_days(p.ds), p.y])
                .collect();
            plot_ui.points(
                Points::new(history)
                    .name("History")
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(4.0)
                    .color(palette.history),
            );
        });
}
