use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Chart colours
// ---------------------------------------------------------------------------

/// Colours of the three forecast chart series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPalette {
    pub forecast: Color32,
    pub history: Color32,
    pub bounds: Color32,
}

impl Default for ChartPalette {
    fn default() -> Self {
        match generate_palette(3).as_slice() {
            [history, bounds, forecast] => ChartPalette {
                forecast: *forecast,
                history: *history,
                bounds: bounds.gamma_multiply(0.7),
            },
            _ => ChartPalette {
                forecast: Color32::LIGHT_BLUE,
                history: Color32::RED,
                bounds: Color32::GRAY,
            },
        }
    }
}
