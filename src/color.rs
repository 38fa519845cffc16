use std::collections::BTreeMap;

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
// Color mapping: metric column → Color32
// ---------------------------------------------------------------------------

/// Gives every metric series a stable colour for the lifetime of a load, so
/// switching stocks does not reshuffle the legend.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map over metric names in header order.
    pub fn new<S: AsRef<str>>(metrics: &[S]) -> Self {
        let mapping = metrics
            .iter()
            .zip(generate_palette(metrics.len()))
            .map(|(m, c)| (m.as_ref().to_string(), c))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::LIGHT_BLUE,
        }
    }

    /// Look up the colour for a metric.
    pub fn color_for(&self, metric: &str) -> Color32 {
        self.mapping
            .get(metric)
            .copied()
            .unwrap_or(self.default_color)
    }
}
