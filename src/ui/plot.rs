use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

use crate::color::ColorMap;
use crate::data::query::TrendSeries;

// ---------------------------------------------------------------------------
// Trend plot
// ---------------------------------------------------------------------------

/// Render one line per metric across the selected years.
pub fn trend_plot(ui: &mut Ui, title: &str, series: &[TrendSeries], colors: &ColorMap) {
    ui.label(title);
    Plot::new("trend_plot")
        .legend(Legend::default())
        .height(320.0)
        .x_axis_label("Year")
        .y_axis_label("Index value")
        .x_axis_formatter(|mark, _range| format!("{:.0}", mark.value))
        .allow_scroll(false)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for s in series {
                let color = colors.color_for(&s.name);
                let line = Line::new(PlotPoints::from(s.points.clone()))
                    .name(&s.name)
                    .color(color)
                    .width(1.5);
                plot_ui.line(line);

                let markers = Points::new(PlotPoints::from(s.points.clone()))
                    .name(&s.name)
                    .color(color)
                    .radius(3.0);
                plot_ui.points(markers);
            }
        });
}
