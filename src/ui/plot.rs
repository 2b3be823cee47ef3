use eframe::egui::{Color32, Ui};
use egui_plot::{GridMark, Legend, Plot, PlotPoints, Points};

use crate::chart::ChartSpec;
use crate::color::ColorMap;
use crate::dashboard::{payload_marks, PAYLOAD_DISPLAY_MAX, PAYLOAD_DISPLAY_MIN, PAYLOAD_MARK_STEP};

// ---------------------------------------------------------------------------
// Payload / outcome scatter (central panel)
// ---------------------------------------------------------------------------

/// Render the scatter chart, one series per booster category.
pub fn scatter_plot(ui: &mut Ui, spec: &ChartSpec, colors: Option<&ColorMap>) {
    ui.heading(&spec.title);

    let marks = payload_marks();
    let series: Vec<(String, Color32)> = match colors {
        Some(cm) => cm.legend_entries(),
        None => Vec::new(),
    };

    let mut plot = Plot::new("scatter_plot")
        .legend(Legend::default())
        .include_x(PAYLOAD_DISPLAY_MIN)
        .include_x(PAYLOAD_DISPLAY_MAX)
        .include_y(-0.25)
        .include_y(1.25)
        .x_grid_spacer(move |_input| {
            marks
                .iter()
                .map(|&value| GridMark {
                    value,
                    step_size: PAYLOAD_MARK_STEP,
                })
                .collect()
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);
    if let Some(x) = &spec.x_label {
        plot = plot.x_axis_label(x.as_str());
    }
    if let Some(y) = &spec.y_label {
        plot = plot.y_axis_label(y.as_str());
    }

    plot.show(ui, |plot_ui| {
        for (category, color) in &series {
            let points: PlotPoints = spec
                .points()
                .iter()
                .filter(|p| &p.booster_version_category == category)
                .map(|p| [p.payload_mass_kg, f64::from(p.outcome.class())])
                .collect();
            if points.points().is_empty() {
                continue;
            }
            plot_ui.points(Points::new(points).name(category).color(*color).radius(4.0));
        }
    });
}
