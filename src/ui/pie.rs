use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{pos2, vec2, Align2, Color32, FontId, Pos2, RichText, Sense, Shape, Stroke, Ui};

use crate::chart::ChartSpec;
use crate::color::generate_palette;

/// Arc segments per full turn; each wedge is drawn as a triangle fan.
const SEGMENTS_PER_TURN: f32 = 96.0;

// ---------------------------------------------------------------------------
// Distribution chart (pie + legend)
// ---------------------------------------------------------------------------

pub fn distribution_pie(ui: &mut Ui, spec: &ChartSpec) {
    ui.heading(&spec.title);

    let slices = spec.slices();
    let total: usize = slices.iter().map(|s| s.count).sum();
    let colors = generate_palette(slices.len());

    ui.horizontal(|ui: &mut Ui| {
        let side = ui.available_height().min(ui.available_width() * 0.6).max(80.0);
        let (rect, _) = ui.allocate_exact_size(vec2(side, side), Sense::hover());
        let painter = ui.painter_at(rect);
        let center = rect.center();
        let radius = side * 0.45;

        if total == 0 {
            painter.text(
                center,
                Align2::CENTER_CENTER,
                "No launches",
                FontId::proportional(14.0),
                ui.visuals().weak_text_color(),
            );
        } else {
            let mut start = -FRAC_PI_2;
            for (slice, &color) in slices.iter().zip(&colors) {
                let sweep = TAU * slice.count as f32 / total as f32;
                for shape in wedge(center, radius, start, sweep, color) {
                    painter.add(shape);
                }
                start += sweep;
            }
        }

        ui.vertical(|ui: &mut Ui| {
            for (slice, &color) in slices.iter().zip(&colors) {
                let pct = if total == 0 {
                    0.0
                } else {
                    100.0 * slice.count as f64 / total as f64
                };
                ui.horizontal(|ui: &mut Ui| {
                    let (swatch, _) = ui.allocate_exact_size(vec2(12.0, 12.0), Sense::hover());
                    ui.painter().rect_filled(swatch, 2.0, color);
                    ui.label(RichText::new(format!("{}: {} ({pct:.1}%)", slice.label, slice.count)));
                });
            }
        });
    });
}

/// Triangle fan approximating the wedge `[start, start + sweep)`.
fn wedge(center: Pos2, radius: f32, start: f32, sweep: f32, color: Color32) -> Vec<Shape> {
    let steps = ((sweep / TAU) * SEGMENTS_PER_TURN).ceil().max(1.0) as usize;
    let point = |angle: f32| pos2(center.x + radius * angle.cos(), center.y + radius * angle.sin());

    (0..steps)
        .map(|i| {
            let a0 = start + sweep * i as f32 / steps as f32;
            let a1 = start + sweep * (i + 1) as f32 / steps as f32;
            Shape::convex_polygon(vec![center, point(a0), point(a1)], color, Stroke::NONE)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_turn_wedge_uses_all_segments() {
        let shapes = wedge(Pos2::ZERO, 10.0, 0.0, TAU, Color32::RED);
        assert_eq!(shapes.len(), SEGMENTS_PER_TURN as usize);
    }

    #[test]
    fn thin_wedge_still_draws_one_triangle() {
        let shapes = wedge(Pos2::ZERO, 10.0, 0.0, 0.001, Color32::RED);
        assert_eq!(shapes.len(), 1);
    }
}
