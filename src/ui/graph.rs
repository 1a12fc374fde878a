use eframe::epaint::{Color32, Rounding, Stroke};
use egui::{pos2, vec2};

/// Scrolling line plot of `items`, scaled so the largest magnitude fits.
pub fn graph(items: &[f32], ui: &mut egui::Ui) -> egui::Response {
    let height = ui.spacing().interact_size.y * 6.0;

    let (rect, response) =
        ui.allocate_exact_size(vec2(ui.available_rect_before_wrap().width(), height), egui::Sense::hover());

    let rect = rect.shrink(ui.visuals().noninteractive().bg_stroke.width);
    let half = rect.height() / 2.0;
    let adv = rect.width() / (items.len().max(2) - 1) as f32;
    let scale = items.iter().fold(f32::EPSILON, |acc, v| acc.max(v.abs()));

    ui.painter().rect_filled(response.rect, Rounding::ZERO, Color32::BLACK);
    ui.painter().line_segment([rect.left_center(), rect.right_center()], Stroke::new(2.0, Color32::GRAY));

    for (i, pair) in items.windows(2).enumerate() {
        let y0 = rect.center().y - pair[0] / scale * half;
        let y1 = rect.center().y - pair[1] / scale * half;

        let left = rect.min.x + adv * i as f32;
        let right = rect.min.x + adv * (i + 1) as f32;

        ui.painter().line_segment([pos2(left, y0), pos2(right, y1)], Stroke::new(2.0, Color32::YELLOW));
    }

    ui.painter().rect(response.rect, Rounding::ZERO, Color32::TRANSPARENT, ui.visuals().noninteractive().bg_stroke);
    response
}
