use crate::twister::{PetalSink, PlacedPetal};
use egui::{Align2, Color32, FontId, Pos2, Rounding, Shape, Stroke};
use log::debug;
use nalgebra::Point3;
use nalgebra_glm::{TMat4, TVec3};

/// Orbiting wireframe view of the current petals.
pub struct Preview {
    petals: Vec<Option<PlacedPetal>>,
    angle: (f32, f32),
}

impl PetalSink for Preview {
    fn create(&mut self, index: usize) {
        if self.petals.len() <= index {
            self.petals.resize(index + 1, None);
        }
    }

    fn update(&mut self, petal: &PlacedPetal) {
        self.create(petal.index);
        self.petals[petal.index] = Some(petal.clone());
    }

    fn destroy(&mut self, index: usize) {
        if let Some(slot) = self.petals.get_mut(index) {
            if let Some(petal) = slot.take() {
                debug!("Dropping {}", petal.label());
            }
        }
        while matches!(self.petals.last(), Some(None)) {
            self.petals.pop();
        }
    }
}

fn petal_color(index: usize, count: usize) -> Color32 {
    let hue = index as f32 / count.max(1) as f32;
    egui::ecolor::Hsva::new(hue, 0.7, 1.0, 1.0).into()
}

impl Preview {
    pub fn new() -> Self { Self { petals: Vec::new(), angle: (0.7, 0.6) } }

    pub fn petal_count(&self) -> usize { self.petals.iter().flatten().count() }

    fn matrix(&self, aspect: f32) -> TMat4<f32> {
        let proj = nalgebra_glm::perspective_fov(std::f32::consts::PI / 4.0, aspect, 1.0, 0.1, 100.0);
        let view = nalgebra_glm::look_at(
            &TVec3::new(
                f32::cos(self.angle.0) * f32::cos(self.angle.1) * 4.0,
                f32::sin(self.angle.1) * 4.0,
                f32::sin(self.angle.0) * f32::cos(self.angle.1) * 4.0,
            ),
            &TVec3::new(0.0, 0.0, 0.0),
            &TVec3::new(0.0, 1.0, 0.0),
        );
        proj * view
    }

    pub fn draw(&mut self, ui: &mut egui::Ui) -> egui::Response {
        let (rect, response) =
            ui.allocate_exact_size(egui::Vec2::splat(ui.spacing().interact_size.y * 12.0), egui::Sense::drag());

        ui.painter().rect(rect, Rounding::ZERO, Color32::BLACK, ui.visuals().noninteractive().bg_stroke);

        if self.petal_count() == 0 {
            ui.painter().text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No petals",
                FontId::proportional(ui.spacing().interact_size.y),
                Color32::WHITE,
            );
            return response;
        }

        self.angle.0 += response.drag_motion().x * 0.01;
        self.angle.1 = (self.angle.1 + response.drag_motion().y * 0.01).clamp(-1.5, 1.5);

        let matrix = self.matrix(rect.width() / rect.height());
        let project = |p: Point3<f32>| -> Option<Pos2> {
            let clip = matrix * nalgebra_glm::vec4(p.x, p.y, p.z, 1.0);
            if clip.w <= f32::EPSILON {
                return None;
            }
            Some(Pos2::new(
                rect.center().x + clip.x / clip.w * rect.width() / 2.0,
                rect.center().y - clip.y / clip.w * rect.height() / 2.0,
            ))
        };

        let painter = ui.painter_at(rect);
        let count = self.petals.len();
        for petal in self.petals.iter().flatten() {
            let points: Vec<Pos2> = petal.world_points().filter_map(&project).collect();
            painter.add(Shape::line(points, Stroke::new(2.0, petal_color(petal.index, count))));
        }

        response
    }
}
