use super::Polyline;
use crate::util::position_on_circle;
use nalgebra::{Point3, UnitQuaternion, Vector3};

/// One petal instance: where it sits, which way it faces, and the shared curve it draws.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedPetal {
    pub index: usize,
    pub position: Point3<f32>,
    /// Rotates local +Z onto the direction from `position` towards the layout center.
    pub orientation: UnitQuaternion<f32>,
    pub curve: Polyline,
}

impl PlacedPetal {
    pub fn label(&self) -> String { format!("Line {}", self.index + 1) }

    /// Curve points in the layout's space.
    pub fn world_points(&self) -> impl Iterator<Item = Point3<f32>> + '_ {
        self.curve.iter().map(|p| self.position + self.orientation * p.coords)
    }
}

/// Receiver for petal instances. Implementors own whatever visual object backs a petal.
pub trait PetalSink {
    fn create(&mut self, index: usize);
    fn update(&mut self, petal: &PlacedPetal);
    fn destroy(&mut self, index: usize);
}

/// Look-at rotation with +Y as up. Falls back to identity when there's nowhere to look.
fn face_towards(from: &Point3<f32>, target: &Point3<f32>) -> UnitQuaternion<f32> {
    let dir = target - from;
    if dir.norm_squared() <= f32::EPSILON {
        return UnitQuaternion::identity();
    }
    let up = Vector3::y();
    if dir.cross(&up).norm_squared() <= f32::EPSILON {
        // looking straight up or down; any horizontal "up" works
        return UnitQuaternion::face_towards(&dir, &Vector3::z());
    }
    UnitQuaternion::face_towards(&dir, &up)
}

/// Spreads `petal_count` copies of `curve` evenly around a circle of `radius`,
/// each one turned to face `center`.
pub fn layout_petals(curve: &Polyline, petal_count: usize, radius: f32, center: Point3<f32>) -> Vec<PlacedPetal> {
    (0..petal_count)
        .map(|index| {
            let prog = index as f32 / petal_count as f32;
            let position = Point3::from(position_on_circle(prog) * radius);
            PlacedPetal { index, position, orientation: face_towards(&position, &center), curve: curve.clone() }
        })
        .collect()
}
