use super::{Polyline, ShapeParameters};
use crate::util::{lerp, position_on_circle};
use nalgebra::{Point3, Vector3};

/// Builds petal curves. Keeps its control points and De Casteljau scratch space
/// around so repeated builds don't reallocate.
#[derive(Default)]
pub struct CurveBuilder {
    controls: Vec<Point3<f32>>,
    scratch: Vec<Point3<f32>>,
}

impl CurveBuilder {
    pub fn new() -> Self { Self::default() }

    /// Evaluates the petal curve at `line_resolution` evenly spaced parameters in `[0, 1)`.
    #[profiling::function]
    pub fn build(&mut self, params: &ShapeParameters) -> Polyline {
        self.fill_controls(params);

        (0..params.line_resolution)
            .map(|i| self.bezier(i as f32 / params.line_resolution as f32))
            .collect()
    }

    pub fn controls(&self) -> &[Point3<f32>] { &self.controls }

    fn fill_controls(&mut self, params: &ShapeParameters) {
        self.controls.clear();
        self.controls.push(Point3::origin());

        let count = params.curve_point_count;
        for i in 1..count {
            self.controls.push(curve_point(params, i as f32 / count as f32));
        }
    }

    fn bezier(&mut self, prog: f32) -> Point3<f32> {
        self.scratch.clear();
        self.scratch.extend_from_slice(&self.controls);

        let mut remaining = self.scratch.len();
        while remaining > 1 {
            remaining -= 1;
            for i in 0..remaining {
                self.scratch[i] = lerp(&self.scratch[i], &self.scratch[i + 1], prog);
            }
        }

        self.scratch.first().copied().unwrap_or_else(Point3::origin)
    }
}

/// One control point at `prog` along the petal. The tip (prog -> 1) sits on the
/// inner circle, and the whole curve is shifted so it starts on the rim.
fn curve_point(params: &ShapeParameters, prog: f32) -> Point3<f32> {
    let radius = params.radius;
    let inner = radius * params.inner_circle_ratio;
    let offset = Vector3::new(0.0, 0.0, radius);

    let mut local_radius = (radius - inner) * (1.0 - prog) + inner;
    local_radius += local_radius * params.coil_strength * params.twist * params.twist;

    Point3::from(position_on_circle(prog * params.twist) * local_radius + offset)
}

/// Convenience wrapper for one-off builds.
pub fn build_petal_curve(params: &ShapeParameters) -> Polyline { CurveBuilder::new().build(params) }
