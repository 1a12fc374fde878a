mod curve;
mod layout;
mod params;

pub use curve::{CurveBuilder, build_petal_curve};
pub use layout::{PetalSink, PlacedPetal, layout_petals};
pub use params::ShapeParameters;

use crate::error::ConfigError;
use log::{debug, warn};
use nalgebra::Point3;
use std::sync::Arc;

/// Petal curve samples. Shared between every petal instance and never mutated.
pub type Polyline = Arc<[Point3<f32>]>;

/// Keeps a set of petals in a [`PetalSink`] in sync with the current shape.
///
/// Rebuilding is gated on a value comparison against the last shape that was pushed out,
/// so ticking every frame is cheap when nothing moved.
pub struct Twister {
    params: ShapeParameters,
    center: Point3<f32>,
    last_seen: Option<ShapeParameters>,
    last_center: Point3<f32>,
    live_petals: usize,
    builder: CurveBuilder,
    curve: Option<Polyline>,
}

impl Twister {
    pub fn new(params: ShapeParameters) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self {
            params,
            center: Point3::origin(),
            last_seen: None,
            last_center: Point3::origin(),
            live_petals: 0,
            builder: CurveBuilder::new(),
            curve: None,
        })
    }

    pub fn params(&self) -> &ShapeParameters { &self.params }

    pub fn curve(&self) -> Option<&Polyline> { self.curve.as_ref() }

    pub fn set_params(&mut self, params: ShapeParameters) -> Result<(), ConfigError> {
        if let Err(err) = params.validate() {
            warn!("Rejected shape parameters: {}", err);
            return Err(err);
        }
        self.params = params;
        Ok(())
    }

    pub fn set_twist(&mut self, twist: f32) -> Result<(), ConfigError> {
        self.set_params(ShapeParameters { twist, ..self.params })
    }

    /// Point every petal faces. Defaults to the origin.
    pub fn set_center(&mut self, center: Point3<f32>) { self.center = center; }

    /// Pushes the current shape into `sink` if anything changed since the last tick.
    /// Returns whether the petals were rebuilt.
    pub fn tick(&mut self, sink: &mut impl PetalSink) -> bool {
        let unchanged = self.last_seen == Some(self.params)
            && self.last_center == self.center
            && self.live_petals == self.params.petal_count;
        if unchanged {
            return false;
        }

        self.last_seen = Some(self.params);
        self.last_center = self.center;
        self.rebuild(sink);
        true
    }

    fn rebuild(&mut self, sink: &mut impl PetalSink) {
        let curve = self.builder.build(&self.params);
        let count = self.params.petal_count;

        if self.live_petals != count {
            debug!("Recreating petals ({} -> {})", self.live_petals, count);
            for index in 0..self.live_petals {
                sink.destroy(index);
            }
            for index in 0..count {
                sink.create(index);
            }
            self.live_petals = count;
        }

        for petal in layout_petals(&curve, count, self.params.radius, self.center) {
            sink.update(&petal);
        }
        self.curve = Some(curve);
    }
}
