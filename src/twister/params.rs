use crate::error::ConfigError;

/// Shape of a single petal and how many of them to lay out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeParameters {
    pub radius: f32,
    /// Fraction of `radius` used at the tip of the petal.
    pub inner_circle_ratio: f32,
    /// Turn multiplier applied along the petal. Usually driven by the rotation tracker.
    pub twist: f32,
    pub coil_strength: f32,
    pub petal_count: usize,
    /// Number of samples in the output polyline.
    pub line_resolution: usize,
    /// Number of Bézier control points.
    pub curve_point_count: usize,
}

impl Default for ShapeParameters {
    fn default() -> Self {
        Self {
            radius: 1.0,
            inner_circle_ratio: 0.12,
            twist: 0.0,
            coil_strength: -0.15,
            petal_count: 6,
            line_resolution: 25,
            curve_point_count: 15,
        }
    }
}

impl ShapeParameters {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.radius.is_finite() {
            return Err(ConfigError::NonFinite("radius"));
        }
        if self.radius <= 0.0 {
            return Err(ConfigError::NonPositiveRadius(self.radius));
        }
        if !(0.0..=1.0).contains(&self.inner_circle_ratio) {
            return Err(ConfigError::InnerRatioOutOfRange(self.inner_circle_ratio));
        }
        if !self.twist.is_finite() {
            return Err(ConfigError::NonFinite("twist"));
        }
        if !self.coil_strength.is_finite() {
            return Err(ConfigError::NonFinite("coil strength"));
        }
        if self.petal_count == 0 {
            return Err(ConfigError::NoPetals);
        }
        if self.line_resolution == 0 {
            return Err(ConfigError::NoLineResolution);
        }
        if self.curve_point_count == 0 {
            return Err(ConfigError::NoCurvePoints);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(ShapeParameters::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_degenerate_shapes() {
        let base = ShapeParameters::default();

        let zero_radius = ShapeParameters { radius: 0.0, ..base };
        assert_eq!(zero_radius.validate(), Err(ConfigError::NonPositiveRadius(0.0)));

        let nan_radius = ShapeParameters { radius: f32::NAN, ..base };
        assert_eq!(nan_radius.validate(), Err(ConfigError::NonFinite("radius")));

        let wide = ShapeParameters { inner_circle_ratio: 1.5, ..base };
        assert_eq!(wide.validate(), Err(ConfigError::InnerRatioOutOfRange(1.5)));

        let no_petals = ShapeParameters { petal_count: 0, ..base };
        assert_eq!(no_petals.validate(), Err(ConfigError::NoPetals));

        let no_res = ShapeParameters { line_resolution: 0, ..base };
        assert_eq!(no_res.validate(), Err(ConfigError::NoLineResolution));

        let no_points = ShapeParameters { curve_point_count: 0, ..base };
        assert_eq!(no_points.validate(), Err(ConfigError::NoCurvePoints));

        let inf_twist = ShapeParameters { twist: f32::INFINITY, ..base };
        assert_eq!(inf_twist.validate(), Err(ConfigError::NonFinite("twist")));
    }

    #[test]
    fn single_control_point_is_allowed() {
        let params = ShapeParameters { curve_point_count: 1, ..Default::default() };
        assert_eq!(params.validate(), Ok(()));
    }
}
