use crate::{error::ConfigError, util};
use log::debug;
use nalgebra::{UnitQuaternion, Vector3};
use std::fmt::Display;

/// Frame-to-frame jumps larger than this are treated as crossing 0°/360°.
/// Real rotation faster than `360 - UNWRAP_THRESHOLD` degrees per tick unwraps the wrong way.
pub const UNWRAP_THRESHOLD: f32 = 340.0;

/// Below this horizontal length a vector has no usable bearing.
const MIN_HORIZONTAL: f32 = 1e-6;

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Axis {
    Forward,
    Right,
    Up,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::Forward, Axis::Right, Axis::Up];
}

impl Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Forward => write!(f, "Forward"),
            Axis::Right => write!(f, "Right"),
            Axis::Up => write!(f, "Up"),
        }
    }
}

/// The head's basis vectors for one tick.
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct TrustSample {
    pub forward: Vector3<f32>,
    pub right: Vector3<f32>,
    pub up: Vector3<f32>,
}

impl TrustSample {
    /// Y up, Z forward, X right.
    pub fn from_orientation(orientation: &UnitQuaternion<f32>) -> Self {
        Self {
            forward: util::modifier(orientation, [0.0, 0.0, 1.0]),
            right: util::modifier(orientation, [1.0, 0.0, 0.0]),
            up: util::modifier(orientation, [0.0, 1.0, 0.0]),
        }
    }

    pub fn axis(&self, axis: Axis) -> Vector3<f32> {
        match axis {
            Axis::Forward => self.forward,
            Axis::Right => self.right,
            Axis::Up => self.up,
        }
    }
}

#[derive(Debug, PartialEq, Copy, Clone)]
pub struct TrackerSettings {
    /// Vertical component at which an axis stops being trusted at all.
    pub max_y_dist: f32,
    /// Full turns that map to a twist of 1.
    pub max_turns: u32,
    pub reversed: bool,
}

impl Default for TrackerSettings {
    fn default() -> Self { Self { max_y_dist: 0.65, max_turns: 10, reversed: false } }
}

impl TrackerSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_y_dist.is_finite() {
            return Err(ConfigError::NonFinite("max vertical distance"));
        }
        if self.max_y_dist <= 0.0 {
            return Err(ConfigError::NonPositiveMaxYDist(self.max_y_dist));
        }
        if self.max_turns == 0 {
            return Err(ConfigError::NoTurns);
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, Copy, Clone, Default)]
pub struct RotationState {
    pub trusted_axis: Option<Axis>,
    /// Bearing of the trusted axis last tick, degrees in [0, 360).
    pub last_trusted_progress: f32,
    /// Unwrapped rotation in degrees.
    pub accumulated_angle: f32,
    /// Per-axis trust, indexed like [`Axis::ALL`].
    pub trust: [f32; 3],
    /// `accumulated_angle` over the full range of turns, before `reversed` is applied.
    pub turn_progress: f32,
}

/// Turns head orientation into a continuous twist value.
///
/// Each tick picks whichever basis axis is closest to horizontal, follows its bearing around
/// the vertical axis, and accumulates the unwrapped change.
pub struct RotationTracker {
    settings: TrackerSettings,
    state: RotationState,
    twist: f32,
}

impl RotationTracker {
    pub fn new(settings: TrackerSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self { settings, state: RotationState::default(), twist: 0.0 })
    }

    pub fn settings(&self) -> &TrackerSettings { &self.settings }

    pub fn state(&self) -> &RotationState { &self.state }

    pub fn twist(&self) -> f32 { self.twist }

    pub fn set_settings(&mut self, settings: TrackerSettings) -> Result<(), ConfigError> {
        settings.validate()?;
        self.settings = settings;
        self.update_twist();
        Ok(())
    }

    /// Forgets the trusted axis and all accumulated rotation.
    pub fn reset(&mut self) {
        self.state = RotationState::default();
        self.twist = 0.0;
    }

    /// Switches tracking to `axis` and takes its current bearing as the new baseline.
    /// The accumulated angle is left alone.
    pub fn set_trusted_axis(&mut self, axis: Axis, sample: &TrustSample) {
        debug!("Trusted axis {:?} -> {}", self.state.trusted_axis, axis);
        self.state.trusted_axis = Some(axis);
        if let Some(progress) = angle_of(&sample.axis(axis)) {
            self.state.last_trusted_progress = progress;
        }
    }

    #[profiling::function]
    pub fn tick(&mut self, sample: &TrustSample) -> f32 {
        for (trust, axis) in self.state.trust.iter_mut().zip(Axis::ALL) {
            *trust = 1.0 - (sample.axis(axis).y / self.settings.max_y_dist).abs();
        }

        let most_trusted = most_trusted(&self.state.trust);
        if most_trusted != self.state.trusted_axis {
            if let Some(axis) = most_trusted {
                self.set_trusted_axis(axis, sample);
            }
            return self.twist;
        }

        let axis = match self.state.trusted_axis {
            Some(axis) => axis,
            None => return self.twist,
        };

        let progress = angle_of(&sample.axis(axis)).unwrap_or(self.state.last_trusted_progress);
        let delta = adjusted_delta(progress, self.state.last_trusted_progress);
        self.state.last_trusted_progress = progress;
        self.state.accumulated_angle += delta;

        self.update_twist();
        self.twist
    }

    fn update_twist(&mut self) {
        self.state.turn_progress = self.state.accumulated_angle / (360.0 * self.settings.max_turns as f32);
        self.twist = if self.settings.reversed { -self.state.turn_progress } else { self.state.turn_progress };
    }
}

/// Strict winner among the three trust values. Any tie for the top spot yields `None`.
pub fn most_trusted(trust: &[f32; 3]) -> Option<Axis> {
    let [f, r, u] = *trust;

    if f > r && f > u {
        Some(Axis::Forward)
    } else if r > f && r > u {
        Some(Axis::Right)
    } else if u > f && u > r {
        Some(Axis::Up)
    } else {
        None
    }
}

/// Bearing of `v` projected onto the XZ plane, in degrees within [0, 360).
/// 0° is +X and 90° is +Z. Returns `None` for (near) vertical vectors.
pub fn angle_of(v: &Vector3<f32>) -> Option<f32> {
    let radius = (v.x * v.x + v.z * v.z).sqrt();
    if !(radius >= MIN_HORIZONTAL) {
        return None;
    }

    let sin = (v.z / radius).clamp(-1.0, 1.0).asin().to_degrees();
    let cos = (v.x / radius).clamp(-1.0, 1.0).acos().to_degrees();

    // bring both readings into [0, 360) for the right quadrant, then average them
    let out_sin = if cos > 90.0 {
        180.0 - sin
    } else if sin < 0.0 {
        360.0 + sin
    } else {
        sin
    };
    let out_cos = if sin < 0.0 { 360.0 - cos } else { cos };

    Some(((out_sin + out_cos) / 2.0).rem_euclid(360.0))
}

/// `newer - older`, unwrapped across the 0°/360° seam.
pub fn adjusted_delta(newer: f32, older: f32) -> f32 {
    let diff = newer - older;

    if diff > UNWRAP_THRESHOLD {
        diff - 360.0
    } else if diff < -UNWRAP_THRESHOLD {
        diff + 360.0
    } else {
        diff
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// Head yawed by `yaw` degrees and pitched by `pitch` degrees.
    fn head(yaw: f32, pitch: f32) -> TrustSample {
        let orientation = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), yaw.to_radians())
            * UnitQuaternion::from_axis_angle(&Vector3::x_axis(), pitch.to_radians());
        TrustSample::from_orientation(&orientation)
    }

    fn tracker() -> RotationTracker { RotationTracker::new(TrackerSettings::default()).expect("valid defaults") }

    #[test]
    fn strict_winner_only() {
        assert_eq!(most_trusted(&[0.9, 0.2, 0.91]), Some(Axis::Up));
        assert_eq!(most_trusted(&[0.5, 0.5, 0.3]), None);
        assert_eq!(most_trusted(&[0.3, 0.5, 0.5]), None);
        assert_eq!(most_trusted(&[0.7, 0.2, 0.7]), None);
        assert_eq!(most_trusted(&[0.4, 0.4, 0.4]), None);
        assert_eq!(most_trusted(&[0.7, 0.2, 0.1]), Some(Axis::Forward));
        assert_eq!(most_trusted(&[0.1, 0.2, 0.1]), Some(Axis::Right));
    }

    #[test]
    fn cardinal_bearings() {
        let cases = [
            (Vector3::new(1.0, 0.0, 0.0), 0.0),
            (Vector3::new(0.0, 0.0, 1.0), 90.0),
            (Vector3::new(-1.0, 0.0, 0.0), 180.0),
            (Vector3::new(0.0, 0.0, -1.0), 270.0),
            (Vector3::new(1.0, 0.4, -1.0), 315.0),
            (Vector3::new(-1.0, -2.0, -1.0), 225.0),
        ];
        for (v, expected) in cases {
            let angle = angle_of(&v).expect("horizontal component");
            assert_abs_diff_eq!(angle, expected, epsilon = 1e-3);
        }
    }

    #[test]
    fn vertical_vector_has_no_bearing() {
        assert_eq!(angle_of(&Vector3::new(0.0, 1.0, 0.0)), None);
        assert_eq!(angle_of(&Vector3::zeros()), None);
        assert_eq!(angle_of(&Vector3::new(f32::NAN, 0.0, 0.0)), None);
    }

    #[test]
    fn bearing_is_continuous_across_the_seam() {
        let mut last = angle_of(&Vector3::new(1.0, 0.0, (-30.0f32).to_radians().tan())).expect("bearing");
        for step in -29..30 {
            let rad = (step as f32).to_radians();
            let now = angle_of(&Vector3::new(rad.cos(), 0.0, rad.sin())).expect("bearing");
            let delta = adjusted_delta(now, last);
            assert_abs_diff_eq!(delta, 1.0, epsilon = 1e-2);
            last = now;
        }
    }

    #[test]
    fn delta_unwraps_both_ways() {
        assert_abs_diff_eq!(adjusted_delta(5.0, 350.0), 15.0, epsilon = 1e-4);
        assert_abs_diff_eq!(adjusted_delta(350.0, 5.0), -15.0, epsilon = 1e-4);
        assert_abs_diff_eq!(adjusted_delta(20.0, 10.0), 10.0);
        assert_abs_diff_eq!(adjusted_delta(10.0, 20.0), -10.0);
    }

    #[test]
    fn first_tick_only_picks_an_axis() {
        let mut tracker = tracker();
        assert_eq!(tracker.tick(&head(30.0, 5.0)), 0.0);
        assert_eq!(tracker.state().trusted_axis, Some(Axis::Right));
        assert_eq!(tracker.state().accumulated_angle, 0.0);
    }

    #[test]
    fn accumulates_past_a_full_turn() {
        let mut tracker = tracker();
        tracker.tick(&head(0.0, 5.0));

        let mut twist = 0.0;
        for step in 1..=72 {
            twist = tracker.tick(&head(step as f32 * 10.0, 5.0));
        }
        // yaw about +Y turns the bearing backwards, two full turns in total
        assert_abs_diff_eq!(tracker.state().accumulated_angle, -720.0, epsilon = 5e-2);
        assert_abs_diff_eq!(twist, -720.0 / 3600.0, epsilon = 1e-4);
    }

    #[test]
    fn reversed_flips_the_sign() {
        let mut tracker = tracker();
        tracker.tick(&head(0.0, 5.0));
        tracker.tick(&head(-90.0, 5.0));
        let twist = tracker.twist();
        assert!(twist > 0.0);

        tracker.set_settings(TrackerSettings { reversed: true, ..TrackerSettings::default() }).expect("valid");
        assert_abs_diff_eq!(tracker.twist(), -twist);
        assert_abs_diff_eq!(tracker.state().turn_progress, twist);
    }

    #[test]
    fn axis_switch_tick_does_not_accumulate() {
        let mut tracker = tracker();
        tracker.tick(&head(0.0, 5.0));
        tracker.tick(&head(-10.0, 5.0));
        let before = tracker.state().accumulated_angle;
        assert_abs_diff_eq!(before, 10.0, epsilon = 1e-3);
        assert_eq!(tracker.state().trusted_axis, Some(Axis::Right));

        // pitching far down tips forward towards vertical, right stays the winner
        tracker.tick(&head(-20.0, 80.0));
        assert_eq!(tracker.state().trusted_axis, Some(Axis::Right));

        // rolling the head onto its side tips right towards vertical and lets forward win
        let rolled = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), (-30.0f32).to_radians())
            * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 80.0f32.to_radians());
        let accumulated = tracker.state().accumulated_angle;
        tracker.tick(&TrustSample::from_orientation(&rolled));
        assert_eq!(tracker.state().trusted_axis, Some(Axis::Forward));
        assert_eq!(tracker.state().accumulated_angle, accumulated);

        let rolled_more = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), (-40.0f32).to_radians())
            * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 80.0f32.to_radians());
        tracker.tick(&TrustSample::from_orientation(&rolled_more));
        assert_abs_diff_eq!(tracker.state().accumulated_angle, accumulated + 10.0, epsilon = 1e-2);
    }

    #[test]
    fn ambiguous_tick_changes_nothing() {
        let mut tracker = tracker();
        tracker.tick(&head(0.0, 5.0));
        let state = *tracker.state();

        let tied = TrustSample {
            forward: Vector3::new(0.0, 0.5, 0.8),
            right: Vector3::new(0.8, 0.5, 0.0),
            up: Vector3::new(0.0, 0.9, 0.1),
        };
        tracker.tick(&tied);
        assert_eq!(tracker.state().trusted_axis, state.trusted_axis);
        assert_eq!(tracker.state().accumulated_angle, state.accumulated_angle);
        assert_eq!(tracker.state().last_trusted_progress, state.last_trusted_progress);
    }

    #[test]
    fn rejects_degenerate_settings() {
        let zero_turns = TrackerSettings { max_turns: 0, ..TrackerSettings::default() };
        assert_eq!(zero_turns.validate(), Err(ConfigError::NoTurns));

        let flat = TrackerSettings { max_y_dist: 0.0, ..TrackerSettings::default() };
        assert_eq!(flat.validate(), Err(ConfigError::NonPositiveMaxYDist(0.0)));
        assert!(RotationTracker::new(flat).is_err());

        let mut tracker = tracker();
        assert!(tracker.set_settings(zero_turns).is_err());
        assert_eq!(tracker.settings(), &TrackerSettings::default());
    }

    #[test]
    fn reset_forgets_rotation() {
        let mut tracker = tracker();
        tracker.tick(&head(0.0, 5.0));
        tracker.tick(&head(-15.0, 5.0));
        tracker.reset();
        assert_eq!(tracker.state(), &RotationState::default());
        assert_eq!(tracker.twist(), 0.0);
    }
}
