use crate::pipe::{Head2UI, HeadFailure, HeadMotion, UI2Head};
use crate::tracker::{RotationTracker, TrackerSettings, TrustSample};
use log::{info, warn};
use nalgebra::{UnitQuaternion, Vector3};
use std::{
    sync::mpsc::{Receiver, Sender},
    time::{Duration, Instant},
};

/// Roughly a headset's refresh rate.
const TICK: Duration = Duration::from_micros(11_111);

/// Stand-in for a tracked headset: turns [`HeadMotion`] into orientation samples and runs
/// them through a [`RotationTracker`].
pub struct HeadClient {
    tracker: RotationTracker,
    motion: HeadMotion,
    yaw: f32,
}

impl HeadClient {
    pub fn run(tx: Sender<Head2UI>, rx: Receiver<UI2Head>) {
        std::thread::spawn(move || {
            let tracker = match RotationTracker::new(TrackerSettings::default()) {
                Ok(tracker) => tracker,
                Err(err) => {
                    let _ = tx.send(Head2UI::Failure(HeadFailure::Settings(err)));
                    return;
                }
            };
            let mut client = HeadClient { tracker, motion: HeadMotion::default(), yaw: 0.0 };
            client.run1(tx, rx);
            info!("Head client stopped");
        });
    }

    /// Current simulated head orientation. Yaw is applied last so pitch and roll stay head-relative.
    pub fn orientation(&self) -> UnitQuaternion<f32> {
        UnitQuaternion::from_axis_angle(&Vector3::y_axis(), self.yaw.to_radians())
            * UnitQuaternion::from_axis_angle(&Vector3::x_axis(), self.motion.pitch.to_radians())
            * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), self.motion.roll.to_radians())
    }

    /// Applies one message. Returns `false` when the client should stop.
    fn handle(&mut self, tx: &Sender<Head2UI>, msg: UI2Head) -> bool {
        match msg {
            UI2Head::Shutdown => return false,
            UI2Head::Start => {}
            UI2Head::UpdateTracker(settings) => {
                if let Err(err) = self.tracker.set_settings(settings) {
                    warn!("Keeping previous tracker settings: {}", err);
                    let _ = tx.send(Head2UI::Failure(HeadFailure::Settings(err)));
                }
            }
            UI2Head::UpdateMotion(motion) => self.motion = motion,
            UI2Head::Recenter => {
                info!("Recentering");
                self.tracker.reset();
            }
        }
        true
    }

    fn step(&mut self, dt: f32) -> f32 {
        self.yaw = (self.yaw + self.motion.yaw_rate * dt).rem_euclid(360.0);
        let sample = TrustSample::from_orientation(&self.orientation());
        self.tracker.tick(&sample)
    }

    fn run1(&mut self, tx: Sender<Head2UI>, rx: Receiver<UI2Head>) {
        'wait_for_startup: loop {
            match rx.recv() {
                Ok(UI2Head::Start) => break 'wait_for_startup,
                Ok(UI2Head::Shutdown) => return,
                Ok(msg) => {
                    self.handle(&tx, msg);
                }
                Err(_) => {
                    let _ = tx.send(Head2UI::Failure(HeadFailure::Disconnected));
                    return;
                }
            }
        }

        info!("Head client running");
        let _ = tx.send(Head2UI::Running);

        let mut last = Instant::now();
        'main_loop: loop {
            while let Ok(msg) = rx.try_recv() {
                if !self.handle(&tx, msg) {
                    break 'main_loop;
                }
            }

            let now = Instant::now();
            let twist = self.step((now - last).as_secs_f32());
            last = now;

            // the UI can shut down in the middle of a tick
            if tx.send(Head2UI::TwistUpdate { twist, state: *self.tracker.state() }).is_err() {
                break 'main_loop;
            }

            std::thread::sleep(TICK);
        }
    }
}
