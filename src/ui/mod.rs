mod graph;
mod preview;

use crate::{
    error::ConfigError,
    pipe::{Head2UI, HeadFailure, HeadMotion, UI2Head},
    tracker::{Axis, RotationState, TrackerSettings},
    twister::{ShapeParameters, Twister},
    ui::preview::Preview,
};
use eframe::emath::Align;
use egui::{Color32, Layout, TextStyle, vec2, widgets::Slider};
use log::{info, warn};

const HISTORY: usize = 100;

pub struct UI {
    tx: std::sync::mpsc::Sender<UI2Head>,
    rx: std::sync::mpsc::Receiver<Head2UI>,
    running: bool,
    head_failure: Option<HeadFailure>,
    config_error: Option<ConfigError>,
    twister: Twister,
    tracker_settings: TrackerSettings,
    motion: HeadMotion,
    state: RotationState,
    preview: Preview,
    history: [f32; HISTORY],
}

impl UI {
    pub fn new(
        tx: std::sync::mpsc::Sender<UI2Head>,
        rx: std::sync::mpsc::Receiver<Head2UI>,
        cc: &eframe::CreationContext,
    ) -> Result<Self, ConfigError> {
        cc.egui_ctx.style_mut(|style| {
            for (style, font) in &mut style.text_styles {
                match style {
                    TextStyle::Body => font.size = 17.0,
                    TextStyle::Heading => font.size = 30.0,
                    _ => {}
                }
            }
        });

        Ok(Self {
            tx,
            rx,
            running: false,
            head_failure: None,
            config_error: None,
            twister: Twister::new(ShapeParameters::default())?,
            tracker_settings: TrackerSettings::default(),
            motion: HeadMotion::default(),
            state: RotationState::default(),
            preview: Preview::new(),
            history: [0.0; HISTORY],
        })
    }

    pub fn run(tx: std::sync::mpsc::Sender<UI2Head>, rx: std::sync::mpsc::Receiver<Head2UI>) -> eframe::Result<()> {
        let rtn =
            eframe::run_native("Twister", Default::default(), Box::new(|cc| Ok(Box::new(UI::new(tx, rx, cc)?))));
        info!("Frontend stopped");
        rtn
    }

    fn poll_head(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                Head2UI::Running => self.running = true,
                Head2UI::Failure(failure) => {
                    warn!("{}", failure);
                    self.head_failure = Some(failure);
                }
                Head2UI::TwistUpdate { twist, state } => {
                    self.history.copy_within(1.., 0);
                    self.history[HISTORY - 1] = twist;
                    self.state = state;
                    if let Err(err) = self.twister.set_twist(twist) {
                        self.config_error = Some(err);
                    }
                }
            }
        }
    }

    fn shape_controls(&mut self, ui: &mut egui::Ui) {
        let mut params = *self.twister.params();
        let mut changed = false;

        ui.heading("Shape");
        changed |= ui.add(Slider::new(&mut params.radius, 0.05..=3.0).text("Radius")).changed();
        changed |= ui.add(Slider::new(&mut params.inner_circle_ratio, 0.0..=1.0).text("Inner circle ratio")).changed();
        changed |= ui.add(Slider::new(&mut params.coil_strength, -1.0..=1.0).text("Coil strength")).changed();
        changed |= ui.add(Slider::new(&mut params.petal_count, 1..=24).text("Petals")).changed();
        changed |= ui.add(Slider::new(&mut params.line_resolution, 1..=200).text("Line resolution")).changed();
        changed |= ui.add(Slider::new(&mut params.curve_point_count, 1..=60).text("Curve points")).changed();

        if changed {
            self.config_error = self.twister.set_params(params).err();
        }
    }

    fn tracker_controls(&mut self, ui: &mut egui::Ui) {
        let settings = &mut self.tracker_settings;
        let mut changed = false;

        ui.heading("Tracking");
        changed |= ui.add(Slider::new(&mut settings.max_y_dist, 0.05..=1.0).text("Max vertical distance")).changed();
        changed |= ui.add(Slider::new(&mut settings.max_turns, 1..=50).text("Max turns")).changed();
        changed |= ui.checkbox(&mut settings.reversed, "Reversed").changed();
        if changed {
            let _ = self.tx.send(UI2Head::UpdateTracker(*settings));
        }

        let motion = &mut self.motion;
        let mut changed = false;
        changed |= ui.add(Slider::new(&mut motion.yaw_rate, -180.0..=180.0).text("Yaw rate (°/s)")).changed();
        changed |= ui.add(Slider::new(&mut motion.pitch, -89.0..=89.0).text("Pitch (°)")).changed();
        changed |= ui.add(Slider::new(&mut motion.roll, -89.0..=89.0).text("Roll (°)")).changed();
        if changed {
            let _ = self.tx.send(UI2Head::UpdateMotion(*motion));
        }

        if ui.button("Recenter").clicked() {
            let _ = self.tx.send(UI2Head::Recenter);
        }
    }

    fn status(&self, ui: &mut egui::Ui) {
        let axis = match self.state.trusted_axis {
            Some(axis) => format!("{}", axis),
            None => "Unset".to_owned(),
        };
        ui.label(format!("Twist: {:+.4}   Trusted axis: {}", self.twister.params().twist, axis));
        ui.label(format!(
            "Turns: {:+.2}   Bearing: {:.1}°",
            self.state.accumulated_angle / 360.0,
            self.state.last_trusted_progress
        ));
        ui.horizontal(|ui| {
            for (axis, trust) in Axis::ALL.iter().zip(self.state.trust) {
                let color = if Some(*axis) == self.state.trusted_axis { Color32::GREEN } else { Color32::GRAY };
                ui.colored_label(color, format!("{}: {:.2}", axis, trust));
            }
        });
    }
}

impl eframe::App for UI {
    #[profiling::function]
    fn update(&mut self, ctx: &eframe::egui::Context, _frame: &mut eframe::Frame) {
        ctx.request_repaint();
        self.poll_head();
        self.twister.tick(&mut self.preview);

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(failure) = &self.head_failure {
                ui.heading(egui::RichText::from("Head tracking problem").color(Color32::RED));
                ui.label(format!("{}", failure));
                ui.separator();
            }

            if !self.running {
                ui.heading("Not Running.");
                if ui.add_sized(vec2(200.0, 50.0), egui::Button::new("Start")).clicked() {
                    let _ = self.tx.send(UI2Head::UpdateTracker(self.tracker_settings));
                    let _ = self.tx.send(UI2Head::UpdateMotion(self.motion));
                    let _ = self.tx.send(UI2Head::Start);
                }
                return;
            }

            ui.horizontal_top(|ui| {
                ui.vertical(|ui| {
                    self.shape_controls(ui);
                    ui.separator();
                    self.tracker_controls(ui);
                });
                ui.with_layout(Layout::right_to_left(Align::Min), |ui| {
                    self.preview.draw(ui);
                });
            });

            if let Some(err) = &self.config_error {
                ui.colored_label(Color32::RED, format!("{}", err));
            }

            ui.separator();
            self.status(ui);
            graph::graph(&self.history, ui);
        });
    }

    fn on_exit(&mut self, _ctx: Option<&eframe::glow::Context>) { let _ = self.tx.send(UI2Head::Shutdown); }
}
