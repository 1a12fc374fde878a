use crate::{
    headclient::HeadClient,
    pipe::{Head2UI, UI2Head},
    ui::UI,
};

pub mod error;
mod headclient;
pub mod pipe;
pub mod tracker;
pub mod twister;
mod ui;
pub mod util;

#[profiling::function]
pub fn main() -> eframe::Result {
    util::logger::init();

    let (ui_tx, head_rx) = std::sync::mpsc::channel::<UI2Head>();
    let (head_tx, ui_rx) = std::sync::mpsc::channel::<Head2UI>();

    HeadClient::run(head_tx, head_rx);
    UI::run(ui_tx, ui_rx)
}
