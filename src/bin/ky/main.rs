//! ky - play each primitive on the default output device
//!
//! Run with: cargo run -- [sine|saw|pluck]
//! Set RUST_LOG=debug to see configuration messages.

mod app;
mod voice;

use color_eyre::eyre::eyre;

use app::{Demo, Scene};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let scene = match std::env::args().nth(1).as_deref() {
        None | Some("pluck") => Scene::Pluck,
        Some("sine") => Scene::Sine,
        Some("saw") => Scene::Saw,
        Some(other) => return Err(eyre!("unknown scene '{other}', expected sine, saw or pluck")),
    };

    // A short minor phrase, as MIDI notes
    let melody = [57.0, 60.0, 64.0, 62.0, 60.0, 64.0, 67.0, 69.0];

    Demo::new(scene).note_ms(400).repeat(4).run(&melody)
}
