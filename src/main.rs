//! Minimal 2-D map viewer.
//!
//! ```bash
//! cargo run --bin map_view -- maps/clear.txt
//! ```
//!
//! R reloads the file from disk, Esc quits.

use clap::Parser;
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use std::path::PathBuf;

use portal_rs::{
    map::load_map_file,
    renderer::{Renderer, Software, automap::draw_automap},
    world::{Level, Player},
};

const WIDTH: usize = 1024;
const HEIGHT: usize = 768;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Map file to show
    #[arg(value_name = "MAP")]
    map: PathBuf,
}

fn describe(level: &Level) {
    for (i, s) in level.sectors.iter().enumerate() {
        log::info!(
            "sector {i}: floor {} ceil {} corners {} portals {}",
            s.floor,
            s.ceil,
            s.edge_count(),
            s.neighbors.iter().filter(|n| n.is_portal()).count()
        );
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opts = Opts::parse();

    let (mut level, mut player): (Level, Player) = load_map_file(&opts.map)?;
    describe(&level);

    let mut sw = Software::default();
    let mut win = Window::new(
        &format!("map – {}", level.name),
        WIDTH,
        HEIGHT,
        WindowOptions::default(),
    )?;
    win.set_target_fps(30);

    while win.is_open() && !win.is_key_down(Key::Escape) {
        if win.is_key_pressed(Key::R, KeyRepeat::No) {
            match load_map_file(&opts.map) {
                Ok((l, p)) => {
                    (level, player) = (l, p);
                    describe(&level);
                }
                Err(e) => log::error!("reload failed: {e}"),
            }
        }

        sw.begin_frame(WIDTH, HEIGHT);
        draw_automap(&mut sw, &level, &player, WIDTH, HEIGHT);
        let mut present = Ok(());
        sw.end_frame(|fb, w, h| present = win.update_with_buffer(fb, w, h));
        present?;
    }
    Ok(())
}
