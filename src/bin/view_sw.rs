//! First-person window over a text map.
//!
//! ```bash
//! cargo run --release -- maps/clear.txt --texture wall.png
//! ```
//!
//! W/S or ↑/↓ move, A/D strafe, ←/→ turn, drag with the left mouse button
//! to look around, Space jumps, C or Ctrl ducks, Tab toggles the overhead
//! map, Esc quits.

use clap::Parser;
use glam::Vec2;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use portal_rs::{
    config::ViewConfig,
    engine::Engine,
    game::Game,
    renderer::Software,
    sim::Intent,
    world::TextureBank,
};

/// Turn rate of the arrow keys, in mouse-pixel units per frame.
const KEY_TURN: f32 = 2.0;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Map file to load
    #[arg(value_name = "MAP", default_value = "maps/clear.txt")]
    map: PathBuf,

    #[arg(long, default_value_t = 640)]
    width: usize,

    #[arg(long, default_value_t = 480)]
    height: usize,

    /// PNG used for every wall (checkerboard when absent)
    #[arg(long, value_name = "PNG")]
    texture: Option<PathBuf>,

    /// Window refresh cap
    #[arg(long, default_value_t = 60)]
    fps: usize,

    /// Colour walls from the palette instead of texturing them
    #[arg(long)]
    flat: bool,

    /// Don't outline wall runs
    #[arg(long)]
    no_outline: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opts = Opts::parse();

    let mut bank = TextureBank::default_with_checker();
    let mut cfg = ViewConfig::with_size(opts.width, opts.height);
    if let Some(path) = &opts.texture {
        cfg.wall_texture = bank.load_png(path)?;
    }
    cfg.flat_walls = opts.flat;
    cfg.outline = !opts.no_outline;

    let mut game = Game::new(Engine::new(Software::default(), bank, cfg));
    game.load_file(&opts.map)?;

    let mut win = Window::new(
        "portal_rs – software render",
        opts.width,
        opts.height,
        WindowOptions::default(),
    )?;
    win.set_target_fps(opts.fps);

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO; // cumulated render time
    let mut acc_frames = 0usize; // frames in the current window
    let mut last_print = Instant::now(); // when we reported last

    let mut last_mouse: Option<(f32, f32)> = None;

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let t0 = Instant::now(); // ┌─ frame timer start

        if win.is_key_pressed(Key::Tab, KeyRepeat::No) {
            game.toggle_automap();
        }

        /* --------------- build one Intent per frame ----------------------- */
        let mut intent = Intent {
            forward: win.is_key_down(Key::W) || win.is_key_down(Key::Up),
            back: win.is_key_down(Key::S) || win.is_key_down(Key::Down),
            left: win.is_key_down(Key::A),
            right: win.is_key_down(Key::D),
            duck: win.is_key_down(Key::C)
                || win.is_key_down(Key::LeftCtrl)
                || win.is_key_down(Key::RightCtrl),
            jump: win.is_key_pressed(Key::Space, KeyRepeat::No), // edge-trigger
            look: Vec2::ZERO,
        };

        if win.is_key_down(Key::Left) {
            intent.look.x -= KEY_TURN;
        }
        if win.is_key_down(Key::Right) {
            intent.look.x += KEY_TURN;
        }

        /* mouse look while dragging ---------------------------------------- */
        let mouse = win.get_mouse_pos(MouseMode::Pass);
        if win.get_mouse_down(MouseButton::Left) {
            if let (Some((x0, y0)), Some((x1, y1))) = (last_mouse, mouse) {
                intent.look += Vec2::new(x1 - x0, y1 - y0);
            }
        }
        last_mouse = mouse;

        /* resolve + draw --------------------------------------------------- */
        let mut present = Ok(());
        game.frame(&intent, |fb, w, h| {
            // ─────────── accumulate & report every ~3 s ────────────────────
            acc_time += t0.elapsed();
            acc_frames += 1;
            present = win.update_with_buffer(fb, w, h);
        });
        present?;

        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames.max(1) as f64;
            log::info!("avg frame: {:.2} ms  ({:.1} FPS)", avg_ms, 1000.0 / avg_ms);
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}
