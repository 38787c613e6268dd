//! One frame = intent → resolve → render, strictly in that order.

use std::path::Path;

use crate::{
    engine::{Engine, FrameStats},
    map::{MapError, load_map, load_map_file},
    renderer::{Renderer, Rgba},
    sim::{Intent, TicRunner},
    world::{Level, Player},
};

/// A loaded level together with the runner that owns its player.
struct Session {
    level: Level,
    sim: TicRunner,
}

/// Level lifecycle plus the per-frame pipeline.
pub struct Game<R: Renderer> {
    pub engine: Engine<R>,
    session: Option<Session>,
    automap: bool,
}

impl<R: Renderer> Game<R> {
    pub fn new(engine: Engine<R>) -> Self {
        Self {
            engine,
            session: None,
            automap: false,
        }
    }

    /* ---------------------------------------------------------------- */
    /* lifecycle                                                        */
    /* ---------------------------------------------------------------- */

    /// Replace the current level with one parsed from `text`.
    pub fn load(&mut self, text: &str) -> Result<(), MapError> {
        let (level, player) = load_map(text)?;
        self.start(level, player);
        Ok(())
    }

    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), MapError> {
        let (level, player) = load_map_file(path)?;
        self.start(level, player);
        Ok(())
    }

    fn start(&mut self, level: Level, player: Player) {
        if let Some(old) = self.session.take() {
            log::debug!("replacing level `{}`", old.level.name);
        }
        self.session = Some(Session {
            level,
            sim: TicRunner::new(player),
        });
    }

    /// Drop the level and its player.
    pub fn unload(&mut self) {
        if let Some(old) = self.session.take() {
            log::info!("unloaded level `{}`", old.level.name);
        }
    }

    pub fn level(&self) -> Option<&Level> {
        self.session.as_ref().map(|s| &s.level)
    }

    pub fn player(&self) -> Option<&Player> {
        self.session.as_ref().map(|s| s.sim.player())
    }

    pub fn toggle_automap(&mut self) {
        self.automap = !self.automap;
    }

    pub fn automap(&self) -> bool {
        self.automap
    }

    /* ---------------------------------------------------------------- */
    /* per frame                                                        */
    /* ---------------------------------------------------------------- */

    /// Run as many fixed-rate tics as real time asks for, then render.
    pub fn frame<F>(&mut self, intent: &Intent, submit: F) -> Option<FrameStats>
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        if let Some(s) = self.session.as_mut() {
            s.sim.pump(&s.level, intent);
        }
        self.render(submit)
    }

    /// Run exactly one tic.
    pub fn tick(&mut self, intent: &Intent) {
        if let Some(s) = self.session.as_mut() {
            s.sim.tick(&s.level, intent);
        }
    }

    /// Draw the current state. With no level loaded a cleared frame is
    /// still submitted and `None` returned.
    pub fn render<F>(&mut self, submit: F) -> Option<FrameStats>
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        let Some(s) = self.session.as_ref() else {
            let cfg = self.engine.config();
            let (w, h) = (cfg.width, cfg.height);
            self.engine.renderer.begin_frame(w, h);
            self.engine.renderer.end_frame(submit);
            return None;
        };
        if self.automap {
            self.engine.render_automap(&s.level, s.sim.player(), submit);
            None
        } else {
            Some(self.engine.render_frame(&s.level, s.sim.player(), submit))
        }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
