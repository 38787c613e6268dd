use crate::{
    config::ViewConfig,
    engine::{
        projection::project_edge,
        queue::RingQueue,
        types::{ClipBands, DrawTask, FrameStats, Screen, Visit},
        walls::{FrameCtx, draw_edge},
    },
    renderer::{Renderer, Rgba, automap},
    world::{Level, Player, TextureBank},
};

/// Portal renderer: walks the sector graph breadth-first from the player's
/// sector and feeds the resulting columns to `R`.
pub struct Engine<R: Renderer> {
    pub renderer: R,
    pub textures: TextureBank,
    cfg: ViewConfig,
    screen: Screen,
    bands: ClipBands,
    queue: RingQueue<DrawTask>,
    visits: Vec<Visit>,
}

impl<R: Renderer> Engine<R> {
    pub fn new(renderer: R, textures: TextureBank, cfg: ViewConfig) -> Self {
        Self {
            renderer,
            textures,
            screen: Screen::new(&cfg),
            queue: RingQueue::new(cfg.queue_capacity),
            bands: ClipBands::default(),
            visits: Vec::new(),
            cfg,
        }
    }

    #[inline]
    pub fn config(&self) -> &ViewConfig {
        &self.cfg
    }

    /// Render one first-person frame and hand it to `submit`.
    pub fn render_frame<F>(&mut self, level: &Level, player: &Player, submit: F) -> FrameStats
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        self.renderer.begin_frame(self.screen.w, self.screen.h);
        let stats = self.draw_sectors(level, player);
        self.renderer.end_frame(submit);
        stats
    }

    /// Render the overhead map instead of the first-person view.
    pub fn render_automap<F>(&mut self, level: &Level, player: &Player, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        let (w, h) = (self.screen.w, self.screen.h);
        self.renderer.begin_frame(w, h);
        automap::draw_automap(&mut self.renderer, level, player, w, h);
        self.renderer.end_frame(submit);
    }

    /* ---------------------------------------------------------------- */
    /* portal walk                                                      */
    /* ---------------------------------------------------------------- */
    fn draw_sectors(&mut self, level: &Level, player: &Player) -> FrameStats {
        let mut stats = FrameStats::default();
        if self.screen.w == 0 || self.screen.h == 0 {
            return stats;
        }
        if player.sector as usize >= level.sector_count() {
            log::warn!("player sector {} not in level `{}`", player.sector, level.name);
            return stats;
        }

        self.bands.reset(self.screen.w, self.screen.h);
        self.visits.clear();
        self.visits.resize(level.sector_count(), Visit::Unvisited);
        self.queue.clear();
        self.queue.push(DrawTask {
            sector: player.sector,
            x1: 0,
            x2: self.screen.w as i32 - 1,
        });

        let ctx = FrameCtx {
            player,
            screen: &self.screen,
            cfg: &self.cfg,
            bank: &self.textures,
        };

        while let Some(task) = self.queue.pop() {
            let visit = self.visits[task.sector as usize];
            if !visit.may_draw(self.cfg.max_sector_passes) {
                stats.tasks_skipped += 1;
                continue;
            }
            self.visits[task.sector as usize] = Visit::InProgress;

            let sector = level.sector(task.sector);
            for edge in sector.edges() {
                let Some(proj) = project_edge(player, &self.screen, edge.a, edge.b) else {
                    continue;
                };
                let neighbor = edge.neighbor.sector().map(|id| level.sector(id));
                let (next, columns) = draw_edge(
                    &ctx,
                    &mut self.renderer,
                    &mut self.bands,
                    sector,
                    neighbor,
                    &edge,
                    &proj,
                    &task,
                );
                stats.columns += columns;

                if let Some(next) = next {
                    if !self.queue.push(next) {
                        stats.tasks_dropped += 1;
                        log::trace!(
                            "draw queue full, dropped sector {} [{}, {}]",
                            next.sector,
                            next.x1,
                            next.x2
                        );
                    }
                }
            }

            self.visits[task.sector as usize] = Visit::Done {
                passes: visit.passes().saturating_add(1),
            };
            stats.tasks_drawn += 1;
        }
        stats
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
