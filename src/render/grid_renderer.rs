// src/render/grid_renderer.rs
// Owns everything a rendering session needs: the latest snapshot, the
// grid model, the animation table, the tick clock and the sprite cache.
// Once per frame it paints the snapshot onto a DrawSurface.

use crate::animation::{AnimationTable, TickClock, TickStatus};
use crate::config::Config;
use crate::draw::{draw_object, DrawSurface, ImageSource};
use crate::models::{GridModel, Shape, Snapshot};
use crate::services::SpriteCache;
use crate::views::BackgroundManager;

pub struct WorldRenderer {
    grid: GridModel,
    animations: AnimationTable,
    clock: TickClock,
    sprites: SpriteCache,
    background: BackgroundManager,
    snapshot: Option<Snapshot>,
}

impl WorldRenderer {
    pub fn new(
        grid: GridModel,
        clock: TickClock,
        sprites: SpriteCache,
        background: BackgroundManager,
    ) -> Self {
        Self {
            grid,
            animations: AnimationTable::new(),
            clock,
            sprites,
            background,
            snapshot: None,
        }
    }

    pub fn from_config(config: &Config, canvas_width: f32, canvas_height: f32) -> Self {
        Self::new(
            GridModel::new(10, 10, canvas_width, canvas_height),
            TickClock::new(
                config.animation.duration_perc,
                config.animation.fallback_tick_ms,
            ),
            SpriteCache::new(config.resolve_avatar_dir()),
            BackgroundManager::new(&config.style.background_colour),
        )
    }

    /// Accepts a snapshot unless it is older than one already shown.
    pub fn receive_snapshot(&mut self, snapshot: Snapshot, now_ms: f64) -> bool {
        match self.clock.register_tick(snapshot.tick, now_ms) {
            TickStatus::Stale => {
                tracing::debug!(
                    tick = snapshot.tick,
                    highest = ?self.clock.highest_tick(),
                    "dropping stale snapshot"
                );
                return false;
            }
            TickStatus::New | TickStatus::Repeat => {}
        }

        let (width, height) = snapshot.grid_size;
        if self.grid.update_grid_size(width, height) {
            tracing::info!(
                width,
                height,
                px_per_cell = self.grid.px_per_cell(),
                "grid size changed"
            );
        }

        self.sprites.preload(snapshot.image_names());
        self.snapshot = Some(snapshot);
        true
    }

    pub fn resize_canvas(&mut self, width: f32, height: f32) {
        if self.grid.resize_canvas(width, height) {
            tracing::debug!(width, height, px_per_cell = self.grid.px_per_cell(), "canvas resized");
        }
    }

    /// Start over after the simulation restarted: forget tick history and
    /// in-flight moves.
    pub fn reset(&mut self) {
        self.clock.reset();
        self.animations = AnimationTable::new();
        self.snapshot = None;
    }

    pub fn background_mut(&mut self) -> &mut BackgroundManager {
        &mut self.background
    }

    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    pub fn clock(&self) -> &TickClock {
        &self.clock
    }

    pub fn animations(&self) -> &AnimationTable {
        &self.animations
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// Paints the background and every object of the latest snapshot,
    /// lowest depth first.
    pub fn render<S: DrawSurface>(&mut self, surface: &mut S, now_ms: f64) {
        self.background.draw(surface, &self.grid);

        let Some(snapshot) = &self.snapshot else {
            return;
        };

        let time_per_move = self.clock.time_per_move();
        let tile = self.grid.px_per_cell();

        for (id, obj) in snapshot.objects() {
            let position = self.animations.process_movement(
                id,
                obj.location,
                &self.grid,
                time_per_move,
                now_ms,
            );

            let image = match (obj.visualization.shape, obj.img_name.as_deref()) {
                (Shape::Image, Some(name)) => Some(match self.sprites.next_frame(name) {
                    Some((index, pixels)) => ImageSource::GifFrame {
                        name,
                        index,
                        pixels,
                    },
                    None => ImageSource::Avatar(name),
                }),
                _ => None,
            };

            draw_object(surface, position, tile, &obj.visualization, image);
        }

        let pruned = self.animations.prune_unseen();
        if pruned > 0 {
            tracing::debug!(pruned, "objects left the world");
        }
    }
}
