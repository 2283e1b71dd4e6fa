// src/animation/movement.rs
//
// Tick-to-tick movement: maps the discrete grid cell an object occupies on
// each tick onto a continuous pixel position for the frames in between.

use nannou::prelude::*;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use crate::models::{GridCell, GridModel};

#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedObject {
    pub loc_from: GridCell,
    pub loc_to: GridCell,
    pub position: Vec2,
    pub time_started: f64, // ms
}

/// In-flight moves keyed by object id, owned by the renderer for the
/// lifetime of a rendering session.
#[derive(Debug, Default)]
pub struct AnimationTable {
    objects: HashMap<String, AnimatedObject>,
    seen: HashSet<String>,
}

impl AnimationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&AnimatedObject> {
        self.objects.get(key)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Current pixel position of `key`, heading for `target`.
    ///
    /// Unknown keys snap to `target`. A target different from the recorded
    /// destination starts a new move from the old destination at `now`.
    /// Once `time_per_move` ms have passed the object sits exactly on its
    /// destination.
    pub fn process_movement(
        &mut self,
        key: &str,
        target: GridCell,
        grid: &GridModel,
        time_per_move: f64,
        now: f64,
    ) -> Vec2 {
        self.seen.insert(key.to_string());

        let obj = match self.objects.entry(key.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let position = grid.cell_to_px(target);
                entry.insert(AnimatedObject {
                    loc_from: target,
                    loc_to: target,
                    position,
                    time_started: now,
                });
                return position;
            }
        };

        if obj.loc_to != target {
            obj.loc_from = obj.loc_to;
            obj.loc_to = target;
            obj.time_started = now;
        }

        let elapsed = now - obj.time_started;
        if time_per_move <= 0.0 || elapsed >= time_per_move {
            obj.position = grid.cell_to_px(obj.loc_to);
        } else {
            let px = grid.px_per_cell();
            obj.position = vec2(
                animated_coord(obj.loc_from.x, obj.loc_to.x, px, elapsed, time_per_move),
                animated_coord(obj.loc_from.y, obj.loc_to.y, px, elapsed, time_per_move),
            );
        }
        obj.position
    }

    /// Drops every object not touched since the previous prune and returns
    /// how many were removed. Call once at the end of each rendering pass.
    pub fn prune_unseen(&mut self) -> usize {
        let before = self.objects.len();
        let seen = std::mem::take(&mut self.seen);
        self.objects.retain(|key, _| seen.contains(key));
        before - self.objects.len()
    }
}

// One axis of the move. An axis without a cell change stays on the origin.
fn animated_coord(from: i32, to: i32, px_per_cell: f32, elapsed: f64, time_per_move: f64) -> f32 {
    let origin = from as f32 * px_per_cell;
    if from == to {
        return origin;
    }

    let cells_to_move = to.abs_diff(from) as f64;
    let px_per_ms = cells_to_move * px_per_cell as f64 / time_per_move;
    let diff = (elapsed.max(0.0) * px_per_ms) as f32;

    if to < from {
        origin - diff
    } else {
        origin + diff
    }
}
