// src/models/grid_model.rs
//
// Grid dimensions and the cell -> pixel projection

use nannou::prelude::*;
use serde::Deserialize;

/// A grid cell coordinate, (0, 0) is the top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "(i32, i32)")]
pub struct GridCell {
    pub x: i32,
    pub y: i32,
}

impl GridCell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for GridCell {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Grid size in cells plus the square tile size that fits it onto the canvas.
#[derive(Debug, Clone)]
pub struct GridModel {
    pub width: u32,
    pub height: u32,
    canvas: Vec2,
    px_per_cell: f32,
}

impl GridModel {
    pub fn new(width: u32, height: u32, canvas_width: f32, canvas_height: f32) -> Self {
        let mut grid = Self {
            width: width.max(1),
            height: height.max(1),
            canvas: vec2(canvas_width, canvas_height),
            px_per_cell: 0.0,
        };
        grid.fit_tile_size();
        grid
    }

    /// Fixed tile size, independent of any canvas.
    pub fn with_tile_size(width: u32, height: u32, px_per_cell: f32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            canvas: vec2(width as f32 * px_per_cell, height as f32 * px_per_cell),
            px_per_cell,
        }
    }

    pub fn px_per_cell(&self) -> f32 {
        self.px_per_cell
    }

    pub fn canvas_size(&self) -> Vec2 {
        self.canvas
    }

    /// Returns true when the size changed and the tile size was recomputed.
    pub fn update_grid_size(&mut self, width: u32, height: u32) -> bool {
        let (width, height) = (width.max(1), height.max(1));
        if width == self.width && height == self.height {
            return false;
        }
        self.width = width;
        self.height = height;
        self.fit_tile_size();
        true
    }

    /// Returns true when the canvas size changed.
    pub fn resize_canvas(&mut self, width: f32, height: f32) -> bool {
        let size = vec2(width, height);
        if size == self.canvas {
            return false;
        }
        self.canvas = size;
        self.fit_tile_size();
        true
    }

    // Use the smaller of the two ratios for both axes so tiles stay square
    fn fit_tile_size(&mut self) {
        let px_x = (self.canvas.x / self.width as f32).round();
        let px_y = (self.canvas.y / self.height as f32).round();
        self.px_per_cell = px_x.min(px_y).max(0.0);
    }

    /// Pixel position of the top-left corner of `cell` in canvas space.
    pub fn cell_to_px(&self, cell: GridCell) -> Vec2 {
        vec2(
            cell.x as f32 * self.px_per_cell,
            cell.y as f32 * self.px_per_cell,
        )
    }

    /// Pixel extent of the whole grid.
    pub fn extent(&self) -> Vec2 {
        vec2(
            self.width as f32 * self.px_per_cell,
            self.height as f32 * self.px_per_cell,
        )
    }
}
