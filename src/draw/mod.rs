// src/draw/mod.rs
// Drawing surface abstraction and the shape primitives drawn onto it.
// All coordinates are canvas space: origin top-left, y pointing down.

pub mod shape_draw;
pub use shape_draw::{circle_geometry, draw_object, rect_geometry, triangle_geometry};

#[cfg(test)]
pub(crate) mod recording;

use nannou::image::RgbaImage;
use nannou::prelude::*;

/// Axis-aligned rectangle in canvas space, `x`/`y` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl CanvasRect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn centre(&self) -> Vec2 {
        vec2(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }
}

/// Where the pixels of an image come from.
#[derive(Debug, Clone, Copy)]
pub enum ImageSource<'a> {
    /// Still image from the avatar directory
    Avatar(&'a str),
    /// Still image from the background directory
    Background(&'a str),
    /// One decoded frame of an animated avatar
    GifFrame {
        name: &'a str,
        index: usize,
        pixels: &'a RgbaImage,
    },
}

pub trait DrawSurface {
    fn clear(&mut self);
    fn fill_rect(&mut self, rect: CanvasRect, colour: Rgba);
    fn fill_circle(&mut self, centre: Vec2, radius: f32, colour: Rgba);
    fn fill_triangle(&mut self, points: [Vec2; 3], colour: Rgba);
    fn draw_image(&mut self, image: ImageSource<'_>, rect: CanvasRect);
}
