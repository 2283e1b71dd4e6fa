// src/draw/recording.rs
// Test surface that records every draw call

use nannou::prelude::*;

use super::{CanvasRect, DrawSurface, ImageSource};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    Rect { rect: CanvasRect, colour: Rgba },
    Circle { centre: Vec2, radius: f32, colour: Rgba },
    Triangle { points: [Vec2; 3], colour: Rgba },
    Image { name: String, frame: Option<usize>, background: bool, rect: CanvasRect },
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn fill_rect(&mut self, rect: CanvasRect, colour: Rgba) {
        self.calls.push(DrawCall::Rect { rect, colour });
    }

    fn fill_circle(&mut self, centre: Vec2, radius: f32, colour: Rgba) {
        self.calls.push(DrawCall::Circle { centre, radius, colour });
    }

    fn fill_triangle(&mut self, points: [Vec2; 3], colour: Rgba) {
        self.calls.push(DrawCall::Triangle { points, colour });
    }

    fn draw_image(&mut self, image: ImageSource<'_>, rect: CanvasRect) {
        let (name, frame, background) = match image {
            ImageSource::Avatar(name) => (name, None, false),
            ImageSource::Background(name) => (name, None, true),
            ImageSource::GifFrame { name, index, .. } => (name, Some(index), false),
        };
        self.calls.push(DrawCall::Image {
            name: name.to_string(),
            frame,
            background,
            rect,
        });
    }
}
