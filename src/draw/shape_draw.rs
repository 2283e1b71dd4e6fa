// src/draw/shape_draw.rs
// Tile-relative shape geometry. A shape of size `s` (0-1) is centred in its
// tile and covers `s` of the tile's width and height.

use nannou::prelude::*;

use super::{CanvasRect, DrawSurface, ImageSource};
use crate::models::{Shape, Visualization};

pub fn rect_geometry(x: f32, y: f32, tile_w: f32, tile_h: f32, size: f32) -> CanvasRect {
    CanvasRect {
        x: x + (1.0 - size) * 0.5 * tile_w,
        y: y + (1.0 - size) * 0.5 * tile_h,
        w: size * tile_w,
        h: size * tile_h,
    }
}

/// Centre and radius. The radius follows the tile width only.
pub fn circle_geometry(x: f32, y: f32, tile_w: f32, tile_h: f32, size: f32) -> (Vec2, f32) {
    let centre = vec2(x + 0.5 * tile_w, y + 0.5 * tile_h);
    (centre, size * tile_w * 0.5)
}

/// Apex, bottom-left, bottom-right.
pub fn triangle_geometry(x: f32, y: f32, tile_w: f32, tile_h: f32, size: f32) -> [Vec2; 3] {
    let inset_x = (1.0 - size) * 0.5 * tile_w;
    let inset_y = (1.0 - size) * 0.5 * tile_h;

    [
        vec2(x + 0.5 * tile_w, y + inset_y),
        vec2(x + inset_x, y + tile_h - inset_y),
        vec2(x + tile_w - inset_x, y + tile_h - inset_y),
    ]
}

/// Draws one object whose tile's top-left corner sits at `origin`.
/// `image` is only used for image-shaped objects.
pub fn draw_object<S: DrawSurface>(
    surface: &mut S,
    origin: Vec2,
    tile: f32,
    vis: &Visualization,
    image: Option<ImageSource<'_>>,
) {
    let (x, y) = (origin.x, origin.y);
    match vis.shape {
        Shape::Rectangle => {
            surface.fill_rect(rect_geometry(x, y, tile, tile, vis.size), vis.colour);
        }
        Shape::Circle => {
            let (centre, radius) = circle_geometry(x, y, tile, tile, vis.size);
            surface.fill_circle(centre, radius, vis.colour);
        }
        Shape::Triangle => {
            surface.fill_triangle(triangle_geometry(x, y, tile, tile, vis.size), vis.colour);
        }
        Shape::Image => {
            if let Some(image) = image {
                surface.draw_image(image, rect_geometry(x, y, tile, tile, vis.size));
            }
        }
    }
}
