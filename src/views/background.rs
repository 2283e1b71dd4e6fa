// src/views/background.rs
//
// Background of the grid area: a flat colour or a stretched image

use nannou::prelude::*;

use crate::draw::{CanvasRect, DrawSurface, ImageSource};
use crate::models::GridModel;
use crate::utilities::hex_to_rgba;

pub const DEFAULT_BACKGROUND: &str = "#C2C2C2";

#[derive(Debug, Clone)]
pub struct BackgroundManager {
    colour: Rgba,
    image: Option<String>,
}

impl Default for BackgroundManager {
    fn default() -> Self {
        Self {
            colour: default_colour(),
            image: None,
        }
    }
}

fn default_colour() -> Rgba {
    rgba(194.0 / 255.0, 194.0 / 255.0, 194.0 / 255.0, 1.0)
}

impl BackgroundManager {
    pub fn new(colour_hex: &str) -> Self {
        let mut background = Self::default();
        background.set_colour(colour_hex);
        background
    }

    /// Keeps the previous colour when `hex` does not parse.
    pub fn set_colour(&mut self, hex: &str) -> bool {
        match hex_to_rgba(hex, 1.0) {
            Some(colour) => {
                self.colour = colour;
                true
            }
            None => {
                tracing::warn!(colour = hex, "ignoring invalid background colour");
                false
            }
        }
    }

    /// An empty name clears the image.
    pub fn set_image(&mut self, name: Option<&str>) {
        self.image = name.filter(|n| !n.is_empty()).map(str::to_string);
    }

    pub fn get_current_color(&self) -> Rgba {
        self.colour
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn draw<S: DrawSurface>(&self, surface: &mut S, grid: &GridModel) {
        surface.clear();

        let extent = grid.extent();
        let area = CanvasRect::new(0.0, 0.0, extent.x, extent.y);
        match &self.image {
            Some(name) => surface.draw_image(ImageSource::Background(name), area),
            None => surface.fill_rect(area, self.colour),
        }
    }
}
