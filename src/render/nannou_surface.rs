// src/render/nannou_surface.rs
// DrawSurface backed by a nannou Draw. Translates canvas space (origin
// top-left, y down) into nannou's window space (origin centre, y up) and
// keeps uploaded textures around between frames.

use nannou::image::DynamicImage;
use nannou::prelude::*;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use crate::draw::{CanvasRect, DrawSurface, ImageSource};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum TextureKey {
    Avatar(String),
    Background(String),
    GifFrame(String, usize),
}

/// Textures uploaded to the GPU, keyed by image name (and frame for GIFs).
pub struct TextureStore {
    avatar_dir: PathBuf,
    background_dir: PathBuf,
    textures: HashMap<TextureKey, wgpu::Texture>,
    failed: HashSet<TextureKey>,
}

impl TextureStore {
    pub fn new(avatar_dir: PathBuf, background_dir: PathBuf) -> Self {
        Self {
            avatar_dir,
            background_dir,
            textures: HashMap::new(),
            failed: HashSet::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    fn get_or_load(&mut self, app: &App, image: &ImageSource<'_>) -> Option<&wgpu::Texture> {
        let key = match image {
            ImageSource::Avatar(name) => TextureKey::Avatar(name.to_string()),
            ImageSource::Background(name) => TextureKey::Background(name.to_string()),
            ImageSource::GifFrame { name, index, .. } => {
                TextureKey::GifFrame(name.to_string(), *index)
            }
        };

        if self.failed.contains(&key) {
            return None;
        }

        if !self.textures.contains_key(&key) {
            let texture = match image {
                ImageSource::Avatar(name) => {
                    load_texture(app, self.avatar_dir.join(name), name)
                }
                ImageSource::Background(name) => {
                    load_texture(app, self.background_dir.join(name), name)
                }
                ImageSource::GifFrame { pixels, .. } => Some(wgpu::Texture::from_image(
                    app,
                    &DynamicImage::ImageRgba8((*pixels).clone()),
                )),
            };

            match texture {
                Some(texture) => {
                    self.textures.insert(key.clone(), texture);
                }
                None => {
                    self.failed.insert(key);
                    return None;
                }
            }
        }

        self.textures.get(&key)
    }
}

fn load_texture(app: &App, path: PathBuf, name: &str) -> Option<wgpu::Texture> {
    match wgpu::Texture::from_path(app, &path) {
        Ok(texture) => Some(texture),
        Err(e) => {
            tracing::warn!(image = name, path = %path.display(), error = %e, "failed to load image");
            None
        }
    }
}

pub struct NannouSurface<'a> {
    app: &'a App,
    draw: &'a Draw,
    window: Rect,
    clear_colour: Rgba,
    textures: &'a mut TextureStore,
}

impl<'a> NannouSurface<'a> {
    pub fn new(app: &'a App, draw: &'a Draw, window: Rect, textures: &'a mut TextureStore) -> Self {
        Self {
            app,
            draw,
            window,
            clear_colour: rgba(0.0, 0.0, 0.0, 1.0),
            textures,
        }
    }

    fn to_window(&self, point: Vec2) -> Point2 {
        pt2(self.window.left() + point.x, self.window.top() - point.y)
    }
}

impl DrawSurface for NannouSurface<'_> {
    fn clear(&mut self) {
        self.draw.background().color(self.clear_colour);
    }

    fn fill_rect(&mut self, rect: CanvasRect, colour: Rgba) {
        let centre = self.to_window(rect.centre());
        self.draw
            .rect()
            .xy(centre)
            .w_h(rect.w, rect.h)
            .color(colour);
    }

    fn fill_circle(&mut self, centre: Vec2, radius: f32, colour: Rgba) {
        let centre = self.to_window(centre);
        self.draw.ellipse().xy(centre).radius(radius).color(colour);
    }

    fn fill_triangle(&mut self, points: [Vec2; 3], colour: Rgba) {
        let [a, b, c] = points.map(|p| self.to_window(p));
        self.draw.tri().points(a, b, c).color(colour);
    }

    fn draw_image(&mut self, image: ImageSource<'_>, rect: CanvasRect) {
        let centre = self.to_window(rect.centre());
        if let Some(texture) = self.textures.get_or_load(self.app, &image) {
            self.draw.texture(texture).xy(centre).w_h(rect.w, rect.h);
        }
    }
}
