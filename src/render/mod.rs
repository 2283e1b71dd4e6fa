// src/render/mod.rs
// World rendering: the session renderer and its nannou-backed surface

pub mod grid_renderer;
pub mod nannou_surface;

pub use grid_renderer::WorldRenderer;
pub use nannou_surface::{NannouSurface, TextureStore};
