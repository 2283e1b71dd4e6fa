// src/views/mod.rs

pub mod background;

pub use background::{BackgroundManager, DEFAULT_BACKGROUND};
