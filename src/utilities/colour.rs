// src/utilities/colour.rs
//
// Hex colour parsing and image name classification

use nannou::prelude::*;
use regex::Regex;
use std::sync::OnceLock;

fn hex_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^#?([a-f\d]{2})([a-f\d]{2})([a-f\d]{2})$").expect("hex colour pattern")
    })
}

fn gif_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^.+\.gif$").expect("gif name pattern"))
}

/// Converts `#rrggbb` (leading `#` optional) plus an opacity into an RGBA colour.
pub fn hex_to_rgba(hex: &str, opacity: f32) -> Option<Rgba> {
    let caps = hex_pattern().captures(hex.trim())?;
    let channel = |i: usize| -> Option<f32> {
        let value = u8::from_str_radix(caps.get(i)?.as_str(), 16).ok()?;
        Some(value as f32 / 255.0)
    };

    Some(rgba(
        channel(1)?,
        channel(2)?,
        channel(3)?,
        opacity.clamp(0.0, 1.0),
    ))
}

/// True for image names that should be decoded frame by frame.
pub fn is_gif(name: &str) -> bool {
    gif_pattern().is_match(name)
}
