// src/config/config_types.rs
//
// Config types for the app

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OscConfig {
    pub rx_port: u16,
    pub mtu: usize,
    pub target_host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnimationConfig {
    pub duration_perc: f64,    // Share of the tick interval spent on one move (0.0-1.0]
    pub fallback_tick_ms: f64, // Tick interval assumed until one has been measured
}

#[derive(Debug, Deserialize, Clone)]
pub struct StyleConfig {
    pub background_colour: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PathConfig {
    pub avatar_directory: String,
    pub background_directory: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DemoConfig {
    pub tick_ms: u64,
    pub seed: u64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
        }
    }
}

impl Default for OscConfig {
    fn default() -> Self {
        Self {
            rx_port: 9010,
            mtu: 65507,
            target_host: "127.0.0.1".to_string(),
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_perc: 1.0,
            fallback_tick_ms: 200.0,
        }
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_colour: "#C2C2C2".to_string(),
        }
    }
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            avatar_directory: "static/avatars".to_string(),
            background_directory: "static/backgrounds".to_string(),
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            tick_ms: 200,
            seed: 1,
        }
    }
}
