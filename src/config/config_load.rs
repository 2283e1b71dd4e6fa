// src/config/config_load.rs
//
// loading of config.toml

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::config_types::*;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    pub window: WindowConfig,
    pub osc: OscConfig,
    pub animation: AnimationConfig,
    pub style: StyleConfig,
    pub paths: PathConfig,
    pub demo: DemoConfig,
}

impl Config {
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        // First try to load from the executable's directory
        if let Some(exe_config) = Self::load_from_exe_dir() {
            return Ok(exe_config);
        }

        // Fallback to loading from the current working directory
        Self::load_from_working_dir()
    }

    /// Load the config, falling back to built-in defaults when no usable file is found.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "no usable config.toml, running with defaults");
                Self::default()
            }
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn load_from_exe_dir() -> Option<Self> {
        let exe_path = std::env::current_exe().ok()?;
        let exe_dir = exe_path.parent()?;
        let config_path = exe_dir.join("config.toml");

        if config_path.exists() {
            let content = fs::read_to_string(&config_path).ok()?;
            Self::from_toml_str(&content).ok()
        } else {
            None
        }
    }

    fn load_from_working_dir() -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string("config.toml")?;
        Ok(Self::from_toml_str(&content)?)
    }

    pub fn resolve_avatar_dir(&self) -> PathBuf {
        resolve_path(&self.paths.avatar_directory)
    }

    pub fn resolve_background_dir(&self) -> PathBuf {
        resolve_path(&self.paths.background_directory)
    }

    /// Milliseconds allotted to one move before any tick rate has been measured.
    pub fn fallback_time_per_move(&self) -> f64 {
        self.animation.fallback_tick_ms * self.animation.duration_perc
    }
}

// Relative paths resolve against the executable's directory when it can be found
fn resolve_path(path: &str) -> PathBuf {
    if Path::new(path).is_absolute() {
        return PathBuf::from(path);
    }

    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .map(|exe_dir| exe_dir.join(path))
        .unwrap_or_else(|| PathBuf::from(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"
        [window]
        width = 1024
        height = 768

        [osc]
        rx_port = 9100
        mtu = 8192
        target_host = "10.0.0.2"

        [animation]
        duration_perc = 0.5
        fallback_tick_ms = 100.0

        [style]
        background_colour = "#000000"

        [paths]
        avatar_directory = "/srv/avatars"
        background_directory = "bg"

        [demo]
        tick_ms = 250
        seed = 7
    "##;

    #[test]
    fn test_parse_full_config() {
        let config = Config::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.osc.rx_port, 9100);
        assert_eq!(config.osc.mtu, 8192);
        assert_eq!(config.animation.duration_perc, 0.5);
        assert_eq!(config.style.background_colour, "#000000");
        assert_eq!(config.demo.seed, 7);
        assert_eq!(config.fallback_time_per_move(), 50.0);
    }

    #[test]
    fn test_missing_section_is_an_error() {
        assert!(Config::from_toml_str("[window]\nwidth = 1\nheight = 1\n").is_err());
    }

    #[test]
    fn test_absolute_paths_are_kept() {
        let config = Config::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.resolve_avatar_dir(), PathBuf::from("/srv/avatars"));
        assert!(config.resolve_background_dir().ends_with("bg"));
    }

    #[test]
    fn test_defaults_match_shipped_file() {
        let shipped = Config::from_toml_str(include_str!("../../config.toml")).unwrap();
        let defaults = Config::default();
        assert_eq!(shipped.osc.rx_port, defaults.osc.rx_port);
        assert_eq!(shipped.style.background_colour, defaults.style.background_colour);
        assert_eq!(shipped.animation.fallback_tick_ms, defaults.animation.fallback_tick_ms);
    }
}
