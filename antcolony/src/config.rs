use anyhow::{Context, Result};
use colony_core::SimulationSettings;
use macroquad::prelude::Conf;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

// Window constants
pub const DEFAULT_WINDOW_WIDTH: f32 = 1920.0;
pub const DEFAULT_WINDOW_HEIGHT: f32 = 1080.0;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    /// Seconds of wall time per simulation tick.
    pub tick_interval: f32,
    /// Seconds to wait before restarting an exhausted simulation.
    pub reset_delay: f32,
    pub auto_reset: bool,
    pub show_pheromones: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            tick_interval: 0.05,
            reset_delay: 3.0,
            auto_reset: true,
            show_pheromones: true,
        }
    }
}

/// Configuration for the entire application, read from an optional TOML file.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub simulation: SimulationSettings,
    pub viewer: ViewerConfig,
}

impl AppConfig {
    /// Loads the configuration from a TOML file or uses defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            info!("No config file provided, using defaults");
            return Ok(Self::default());
        };

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))?;
        info!(path = %path.display(), ?config, "Loaded config");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config.sanitized())
    }

    /// CLI seed wins over the file's seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.simulation.seed = seed;
        }
        self
    }

    fn sanitized(mut self) -> Self {
        let defaults = ViewerConfig::default();
        if !(self.viewer.tick_interval > 0.0) {
            warn!(
                tick_interval = self.viewer.tick_interval,
                "tick_interval must be positive, using {}", defaults.tick_interval
            );
            self.viewer.tick_interval = defaults.tick_interval;
        }
        if !(self.viewer.reset_delay >= 0.0) {
            warn!(
                reset_delay = self.viewer.reset_delay,
                "reset_delay must not be negative, resetting immediately"
            );
            self.viewer.reset_delay = 0.0;
        }
        self
    }
}

pub fn window_conf() -> Conf {
    Conf {
        window_title: "Ant Colony Simulation".to_owned(),
        window_width: DEFAULT_WINDOW_WIDTH as i32,
        window_height: DEFAULT_WINDOW_HEIGHT as i32,
        high_dpi: true,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = AppConfig::parse("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.simulation.colony_count, 3);
        assert_eq!(config.simulation.initial_ants_per_colony, 5);
        assert!(config.viewer.auto_reset);
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = AppConfig::parse(
            r#"
            [simulation]
            seed = 42
            colony_count = 5

            [viewer]
            show_pheromones = false
            "#,
        )
        .unwrap();

        assert_eq!(config.simulation.seed, Some(42));
        assert_eq!(config.simulation.colony_count, 5);
        assert_eq!(config.simulation.initial_ants_per_colony, 5);
        assert!(!config.viewer.show_pheromones);
        assert_eq!(config.viewer.tick_interval, 0.05);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        assert!(AppConfig::parse("[simulation]\ncolony_count = \"many\"").is_err());
        assert!(AppConfig::parse("this is not toml").is_err());
    }

    #[test]
    fn test_invalid_timings_fall_back() {
        let config = AppConfig::parse(
            r#"
            [viewer]
            tick_interval = 0.0
            reset_delay = -2.0
            "#,
        )
        .unwrap();
        assert_eq!(config.viewer.tick_interval, 0.05);
        assert_eq!(config.viewer.reset_delay, 0.0);
    }

    #[test]
    fn test_cli_seed_overrides_file() {
        let config = AppConfig::parse("[simulation]\nseed = 1").unwrap();
        assert_eq!(config.clone().with_seed(Some(9)).simulation.seed, Some(9));
        assert_eq!(config.with_seed(None).simulation.seed, Some(1));
    }

    #[test]
    fn test_missing_path_is_an_error() {
        let err = AppConfig::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(format!("{err:#}").contains("/definitely/not/here.toml"));
    }
}
