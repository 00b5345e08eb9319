use crate::events::AppEvent;
use async_channel::Sender;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use spinpie::{ChartConfig, HexColor, SliceLabel};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SliceConfig {
    pub label: SliceLabel,
    pub value: f64,
    pub color: HexColor,
}

impl SliceConfig {
    pub fn new(label: &str, value: f64, color: HexColor) -> Self {
        Self {
            label: SliceLabel::from(label),
            value,
            color,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub chart: ChartConfig,
    #[serde(default)]
    pub slices: Vec<SliceConfig>,
}

impl Config {
    /// Four-meal sample shown when no configuration file exists yet.
    pub fn demo() -> Self {
        Self {
            chart: ChartConfig::default(),
            slices: vec![
                SliceConfig::new("Breakfast", 15.0, HexColor::new(0xFE, 0x6D, 0xA8)),
                SliceConfig::new("Lunch", 25.0, HexColor::new(0x56, 0xB7, 0xF1)),
                SliceConfig::new("Dinner", 35.0, HexColor::new(0xCD, 0xA6, 0x7F)),
                SliceConfig::new("Snack", 25.0, HexColor::new(0xFE, 0xD7, 0x0E)),
            ],
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "spinpie", "spinpie").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix("SPINPIE")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(s.try_deserialize()?)
}

/// Loads `path`, falling back to [`Config::demo`] when the file is missing
/// or unreadable.
pub fn load_or_demo(path: &Path) -> Config {
    if !path.exists() {
        log::info!("No config at {}, showing demo data", path.display());
        return Config::demo();
    }

    match load_config(path) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load {}: {}", path.display(), e);
            Config::demo()
        }
    }
}

pub fn write_default_config(path: &Path) -> std::io::Result<PathBuf> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(path, DEFAULT_CONFIG)?;
    }
    Ok(path.to_path_buf())
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub async fn run_async_watcher(config_path: PathBuf, tx: Sender<AppEvent>) {
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }
    log::debug!("Watching {}", config_dir.display());

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spinpie::OpenDirection;

    fn parse(toml: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_bundled_config_parses() {
        let config = parse(DEFAULT_CONFIG);
        assert_eq!(config.slices.len(), 4);
        assert_eq!(config.slices[0].label.to_string(), "Breakfast");
        assert_eq!(config.slices[2].value, 35.0);
        assert_eq!(config.slices[3].color, HexColor::new(0xFE, 0xD7, 0x0E));
        assert_eq!(config.chart.open_direction, OpenDirection::Clockwise);
        assert_eq!(config.chart.reveal_duration_ms, 600);
    }

    #[test]
    fn test_partial_chart_section_keeps_defaults() {
        let config = parse(
            r##"
            [chart]
            open_direction = "ccw"
            auto_center_in_slice = false
            "##,
        );
        assert!(config.slices.is_empty());
        assert_eq!(config.chart.open_direction, OpenDirection::CounterClockwise);
        assert!(!config.chart.auto_center_in_slice);
        assert_eq!(config.chart.indicator_angle, 90);
        assert_eq!(config.chart.fling_velocity_downscale, 4);
    }

    #[test]
    fn test_bad_slice_color_is_rejected() {
        let result = config::Config::builder()
            .add_source(config::File::from_str(
                "[[slices]]\nlabel = \"x\"\nvalue = 1.0\ncolor = \"not-a-color\"",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize::<Config>();
        assert!(result.is_err());
    }

    #[test]
    fn test_slice_config_json() {
        let slice: SliceConfig =
            serde_json::from_str(r##"{"label":"Tea","value":2.5,"color":"#00FF80"}"##).unwrap();
        assert_eq!(slice.label.to_string(), "Tea");
        assert_eq!(slice.color, HexColor::new(0x00, 0xFF, 0x80));
    }

    #[test]
    fn test_load_missing_file_gives_demo() {
        let path = std::env::temp_dir().join("spinpie-test-does-not-exist/config.toml");
        let config = load_or_demo(&path);
        assert_eq!(config.slices.len(), Config::demo().slices.len());
    }
}
