use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use rotary::{Item, ItemId, Label, SettingsError, WheelSettings};
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use strum::{Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator};
use thiserror::Error;

/// Major keys in circle-of-fifths order, C at the top.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    SerializeDisplay,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
pub enum Key {
    #[strum(to_string = "C", serialize = "0")]
    C,
    #[strum(to_string = "G", serialize = "1")]
    G,
    #[strum(to_string = "D", serialize = "2")]
    D,
    #[strum(to_string = "A", serialize = "3")]
    A,
    #[strum(to_string = "E", serialize = "4")]
    E,
    #[strum(to_string = "B", serialize = "5")]
    B,
    #[strum(to_string = "F#", serialize = "fsharp", serialize = "Gb", serialize = "6")]
    FSharp,
    #[strum(to_string = "Db", serialize = "dflat", serialize = "C#", serialize = "7")]
    DFlat,
    #[strum(to_string = "Ab", serialize = "aflat", serialize = "G#", serialize = "8")]
    AFlat,
    #[strum(to_string = "Eb", serialize = "eflat", serialize = "D#", serialize = "9")]
    EFlat,
    #[strum(to_string = "Bb", serialize = "bflat", serialize = "A#", serialize = "10")]
    BFlat,
    #[strum(to_string = "F", serialize = "11")]
    F,
}

impl Key {
    pub fn item(&self) -> Item {
        Item {
            id: ItemId::new(self.to_string().to_lowercase()),
            label: Label::new(self.to_string()),
            color: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ItemConfig {
    pub key: Option<Key>,
    pub id: Option<ItemId>,
    pub label: Option<Label>,
    pub color: Option<String>,
}

impl ItemConfig {
    /// Fills whatever the entry leaves out from its key. Entries with neither
    /// a key nor an id are skipped.
    pub fn resolve(&self) -> Option<Item> {
        let base = self.key.map(|k| k.item());
        let id = self
            .id
            .clone()
            .or_else(|| base.as_ref().map(|b| b.id.clone()))?;
        let label = self
            .label
            .clone()
            .or_else(|| base.as_ref().map(|b| b.label.clone()))
            .unwrap_or_else(|| Label::new(id.to_string()));

        Some(Item {
            id,
            label,
            color: self.color.clone(),
        })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub wheel: WheelSettings,
    #[serde(default)]
    pub items: Vec<ItemConfig>,
}

impl Config {
    pub fn items(&self) -> Vec<Item> {
        if self.items.is_empty() {
            return Key::iter().map(|k| k.item()).collect();
        }
        self.items
            .iter()
            .filter_map(|cfg| {
                let item = cfg.resolve();
                if item.is_none() {
                    log::warn!("Skipping item without key or id: {:?}", cfg);
                }
                item
            })
            .collect()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid wheel settings: {0}")]
    Settings(#[from] SettingsError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "fifths", "fifths").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

fn parse(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<Config, ConfigError> {
    let s = builder
        .add_source(
            config::Environment::with_prefix("FIFTHS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let mut config: Config = s.try_deserialize()?;
    config.wheel = config.wheel.validate()?;
    Ok(config)
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;
    parse(config::Config::builder().add_source(config::File::from(config_path).required(false)))
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Falling back to default config: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
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
            log::error!("Failed to create watcher: {}", ConfigError::from(e));
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

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

    fn from_toml(toml: &str) -> Result<Config, ConfigError> {
        parse(config::Config::builder().add_source(config::File::from_str(
            toml,
            config::FileFormat::Toml,
        )))
    }

    #[test]
    fn test_key_deserialization() {
        let cases = vec![
            ("\"C\"", Key::C),
            ("\"c\"", Key::C),
            ("\"0\"", Key::C),
            ("\"F#\"", Key::FSharp),
            ("\"f#\"", Key::FSharp),
            ("\"FSharp\"", Key::FSharp),
            ("\"gb\"", Key::FSharp),
            ("\"Bb\"", Key::BFlat),
            ("\"A#\"", Key::BFlat),
            ("\"11\"", Key::F),
        ];

        for (json, expected) in cases {
            let deserialized: Key = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn test_key_serializes_as_name() {
        assert_eq!(serde_json::to_string(&Key::DFlat).unwrap(), "\"Db\"");
    }

    #[test]
    fn test_default_items_are_circle_of_fifths() {
        let items = Config::default().items();
        let labels: Vec<_> = items.iter().map(|i| i.label.to_string()).collect();
        assert_eq!(
            labels,
            ["C", "G", "D", "A", "E", "B", "F#", "Db", "Ab", "Eb", "Bb", "F"]
        );
        assert_eq!(items[6].id.as_str(), "f#");
    }

    #[test]
    fn test_item_resolution() {
        let cfg = ItemConfig {
            key: Some(Key::EFlat),
            color: Some("#ff8800".into()),
            ..Default::default()
        };
        let item = cfg.resolve().unwrap();
        assert_eq!(item.id.as_str(), "eb");
        assert_eq!(item.label.as_str(), "Eb");
        assert_eq!(item.color.as_deref(), Some("#ff8800"));

        let cfg = ItemConfig {
            id: Some(ItemId::new("practice")),
            ..Default::default()
        };
        assert_eq!(cfg.resolve().unwrap().label.as_str(), "practice");

        assert!(ItemConfig::default().resolve().is_none());
    }

    #[test]
    fn test_shipped_default_config_parses() {
        let config = from_toml(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.wheel, WheelSettings::default());
        assert_eq!(config.items(), Config::default().items());
    }

    #[test]
    fn test_custom_items_and_partial_wheel() {
        let config = from_toml(
            r#"
            [wheel]
            damping_factor = 0.8

            [[items]]
            key = "a"
            label = "A major"

            [[items]]
            id = "jam"
            "#,
        )
        .unwrap();

        assert_eq!(config.wheel.damping_factor, 0.8);
        assert_eq!(config.wheel.throttle_ms, 50);
        let items = config.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].label.as_str(), "A major");
        assert_eq!(items[1].id.as_str(), "jam");
    }

    #[test]
    fn test_invalid_wheel_settings_rejected() {
        let err = from_toml("[wheel]\ndamping_factor = 1.2\n").unwrap_err();
        assert!(matches!(err, ConfigError::Settings(SettingsError::Damping(_))));
    }
}
