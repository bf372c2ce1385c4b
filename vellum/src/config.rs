use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{asset, ResultExt};

/// Look-and-feel settings shared by every dialog.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterfaceConfig {
    /// Use the dark ("evil") variant of the system button atlas.
    pub evil_interface: bool,
}

impl InterfaceConfig {
    const FILENAME: &'static str = "interface.yaml";

    pub fn create_default_config_if_missing() -> asset::Result<()> {
        let path = asset::get_path("config", Self::FILENAME);
        if path.exists() {
            return Ok(());
        }
        log::info!("Creating default file {}", path.to_string_lossy());
        asset::create_dir("config")?;
        asset::save_yaml_file("config", Self::FILENAME, &InterfaceConfig::default())
    }
    pub fn load_config() -> asset::Result<Self> {
        asset::load_yaml_file_or_default("config", Self::FILENAME)
    }
    /// Like [`InterfaceConfig::load_config`], but a broken file is reported and
    /// replaced by the defaults instead of stopping the game.
    pub fn load_or_default() -> Self {
        Self::read_or_default(&asset::get_path("config", Self::FILENAME))
    }

    fn read_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        asset::read_yaml(path).unwrap_nonfatal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("interface.yaml");
        std::fs::write(&path, "{}\n").unwrap();
        let config: InterfaceConfig = asset::read_yaml(&path).unwrap();
        assert_eq!(config, InterfaceConfig::default());
    }

    #[test]
    fn evil_interface_is_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("interface.yaml");
        let config = InterfaceConfig {
            evil_interface: true,
        };
        asset::write_yaml(&path, &config).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("evil_interface: true"));
        assert_eq!(InterfaceConfig::read_or_default(&path), config);
    }

    #[test]
    fn broken_or_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("interface.yaml");
        assert_eq!(InterfaceConfig::read_or_default(&path), InterfaceConfig::default());

        std::fs::write(&path, "evil_interface: [unterminated").unwrap();
        assert_eq!(InterfaceConfig::read_or_default(&path), InterfaceConfig::default());
    }
}
