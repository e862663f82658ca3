use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::list::SortMode;

const APP_NAME: &str = "ebrp-tracker";
const CONFIG_FILENAME: &str = "config.toml";
const LOCAL_CONFIG: &str = "ebrp";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeSettings {
    /// `#RRGGBB` color of visited parks
    pub visited: String,
    /// `#RRGGBB` color of parks not yet visited
    pub unvisited: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// GeoJSON file with park boundaries; optional at runtime
    pub boundaries_path: PathBuf,
    /// JSON park list replacing the built-in catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
    /// Key/value file holding saved progress
    pub store_path: PathBuf,
    /// Where exports are written
    pub export_dir: PathBuf,
    /// Log file used while the terminal UI is running
    pub log_path: PathBuf,
    /// Initial list order
    pub sort: SortMode,
    pub theme: ThemeSettings,
}

impl Default for Settings {
    fn default() -> Self {
        let data_dir = data_dir();
        Self {
            boundaries_path: PathBuf::from("east_bay_parks_boundaries.geojson"),
            catalog_path: None,
            store_path: data_dir.join("storage.json"),
            export_dir: PathBuf::from("."),
            log_path: data_dir.join("ebrp-tracker.log"),
            sort: SortMode::Alphabetical,
            theme: ThemeSettings {
                visited: "#FFC107".to_string(),
                unvisited: "#4CAF50".to_string(),
            },
        }
    }
}

impl Settings {
    /// Layer defaults, the user config file, a local `ebrp.toml`, an
    /// explicit config file and `EBRP_*` environment variables
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let defaults = Settings::default();

        let mut builder = Config::builder()
            .set_default("boundaries_path", path_str(&defaults.boundaries_path))?
            .set_default("store_path", path_str(&defaults.store_path))?
            .set_default("export_dir", path_str(&defaults.export_dir))?
            .set_default("log_path", path_str(&defaults.log_path))?
            .set_default("sort", "alphabetical")?
            .set_default("theme.visited", defaults.theme.visited.clone())?
            .set_default("theme.unvisited", defaults.theme.unvisited.clone())?;

        if let Some(user_config) = user_config_path() {
            builder = builder.add_source(File::from(user_config).required(false));
        }
        builder = builder.add_source(File::with_name(LOCAL_CONFIG).required(false));
        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix("EBRP")
                .prefix_separator("_")
                .separator("__"),
        );

        builder.build()?.try_deserialize()
    }

    /// Effective settings as TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// `<config_dir>/ebrp-tracker/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILENAME))
}

/// `<data_dir>/ebrp-tracker`, or the working directory when the platform
/// has no data directory
fn data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
