//! Configuration loaded from environment variables (and `.env`).

use crate::map::{DEFAULT_ZOOM, MapSettings, OSM_ATTRIBUTION, OSM_TILE_URL};
use crate::types::Coords;
use std::env;
use std::path::PathBuf;

const DEFAULT_STORE: &str = "mapty.sqlite3";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// SQLite file holding the workout log
    pub store_path: PathBuf,
    /// Position reported by geolocation; `None` means unavailable
    pub home: Option<Coords>,
    pub map: MapSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE),
            home: None,
            map: MapSettings::default(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// - `MAPTY_STORE`: path of the SQLite store (default `mapty.sqlite3`)
    /// - `MAPTY_HOME`: `LAT,LNG` used as the current position
    /// - `MAPTY_ZOOM`: map zoom level (default 13)
    /// - `MAPTY_TILE_URL`: tile URL template (default OpenStreetMap)
    /// - `MAPTY_TILE_ATTRIBUTION`: attribution shown with the tiles (default OpenStreetMap)
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let store_path = lookup("MAPTY_STORE")
            .map_or_else(|| PathBuf::from(DEFAULT_STORE), PathBuf::from);

        let home = match lookup("MAPTY_HOME") {
            Some(v) if !v.trim().is_empty() => Some(
                v.parse::<Coords>()
                    .map_err(|reason| ConfigError::Invalid("MAPTY_HOME", reason))?,
            ),
            _ => None,
        };

        let zoom = match lookup("MAPTY_ZOOM") {
            Some(v) => v
                .trim()
                .parse::<u8>()
                .ok()
                .filter(|z| *z <= 19)
                .ok_or_else(|| ConfigError::Invalid("MAPTY_ZOOM", format!("{v:?} is not 0..=19")))?,
            None => DEFAULT_ZOOM,
        };

        let tile_url = lookup("MAPTY_TILE_URL").unwrap_or_else(|| OSM_TILE_URL.to_string());
        let attribution =
            lookup("MAPTY_TILE_ATTRIBUTION").unwrap_or_else(|| OSM_ATTRIBUTION.to_string());

        Ok(Self {
            store_path,
            home,
            map: MapSettings {
                zoom,
                tile_url,
                attribution,
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
