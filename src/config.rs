use std::path::PathBuf;

use crate::storage::DEFAULT_KEY;
use crate::tracker::session::DEFAULT_ZOOM_LEVEL;
use crate::types::workout::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    File,
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub storage: StorageBackend,
    pub data_dir: PathBuf,
    pub storage_key: String,
    pub zoom_level: u8,
    /// Stands in for browser geolocation; `None` means the position is unknown.
    pub home: Option<Coordinate>,
}

impl Config {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let storage = match std::env::var("STORAGE_BACKEND").as_deref() {
            Ok("memory") => StorageBackend::Memory,
            _ => StorageBackend::File,
        };

        let data_dir = std::env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        let storage_key = std::env::var("STORAGE_KEY").unwrap_or_else(|_| DEFAULT_KEY.to_string());

        let zoom_level = std::env::var("ZOOM_LEVEL")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_ZOOM_LEVEL);

        let lat = std::env::var("HOME_LAT").ok().and_then(|s| s.parse().ok());
        let lng = std::env::var("HOME_LNG").ok().and_then(|s| s.parse().ok());
        let home = match (lat, lng) {
            (Some(lat), Some(lng)) => Some(Coordinate::new(lat, lng)),
            _ => None,
        };

        Self {
            port,
            storage,
            data_dir,
            storage_key,
            zoom_level,
            home,
        }
    }
}
