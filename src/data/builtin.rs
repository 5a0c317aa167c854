use lazy_static::lazy_static;

use crate::config::constants::DEFAULT_REWARD_COINS;
use crate::data::catalog_loader::{build_catalog, CatalogFile};
use crate::models::poi::PoiCatalog;

lazy_static! {
    static ref LANDMARKS: PoiCatalog = {
        let raw = include_str!("../../assets/kazakhstan_landmarks.json");
        let catalog_file: CatalogFile =
            serde_json::from_str(raw).expect("Failed to parse embedded landmark catalog");
        build_catalog(catalog_file.pois, DEFAULT_REWARD_COINS)
            .expect("Invalid embedded landmark catalog")
    };
}

/// A fresh copy of the built-in landmark catalog (Astana, Almaty and
/// Shymkent), with every collected flag cleared.
pub fn landmark_catalog() -> PoiCatalog {
    LANDMARKS.clone()
}
