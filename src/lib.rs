// Module declarations for the geoquest proximity engine

// Core engine modules
pub mod core {
    pub mod proximity;
    pub mod session;
}

// Configuration modules
pub mod config {
    pub mod constants;
    pub mod game_config;
}

// Model definitions
pub mod models {
    pub mod geo;
    pub mod poi;
}

// Data loaders and the embedded default catalog
pub mod data {
    pub mod builtin;
    pub mod catalog_loader;
}

// Catalog analysis
pub mod analysis {
    pub mod catalog_analysis;
}

// Utility functions
pub mod utils {
    pub mod csv_export;
    pub mod logging;
    pub mod traits;
}

// CLI interface
pub mod cli {
    pub mod cli;
}

// Re-export commonly used types
pub use crate::config::game_config::GameConfig;
pub use crate::core::proximity::{self, CollectOutcome, ProximityResult};
pub use crate::core::session::{CollectionEvent, CollectionSession, LocationSample};
pub use crate::models::geo::{CoordinateError, GeoPoint};
pub use crate::models::poi::{PoiCatalog, PointOfInterest};
