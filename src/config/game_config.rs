use serde::{Deserialize, Serialize};

use crate::config::constants::{
    DEFAULT_COLLECTION_RADIUS_M, DEFAULT_NEAREST_LIMIT, DEFAULT_REWARD_COINS,
    MIN_SAMPLE_DISTANCE_M,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub collection_radius_m: f64,   // Maximum distance at which a POI may be collected
    pub nearest_limit: usize,       // How many ranked entries `nearest` returns
    pub default_reward: u32,        // Coins credited when a POI carries no reward value
    pub min_sample_distance_m: f64, // Samples closer than this to the last one are skipped
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            collection_radius_m: DEFAULT_COLLECTION_RADIUS_M,
            nearest_limit: DEFAULT_NEAREST_LIMIT,
            default_reward: DEFAULT_REWARD_COINS,
            min_sample_distance_m: MIN_SAMPLE_DISTANCE_M,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_constants() {
        let config = GameConfig::default();
        assert_eq!(config.collection_radius_m, 50.0);
        assert_eq!(config.nearest_limit, 10);
        assert_eq!(config.default_reward, 10);
        assert_eq!(config.min_sample_distance_m, 10.0);
    }
}
