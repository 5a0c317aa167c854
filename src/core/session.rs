use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::game_config::GameConfig;
use crate::core::proximity::{self, CollectOutcome, ProximityResult};
use crate::models::geo::GeoPoint;
use crate::models::poi::PoiCatalog;
use crate::utils::logging::{self, FileIOType, OperationCategory};
use crate::utils::traits::RewardSink;

/// One reading from the (external) location provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationSample {
    pub point: GeoPoint,
    pub accuracy_m: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

impl LocationSample {
    pub fn new(point: GeoPoint, timestamp: DateTime<Utc>) -> Self {
        Self {
            point,
            accuracy_m: None,
            timestamp,
        }
    }

    pub fn with_accuracy(point: GeoPoint, accuracy_m: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            point,
            accuracy_m: Some(accuracy_m),
            timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionEvent {
    pub poi_id: String,
    pub poi_name: String,
    pub reward: u32,
    pub distance_m: f64,
    pub timestamp: DateTime<Utc>,
}

/// Stateful owner of a catalog and a coin balance.
///
/// Feeds location samples through the proximity engine and applies the
/// transitions the engine authorizes. `&mut self` on `handle_sample`
/// serializes collection against catalog mutation; the one-way collected
/// flag means racing or replayed samples observe `AlreadyCollected` and
/// never credit twice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionSession {
    catalog: PoiCatalog,
    config: GameConfig,
    coins: u64,
    events: Vec<CollectionEvent>,
    last_processed: Option<GeoPoint>,
}

impl CollectionSession {
    pub fn new(catalog: PoiCatalog, config: GameConfig) -> Self {
        Self {
            catalog,
            config,
            coins: 0,
            events: Vec::new(),
            last_processed: None,
        }
    }

    pub fn catalog(&self) -> &PoiCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn coins(&self) -> u64 {
        self.coins
    }

    pub fn events(&self) -> &[CollectionEvent] {
        &self.events
    }

    pub fn last_processed(&self) -> Option<&GeoPoint> {
        self.last_processed.as_ref()
    }

    /// Processes one location sample and returns the collections it caused.
    ///
    /// Samples that moved less than `min_sample_distance_m` since the last
    /// processed one are skipped (the provider delivers at its own cadence;
    /// a stationary user does not need re-ranking). The first sample is
    /// always processed.
    pub fn handle_sample(&mut self, sample: &LocationSample) -> Vec<CollectionEvent> {
        let _timing = logging::start_timing("handle_sample", OperationCategory::Collection);

        if let Some(accuracy) = sample.accuracy_m {
            if accuracy > self.config.collection_radius_m {
                debug!(
                    accuracy_m = accuracy,
                    "sample accuracy exceeds the collection radius"
                );
            }
        }

        if let Some(last) = &self.last_processed {
            let moved = last.distance_to(&sample.point);
            if moved < self.config.min_sample_distance_m {
                debug!(moved_m = moved, "sample below movement gate, skipping");
                return Vec::new();
            }
        }
        self.last_processed = Some(sample.point);

        // Authorize against an immutable catalog first, then apply the
        // transitions. mark_collected returns true exactly once per POI, so
        // a duplicate in `authorized` could never credit twice.
        let authorized: Vec<(String, String, u32, f64)> = self
            .catalog
            .iter()
            .filter_map(|poi| {
                match proximity::attempt_collect(poi, &sample.point, self.config.collection_radius_m)
                {
                    CollectOutcome::Collected { reward } => Some((
                        poi.id().to_string(),
                        poi.name().to_string(),
                        reward,
                        sample.point.distance_to(poi.location()),
                    )),
                    CollectOutcome::TooFar { .. } | CollectOutcome::AlreadyCollected => None,
                }
            })
            .collect();

        let mut new_events = Vec::new();
        for (id, name, reward, distance_m) in authorized {
            if !self.catalog.mark_collected(&id) {
                continue;
            }
            info!(poi = %name, reward, distance_m, "collected POI");
            self.coins += u64::from(reward);
            let event = CollectionEvent {
                poi_id: id,
                poi_name: name,
                reward,
                distance_m,
                timestamp: sample.timestamp,
            };
            self.events.push(event.clone());
            new_events.push(event);
        }

        new_events
    }

    /// Like `handle_sample`, but forwards every new collection to an
    /// external reward sink.
    pub fn handle_sample_with_sink(
        &mut self,
        sample: &LocationSample,
        sink: &mut dyn RewardSink,
    ) -> Vec<CollectionEvent> {
        let events = self.handle_sample(sample);
        for event in &events {
            sink.record_collection(event);
        }
        events
    }

    /// Ranked list of the closest POIs to the last processed location,
    /// truncated to the configured limit. Empty until a sample has been
    /// processed.
    pub fn nearest(&self) -> Vec<ProximityResult> {
        match &self.last_processed {
            Some(point) => {
                let mut results = proximity::rank_proximity(
                    point,
                    self.catalog.pois(),
                    self.config.collection_radius_m,
                );
                results.truncate(self.config.nearest_limit);
                results
            }
            None => Vec::new(),
        }
    }

    pub fn save_checkpoint(&self, path: &Path) -> Result<()> {
        let _timing = logging::start_timing(
            "save_checkpoint",
            OperationCategory::FileIO {
                subcategory: FileIOType::CheckpointSave,
            },
        );

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create checkpoint dir {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write checkpoint {}", path.display()))?;
        Ok(())
    }

    pub fn load_checkpoint(path: &Path) -> Result<Option<Self>> {
        let _timing = logging::start_timing(
            "load_checkpoint",
            OperationCategory::FileIO {
                subcategory: FileIOType::CheckpointLoad,
            },
        );

        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read checkpoint {}", path.display()))?;
        let session: Self = serde_json::from_str(&content)
            .with_context(|| format!("Malformed checkpoint {}", path.display()))?;
        Ok(Some(session))
    }
}
