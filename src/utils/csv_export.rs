use std::error::Error;
use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::Local;
use csv::Writer;
use tracing::warn;

use crate::core::proximity::ProximityResult;
use crate::core::session::CollectionEvent;
use crate::models::poi::PoiCatalog;
use crate::utils::logging::{self, FileIOType, OperationCategory};
use crate::utils::traits::RewardSink;

/// `<dir>/<prefix>_YYYYMMDD_HHMMSS.csv`, for run artifacts that should not
/// overwrite each other.
pub fn timestamped_path(dir: &Path, prefix: &str) -> PathBuf {
    dir.join(format!(
        "{}_{}.csv",
        prefix,
        Local::now().format("%Y%m%d_%H%M%S")
    ))
}

pub fn export_events(path: &Path, events: &[CollectionEvent]) -> Result<(), Box<dyn Error + Send + Sync>> {
    let _timing = logging::start_timing(
        "export_events",
        OperationCategory::FileIO {
            subcategory: FileIOType::ResultsExport,
        },
    );

    let mut writer = Writer::from_path(path)?;
    writer.write_record(["poi_id", "poi_name", "reward", "distance_m", "timestamp"])?;
    for event in events {
        writer.write_record([
            event.poi_id.as_str(),
            event.poi_name.as_str(),
            &event.reward.to_string(),
            &format!("{:.2}", event.distance_m),
            &event.timestamp.to_rfc3339(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn export_ranking(
    path: &Path,
    results: &[ProximityResult],
    catalog: &PoiCatalog,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let _timing = logging::start_timing(
        "export_ranking",
        OperationCategory::FileIO {
            subcategory: FileIOType::ResultsExport,
        },
    );

    let mut writer = Writer::from_path(path)?;
    writer.write_record(["poi_id", "name", "city", "distance_m", "collectible"])?;
    for result in results {
        let (name, city) = match catalog.get(&result.poi_id) {
            Some(poi) => (poi.name().to_string(), poi.city().unwrap_or("").to_string()),
            None => (String::new(), String::new()),
        };
        writer.write_record([
            result.poi_id.as_str(),
            &name,
            &city,
            &format!("{:.2}", result.distance_m),
            &result.collectible.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Append-as-you-go CSV log of collection events; plugs into the session as
/// a reward sink.
pub struct CsvEventLog {
    writer: Writer<File>,
}

impl CsvEventLog {
    pub fn create(path: &Path) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let mut writer = Writer::from_path(path)?;
        writer.write_record(["poi_id", "poi_name", "reward", "distance_m", "timestamp"])?;
        writer.flush()?;
        Ok(Self { writer })
    }
}

impl RewardSink for CsvEventLog {
    fn record_collection(&mut self, event: &CollectionEvent) {
        let written = self
            .writer
            .write_record([
                event.poi_id.as_str(),
                event.poi_name.as_str(),
                &event.reward.to_string(),
                &format!("{:.2}", event.distance_m),
                &event.timestamp.to_rfc3339(),
            ])
            .and_then(|_| self.writer.flush().map_err(Into::into));
        if let Err(e) = written {
            warn!(error = %e, "Failed to append collection event to CSV log");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn event(id: &str, reward: u32) -> CollectionEvent {
        CollectionEvent {
            poi_id: id.to_string(),
            poi_name: format!("POI {}", id),
            reward,
            distance_m: 12.34,
            timestamp: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn export_events_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.csv");

        export_events(&path, &[event("astana-1", 10), event("astana-2", 25)]).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("poi_id,poi_name,reward"));
        assert!(lines[1].contains("astana-1"));
        assert!(lines[2].contains("25"));
    }

    #[test]
    fn event_log_appends_on_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");

        let mut log = CsvEventLog::create(&path).unwrap();
        log.record_collection(&event("shymkent-1", 10));
        log.record_collection(&event("shymkent-2", 10));

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 3);
    }
}
