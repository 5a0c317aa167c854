use std::fs::File;
use std::io::{BufReader, Read};

use csv::ReaderBuilder;
use serde::Deserialize;
use tracing::warn;

use crate::config::constants::{
    KAZAKHSTAN_MAX_LAT, KAZAKHSTAN_MAX_LON, KAZAKHSTAN_MIN_LAT, KAZAKHSTAN_MIN_LON,
};
use crate::models::geo::GeoPoint;
use crate::models::poi::{PoiCatalog, PointOfInterest};
use crate::utils::logging::{self, FileIOType, OperationCategory};

#[derive(Debug)]
pub enum CatalogLoadError {
    IoError(std::io::Error),
    JsonError(serde_json::Error),
    CsvError(csv::Error),
    MissingField(String),
    InvalidCoordinate(String),
    InvalidReward(String),
    DuplicateId(String),
}

impl From<std::io::Error> for CatalogLoadError {
    fn from(err: std::io::Error) -> Self {
        CatalogLoadError::IoError(err)
    }
}

impl From<serde_json::Error> for CatalogLoadError {
    fn from(err: serde_json::Error) -> Self {
        CatalogLoadError::JsonError(err)
    }
}

impl From<csv::Error> for CatalogLoadError {
    fn from(err: csv::Error) -> Self {
        CatalogLoadError::CsvError(err)
    }
}

impl std::fmt::Display for CatalogLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogLoadError::IoError(e) => write!(f, "IO error: {}", e),
            CatalogLoadError::JsonError(e) => write!(f, "JSON error: {}", e),
            CatalogLoadError::CsvError(e) => write!(f, "CSV error: {}", e),
            CatalogLoadError::MissingField(s) => write!(f, "Missing field: {}", s),
            CatalogLoadError::InvalidCoordinate(s) => write!(f, "Invalid coordinate: {}", s),
            CatalogLoadError::InvalidReward(s) => write!(f, "Invalid reward: {}", s),
            CatalogLoadError::DuplicateId(s) => write!(f, "Duplicate POI id: {}", s),
        }
    }
}

impl std::error::Error for CatalogLoadError {}

#[derive(Debug, Deserialize)]
pub struct PoiRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub reward: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    pub pois: Vec<PoiRecord>,
}

/// Validates raw records into a catalog. Coordinates must be in range; ids
/// must be unique; entries outside the Kazakhstan region are accepted with
/// a warning since the shipped catalogs only cover it.
pub fn build_catalog(
    records: Vec<PoiRecord>,
    default_reward: u32,
) -> Result<PoiCatalog, CatalogLoadError> {
    let mut catalog = PoiCatalog::new();

    for record in records {
        let location = GeoPoint::new(record.lat, record.lon).map_err(|e| {
            CatalogLoadError::InvalidCoordinate(format!("{} (POI {})", e, record.id))
        })?;

        if record.lat < KAZAKHSTAN_MIN_LAT
            || record.lat > KAZAKHSTAN_MAX_LAT
            || record.lon < KAZAKHSTAN_MIN_LON
            || record.lon > KAZAKHSTAN_MAX_LON
        {
            warn!(
                poi = %record.id,
                lat = record.lat,
                lon = record.lon,
                "POI outside the Kazakhstan region bounds"
            );
        }

        let reward = record.reward.unwrap_or(default_reward);
        let poi = PointOfInterest::new(record.id.clone(), record.name, record.city, location, reward);
        if !catalog.try_add(poi) {
            return Err(CatalogLoadError::DuplicateId(record.id));
        }
    }

    Ok(catalog)
}

pub fn load_catalog_json(path: &str, default_reward: u32) -> Result<PoiCatalog, CatalogLoadError> {
    let _timing = logging::start_timing(
        "load_catalog_json",
        OperationCategory::FileIO {
            subcategory: FileIOType::CatalogLoad,
        },
    );

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let catalog_file: CatalogFile = serde_json::from_reader(reader)?;

    build_catalog(catalog_file.pois, default_reward)
}

/// Loads a catalog from CSV with the columns
/// `id,name,city,lat,lon[,reward]`. An empty city or reward cell falls back
/// to none/default.
pub fn load_catalog_csv(path: &str, default_reward: u32) -> Result<PoiCatalog, CatalogLoadError> {
    let _timing = logging::start_timing(
        "load_catalog_csv",
        OperationCategory::FileIO {
            subcategory: FileIOType::CatalogLoad,
        },
    );

    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(contents.as_bytes());

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;

        let id = record
            .get(0)
            .ok_or_else(|| CatalogLoadError::MissingField("id".to_string()))?
            .to_string();
        let name = record
            .get(1)
            .ok_or_else(|| CatalogLoadError::MissingField("name".to_string()))?
            .to_string();
        let city = match record.get(2) {
            Some("") | None => None,
            Some(c) => Some(c.to_string()),
        };
        let lat: f64 = record
            .get(3)
            .ok_or_else(|| CatalogLoadError::MissingField("lat".to_string()))?
            .parse()
            .map_err(|_| {
                CatalogLoadError::InvalidCoordinate(format!("Invalid latitude format (POI {})", id))
            })?;
        let lon: f64 = record
            .get(4)
            .ok_or_else(|| CatalogLoadError::MissingField("lon".to_string()))?
            .parse()
            .map_err(|_| {
                CatalogLoadError::InvalidCoordinate(format!("Invalid longitude format (POI {})", id))
            })?;
        let reward = match record.get(5) {
            Some("") | None => None,
            Some(r) => Some(r.parse().map_err(|_| {
                CatalogLoadError::InvalidReward(format!("Invalid reward format (POI {})", id))
            })?),
        };

        records.push(PoiRecord {
            id,
            name,
            city,
            lat,
            lon,
            reward,
        });
    }

    build_catalog(records, default_reward)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str, extension: &str) -> (tempfile::TempDir, String) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(format!("catalog.{}", extension));
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        (dir, path.to_string_lossy().into_owned())
    }

    #[test]
    fn loads_json_catalog() {
        let json = r#"{
            "pois": [
                { "id": "astana-1", "name": "Baiterek Tower", "city": "Astana", "lat": 51.1283, "lon": 71.4305 },
                { "id": "astana-2", "name": "Hazrat Sultan Mosque", "city": "Astana", "lat": 51.125636, "lon": 71.471892, "reward": 25 }
            ]
        }"#;
        let (_dir, path) = write_temp(json, "json");

        let catalog = load_catalog_json(&path, 10).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("astana-1").unwrap().reward(), 10);
        assert_eq!(catalog.get("astana-2").unwrap().reward(), 25);
        assert_eq!(catalog.get("astana-1").unwrap().city(), Some("Astana"));
    }

    #[test]
    fn loads_csv_catalog() {
        let csv = "id,name,city,lat,lon,reward\n\
                   almaty-1,Medeu Ice Rink,Almaty,43.157500,77.058611,\n\
                   almaty-2,Kok-Tobe Hill,,43.233060,76.976110,50\n";
        let (_dir, path) = write_temp(csv, "csv");

        let catalog = load_catalog_csv(&path, 10).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("almaty-1").unwrap().reward(), 10);
        assert_eq!(catalog.get("almaty-1").unwrap().city(), Some("Almaty"));
        assert_eq!(catalog.get("almaty-2").unwrap().reward(), 50);
        assert_eq!(catalog.get("almaty-2").unwrap().city(), None);
    }

    #[test]
    fn rejects_out_of_range_coordinate() {
        let json = r#"{
            "pois": [ { "id": "bad", "name": "Nowhere", "lat": 95.0, "lon": 71.0 } ]
        }"#;
        let (_dir, path) = write_temp(json, "json");

        match load_catalog_json(&path, 10) {
            Err(CatalogLoadError::InvalidCoordinate(msg)) => assert!(msg.contains("bad")),
            other => panic!("expected InvalidCoordinate, got {:?}", other.err()),
        }
    }

    #[test]
    fn rejects_duplicate_ids() {
        let json = r#"{
            "pois": [
                { "id": "dup", "name": "First", "lat": 51.0, "lon": 71.0 },
                { "id": "dup", "name": "Second", "lat": 51.1, "lon": 71.1 }
            ]
        }"#;
        let (_dir, path) = write_temp(json, "json");

        match load_catalog_json(&path, 10) {
            Err(CatalogLoadError::DuplicateId(id)) => assert_eq!(id, "dup"),
            other => panic!("expected DuplicateId, got {:?}", other.err()),
        }
    }

    #[test]
    fn rejects_short_csv_row() {
        let csv = "id,name,city,lat,lon\nonly-id,Name\n";
        let (_dir, path) = write_temp(csv, "csv");

        match load_catalog_csv(&path, 10) {
            Err(CatalogLoadError::MissingField(field)) => assert_eq!(field, "lat"),
            other => panic!("expected MissingField, got {:?}", other.err()),
        }
    }

    #[test]
    fn rejects_unparseable_latitude() {
        let csv = "id,name,city,lat,lon\nx,Name,Astana,not-a-number,71.0\n";
        let (_dir, path) = write_temp(csv, "csv");

        assert!(matches!(
            load_catalog_csv(&path, 10),
            Err(CatalogLoadError::InvalidCoordinate(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            load_catalog_json("/nonexistent/catalog.json", 10),
            Err(CatalogLoadError::IoError(_))
        ));
    }
}
