use std::error::Error;
use std::fs;
use std::path::Path;

use chrono::Utc;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use geoquest::cli::cli::Args;
use geoquest::config::constants::EARTH_RADIUS_M;
use geoquest::config::game_config::GameConfig;
use geoquest::core::proximity;
use geoquest::core::session::{CollectionSession, LocationSample};
use geoquest::data::{builtin, catalog_loader};
use geoquest::models::geo::{CoordinateError, GeoPoint};
use geoquest::models::poi::PoiCatalog;
use geoquest::utils::csv_export::{self, CsvEventLog};
use geoquest::utils::logging;

fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    // Parse command line arguments
    let args = Args::parse();

    logging::init_logging(args.enable_timing());

    println!("GeoQuest POI Collector");
    println!(
        "Collection radius: {}m, nearest limit: {}",
        args.radius(),
        args.limit()
    );

    let mut config = GameConfig::default();
    config.collection_radius_m = args.radius();
    config.nearest_limit = args.limit();

    let catalog = load_catalog(&args, &config)?;
    println!("Loaded catalog: {} POIs", catalog.len());

    if args.walk() {
        run_walk(catalog, config, &args)?;
    } else {
        match (args.lat(), args.lon()) {
            (Some(lat), Some(lon)) => run_ranking(catalog, &config, lat, lon, &args)?,
            _ => {
                eprintln!("Nothing to do: pass --lat/--lon for a ranking, or --walk for a simulation");
            }
        }
    }

    logging::print_timing_report();

    Ok(())
}

fn load_catalog(
    args: &Args,
    config: &GameConfig,
) -> Result<PoiCatalog, Box<dyn Error + Send + Sync>> {
    let catalog = match args.catalog() {
        Some(path) if path.ends_with(".csv") => {
            catalog_loader::load_catalog_csv(path, config.default_reward)?
        }
        Some(path) => catalog_loader::load_catalog_json(path, config.default_reward)?,
        None => builtin::landmark_catalog(),
    };
    Ok(catalog)
}

fn run_ranking(
    catalog: PoiCatalog,
    config: &GameConfig,
    lat: f64,
    lon: f64,
    args: &Args,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let current = GeoPoint::new(lat, lon)?;

    let mut results = proximity::rank_proximity(&current, catalog.pois(), config.collection_radius_m);
    results.truncate(config.nearest_limit);

    println!("\nNearest POIs from ({}, {}):", lat, lon);
    for (rank, result) in results.iter().enumerate() {
        let poi = catalog.get(&result.poi_id);
        let name = poi.map(|p| p.name()).unwrap_or("?");
        let city = poi.and_then(|p| p.city()).unwrap_or("");
        let status = if poi.map(|p| p.is_collected()).unwrap_or(false) {
            "collected"
        } else if result.collectible {
            "collectible"
        } else {
            ""
        };
        println!(
            "{:>3}. {:<40} {:<10} {:>10.1}m  {}",
            rank + 1,
            name,
            city,
            result.distance_m,
            status
        );
    }

    if args.export_csv() {
        fs::create_dir_all(args.output_dir())?;
        let path = csv_export::timestamped_path(Path::new(args.output_dir()), "ranking");
        csv_export::export_ranking(&path, &results, &catalog)?;
        println!("\nRanking exported to {}", path.display());
    }

    Ok(())
}

fn run_walk(
    catalog: PoiCatalog,
    config: GameConfig,
    args: &Args,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let checkpoint_path = Path::new(args.checkpoint_dir()).join("session.json");

    let mut session = if args.no_continue() {
        CollectionSession::new(catalog, config)
    } else {
        match CollectionSession::load_checkpoint(&checkpoint_path) {
            Ok(Some(restored)) => {
                println!(
                    "Resuming session: {} coins, {}/{} collected",
                    restored.coins(),
                    restored.catalog().collected_count(),
                    restored.catalog().len()
                );
                restored
            }
            Ok(None) => CollectionSession::new(catalog, config),
            Err(e) => {
                eprintln!("Failed to load checkpoint: {}. Starting fresh.", e);
                CollectionSession::new(catalog, config)
            }
        }
    };

    let start = match session.last_processed().copied() {
        Some(point) => point,
        None => match session.catalog().pois().first() {
            Some(poi) => *poi.location(),
            None => {
                println!("Empty catalog, nothing to walk towards");
                return Ok(());
            }
        },
    };

    // Deterministic walk when a seed is provided
    let mut rng = match args.seed() {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut event_log = if args.export_csv() {
        fs::create_dir_all(args.output_dir())?;
        let path = csv_export::timestamped_path(Path::new(args.output_dir()), "events");
        println!("Logging collection events to {}", path.display());
        Some(CsvEventLog::create(&path)?)
    } else {
        None
    };

    let progress = ProgressBar::new(args.steps() as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} steps  {msg}")
            .expect("Invalid progress bar template"),
    );

    let mut current = start;
    for _ in 0..args.steps() {
        let sample = LocationSample::new(current, Utc::now());
        let events = match event_log.as_mut() {
            Some(log) => session.handle_sample_with_sink(&sample, log),
            None => session.handle_sample(&sample),
        };
        for event in &events {
            progress.println(format!(
                "Collected {} (+{} coins, {:.1}m away)",
                event.poi_name, event.reward, event.distance_m
            ));
        }
        progress.set_message(format!("{} coins", session.coins()));
        progress.inc(1);

        // Random step of 5-40 m in a random direction; a step that would
        // leave valid coordinate space keeps the walker in place.
        let bearing = rng.gen::<f64>() * std::f64::consts::TAU;
        let step_m = rng.gen_range(5.0..40.0);
        current = match offset(&current, bearing.cos() * step_m, bearing.sin() * step_m) {
            Ok(next) => next,
            Err(_) => current,
        };
    }
    progress.finish();

    println!(
        "\nWalk finished: {} coins, {}/{} POIs collected, {} events",
        session.coins(),
        session.catalog().collected_count(),
        session.catalog().len(),
        session.events().len()
    );

    session.save_checkpoint(&checkpoint_path)?;
    println!("Session checkpoint saved to {}", checkpoint_path.display());

    Ok(())
}

/// Moves a point by the given offsets in meters (north and east positive).
fn offset(point: &GeoPoint, north_m: f64, east_m: f64) -> Result<GeoPoint, CoordinateError> {
    let meters_per_degree = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;
    let lat = point.latitude() + north_m / meters_per_degree;
    let lon = point.longitude()
        + east_m / (meters_per_degree * point.latitude().to_radians().cos());
    GeoPoint::new(lat, lon)
}
