use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use rayon::prelude::*;
use serde::Serialize;

use crate::config::constants::{
    KAZAKHSTAN_MAX_LAT, KAZAKHSTAN_MAX_LON, KAZAKHSTAN_MIN_LAT, KAZAKHSTAN_MIN_LON,
};
use crate::models::poi::{Locatable, PoiCatalog};

/// Closest other catalog entry for a POI.
#[derive(Debug, Clone, Serialize)]
pub struct NearestNeighbor {
    pub poi_id: String,
    pub neighbor_id: String,
    pub distance_m: f64,
}

fn nearest_neighbor<'a, T: Locatable>(item: &T, others: &'a [T]) -> Option<(&'a T, f64)> {
    others
        .iter()
        .filter(|other| other.id() != item.id())
        .map(|other| (other, item.location().distance_to(other.location())))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
}

/// Static catalog health report: density per city, nearest-neighbor
/// spacing, POI pairs close enough to be collected from one standpoint, and
/// entries outside the expected region.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogAnalysis {
    pub city_counts: Vec<(String, usize)>,
    pub nearest_neighbors: Vec<NearestNeighbor>,
    pub overlap_pairs: Vec<(String, String, f64)>,
    pub out_of_region: Vec<String>,
    radius_m: f64,
}

impl CatalogAnalysis {
    pub fn analyze(catalog: &PoiCatalog, radius_m: f64) -> Self {
        let pois = catalog.pois();

        let mut counts: HashMap<String, usize> = HashMap::new();
        for poi in pois {
            let city = poi.city().unwrap_or("(none)").to_string();
            *counts.entry(city).or_insert(0) += 1;
        }
        let mut city_counts: Vec<(String, usize)> = counts.into_iter().collect();
        city_counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        // Every POI's spacing is independent of the others, so the quadratic
        // scan parallelizes cleanly for large catalogs.
        let nearest_neighbors: Vec<NearestNeighbor> = pois
            .par_iter()
            .filter_map(|poi| {
                nearest_neighbor(poi, pois).map(|(neighbor, distance_m)| NearestNeighbor {
                    poi_id: poi.id().to_string(),
                    neighbor_id: neighbor.id().to_string(),
                    distance_m,
                })
            })
            .collect();

        // Two POIs closer than twice the radius share collection standpoints:
        // one sample can collect both. Worth knowing when laying out a catalog.
        let mut overlap_pairs = Vec::new();
        for (i, a) in pois.iter().enumerate() {
            for b in pois.iter().skip(i + 1) {
                let distance = a.location().distance_to(b.location());
                if distance <= radius_m * 2.0 {
                    overlap_pairs.push((a.id().to_string(), b.id().to_string(), distance));
                }
            }
        }

        let out_of_region: Vec<String> = pois
            .iter()
            .filter(|poi| {
                let lat = poi.location().latitude();
                let lon = poi.location().longitude();
                !(KAZAKHSTAN_MIN_LAT..=KAZAKHSTAN_MAX_LAT).contains(&lat)
                    || !(KAZAKHSTAN_MIN_LON..=KAZAKHSTAN_MAX_LON).contains(&lon)
            })
            .map(|poi| poi.id().to_string())
            .collect();

        Self {
            city_counts,
            nearest_neighbors,
            overlap_pairs,
            out_of_region,
            radius_m,
        }
    }

    fn spacing_stats(&self) -> Option<(f64, f64, f64)> {
        if self.nearest_neighbors.is_empty() {
            return None;
        }
        let mut min = f64::MAX;
        let mut max = f64::MIN;
        let mut sum = 0.0;
        for nn in &self.nearest_neighbors {
            min = min.min(nn.distance_m);
            max = max.max(nn.distance_m);
            sum += nn.distance_m;
        }
        Some((min, sum / self.nearest_neighbors.len() as f64, max))
    }

    pub fn print_summary(&self) {
        println!("\nCatalog Analysis Summary:");
        println!("-------------------------");

        println!("\nPOIs by city:");
        for (city, count) in &self.city_counts {
            println!("{}: {} POIs", city, count);
        }

        if let Some((min, mean, max)) = self.spacing_stats() {
            println!("\nNearest-neighbor spacing:");
            println!("min={:.1}m, mean={:.1}m, max={:.1}m", min, mean, max);
        }

        println!(
            "\nOverlapping pairs (within {:.0}m of each other): {}",
            self.radius_m * 2.0,
            self.overlap_pairs.len()
        );
        for (a, b, distance) in self.overlap_pairs.iter().take(10) {
            println!("{} / {}: {:.1}m apart", a, b, distance);
        }

        if !self.out_of_region.is_empty() {
            println!("\nPOIs outside the expected region: {:?}", self.out_of_region);
        }
    }

    pub fn save_to_file(&self, path: &Path) -> std::io::Result<()> {
        let mut file = File::create(path)?;

        writeln!(file, "Catalog Analysis Results")?;
        writeln!(file, "========================\n")?;

        writeln!(file, "POIs by city:")?;
        for (city, count) in &self.city_counts {
            writeln!(file, "{}: {}", city, count)?;
        }

        if let Some((min, mean, max)) = self.spacing_stats() {
            writeln!(file, "\nNearest-neighbor spacing (m):")?;
            writeln!(file, "min={:.1}, mean={:.1}, max={:.1}", min, mean, max)?;
        }

        writeln!(
            file,
            "\nOverlapping pairs (within {:.0}m): {}",
            self.radius_m * 2.0,
            self.overlap_pairs.len()
        )?;
        for (a, b, distance) in &self.overlap_pairs {
            writeln!(file, "{} / {}: {:.1}m", a, b, distance)?;
        }

        writeln!(file, "\nOut-of-region POIs: {}", self.out_of_region.len())?;
        for id in &self.out_of_region {
            writeln!(file, "{}", id)?;
        }

        writeln!(file, "\nDetailed nearest-neighbor data:")?;
        writeln!(file, "-------------------------------")?;
        for nn in &self.nearest_neighbors {
            writeln!(file, "{} -> {} ({:.1}m)", nn.poi_id, nn.neighbor_id, nn.distance_m)?;
        }

        Ok(())
    }
}
