use std::cmp::Ordering;

use serde::Serialize;

use crate::models::geo::GeoPoint;
use crate::models::poi::PointOfInterest;
use crate::utils::logging::{self, OperationCategory};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProximityResult {
    pub poi_id: String,
    pub distance_m: f64,
    pub collectible: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CollectOutcome {
    Collected { reward: u32 },
    TooFar { distance_m: f64 },
    AlreadyCollected,
}

/// Ranks every POI by distance from `current`, nearest first.
///
/// `collectible` is true when the POI is within `radius_m` (inclusive) and
/// not yet collected. The catalog is never mutated; an empty catalog yields
/// an empty list.
pub fn rank_proximity(
    current: &GeoPoint,
    pois: &[PointOfInterest],
    radius_m: f64,
) -> Vec<ProximityResult> {
    let _timing = logging::start_timing("rank_proximity", OperationCategory::Ranking);

    let mut results: Vec<ProximityResult> = pois
        .iter()
        .map(|poi| {
            let distance_m = current.distance_to(poi.location());
            ProximityResult {
                poi_id: poi.id().to_string(),
                distance_m,
                collectible: distance_m <= radius_m && !poi.is_collected(),
            }
        })
        .collect();

    // Stable sort: equidistant POIs keep catalog order, so repeated calls
    // with identical input produce identical output.
    results.sort_by(|a, b| {
        a.distance_m
            .partial_cmp(&b.distance_m)
            .unwrap_or(Ordering::Equal)
    });

    results
}

/// Authorizes (or refuses) the collection of a single POI.
///
/// The engine only decides; persisting the flag change and crediting the
/// reward is the caller's job. Re-attempts on a collected POI always return
/// `AlreadyCollected`, regardless of distance.
pub fn attempt_collect(
    poi: &PointOfInterest,
    current: &GeoPoint,
    radius_m: f64,
) -> CollectOutcome {
    if poi.is_collected() {
        return CollectOutcome::AlreadyCollected;
    }

    let distance_m = current.distance_to(poi.location());
    if distance_m <= radius_m {
        CollectOutcome::Collected { reward: poi.reward() }
    } else {
        CollectOutcome::TooFar { distance_m }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_LAT_DEGREE_M: f64 = 111_194.92664455873; // EARTH_RADIUS_M * PI / 180

    fn poi_at(id: &str, lat: f64, lon: f64) -> PointOfInterest {
        PointOfInterest::new(
            id.to_string(),
            format!("POI {}", id),
            None,
            GeoPoint::new(lat, lon).unwrap(),
            10,
        )
    }

    /// A point `meters` due north of the origin along the prime meridian.
    fn north_of_origin(meters: f64) -> GeoPoint {
        GeoPoint::new(meters / ONE_LAT_DEGREE_M, 0.0).unwrap()
    }

    #[test]
    fn empty_catalog_yields_empty_ranking() {
        let current = GeoPoint::new(51.1283, 71.4305).unwrap();
        assert!(rank_proximity(&current, &[], 50.0).is_empty());
    }

    #[test]
    fn ranking_is_sorted_ascending_by_distance() {
        let current = GeoPoint::new(0.0, 0.0).unwrap();
        let pois = vec![
            poi_at("far", 0.02, 0.0),
            poi_at("near", 0.0001, 0.0),
            poi_at("mid", 0.01, 0.0),
        ];

        let results = rank_proximity(&current, &pois, 50.0);
        let ids: Vec<&str> = results.iter().map(|r| r.poi_id.as_str()).collect();
        assert_eq!(ids, vec!["near", "mid", "far"]);
        assert!(results.windows(2).all(|w| w[0].distance_m <= w[1].distance_m));
    }

    #[test]
    fn equidistant_pois_keep_catalog_order() {
        // Nurjol Boulevard and Khan Shatyr share coordinates in the shipped
        // catalog; the tie must break deterministically.
        let current = GeoPoint::new(51.1283, 71.4305).unwrap();
        let pois = vec![
            poi_at("astana-7", 51.1280, 71.4300),
            poi_at("astana-17", 51.1280, 71.4300),
        ];

        let results = rank_proximity(&current, &pois, 50.0);
        assert_eq!(results[0].poi_id, "astana-7");
        assert_eq!(results[1].poi_id, "astana-17");
        assert_eq!(results[0].distance_m, results[1].distance_m);
    }

    #[test]
    fn ranking_is_stable_across_repeated_calls() {
        let current = GeoPoint::new(51.1283, 71.4305).unwrap();
        let pois = vec![
            poi_at("a", 51.1290, 71.4425),
            poi_at("b", 51.1280, 71.4300),
            poi_at("c", 51.1280, 71.4300),
        ];

        let first = rank_proximity(&current, &pois, 50.0);
        for _ in 0..5 {
            assert_eq!(rank_proximity(&current, &pois, 50.0), first);
        }
    }

    #[test]
    fn collectible_requires_radius_and_uncollected() {
        let current = GeoPoint::new(0.0, 0.0).unwrap();
        let inside = poi_at("inside", 0.0001, 0.0); // ~11 m away
        let outside = poi_at("outside", 0.01, 0.0); // ~1.1 km away
        let mut collected = poi_at("collected", 0.0, 0.0);
        collected.mark_collected();

        let results = rank_proximity(&current, &[collected, inside, outside], 50.0);
        assert_eq!(results[0].poi_id, "collected");
        assert!(!results[0].collectible);
        assert_eq!(results[1].poi_id, "inside");
        assert!(results[1].collectible);
        assert_eq!(results[2].poi_id, "outside");
        assert!(!results[2].collectible);
    }

    #[test]
    fn collect_at_exact_radius_boundary_succeeds() {
        let current = GeoPoint::new(0.0, 0.0).unwrap();
        let poi = poi_at("boundary", 50.0 / ONE_LAT_DEGREE_M, 0.0);
        // Use the measured distance as the radius so the boundary is exact
        // despite floating-point rounding in the conversion above.
        let measured = current.distance_to(poi.location());
        assert!((measured - 50.0).abs() < 0.001);

        match attempt_collect(&poi, &current, measured) {
            CollectOutcome::Collected { reward } => assert_eq!(reward, 10),
            other => panic!("expected Collected, got {:?}", other),
        }
    }

    #[test]
    fn collect_just_outside_radius_reports_too_far() {
        let current = GeoPoint::new(0.0, 0.0).unwrap();
        let poi = poi_at("near-miss", 50.01 / ONE_LAT_DEGREE_M, 0.0);

        match attempt_collect(&poi, &current, 50.0) {
            CollectOutcome::TooFar { distance_m } => {
                assert!((distance_m - 50.01).abs() < 0.001);
            }
            other => panic!("expected TooFar, got {:?}", other),
        }
    }

    #[test]
    fn collected_poi_always_reports_already_collected() {
        let current = GeoPoint::new(0.0, 0.0).unwrap();
        let mut poi = poi_at("done", 0.0, 0.0);
        poi.mark_collected();

        // Standing on top of it or a kilometre away makes no difference.
        assert_eq!(
            attempt_collect(&poi, &current, 50.0),
            CollectOutcome::AlreadyCollected
        );
        let far = north_of_origin(1_000.0);
        assert_eq!(
            attempt_collect(&poi, &far, 50.0),
            CollectOutcome::AlreadyCollected
        );
    }

    #[test]
    fn collect_at_baiterek_tower() {
        // Standing at Baiterek Tower with a POI at the same coordinates.
        let current = GeoPoint::new(51.1283, 71.4305).unwrap();
        let poi = poi_at("astana-1", 51.1283, 71.4305);

        assert_eq!(
            attempt_collect(&poi, &current, 50.0),
            CollectOutcome::Collected { reward: 10 }
        );
    }

    #[test]
    fn khan_shatyr_is_too_far_from_baiterek() {
        let current = GeoPoint::new(51.1283, 71.4305).unwrap();
        let poi = poi_at("khan-shatyr", 51.1327, 71.4054);

        match attempt_collect(&poi, &current, 50.0) {
            CollectOutcome::TooFar { distance_m } => {
                assert!(distance_m > 1_700.0 && distance_m < 2_000.0, "got {}", distance_m);
            }
            other => panic!("expected TooFar, got {:?}", other),
        }
    }
}
