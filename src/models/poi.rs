use serde::{Deserialize, Serialize};

use crate::models::geo::GeoPoint;

/// Anything with a stable identifier and a fixed position on the map.
pub trait Locatable {
    fn location(&self) -> &GeoPoint;
    fn id(&self) -> &str;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointOfInterest {
    id: String,
    name: String,
    city: Option<String>,
    location: GeoPoint,
    reward: u32,
    #[serde(default)]
    collected: bool,
}

impl PointOfInterest {
    pub fn new(
        id: String,
        name: String,
        city: Option<String>,
        location: GeoPoint,
        reward: u32,
    ) -> Self {
        Self {
            id,
            name,
            city,
            location,
            reward,
            collected: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn location(&self) -> &GeoPoint {
        &self.location
    }

    pub fn reward(&self) -> u32 {
        self.reward
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// Marks the POI collected. The transition is one-way: there is no API
    /// to reset the flag.
    pub fn mark_collected(&mut self) {
        self.collected = true;
    }
}

impl Locatable for PointOfInterest {
    fn location(&self) -> &GeoPoint {
        &self.location
    }

    fn id(&self) -> &str {
        &self.id
    }
}

/// Owned, ordered POI collection with unique ids. Collected state lives
/// here and nowhere else; callers pass the catalog (or a slice of it) into
/// the engine explicitly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoiCatalog {
    pois: Vec<PointOfInterest>,
}

impl PoiCatalog {
    pub fn new() -> Self {
        Self { pois: Vec::new() }
    }

    /// Appends a POI, preserving insertion order. Returns false (and leaves
    /// the catalog untouched) when the id is already present.
    pub fn try_add(&mut self, poi: PointOfInterest) -> bool {
        if self.pois.iter().any(|p| p.id() == poi.id()) {
            return false;
        }
        self.pois.push(poi);
        true
    }

    pub fn len(&self) -> usize {
        self.pois.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pois.is_empty()
    }

    pub fn pois(&self) -> &[PointOfInterest] {
        &self.pois
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointOfInterest> {
        self.pois.iter()
    }

    pub fn get(&self, id: &str) -> Option<&PointOfInterest> {
        self.pois.iter().find(|p| p.id() == id)
    }

    /// Applies the uncollected -> collected transition for `id`. Returns
    /// true only when this call performed the transition; a missing id or an
    /// already-collected POI returns false.
    pub fn mark_collected(&mut self, id: &str) -> bool {
        match self.pois.iter_mut().find(|p| p.id() == id) {
            Some(poi) if !poi.is_collected() => {
                poi.mark_collected();
                true
            }
            _ => false,
        }
    }

    pub fn collected_count(&self) -> usize {
        self.pois.iter().filter(|p| p.is_collected()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poi(id: &str, lat: f64, lon: f64) -> PointOfInterest {
        PointOfInterest::new(
            id.to_string(),
            format!("POI {}", id),
            Some("Astana".to_string()),
            GeoPoint::new(lat, lon).unwrap(),
            10,
        )
    }

    #[test]
    fn try_add_rejects_duplicate_ids() {
        let mut catalog = PoiCatalog::new();
        assert!(catalog.try_add(poi("a", 51.1, 71.4)));
        assert!(!catalog.try_add(poi("a", 51.2, 71.5)));
        assert_eq!(catalog.len(), 1);
        // The original entry survives the rejected insert.
        assert_eq!(catalog.get("a").unwrap().location().latitude(), 51.1);
    }

    #[test]
    fn mark_collected_transitions_exactly_once() {
        let mut catalog = PoiCatalog::new();
        catalog.try_add(poi("a", 51.1, 71.4));

        assert!(catalog.mark_collected("a"));
        assert!(!catalog.mark_collected("a"));
        assert!(catalog.get("a").unwrap().is_collected());
        assert_eq!(catalog.collected_count(), 1);
    }

    #[test]
    fn mark_collected_unknown_id_is_a_no_op() {
        let mut catalog = PoiCatalog::new();
        catalog.try_add(poi("a", 51.1, 71.4));
        assert!(!catalog.mark_collected("missing"));
        assert_eq!(catalog.collected_count(), 0);
    }

    #[test]
    fn collected_flag_defaults_to_false_in_serde() {
        let json = r#"{
            "id": "astana-1",
            "name": "Baiterek Tower",
            "city": "Astana",
            "location": {"latitude": 51.1283, "longitude": 71.4305},
            "reward": 10
        }"#;
        let poi: PointOfInterest = serde_json::from_str(json).unwrap();
        assert!(!poi.is_collected());
    }
}
