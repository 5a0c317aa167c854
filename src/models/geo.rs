use serde::{Deserialize, Serialize};

use crate::config::constants::{
    EARTH_RADIUS_M, MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE,
};

#[derive(Debug, Clone, PartialEq)]
pub enum CoordinateError {
    InvalidLatitude(f64),
    InvalidLongitude(f64),
}

impl std::fmt::Display for CoordinateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoordinateError::InvalidLatitude(v) => {
                write!(f, "Invalid latitude: {} (expected {}..={} degrees)", v, MIN_LATITUDE, MAX_LATITUDE)
            }
            CoordinateError::InvalidLongitude(v) => {
                write!(f, "Invalid longitude: {} (expected {}..={} degrees)", v, MIN_LONGITUDE, MAX_LONGITUDE)
            }
        }
    }
}

impl std::error::Error for CoordinateError {}

/// A validated WGS-style latitude/longitude pair in degrees.
///
/// Construction is the only validation point: every `GeoPoint` that exists
/// holds finite, in-range coordinates, so distance math never has to check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

// Custom deserialization so catalog files cannot smuggle in out-of-range
// coordinates around the validating constructor.
impl<'de> Deserialize<'de> for GeoPoint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            latitude: f64,
            longitude: f64,
        }

        let helper = Helper::deserialize(deserializer)?;
        GeoPoint::new(helper.latitude, helper.longitude).map_err(serde::de::Error::custom)
    }
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        // is_finite also rejects NaN, which would sail through range
        // comparisons below.
        if !latitude.is_finite() || !(MIN_LATITUDE..=MAX_LATITUDE).contains(&latitude) {
            return Err(CoordinateError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&longitude) {
            return Err(CoordinateError::InvalidLongitude(longitude));
        }

        Ok(Self { latitude, longitude })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in meters (Haversine, spherical
    /// Earth). Symmetric, deterministic, and zero for identical coordinates.
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        let phi1 = self.latitude.to_radians();
        let phi2 = other.latitude.to_radians();
        let delta_phi = (other.latitude - self.latitude).to_radians();
        let delta_lambda = (other.longitude - self.longitude).to_radians();

        let a = (delta_phi / 2.0).sin().powi(2)
            + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_M * c
    }
}
