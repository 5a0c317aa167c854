// Geodesy Constants
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;        // Mean spherical Earth radius

// Coordinate Validity Bounds (degrees)
pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

// Collection Constants
pub const DEFAULT_COLLECTION_RADIUS_M: f64 = 50.0;  // Canonical collection radius
pub const DEFAULT_REWARD_COINS: u32 = 10;           // Reward when a catalog entry omits one
pub const DEFAULT_NEAREST_LIMIT: usize = 10;        // Ranked entries surfaced to the UI

// Location Sampling Constants
pub const MIN_SAMPLE_DISTANCE_M: f64 = 10.0;        // Movement gate between processed samples

// Geographic Region Bounds
// Catalog entries outside this box are legal but logged, since the shipped
// catalogs cover Kazakhstan only.
pub const KAZAKHSTAN_MIN_LAT: f64 = 40.5;
pub const KAZAKHSTAN_MAX_LAT: f64 = 55.5;
pub const KAZAKHSTAN_MIN_LON: f64 = 46.5;
pub const KAZAKHSTAN_MAX_LON: f64 = 87.4;
