use serde::{Deserialize, Serialize};

use crate::core::constants::SAFE_LATITUDE;

/// Mean Earth radius (IUGG), in metres
const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// Creates a new GeoPoint coordinate
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Clamps latitude strictly inside the poles so it can be projected
    pub fn clamp_lat(lat: f64) -> f64 {
        lat.clamp(-SAFE_LATITUDE, SAFE_LATITUDE)
    }

    /// Returns a copy whose latitude is safe to project
    pub fn projectable(&self) -> Self {
        Self::new(Self::clamp_lat(self.lat), self.lon)
    }

    /// Great-circle distance in metres
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        let (phi1, phi2) = (self.lat.to_radians(), other.lat.to_radians());
        let half_dphi = (phi2 - phi1) / 2.0;
        let half_dlambda = (other.lon - self.lon).to_radians() / 2.0;

        let h = half_dphi.sin().powi(2) + phi1.cos() * phi2.cos() * half_dlambda.sin().powi(2);
        2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
    }
}

impl Default for GeoPoint {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

impl From<geo_types::Point<f64>> for GeoPoint {
    fn from(point: geo_types::Point<f64>) -> Self {
        Self::new(point.y(), point.x())
    }
}

impl From<GeoPoint> for geo_types::Point<f64> {
    fn from(point: GeoPoint) -> Self {
        geo_types::Point::new(point.lon, point.lat)
    }
}

/// Represents a point in projected pixel space or on screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &PixelPoint) -> PixelPoint {
        PixelPoint::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &PixelPoint) -> PixelPoint {
        PixelPoint::new(self.x - other.x, self.y - other.y)
    }

    pub fn multiply(&self, scalar: f64) -> PixelPoint {
        PixelPoint::new(self.x * scalar, self.y * scalar)
    }

    /// Euclidean length when the point is read as a vector
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance_to(&self, other: &PixelPoint) -> f64 {
        self.subtract(other).length()
    }

    /// Scales the vector down so its length does not exceed `max_len`.
    /// Direction is preserved; a zero vector stays zero.
    pub fn clamp_length(&self, max_len: f64) -> PixelPoint {
        let len = self.length();
        if len <= max_len || len == 0.0 {
            return *self;
        }
        self.multiply(max_len / len)
    }
}

impl Default for PixelPoint {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Geographic bounding box used to keep navigation inside a region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl GeoBounds {
    pub fn new(lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64) -> Self {
        Self {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        }
    }

    /// The whole projectable world
    pub fn world() -> Self {
        Self::new(-SAFE_LATITUDE, SAFE_LATITUDE, -180.0, 180.0)
    }

    /// Checks if the bounds contain a point
    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.lat >= self.lat_min
            && point.lat <= self.lat_max
            && point.lon >= self.lon_min
            && point.lon <= self.lon_max
    }

    /// Clamps latitude and longitude independently. Longitudes are never
    /// wrapped across the antimeridian.
    pub fn clamp(&self, point: &GeoPoint) -> GeoPoint {
        GeoPoint::new(
            point.lat.max(self.lat_min).min(self.lat_max),
            point.lon.max(self.lon_min).min(self.lon_max),
        )
    }
}
