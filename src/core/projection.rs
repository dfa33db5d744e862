//! Spherical Mercator projection between geographic coordinates and world
//! pixels, with a world width of `256 * 2^zoom` pixels.

use std::f64::consts::PI;

use crate::core::constants::TILE_SIZE;
use crate::core::geo::{GeoBounds, GeoPoint, PixelPoint};
use crate::traits::CoordinateTransform;

/// Stateless forward/inverse projector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoordinateProjector;

impl CoordinateProjector {
    pub fn new() -> Self {
        Self
    }

    /// Projects a point to pixels. Latitude is clamped to the safe interior
    /// first so the logarithm below stays finite.
    pub fn to_pixel(point: &GeoPoint, zoom: f64) -> PixelPoint {
        let scale = world_size(zoom);
        let point = point.projectable();

        let x = (point.lon + 180.0) / 360.0 * scale;
        let sin_lat = point.lat.to_radians().sin();
        let y = (0.5 - ((1.0 + sin_lat) / (1.0 - sin_lat)).ln() / (4.0 * PI)) * scale;

        PixelPoint::new(x, y)
    }

    /// Exact inverse of [`CoordinateProjector::to_pixel`]
    pub fn to_geo(point: &PixelPoint, zoom: f64) -> GeoPoint {
        let scale = world_size(zoom);

        let lon = point.x / scale * 360.0 - 180.0;
        let n = PI - 2.0 * PI * point.y / scale;
        let lat = n.sinh().atan().to_degrees();

        GeoPoint::new(lat, lon)
    }

    /// Independent per-axis clamp; no antimeridian wraparound
    pub fn clamp(point: &GeoPoint, bounds: &GeoBounds) -> GeoPoint {
        bounds.clamp(point)
    }
}

/// World width/height in pixels at `zoom`
pub fn world_size(zoom: f64) -> f64 {
    TILE_SIZE * 2_f64.powf(zoom)
}

impl CoordinateTransform for CoordinateProjector {
    fn project(&self, point: &GeoPoint, zoom: f64) -> PixelPoint {
        Self::to_pixel(point, zoom)
    }

    fn unproject(&self, point: &PixelPoint, zoom: f64) -> GeoPoint {
        Self::to_geo(point, zoom)
    }

    fn scale(&self, zoom: f64) -> f64 {
        world_size(zoom)
    }
}
