//! Shared trait abstractions
//!
//! Seams shared by the projection, configuration and navigation modules.

use crate::{
    core::geo::{GeoBounds, GeoPoint, PixelPoint},
    Result,
};

/// Trait for coordinate transformation operations
///
/// Implementations must be pure: the same input and zoom always yield the
/// same output.
pub trait CoordinateTransform: Send + Sync {
    /// Transform geographic coordinates to world pixel coordinates
    fn project(&self, point: &GeoPoint, zoom: f64) -> PixelPoint;

    /// Transform world pixel coordinates to geographic coordinates
    fn unproject(&self, point: &PixelPoint, zoom: f64) -> GeoPoint;

    /// World size in pixels at the given zoom
    fn scale(&self, zoom: f64) -> f64;

    /// Clamp a point into bounds without any wraparound
    fn clamp(&self, point: &GeoPoint, bounds: &GeoBounds) -> GeoPoint {
        bounds.clamp(point)
    }
}

/// Trait for validated configuration values
pub trait Validate {
    /// Reject values the navigation loops cannot run with
    fn validate(&self) -> Result<()>;
}
