//! # mapglide
//!
//! Moves a remote map viewport with small, bounded gestures instead of
//! jumping straight to a position.
//!
//! The crate provides the Web-Mercator projection, two convergence loops
//! (drag towards a point, step the zoom level), a four-phase recenter built on
//! them, and an area sweep that visits a deliberately partial ring pattern.
//! Reading the viewport and issuing pointer gestures are left to
//! implementations of [`ViewportStateReader`] and [`PointerDriver`].

pub mod core;
pub mod input;
pub mod navigation;
pub mod pool;
pub mod prelude;
pub mod runtime;
pub mod simulation;
pub mod sweep;
pub mod traits;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{MotionProfile, NavigatorOptions, SweepConfig},
    geo::{GeoBounds, GeoPoint, PixelPoint},
    projection::CoordinateProjector,
};

pub use input::{PointerDriver, ViewportState, ViewportStateReader};

pub use navigation::{ConvergenceOutcome, GestureController, RecenterReport};

pub use sweep::{AreaSweepPlanner, SweepCallback, SweepReport};

pub use pool::{PooledViewport, ViewportPool};

pub use simulation::SimulatedViewport;

/// Boxed error for caller-supplied code: drivers and sweep callbacks
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Viewport state parse error: {0}")]
    StateParse(String),

    #[error("Pointer driver failed: {source}")]
    Driver { source: BoxError },

    #[error("Sweep callback failed at point {index}: {source}")]
    Callback { index: usize, source: BoxError },

    #[error("Viewport pool closed")]
    PoolClosed,

    #[error("Viewport pool granted a permit with no idle viewport")]
    PoolInconsistent,

    #[error("Operation cancelled")]
    Cancelled,
}

/// Installs `env_logger` as the `log` backend; safe to call more than once
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(cfg!(test)).try_init();
}
