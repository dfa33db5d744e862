pub mod config;
pub mod constants;
pub mod geo;
pub mod projection;

pub use config::{
    AnchorConfig, CoarseZoom, GestureConfig, MotionProfile, NavigatorOptions, RecenterConfig,
    SweepConfig, TimingConfig, ZoomConfig,
};
pub use geo::{GeoBounds, GeoPoint, PixelPoint};
pub use projection::{world_size, CoordinateProjector};
