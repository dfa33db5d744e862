//! Prelude module for common mapglide types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use mapglide::prelude::*;`

pub use crate::core::{
    config::{
        AnchorConfig, CoarseZoom, GestureConfig, IdleConfig, MotionProfile, NavigatorOptions,
        RecenterConfig, SweepConfig, TimingConfig, ZoomConfig,
    },
    geo::{GeoBounds, GeoPoint, PixelPoint},
    projection::CoordinateProjector,
};

pub use crate::input::{
    PointerDriver, PointerEvent, UrlSource, UrlStateReader, ViewportState, ViewportStateReader,
};

pub use crate::navigation::{ConvergenceOutcome, GestureController, RecenterPhase, RecenterReport};

pub use crate::sweep::{AreaSweepPlanner, SweepCallback, SweepReport, SweepTarget};

pub use crate::pool::{PooledViewport, ViewportPool};

pub use crate::simulation::SimulatedViewport;

pub use crate::traits::{CoordinateTransform, Validate};

pub use crate::{BoxError, Error, Result};

pub use tokio_util::sync::CancellationToken;

pub use std::{sync::Arc, time::Duration};
