//! Core constants for projection and gesture defaults.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Default square tile size in pixels; world width at zoom 0.
pub const TILE_SIZE: f64 = 256.0;

/// Latitudes are clamped to this magnitude before projecting (the
/// projection diverges at the poles).
pub const SAFE_LATITUDE: f64 = 89.9;

/// Stop panning once the remaining distance is within this many pixels.
pub const DEFAULT_TOLERANCE_PX: f64 = 3.5;

/// Pan iteration ceiling.
pub const DEFAULT_MAX_ITERATIONS: u32 = 18;

/// Longest single drag, in pixels.
pub const DEFAULT_MAX_DRAG_PX: f64 = 800.0;

/// Intermediate frames per interpolated drag.
pub const DEFAULT_INTERPOLATION_STEPS: u32 = 20;

/// Zoom stepping attempt ceiling.
pub const DEFAULT_ZOOM_MAX_ATTEMPTS: u32 = 20;

/// Pause between zoom steps, in seconds.
pub const DEFAULT_ZOOM_STEP_DELAY_SECS: f64 = 0.3;

/// Pause before re-reading an unavailable viewport state, in seconds.
pub const DEFAULT_READ_BACKOFF_SECS: f64 = 0.3;

/// Consecutive unavailable reads after which a loop logs a warning.
pub const UNAVAILABLE_READ_WARN_STREAK: u32 = 3;

/// Pause after each drag, in seconds.
pub const DEFAULT_SETTLE_DELAY_SECS: f64 = 0.35;

/// Screen anchor for every gesture (center of a 1920x1080 viewport).
pub const DEFAULT_ANCHOR: (f64, f64) = (960.0, 540.0);

/// Wheel delta magnitude per zoom step.
pub const DEFAULT_SCROLL_DELTA: f64 = 300.0;

/// Coarse zoom band used by the randomized recenter approach.
pub const DEFAULT_COARSE_ZOOM_BAND: (u8, u8) = (9, 12);

/// Fixed coarse offset and the level it never goes below.
pub const DEFAULT_COARSE_ZOOM_OFFSET: u8 = 3;
pub const DEFAULT_COARSE_ZOOM_FLOOR: u8 = 9;

/// Screen rectangle (top-left, bottom-right) the pointer wanders within.
pub const DEFAULT_WANDER_REGION: ((f64, f64), (f64, f64)) = ((100.0, 100.0), (1800.0, 1000.0));

/// Pause range between wandering pointer hops, in seconds.
pub const DEFAULT_WANDER_HOP_SECS: (f64, f64) = (0.1, 0.5);

/// Think-time range, in seconds.
pub const DEFAULT_THINK_SECS: (f64, f64) = (1.0, 3.0);

/// A paced scroll is split into this many wheel events.
pub const DEFAULT_PACED_SCROLL_STEPS: u32 = 3;

/// Sweep defaults.
pub const DEFAULT_SWEEP_RINGS: u32 = 1;
pub const DEFAULT_SWEEP_STEP_PX: f64 = 360.0;
pub const DEFAULT_SWEEP_DWELL_SECS: f64 = 0.5;

/// Query parameter carrying `lat,lon,zoom` in a map page URL.
pub const DEFAULT_STATE_PARAM: &str = "ms";
