//! Configuration for gesture navigation and area sweeps
//!
//! Every knob the navigation loops read lives here, grouped by concern.
//! Options can be built from a [`MotionProfile`] preset, assembled by hand,
//! or loaded from JSON; all of them are validated before use.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::constants::*;
use crate::core::geo::{GeoPoint, PixelPoint};
use crate::traits::Validate;
use crate::{Error, Result};

fn invalid(msg: impl Into<String>) -> Error {
    Error::InvalidConfig(msg.into())
}

fn check_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be a positive number, got {value}")))
    }
}

fn check_non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be non-negative, got {value}")))
    }
}

/// Converts a seconds value that already passed validation
pub(crate) fn secs(value: f64) -> Duration {
    Duration::from_secs_f64(value.max(0.0))
}

/// Pan convergence parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Converged once the remaining distance is at most this many pixels
    pub tolerance_px: f64,
    /// Reads (successful or not) allowed before giving up
    pub max_iterations: u32,
    /// Longest single drag
    pub max_drag_px: f64,
    /// Intermediate pointer frames per drag
    pub interpolation_steps: u32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tolerance_px: DEFAULT_TOLERANCE_PX,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_drag_px: DEFAULT_MAX_DRAG_PX,
            interpolation_steps: DEFAULT_INTERPOLATION_STEPS,
        }
    }
}

impl Validate for GestureConfig {
    fn validate(&self) -> Result<()> {
        check_positive("tolerance_px", self.tolerance_px)?;
        check_positive("max_drag_px", self.max_drag_px)?;
        if self.max_iterations == 0 {
            return Err(invalid("max_iterations must be at least 1"));
        }
        if self.interpolation_steps == 0 {
            return Err(invalid("interpolation_steps must be at least 1"));
        }
        Ok(())
    }
}

/// Zoom stepping parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub max_attempts: u32,
    pub step_delay_secs: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_ZOOM_MAX_ATTEMPTS,
            step_delay_secs: DEFAULT_ZOOM_STEP_DELAY_SECS,
        }
    }
}

impl ZoomConfig {
    pub fn step_delay(&self) -> Duration {
        secs(self.step_delay_secs)
    }
}

impl Validate for ZoomConfig {
    fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(invalid("zoom max_attempts must be at least 1"));
        }
        check_non_negative("step_delay_secs", self.step_delay_secs)
    }
}

/// Pauses between reads and gestures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Wait before re-reading an unavailable state
    pub read_backoff_secs: f64,
    /// Wait after each drag
    pub settle_delay_secs: f64,
    /// Relative jitter applied to every pause, in [0, 1). 0 keeps pauses exact.
    pub jitter: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            read_backoff_secs: DEFAULT_READ_BACKOFF_SECS,
            settle_delay_secs: DEFAULT_SETTLE_DELAY_SECS,
            jitter: 0.0,
        }
    }
}

impl TimingConfig {
    pub fn read_backoff(&self) -> Duration {
        secs(self.read_backoff_secs)
    }

    pub fn settle_delay(&self) -> Duration {
        secs(self.settle_delay_secs)
    }
}

impl Validate for TimingConfig {
    fn validate(&self) -> Result<()> {
        check_non_negative("read_backoff_secs", self.read_backoff_secs)?;
        check_non_negative("settle_delay_secs", self.settle_delay_secs)?;
        if !(0.0..1.0).contains(&self.jitter) {
            return Err(invalid(format!("jitter must be in [0, 1), got {}", self.jitter)));
        }
        Ok(())
    }
}

/// Where gestures start on screen and how far one wheel step scrolls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorConfig {
    pub anchor: PixelPoint,
    pub scroll_delta: f64,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            anchor: PixelPoint::new(DEFAULT_ANCHOR.0, DEFAULT_ANCHOR.1),
            scroll_delta: DEFAULT_SCROLL_DELTA,
        }
    }
}

impl Validate for AnchorConfig {
    fn validate(&self) -> Result<()> {
        if !self.anchor.x.is_finite() || !self.anchor.y.is_finite() {
            return Err(invalid("anchor must be finite"));
        }
        check_positive("scroll_delta", self.scroll_delta)
    }
}

/// How the recenter approach picks its coarse zoom level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CoarseZoom {
    /// Uniformly random level in `[min, max]`, never finer than the target
    Band { min: u8, max: u8 },
    /// `target - offset`, but not below `floor` (and never finer than the target)
    FixedOffset { offset: u8, floor: u8 },
}

impl Default for CoarseZoom {
    fn default() -> Self {
        Self::Band {
            min: DEFAULT_COARSE_ZOOM_BAND.0,
            max: DEFAULT_COARSE_ZOOM_BAND.1,
        }
    }
}

impl CoarseZoom {
    /// The deterministic variant with the stock offset
    pub fn fixed() -> Self {
        Self::FixedOffset {
            offset: DEFAULT_COARSE_ZOOM_OFFSET,
            floor: DEFAULT_COARSE_ZOOM_FLOOR,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecenterConfig {
    pub coarse: CoarseZoom,
}

impl Validate for RecenterConfig {
    fn validate(&self) -> Result<()> {
        match self.coarse {
            CoarseZoom::Band { min, max } if min > max => Err(invalid(format!(
                "coarse zoom band is empty: min {min} > max {max}"
            ))),
            _ => Ok(()),
        }
    }
}

/// Pointer activity that is not aimed at a map target: wandering, paced
/// page scrolling and think-time pauses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdleConfig {
    /// Top-left corner of the wandering region
    pub wander_min: PixelPoint,
    /// Bottom-right corner of the wandering region
    pub wander_max: PixelPoint,
    pub hop_min_secs: f64,
    pub hop_max_secs: f64,
    pub think_min_secs: f64,
    pub think_max_secs: f64,
    /// Wheel events per paced scroll
    pub scroll_steps: u32,
}

impl Default for IdleConfig {
    fn default() -> Self {
        let ((x0, y0), (x1, y1)) = DEFAULT_WANDER_REGION;
        Self {
            wander_min: PixelPoint::new(x0, y0),
            wander_max: PixelPoint::new(x1, y1),
            hop_min_secs: DEFAULT_WANDER_HOP_SECS.0,
            hop_max_secs: DEFAULT_WANDER_HOP_SECS.1,
            think_min_secs: DEFAULT_THINK_SECS.0,
            think_max_secs: DEFAULT_THINK_SECS.1,
            scroll_steps: DEFAULT_PACED_SCROLL_STEPS,
        }
    }
}

impl IdleConfig {
    pub fn hop_range(&self) -> (Duration, Duration) {
        (secs(self.hop_min_secs), secs(self.hop_max_secs))
    }

    pub fn think_range(&self) -> (Duration, Duration) {
        (secs(self.think_min_secs), secs(self.think_max_secs))
    }
}

impl Validate for IdleConfig {
    fn validate(&self) -> Result<()> {
        let (min, max) = (self.wander_min, self.wander_max);
        if ![min.x, min.y, max.x, max.y].iter().all(|v| v.is_finite()) {
            return Err(invalid("wander region must be finite"));
        }
        if min.x > max.x || min.y > max.y {
            return Err(invalid("wander region corners are swapped"));
        }
        check_non_negative("hop_min_secs", self.hop_min_secs)?;
        // a zero hop would let wandering spin without yielding time
        check_positive("hop_max_secs", self.hop_max_secs)?;
        check_non_negative("think_min_secs", self.think_min_secs)?;
        check_non_negative("think_max_secs", self.think_max_secs)?;
        if self.hop_min_secs > self.hop_max_secs || self.think_min_secs > self.think_max_secs {
            return Err(invalid("idle pause ranges must have min <= max"));
        }
        if self.scroll_steps == 0 {
            return Err(invalid("scroll_steps must be at least 1"));
        }
        Ok(())
    }
}

/// Area sweep parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub center: GeoPoint,
    /// Zoom at which ring offsets are laid out in pixel space
    pub zoom: f64,
    pub rings: u32,
    pub step_px: f64,
    pub dwell_secs: f64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            center: GeoPoint::default(),
            zoom: 15.0,
            rings: DEFAULT_SWEEP_RINGS,
            step_px: DEFAULT_SWEEP_STEP_PX,
            dwell_secs: DEFAULT_SWEEP_DWELL_SECS,
        }
    }
}

impl SweepConfig {
    pub fn new(center: GeoPoint, zoom: f64) -> Self {
        Self {
            center,
            zoom,
            ..Self::default()
        }
    }

    pub fn with_rings(mut self, rings: u32) -> Self {
        self.rings = rings;
        self
    }

    pub fn with_step_px(mut self, step_px: f64) -> Self {
        self.step_px = step_px;
        self
    }

    pub fn with_dwell_secs(mut self, dwell_secs: f64) -> Self {
        self.dwell_secs = dwell_secs;
        self
    }

    pub fn dwell(&self) -> Duration {
        secs(self.dwell_secs)
    }
}

impl Validate for SweepConfig {
    fn validate(&self) -> Result<()> {
        if !self.center.is_valid() {
            return Err(Error::InvalidCoordinates(format!(
                "sweep center {} is out of range",
                self.center
            )));
        }
        check_non_negative("zoom", self.zoom)?;
        if self.rings == 0 {
            return Err(invalid("rings must be at least 1"));
        }
        check_positive("step_px", self.step_px)?;
        check_non_negative("dwell_secs", self.dwell_secs)
    }
}

/// Presets for how cautiously the viewport is moved
#[derive(Debug, Clone, PartialEq)]
pub enum MotionProfile {
    Balanced,
    /// Shorter drags, smoother motion, longer pauses
    Cautious,
    /// Longer drags and short pauses, for simulated or trusted viewports
    Brisk,
    Custom(NavigatorOptions),
}

impl MotionProfile {
    pub fn resolve(&self) -> NavigatorOptions {
        match self {
            Self::Balanced => NavigatorOptions {
                gesture: GestureConfig::default(),
                zoom: ZoomConfig::default(),
                timing: TimingConfig::default(),
                anchor: AnchorConfig::default(),
                recenter: RecenterConfig::default(),
                idle: IdleConfig::default(),
            },
            Self::Cautious => NavigatorOptions {
                gesture: GestureConfig {
                    tolerance_px: DEFAULT_TOLERANCE_PX,
                    max_iterations: 30,
                    max_drag_px: 450.0,
                    interpolation_steps: 35,
                },
                zoom: ZoomConfig {
                    max_attempts: DEFAULT_ZOOM_MAX_ATTEMPTS,
                    step_delay_secs: 0.6,
                },
                timing: TimingConfig {
                    read_backoff_secs: 0.5,
                    settle_delay_secs: 0.7,
                    jitter: 0.3,
                },
                anchor: AnchorConfig::default(),
                recenter: RecenterConfig::default(),
                idle: IdleConfig {
                    think_min_secs: 2.0,
                    think_max_secs: 5.0,
                    scroll_steps: 5,
                    ..IdleConfig::default()
                },
            },
            Self::Brisk => NavigatorOptions {
                gesture: GestureConfig {
                    tolerance_px: DEFAULT_TOLERANCE_PX,
                    max_iterations: 12,
                    max_drag_px: 1200.0,
                    interpolation_steps: 8,
                },
                zoom: ZoomConfig {
                    max_attempts: DEFAULT_ZOOM_MAX_ATTEMPTS,
                    step_delay_secs: 0.1,
                },
                timing: TimingConfig {
                    read_backoff_secs: 0.1,
                    settle_delay_secs: 0.1,
                    jitter: 0.0,
                },
                anchor: AnchorConfig::default(),
                recenter: RecenterConfig {
                    coarse: CoarseZoom::fixed(),
                },
                idle: IdleConfig {
                    think_min_secs: 0.2,
                    think_max_secs: 0.5,
                    ..IdleConfig::default()
                },
            },
            Self::Custom(options) => options.clone(),
        }
    }
}

impl Default for MotionProfile {
    fn default() -> Self {
        Self::Balanced
    }
}

/// Everything a gesture controller needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorOptions {
    pub gesture: GestureConfig,
    pub zoom: ZoomConfig,
    pub timing: TimingConfig,
    pub anchor: AnchorConfig,
    pub recenter: RecenterConfig,
    pub idle: IdleConfig,
}

impl Default for NavigatorOptions {
    fn default() -> Self {
        MotionProfile::default().resolve()
    }
}

impl NavigatorOptions {
    /// Parses and validates options from JSON. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

impl Validate for NavigatorOptions {
    fn validate(&self) -> Result<()> {
        self.gesture.validate()?;
        self.zoom.validate()?;
        self.timing.validate()?;
        self.anchor.validate()?;
        self.recenter.validate()?;
        self.idle.validate()
    }
}
