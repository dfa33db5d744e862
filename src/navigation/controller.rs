//! Gesture controller: owns the seams to one viewport and the options the
//! pan, zoom and recenter loops read.

use std::time::Duration;

use rand::{rngs::StdRng, SeedableRng};
use tokio_util::sync::CancellationToken;

use crate::core::config::NavigatorOptions;
use crate::core::constants::UNAVAILABLE_READ_WARN_STREAK;
use crate::core::geo::PixelPoint;
use crate::core::projection::CoordinateProjector;
use crate::input::{PointerDriver, ViewportState, ViewportStateReader};
use crate::runtime;
use crate::traits::{CoordinateTransform, Validate};
use crate::{BoxError, Error, Result};

/// Drives one viewport towards target positions with bounded gestures.
///
/// A controller must be the only thing issuing gestures to its viewport
/// while a loop runs; loops take `&mut self` for that reason.
pub struct GestureController<R, D, P = CoordinateProjector> {
    pub(crate) reader: R,
    pub(crate) driver: D,
    pub(crate) projection: P,
    pub(crate) options: NavigatorOptions,
    pub(crate) rng: StdRng,
    pub(crate) cancel: CancellationToken,
}

impl<R, D> GestureController<R, D>
where
    R: ViewportStateReader,
    D: PointerDriver,
{
    /// Creates a controller with the standard Mercator projection.
    /// Fails if `options` do not validate.
    pub fn new(reader: R, driver: D, options: NavigatorOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            reader,
            driver,
            projection: CoordinateProjector::new(),
            options,
            rng: StdRng::from_entropy(),
            cancel: CancellationToken::new(),
        })
    }
}

impl<R, D, P> GestureController<R, D, P>
where
    R: ViewportStateReader,
    D: PointerDriver,
    P: CoordinateTransform,
{
    /// Swaps the projection used to measure distances
    pub fn with_projection<Q: CoordinateTransform>(self, projection: Q) -> GestureController<R, D, Q> {
        GestureController {
            reader: self.reader,
            driver: self.driver,
            projection,
            options: self.options,
            rng: self.rng,
            cancel: self.cancel,
        }
    }

    /// Reseeds the random source so coarse zoom picks and jitter repeat
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn options(&self) -> &NavigatorOptions {
        &self.options
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn projection(&self) -> &P {
        &self.projection
    }

    pub fn into_parts(self) -> (R, D) {
        (self.reader, self.driver)
    }

    /// Reads the viewport state, giving up early if cancelled. A state with
    /// non-finite fields counts as unavailable.
    pub(crate) async fn read_state(&self) -> Result<Option<ViewportState>> {
        if self.cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        let state = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Err(Error::Cancelled),
            state = self.reader.read() => state,
        };
        Ok(state.filter(|state| {
            if !state.is_finite() {
                log::debug!("discarding non-finite viewport state {state:?}");
            }
            state.is_finite()
        }))
    }

    /// Jittered, cancellable pause
    pub(crate) async fn pause(&mut self, base: Duration) -> Result<()> {
        let duration = runtime::jittered(base, self.options.timing.jitter, &mut self.rng);
        runtime::pause(duration, &self.cancel).await
    }

    /// One interpolated drag from the anchor, displaced against `vector` so
    /// the map content (and with it the center) moves by `vector`.
    pub(crate) async fn drag_by(&self, vector: PixelPoint) -> std::result::Result<(), BoxError> {
        let anchor = self.options.anchor.anchor;
        let release = anchor.subtract(&vector);
        let steps = self.options.gesture.interpolation_steps;

        self.driver.move_to(anchor).await?;
        self.driver.press_at(anchor).await?;
        if let Err(e) = self.driver.drag_to(release, steps).await {
            // leave the button up so the next gesture starts clean
            let _ = self.driver.release_at(anchor).await;
            return Err(e);
        }
        self.driver.release_at(release).await
    }

    /// One wheel step at the anchor
    pub(crate) async fn scroll_once(&self, delta_y: f64) -> std::result::Result<(), BoxError> {
        self.driver.move_to(self.options.anchor.anchor).await?;
        self.driver.scroll(0.0, delta_y).await
    }
}

/// Consecutive unavailable reads within one loop
#[derive(Debug, Default)]
pub(crate) struct ReadStreak {
    misses: u32,
}

impl ReadStreak {
    /// Records an unavailable read. Returns true (and warns) exactly when the
    /// streak reaches the warning threshold.
    pub(crate) fn miss(&mut self, context: &str) -> bool {
        self.misses += 1;
        let crossed = self.misses == UNAVAILABLE_READ_WARN_STREAK;
        if crossed {
            log::warn!("{context}: viewport state unavailable for {} reads in a row", self.misses);
        }
        crossed
    }

    pub(crate) fn hit(&mut self) {
        self.misses = 0;
    }
}
