//! Suspension points for the navigation loops
//!
//! Every pause a loop takes goes through [`pause`], so a cancellation token
//! can stop the loop between gestures. Gestures themselves are never
//! interrupted.

use std::time::Duration;

use rand::Rng;
use tokio_util::sync::CancellationToken;

use crate::{Error, Result};

/// Sleeps for `duration` unless `cancel` fires first
pub async fn pause(duration: Duration, cancel: &CancellationToken) -> Result<()> {
    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }
    if duration.is_zero() {
        return Ok(());
    }
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(Error::Cancelled),
        _ = tokio::time::sleep(duration) => Ok(()),
    }
}

/// Scales `base` by a random factor in `[1 - jitter, 1 + jitter]`.
/// A jitter of zero returns `base` unchanged without touching the rng.
pub fn jittered<R: Rng + ?Sized>(base: Duration, jitter: f64, rng: &mut R) -> Duration {
    if jitter <= 0.0 || base.is_zero() {
        return base;
    }
    let factor = rng.gen_range((1.0 - jitter)..=(1.0 + jitter));
    base.mul_f64(factor.max(0.0))
}

/// Uniformly random duration in `[min, max]`. Returns `min` when the range is
/// empty.
pub fn random_delay<R: Rng + ?Sized>(min: Duration, max: Duration, rng: &mut R) -> Duration {
    if max <= min {
        return min;
    }
    Duration::from_secs_f64(rng.gen_range(min.as_secs_f64()..=max.as_secs_f64()))
}
