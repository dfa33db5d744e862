//! Pointer activity between navigation goals
//!
//! None of these operations read the viewport. They draw from the
//! controller's seeded random source and sleep through [`runtime::pause`],
//! so a cancellation token stops them between primitives.

use std::time::Duration;

use rand::Rng;
use tokio::time::Instant;

use crate::core::geo::PixelPoint;
use crate::input::{PointerDriver, ViewportStateReader};
use crate::navigation::controller::GestureController;
use crate::runtime;
use crate::traits::CoordinateTransform;
use crate::{Error, Result};

impl<R, D, P> GestureController<R, D, P>
where
    R: ViewportStateReader,
    D: PointerDriver,
    P: CoordinateTransform,
{
    /// Moves the pointer to random points inside the configured wander
    /// region for at least `duration`, pausing a random hop time after each
    /// move. Returns the number of moves.
    pub async fn wander(&mut self, duration: Duration) -> Result<usize> {
        let idle = self.options.idle.clone();
        let (hop_min, hop_max) = idle.hop_range();
        let started = Instant::now();
        let mut moves = 0;

        while started.elapsed() < duration {
            let position = PixelPoint::new(
                self.rng.gen_range(idle.wander_min.x..=idle.wander_max.x),
                self.rng.gen_range(idle.wander_min.y..=idle.wander_max.y),
            );
            self.driver
                .move_to(position)
                .await
                .map_err(|source| Error::Driver { source })?;
            moves += 1;

            let hop = runtime::random_delay(hop_min, hop_max, &mut self.rng);
            runtime::pause(hop, &self.cancel).await?;
        }

        log::debug!("wandered {moves} moves over {:?}", started.elapsed());
        Ok(moves)
    }

    /// Scrolls by `delta_y` (positive is down) split into equal wheel events,
    /// spreading them evenly over `duration`. Returns the wheel events sent.
    pub async fn scroll_paced(&mut self, delta_y: f64, duration: Duration) -> Result<u32> {
        let steps = self.options.idle.scroll_steps;
        let step = delta_y / f64::from(steps);
        let gap = duration / steps;

        for _ in 0..steps {
            if self.cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }
            self.driver
                .scroll(0.0, step)
                .await
                .map_err(|source| Error::Driver { source })?;
            runtime::pause(gap, &self.cancel).await?;
        }
        Ok(steps)
    }

    /// Waits a random think time from the configured range and returns it
    pub async fn think(&mut self) -> Result<Duration> {
        let (min, max) = self.options.idle.think_range();
        let delay = runtime::random_delay(min, max, &mut self.rng);
        log::debug!("thinking for {delay:?}");
        runtime::pause(delay, &self.cancel).await?;
        Ok(delay)
    }
}
