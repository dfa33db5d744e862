//! Zoom stepping: one fixed-size wheel step per attempt until the rounded
//! zoom equals the target level.

use crate::input::{PointerDriver, ScrollDirection, ViewportStateReader};
use crate::navigation::controller::{GestureController, ReadStreak};
use crate::navigation::outcome::ConvergenceOutcome;
use crate::traits::CoordinateTransform;

impl<R, D, P> GestureController<R, D, P>
where
    R: ViewportStateReader,
    D: PointerDriver,
    P: CoordinateTransform,
{
    /// Steps the viewport to integer zoom `target`. The wheel delta is the
    /// same regardless of how far off the current level is.
    pub async fn zoom_to(&mut self, target: u8) -> ConvergenceOutcome {
        let target_level = i64::from(target);
        let max_attempts = self.options.zoom.max_attempts;
        let magnitude = self.options.anchor.scroll_delta;

        let mut gestures = 0;
        let mut residual = None;
        let mut streak = ReadStreak::default();

        for attempt in 1..=max_attempts {
            let state = match self.read_state().await {
                Ok(state) => state,
                Err(_) => return ConvergenceOutcome::Cancelled { gestures, residual },
            };
            let Some(state) = state else {
                log::debug!("zoom {attempt}/{max_attempts}: viewport state unavailable");
                streak.miss("zoom");
                if self.pause(self.options.timing.read_backoff()).await.is_err() {
                    return ConvergenceOutcome::Cancelled { gestures, residual };
                }
                continue;
            };
            streak.hit();

            let level = state.zoom_level();
            residual = Some((target_level - level).abs() as f64);

            let Some(direction) = ScrollDirection::towards(level, target_level) else {
                log::debug!("zoom reached level {target} after {gestures} steps");
                return ConvergenceOutcome::Converged {
                    gestures,
                    residual: 0.0,
                };
            };

            log::debug!("zoom {attempt}/{max_attempts}: level {level} -> {target}, {direction:?}");
            if let Err(e) = self.scroll_once(direction.delta_y(magnitude)).await {
                log::warn!("zoom to {target} failed: {e}");
                return ConvergenceOutcome::Failed {
                    gestures,
                    reason: e.to_string(),
                };
            }
            gestures += 1;

            if self.pause(self.options.zoom.step_delay()).await.is_err() {
                return ConvergenceOutcome::Cancelled { gestures, residual };
            }
        }

        match self.read_state().await {
            Ok(Some(state)) => {
                let remaining = (target_level - state.zoom_level()).abs();
                if remaining == 0 {
                    return ConvergenceOutcome::Converged {
                        gestures,
                        residual: 0.0,
                    };
                }
                residual = Some(remaining as f64);
            }
            Ok(None) => {}
            Err(_) => return ConvergenceOutcome::Cancelled { gestures, residual },
        }

        log::warn!("zoom to {target} exhausted {max_attempts} attempts, residual {residual:?}");
        ConvergenceOutcome::Exhausted { gestures, residual }
    }
}
