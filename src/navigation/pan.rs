//! Pan convergence: drag towards a geographic target until the remaining
//! pixel distance is within tolerance.

use crate::core::geo::{GeoPoint, PixelPoint};
use crate::input::{PointerDriver, ViewportState, ViewportStateReader};
use crate::navigation::controller::{GestureController, ReadStreak};
use crate::navigation::outcome::ConvergenceOutcome;
use crate::traits::CoordinateTransform;

impl<R, D, P> GestureController<R, D, P>
where
    R: ViewportStateReader,
    D: PointerDriver,
    P: CoordinateTransform,
{
    /// Vector from the observed center to `target`, in pixels at the
    /// observed zoom
    fn pan_vector(&self, state: &ViewportState, target: &GeoPoint) -> PixelPoint {
        let current = self.projection.project(&state.center().projectable(), state.zoom);
        let goal = self.projection.project(target, state.zoom);
        goal.subtract(&current)
    }

    /// Drags the viewport towards `target` at whatever zoom it is on.
    ///
    /// Each iteration reads the state (an unavailable read backs off and still
    /// uses up the iteration), re-projects both points at the current zoom and
    /// issues one drag of at most `max_drag_px`. After the budget is spent a
    /// final read classifies the result without moving.
    pub async fn pan_to(&mut self, target: GeoPoint) -> ConvergenceOutcome {
        let target = target.projectable();
        let tolerance = self.options.gesture.tolerance_px;
        let max_drag = self.options.gesture.max_drag_px;
        let max_iterations = self.options.gesture.max_iterations;

        let mut gestures = 0;
        let mut residual = None;
        let mut streak = ReadStreak::default();

        for iteration in 1..=max_iterations {
            let state = match self.read_state().await {
                Ok(state) => state,
                Err(_) => return ConvergenceOutcome::Cancelled { gestures, residual },
            };
            let Some(state) = state else {
                log::debug!("pan {iteration}/{max_iterations}: viewport state unavailable");
                streak.miss("pan");
                if self.pause(self.options.timing.read_backoff()).await.is_err() {
                    return ConvergenceOutcome::Cancelled { gestures, residual };
                }
                continue;
            };
            streak.hit();

            let vector = self.pan_vector(&state, &target);
            let distance = vector.length();
            residual = Some(distance);

            if distance <= tolerance {
                log::debug!("pan to {target} converged: {distance:.2}px after {gestures} drags");
                return ConvergenceOutcome::Converged {
                    gestures,
                    residual: distance,
                };
            }

            let step = vector.clamp_length(max_drag);
            log::debug!(
                "pan {iteration}/{max_iterations}: {distance:.1}px left, dragging ({:.1}, {:.1})",
                step.x,
                step.y
            );
            if let Err(e) = self.drag_by(step).await {
                log::warn!("pan to {target} failed: {e}");
                return ConvergenceOutcome::Failed {
                    gestures,
                    reason: e.to_string(),
                };
            }
            gestures += 1;

            if self.pause(self.options.timing.settle_delay()).await.is_err() {
                return ConvergenceOutcome::Cancelled { gestures, residual };
            }
        }

        match self.read_state().await {
            Ok(Some(state)) => {
                let distance = self.pan_vector(&state, &target).length();
                if distance <= tolerance {
                    return ConvergenceOutcome::Converged {
                        gestures,
                        residual: distance,
                    };
                }
                residual = Some(distance);
            }
            Ok(None) => {}
            Err(_) => return ConvergenceOutcome::Cancelled { gestures, residual },
        }

        log::warn!(
            "pan to {target} exhausted {max_iterations} iterations, residual {:?}",
            residual
        );
        ConvergenceOutcome::Exhausted { gestures, residual }
    }
}
