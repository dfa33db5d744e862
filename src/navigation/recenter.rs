//! Multi-phase recenter: zoom out to a coarse level, pan there, zoom to the
//! target level, pan again. Every motion stays small, and the path reads as
//! "look around, then refine" instead of one jump.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::CoarseZoom;
use crate::core::geo::GeoPoint;
use crate::input::{PointerDriver, ViewportStateReader};
use crate::navigation::controller::GestureController;
use crate::navigation::outcome::ConvergenceOutcome;
use crate::traits::CoordinateTransform;

/// The four recenter phases, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecenterPhase {
    CoarseZoom,
    CoarsePan,
    FineZoom,
    FinePan,
}

/// Result of each recenter phase. A phase that did not converge does not stop
/// the phases after it; only cancellation does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecenterReport {
    pub target: GeoPoint,
    pub zoom: u8,
    pub coarse_zoom: u8,
    pub coarse_zoom_phase: ConvergenceOutcome,
    pub coarse_pan_phase: ConvergenceOutcome,
    pub fine_zoom_phase: ConvergenceOutcome,
    pub fine_pan_phase: ConvergenceOutcome,
}

impl RecenterReport {
    /// True when the viewport ended on the target level and within tolerance
    pub fn is_converged(&self) -> bool {
        self.fine_zoom_phase.is_converged() && self.fine_pan_phase.is_converged()
    }

    pub fn is_cancelled(&self) -> bool {
        self.phases().iter().any(|(_, outcome)| outcome.is_cancelled())
    }

    pub fn phases(&self) -> [(RecenterPhase, &ConvergenceOutcome); 4] {
        [
            (RecenterPhase::CoarseZoom, &self.coarse_zoom_phase),
            (RecenterPhase::CoarsePan, &self.coarse_pan_phase),
            (RecenterPhase::FineZoom, &self.fine_zoom_phase),
            (RecenterPhase::FinePan, &self.fine_pan_phase),
        ]
    }

    pub fn total_gestures(&self) -> u32 {
        self.phases().iter().map(|(_, outcome)| outcome.gestures()).sum()
    }
}

/// Picks the coarse level for a recenter to `target`. Never finer than the
/// target itself.
pub fn choose_coarse_zoom<G: Rng + ?Sized>(policy: &CoarseZoom, target: u8, rng: &mut G) -> u8 {
    let level = match *policy {
        CoarseZoom::Band { min, max } => rng.gen_range(min..=max),
        CoarseZoom::FixedOffset { offset, floor } => target.saturating_sub(offset).max(floor),
    };
    level.min(target)
}

impl<R, D, P> GestureController<R, D, P>
where
    R: ViewportStateReader,
    D: PointerDriver,
    P: CoordinateTransform,
{
    /// Moves the viewport to `target` at integer zoom `zoom` in four phases
    pub async fn recenter(&mut self, target: GeoPoint, zoom: u8) -> RecenterReport {
        let coarse_zoom = choose_coarse_zoom(&self.options.recenter.coarse, zoom, &mut self.rng);
        log::info!("recenter to {target} z{zoom} via z{coarse_zoom}");

        let mut report = RecenterReport {
            target,
            zoom,
            coarse_zoom,
            coarse_zoom_phase: ConvergenceOutcome::skipped(),
            coarse_pan_phase: ConvergenceOutcome::skipped(),
            fine_zoom_phase: ConvergenceOutcome::skipped(),
            fine_pan_phase: ConvergenceOutcome::skipped(),
        };

        report.coarse_zoom_phase = self.zoom_to(coarse_zoom).await;
        if report.coarse_zoom_phase.is_cancelled() {
            return report;
        }
        report.coarse_pan_phase = self.pan_to(target).await;
        if report.coarse_pan_phase.is_cancelled() {
            return report;
        }
        report.fine_zoom_phase = self.zoom_to(zoom).await;
        if report.fine_zoom_phase.is_cancelled() {
            return report;
        }
        report.fine_pan_phase = self.pan_to(target).await;

        for (phase, outcome) in report.phases() {
            if !outcome.is_converged() {
                log::warn!("recenter phase {phase:?} {outcome}");
            }
        }
        log::info!(
            "recenter to {target} finished ({} gestures, converged: {})",
            report.total_gestures(),
            report.is_converged()
        );
        report
    }
}
