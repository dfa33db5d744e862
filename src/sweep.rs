//! Area sweep
//!
//! Visits a bounded set of points around a center. Ring `r` is sampled only
//! along its top and bottom rows (`dy = -r` and `dy = +r`, every `dx` in
//! `[-r, r]`), so the left and right edges of each ring are never visited.
//! Callers that need full coverage must not rely on this pattern.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::config::SweepConfig;
use crate::core::geo::{GeoPoint, PixelPoint};
use crate::input::{PointerDriver, ViewportStateReader};
use crate::navigation::{ConvergenceOutcome, GestureController};
use crate::traits::{CoordinateTransform, Validate};
use crate::{BoxError, Error, Result};

/// One generated sweep point and the grid offset it came from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepTarget {
    pub ring: u32,
    pub dx: i64,
    pub dy: i64,
    pub point: GeoPoint,
    /// Ground distance from the sweep center, in metres
    pub offset_m: f64,
}

/// Number of points a sweep of `rings` rings visits: `sum 2 * (2r + 1)`
pub fn sweep_point_count(rings: u32) -> usize {
    let rings = rings as usize;
    2 * rings * rings + 4 * rings
}

/// Generates sweep targets in visiting order: ring ascending, then `dx`
/// ascending, then `dy = -r` before `dy = +r`.
pub fn plan_sweep<P: CoordinateTransform + ?Sized>(
    projection: &P,
    config: &SweepConfig,
) -> Vec<SweepTarget> {
    let center = projection.project(&config.center.projectable(), config.zoom);
    let mut targets = Vec::with_capacity(sweep_point_count(config.rings));

    for ring in 1..=config.rings {
        let r = i64::from(ring);
        for dx in -r..=r {
            for dy in [-r, r] {
                let offset = PixelPoint::new(dx as f64, dy as f64).multiply(config.step_px);
                let point = projection.unproject(&center.add(&offset), config.zoom);
                targets.push(SweepTarget {
                    ring,
                    dx,
                    dy,
                    point,
                    offset_m: config.center.distance_to(&point),
                });
            }
        }
    }
    targets
}

/// Called once per visited point, after panning there and before the dwell
#[async_trait]
pub trait SweepCallback: Send {
    /// `index` is 1-based
    async fn on_point(
        &mut self,
        point: GeoPoint,
        index: usize,
        total: usize,
    ) -> std::result::Result<(), BoxError>;
}

#[async_trait]
impl<F> SweepCallback for F
where
    F: FnMut(GeoPoint, usize, usize) -> std::result::Result<(), BoxError> + Send,
{
    async fn on_point(
        &mut self,
        point: GeoPoint,
        index: usize,
        total: usize,
    ) -> std::result::Result<(), BoxError> {
        self(point, index, total)
    }
}

/// Pan result for one sweep point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepVisit {
    pub index: usize,
    pub target: SweepTarget,
    pub outcome: ConvergenceOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    pub total: usize,
    pub visits: Vec<SweepVisit>,
    /// False when cancellation stopped the sweep early
    pub completed: bool,
}

impl SweepReport {
    pub fn converged_count(&self) -> usize {
        self.visits
            .iter()
            .filter(|visit| visit.outcome.is_converged())
            .count()
    }

    /// Visits whose pan ended without converging
    pub fn unconverged(&self) -> impl Iterator<Item = &SweepVisit> {
        self.visits.iter().filter(|visit| !visit.outcome.is_converged())
    }
}

/// Plans and runs area sweeps for one configuration
#[derive(Debug, Clone)]
pub struct AreaSweepPlanner {
    config: SweepConfig,
}

impl AreaSweepPlanner {
    pub fn new(config: SweepConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    pub fn targets<P: CoordinateTransform + ?Sized>(&self, projection: &P) -> Vec<SweepTarget> {
        plan_sweep(projection, &self.config)
    }

    /// Pans to every target in order, calling `callback` at each.
    ///
    /// Panning that does not converge is recorded and the sweep moves on. A
    /// callback error stops the sweep and is returned as
    /// [`Error::Callback`]. Cancellation ends the sweep with
    /// `completed == false`.
    pub async fn run<R, D, P, C>(
        &self,
        controller: &mut GestureController<R, D, P>,
        callback: &mut C,
    ) -> Result<SweepReport>
    where
        R: ViewportStateReader,
        D: PointerDriver,
        P: CoordinateTransform,
        C: SweepCallback + ?Sized,
    {
        let targets = self.targets(controller.projection());
        let total = targets.len();
        let mut report = SweepReport {
            total,
            visits: Vec::with_capacity(total),
            completed: false,
        };
        log::info!(
            "sweep around {} z{}: {} rings, {} points",
            self.config.center,
            self.config.zoom,
            self.config.rings,
            total
        );

        for (offset, target) in targets.into_iter().enumerate() {
            let index = offset + 1;
            let outcome = controller.pan_to(target.point).await;
            log::info!("sweep point {index}/{total} {}: {outcome}", target.point);

            let cancelled = outcome.is_cancelled();
            report.visits.push(SweepVisit {
                index,
                target,
                outcome,
            });
            if cancelled {
                return Ok(report);
            }

            callback
                .on_point(target.point, index, total)
                .await
                .map_err(|source| Error::Callback { index, source })?;

            if controller.pause(self.config.dwell()).await.is_err() {
                return Ok(report);
            }
        }

        report.completed = true;
        Ok(report)
    }
}
