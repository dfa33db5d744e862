use serde::{Deserialize, Serialize};

/// How a convergence loop ended.
///
/// `residual` is the remaining distance to the target: pixels for panning,
/// zoom levels for zoom stepping. `gestures` counts drags or scrolls issued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConvergenceOutcome {
    /// Within tolerance (pan) or on the target level (zoom)
    Converged { gestures: u32, residual: f64 },
    /// Iteration budget spent. `residual` is the last measured distance, if
    /// any read succeeded.
    Exhausted { gestures: u32, residual: Option<f64> },
    /// Cancellation token fired between gestures
    Cancelled { gestures: u32, residual: Option<f64> },
    /// The pointer driver rejected a gesture
    Failed { gestures: u32, reason: String },
}

impl ConvergenceOutcome {
    pub fn is_converged(&self) -> bool {
        matches!(self, Self::Converged { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }

    pub fn gestures(&self) -> u32 {
        match self {
            Self::Converged { gestures, .. }
            | Self::Exhausted { gestures, .. }
            | Self::Cancelled { gestures, .. }
            | Self::Failed { gestures, .. } => *gestures,
        }
    }

    pub fn residual(&self) -> Option<f64> {
        match self {
            Self::Converged { residual, .. } => Some(*residual),
            Self::Exhausted { residual, .. } | Self::Cancelled { residual, .. } => *residual,
            Self::Failed { .. } => None,
        }
    }

    /// Placeholder for a phase that never started
    pub(crate) fn skipped() -> Self {
        Self::Cancelled {
            gestures: 0,
            residual: None,
        }
    }
}

impl std::fmt::Display for ConvergenceOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Converged { gestures, residual } => {
                write!(f, "converged after {gestures} gestures (residual {residual:.2})")
            }
            Self::Exhausted { gestures, residual } => match residual {
                Some(r) => write!(f, "exhausted after {gestures} gestures (residual {r:.2})"),
                None => write!(f, "exhausted after {gestures} gestures (state never read)"),
            },
            Self::Cancelled { gestures, .. } => write!(f, "cancelled after {gestures} gestures"),
            Self::Failed { gestures, reason } => {
                write!(f, "failed after {gestures} gestures: {reason}")
            }
        }
    }
}
