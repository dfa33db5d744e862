use crate::core::geo::PixelPoint;
use serde::{Deserialize, Serialize};

/// Primitive pointer operations issued against a viewport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    /// Pointer moved without a button held
    Move { position: PointerPosition },
    /// Primary button pressed
    Press { position: PointerPosition },
    /// Interpolated motion over `steps` intermediate frames
    Drag { to: PointerPosition, steps: u32 },
    /// Primary button released
    Release { position: PointerPosition },
    /// Wheel scroll; negative `delta_y` zooms in
    Scroll { delta_x: f64, delta_y: f64 },
}

/// Screen position of the pointer, in CSS pixels
pub type PointerPosition = PixelPoint;

/// Which way a wheel step moves the zoom level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollDirection {
    In,
    Out,
}

impl ScrollDirection {
    /// Direction needed to move from `current` towards `target`
    pub fn towards(current: i64, target: i64) -> Option<Self> {
        match target.cmp(&current) {
            std::cmp::Ordering::Greater => Some(Self::In),
            std::cmp::Ordering::Less => Some(Self::Out),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Signed wheel delta for a step of `magnitude`
    pub fn delta_y(self, magnitude: f64) -> f64 {
        match self {
            Self::In => -magnitude.abs(),
            Self::Out => magnitude.abs(),
        }
    }
}

impl PointerEvent {
    pub fn is_scroll(&self) -> bool {
        matches!(self, Self::Scroll { .. })
    }

    pub fn is_release(&self) -> bool {
        matches!(self, Self::Release { .. })
    }
}
