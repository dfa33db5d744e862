//! In-memory viewport
//!
//! [`SimulatedViewport`] plays both external roles at once: it reports its
//! center and zoom like a [`ViewportStateReader`] and reacts to gestures like
//! a [`PointerDriver`]. Dragging moves the map content with the pointer, so
//! the center moves opposite to the press-to-release displacement. Each
//! scroll event changes the zoom by one level. Clones share state.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::core::geo::{GeoBounds, GeoPoint, PixelPoint};
use crate::core::projection::CoordinateProjector;
use crate::input::{PointerDriver, PointerEvent, PointerPosition, ViewportState, ViewportStateReader};
use crate::BoxError;

#[derive(Debug)]
struct SimState {
    center: GeoPoint,
    zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
    pressed_at: Option<PixelPoint>,
    pointer: PixelPoint,
    /// Reads left that report "unavailable"
    unavailable_reads: usize,
    /// Fraction of each drag that actually moves the map
    drag_efficiency: f64,
    reject_gestures: bool,
    reads: usize,
    events: Vec<PointerEvent>,
}

#[derive(Debug, Clone)]
pub struct SimulatedViewport {
    state: Arc<Mutex<SimState>>,
}

impl SimulatedViewport {
    pub fn new(center: GeoPoint, zoom: f64) -> Self {
        Self {
            state: Arc::new(Mutex::new(SimState {
                center,
                zoom,
                min_zoom: 0.0,
                max_zoom: 21.0,
                pressed_at: None,
                pointer: PixelPoint::default(),
                unavailable_reads: 0,
                drag_efficiency: 1.0,
                reject_gestures: false,
                reads: 0,
                events: Vec::new(),
            })),
        }
    }

    /// The next `count` reads report the state as unavailable
    pub fn with_unavailable_reads(self, count: usize) -> Self {
        self.lock().unavailable_reads = count;
        self
    }

    /// Scales every drag, e.g. 0.5 to model a viewport that lags the pointer
    pub fn with_drag_efficiency(self, efficiency: f64) -> Self {
        self.lock().drag_efficiency = efficiency;
        self
    }

    pub fn with_zoom_limits(self, min_zoom: f64, max_zoom: f64) -> Self {
        {
            let mut state = self.lock();
            state.min_zoom = min_zoom;
            state.max_zoom = max_zoom;
            state.zoom = state.zoom.clamp(min_zoom, max_zoom);
        }
        self
    }

    /// Makes every gesture fail, as a detached page would
    pub fn set_reject_gestures(&self, reject: bool) {
        self.lock().reject_gestures = reject;
    }

    pub fn center(&self) -> GeoPoint {
        self.lock().center
    }

    pub fn zoom(&self) -> f64 {
        self.lock().zoom
    }

    pub fn set_view(&self, center: GeoPoint, zoom: f64) {
        let mut state = self.lock();
        state.center = center;
        state.zoom = zoom.clamp(state.min_zoom, state.max_zoom);
    }

    /// Every primitive received so far
    pub fn events(&self) -> Vec<PointerEvent> {
        self.lock().events.clone()
    }

    pub fn drag_count(&self) -> usize {
        self.lock().events.iter().filter(|e| e.is_release()).count()
    }

    pub fn scroll_count(&self) -> usize {
        self.lock().events.iter().filter(|e| e.is_scroll()).count()
    }

    pub fn reads(&self) -> usize {
        self.lock().reads
    }

    fn lock(&self) -> MutexGuard<'_, SimState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, event: PointerEvent) -> Result<MutexGuard<'_, SimState>, BoxError> {
        let mut state = self.lock();
        if state.reject_gestures {
            return Err("simulated viewport rejected the gesture".into());
        }
        state.events.push(event);
        Ok(state)
    }
}

#[async_trait]
impl ViewportStateReader for SimulatedViewport {
    async fn read(&self) -> Option<ViewportState> {
        let mut state = self.lock();
        state.reads += 1;
        if state.unavailable_reads > 0 {
            state.unavailable_reads -= 1;
            return None;
        }
        Some(ViewportState::new(state.center.lat, state.center.lon, state.zoom))
    }
}

#[async_trait]
impl PointerDriver for SimulatedViewport {
    async fn move_to(&self, position: PointerPosition) -> Result<(), BoxError> {
        let mut state = self.record(PointerEvent::Move { position })?;
        state.pointer = position;
        Ok(())
    }

    async fn press_at(&self, position: PointerPosition) -> Result<(), BoxError> {
        let mut state = self.record(PointerEvent::Press { position })?;
        state.pointer = position;
        state.pressed_at = Some(position);
        Ok(())
    }

    async fn release_at(&self, position: PointerPosition) -> Result<(), BoxError> {
        let mut state = self.record(PointerEvent::Release { position })?;
        state.pointer = position;
        let Some(pressed_at) = state.pressed_at.take() else {
            return Ok(());
        };

        let displacement = position.subtract(&pressed_at).multiply(state.drag_efficiency);
        let center_px = CoordinateProjector::to_pixel(&state.center, state.zoom);
        let moved = CoordinateProjector::to_geo(&center_px.subtract(&displacement), state.zoom);
        state.center = GeoBounds::world().clamp(&moved);
        Ok(())
    }

    async fn drag_to(&self, position: PointerPosition, steps: u32) -> Result<(), BoxError> {
        let mut state = self.record(PointerEvent::Drag { to: position, steps })?;
        state.pointer = position;
        Ok(())
    }

    async fn scroll(&self, delta_x: f64, delta_y: f64) -> Result<(), BoxError> {
        let mut state = self.record(PointerEvent::Scroll { delta_x, delta_y })?;
        let step = if delta_y < 0.0 {
            1.0
        } else if delta_y > 0.0 {
            -1.0
        } else {
            0.0
        };
        state.zoom = (state.zoom + step).clamp(state.min_zoom, state.max_zoom);
        Ok(())
    }
}
