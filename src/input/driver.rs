//! Pointer driver seam
//!
//! A [`PointerDriver`] executes primitive gestures against one viewport. Each
//! call is complete when its future resolves.

use async_trait::async_trait;

use crate::input::events::PointerPosition;
use crate::BoxError;

#[async_trait]
pub trait PointerDriver: Send + Sync {
    async fn move_to(&self, position: PointerPosition) -> Result<(), BoxError>;

    async fn press_at(&self, position: PointerPosition) -> Result<(), BoxError>;

    async fn release_at(&self, position: PointerPosition) -> Result<(), BoxError>;

    /// Interpolated motion to `position` over `steps` intermediate frames
    async fn drag_to(&self, position: PointerPosition, steps: u32) -> Result<(), BoxError>;

    async fn scroll(&self, delta_x: f64, delta_y: f64) -> Result<(), BoxError>;
}

#[async_trait]
impl<T: PointerDriver + ?Sized> PointerDriver for std::sync::Arc<T> {
    async fn move_to(&self, position: PointerPosition) -> Result<(), BoxError> {
        (**self).move_to(position).await
    }

    async fn press_at(&self, position: PointerPosition) -> Result<(), BoxError> {
        (**self).press_at(position).await
    }

    async fn release_at(&self, position: PointerPosition) -> Result<(), BoxError> {
        (**self).release_at(position).await
    }

    async fn drag_to(&self, position: PointerPosition, steps: u32) -> Result<(), BoxError> {
        (**self).drag_to(position, steps).await
    }

    async fn scroll(&self, delta_x: f64, delta_y: f64) -> Result<(), BoxError> {
        (**self).scroll(delta_x, delta_y).await
    }
}
