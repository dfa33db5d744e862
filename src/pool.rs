//! Bounded pool of interchangeable viewports
//!
//! Each concurrent navigation task acquires a viewport, owns it exclusively
//! while its loops run, and hands it back by dropping the guard. Nothing is
//! shared between viewports, so independent tasks never contend beyond the
//! acquire itself.

use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex};

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::{Error, Result};

pub struct ViewportPool<V> {
    idle: Arc<Mutex<Vec<V>>>,
    permits: Arc<Semaphore>,
    capacity: usize,
}

impl<V: Send + 'static> ViewportPool<V> {
    pub fn new(viewports: Vec<V>) -> Result<Self> {
        if viewports.is_empty() {
            return Err(Error::InvalidConfig(
                "viewport pool needs at least one viewport".to_string(),
            ));
        }
        let capacity = viewports.len();
        Ok(Self {
            idle: Arc::new(Mutex::new(viewports)),
            permits: Arc::new(Semaphore::new(capacity)),
            capacity,
        })
    }

    /// Waits until a viewport is free
    pub async fn acquire(&self) -> Result<PooledViewport<V>> {
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| Error::PoolClosed)?;
        self.checkout(permit)
    }

    /// Takes a viewport only if one is free right now
    pub fn try_acquire(&self) -> Option<PooledViewport<V>> {
        let permit = self.permits.clone().try_acquire_owned().ok()?;
        self.checkout(permit).ok()
    }

    fn checkout(&self, permit: OwnedSemaphorePermit) -> Result<PooledViewport<V>> {
        let viewport = lock(&self.idle).pop().ok_or(Error::PoolInconsistent)?;
        log::debug!("viewport acquired, {} idle", self.available());
        Ok(PooledViewport {
            viewport: Some(viewport),
            idle: Arc::clone(&self.idle),
            _permit: permit,
        })
    }

    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Fails every pending and future `acquire`. Checked-out viewports still
    /// return to the pool when dropped.
    pub fn close(&self) {
        self.permits.close();
    }
}

fn lock<V>(idle: &Mutex<Vec<V>>) -> std::sync::MutexGuard<'_, Vec<V>> {
    idle.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Exclusive handle to a pooled viewport; returns it to the pool on drop
pub struct PooledViewport<V> {
    viewport: Option<V>,
    idle: Arc<Mutex<Vec<V>>>,
    // released after the viewport is back in `idle`
    _permit: OwnedSemaphorePermit,
}

impl<V> Deref for PooledViewport<V> {
    type Target = V;

    fn deref(&self) -> &V {
        // only `None` during drop
        self.viewport.as_ref().unwrap_or_else(|| unreachable!())
    }
}

impl<V> DerefMut for PooledViewport<V> {
    fn deref_mut(&mut self) -> &mut V {
        self.viewport.as_mut().unwrap_or_else(|| unreachable!())
    }
}

impl<V> Drop for PooledViewport<V> {
    fn drop(&mut self) {
        if let Some(viewport) = self.viewport.take() {
            lock(&self.idle).push(viewport);
        }
    }
}
