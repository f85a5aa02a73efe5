//! Pausing between visible turtle steps, and interrupting the pause.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Condvar, Mutex};
use tg_config::MAX_THROTTLE_MS;

use crate::error::{Result, TurtleError};

#[derive(Debug, Default)]
struct AbortState {
    aborted: Mutex<bool>,
    wake: Condvar,
}

/// Cloneable handle a host uses to interrupt a turtle's throttle pause.
///
/// An abort is consumed by the pause it interrupts; an abort raised while no
/// pause is running interrupts the next one immediately.
#[derive(Clone, Debug, Default)]
pub struct AbortHandle {
    inner: Arc<AbortState>,
}

impl AbortHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn abort(&self) {
        *self.inner.aborted.lock() = true;
        self.inner.wake.notify_all();
    }

    pub fn is_aborted(&self) -> bool {
        *self.inner.aborted.lock()
    }

    /// Drop a pending abort.
    pub fn reset(&self) {
        *self.inner.aborted.lock() = false;
    }

    fn sleep(&self, duration: Duration) -> Result<()> {
        let mut aborted = self.inner.aborted.lock();
        if !*aborted {
            self.inner.wake.wait_while_for(&mut aborted, |a| !*a, duration);
        }
        if *aborted {
            *aborted = false;
            return Err(TurtleError::Aborted);
        }
        Ok(())
    }
}

/// Delay applied after each visible move or turn.
#[derive(Clone, Debug, Default)]
pub struct Throttle {
    delay: Duration,
    abort: AbortHandle,
}

impl Throttle {
    pub fn new(delay_ms: i64) -> Self {
        let mut throttle = Self::default();
        throttle.set_delay_ms(delay_ms);
        throttle
    }

    /// Negative delays become zero; delays above the cap are capped.
    pub fn set_delay_ms(&mut self, delay_ms: i64) {
        let ms = delay_ms.clamp(0, MAX_THROTTLE_MS as i64) as u64;
        self.delay = Duration::from_millis(ms);
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay.as_millis() as u64
    }

    pub fn is_active(&self) -> bool {
        !self.delay.is_zero()
    }

    pub fn abort_handle(&self) -> AbortHandle {
        self.abort.clone()
    }

    /// Sleep for the configured delay unless aborted first.
    pub fn pause(&self) -> Result<()> {
        if !self.is_active() {
            return Ok(());
        }
        tracing::trace!(delay_ms = self.delay_ms(), "throttle pause");
        self.abort.sleep(self.delay)
    }
}
