use crate::runtime::{FrameCallbackId, RuntimeHandle, TimerId};

/// Scheduling front-end used by controllers.
///
/// Every call returns a registration that cancels the scheduled work when
/// it is cancelled or dropped, so a controller that drops its registrations
/// on teardown can never have a callback fire against a stale target.
#[derive(Clone, Debug)]
pub struct FrameClock {
    runtime: RuntimeHandle,
}

impl FrameClock {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self { runtime }
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.clone()
    }

    pub fn now_millis(&self) -> u64 {
        self.runtime.now_millis().unwrap_or(0)
    }

    /// Runs `callback` with the frame time before the next repaint.
    pub fn with_frame_millis(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        match self.runtime.register_frame_callback(callback) {
            Some(id) => FrameCallbackRegistration {
                runtime: self.runtime.clone(),
                id: Some(id),
            },
            None => {
                log::warn!("frame callback requested on a dropped runtime");
                FrameCallbackRegistration::inactive(self.runtime.clone())
            }
        }
    }

    /// Runs `callback` once, no earlier than `delay_millis` from now.
    pub fn after_millis(
        &self,
        delay_millis: u64,
        callback: impl FnOnce() + 'static,
    ) -> TimerRegistration {
        match self.runtime.set_timeout(delay_millis, callback) {
            Some(id) => TimerRegistration {
                runtime: self.runtime.clone(),
                id: Some(id),
            },
            None => {
                log::warn!("timer requested on a dropped runtime");
                TimerRegistration {
                    runtime: self.runtime.clone(),
                    id: None,
                }
            }
        }
    }
}

#[must_use = "dropping the registration cancels the frame callback"]
pub struct FrameCallbackRegistration {
    runtime: RuntimeHandle,
    id: Option<FrameCallbackId>,
}

impl FrameCallbackRegistration {
    fn inactive(runtime: RuntimeHandle) -> Self {
        Self { runtime, id: None }
    }

    /// The callback is still queued.
    pub fn is_active(&self) -> bool {
        self.id
            .map(|id| self.runtime.is_frame_callback_pending(id))
            .unwrap_or(false)
    }

    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_frame_callback(id);
        }
    }
}

impl Drop for FrameCallbackRegistration {
    fn drop(&mut self) {
        self.release();
    }
}

#[must_use = "dropping the registration cancels the timer"]
pub struct TimerRegistration {
    runtime: RuntimeHandle,
    id: Option<TimerId>,
}

impl TimerRegistration {
    pub fn is_active(&self) -> bool {
        self.id
            .map(|id| self.runtime.is_timer_pending(id))
            .unwrap_or(false)
    }

    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_timeout(id);
        }
    }
}

impl Drop for TimerRegistration {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
#[path = "tests/frame_clock_tests.rs"]
mod tests;
