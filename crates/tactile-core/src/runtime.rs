use rustc_hash::FxHashMap;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::platform::Clock;
use crate::FrameClock;

pub type FrameCallbackId = u64;

/// Identifier of a one-shot delay timer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<Box<dyn FnOnce(u64) + 'static>>,
}

/// Timers are keyed by `(due_millis, id)` so iteration order is expiry order,
/// with registration order breaking ties.
type TimerQueue = BTreeMap<(u64, u64), Box<dyn FnOnce() + 'static>>;

struct RuntimeInner {
    now_millis: Cell<u64>,
    frame_callbacks: RefCell<VecDeque<FrameCallbackEntry>>,
    next_frame_callback_id: Cell<u64>,
    frames_run: Cell<u64>,
    timers: RefCell<TimerQueue>,
    timer_due: RefCell<FxHashMap<u64, u64>>,
    next_timer_id: Cell<u64>,
}

impl RuntimeInner {
    fn new(start_millis: u64) -> Self {
        Self {
            now_millis: Cell::new(start_millis),
            frame_callbacks: RefCell::new(VecDeque::new()),
            next_frame_callback_id: Cell::new(1),
            frames_run: Cell::new(0),
            timers: RefCell::new(BTreeMap::new()),
            timer_due: RefCell::new(FxHashMap::default()),
            next_timer_id: Cell::new(1),
        }
    }

    fn register_frame_callback(&self, callback: Box<dyn FnOnce(u64) + 'static>) -> FrameCallbackId {
        let id = self.next_frame_callback_id.get();
        self.next_frame_callback_id.set(id + 1);
        self.frame_callbacks
            .borrow_mut()
            .push_back(FrameCallbackEntry {
                id,
                callback: Some(callback),
            });
        id
    }

    fn cancel_frame_callback(&self, id: FrameCallbackId) -> bool {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        if let Some(index) = callbacks.iter().position(|entry| entry.id == id) {
            callbacks.remove(index);
            true
        } else {
            false
        }
    }

    fn has_frame_callback(&self, id: FrameCallbackId) -> bool {
        self.frame_callbacks
            .borrow()
            .iter()
            .any(|entry| entry.id == id)
    }

    fn run_frame(&self) -> usize {
        // Only callbacks queued before this frame started are eligible; anything
        // registered while draining waits for the next frame.
        let last_eligible = self.next_frame_callback_id.get() - 1;
        let frame_time = self.now_millis.get();
        let mut ran = 0;
        loop {
            let callback = {
                let mut callbacks = self.frame_callbacks.borrow_mut();
                let eligible = callbacks
                    .front()
                    .is_some_and(|entry| entry.id <= last_eligible);
                if !eligible {
                    break;
                }
                callbacks
                    .pop_front()
                    .and_then(|mut entry| entry.callback.take())
            };
            if let Some(callback) = callback {
                callback(frame_time);
                ran += 1;
            }
        }
        self.frames_run.set(self.frames_run.get() + 1);
        log::trace!("frame at {frame_time}ms ran {ran} callbacks");
        ran
    }

    fn set_timeout(&self, delay_millis: u64, callback: Box<dyn FnOnce() + 'static>) -> TimerId {
        let id = self.next_timer_id.get();
        self.next_timer_id.set(id + 1);
        let due = self.now_millis.get().saturating_add(delay_millis);
        self.timers.borrow_mut().insert((due, id), callback);
        self.timer_due.borrow_mut().insert(id, due);
        TimerId(id)
    }

    fn cancel_timeout(&self, id: TimerId) -> bool {
        let Some(due) = self.timer_due.borrow_mut().remove(&id.0) else {
            return false;
        };
        self.timers.borrow_mut().remove(&(due, id.0)).is_some()
    }

    fn has_timer(&self, id: TimerId) -> bool {
        self.timer_due.borrow().contains_key(&id.0)
    }

    fn advance_to(&self, target_millis: u64) -> usize {
        let target = target_millis.max(self.now_millis.get());
        let mut fired = 0;
        loop {
            let next = {
                let mut timers = self.timers.borrow_mut();
                let due_now = timers
                    .first_key_value()
                    .is_some_and(|(&(due, _), _)| due <= target);
                if due_now {
                    timers.pop_first()
                } else {
                    None
                }
            };
            let Some(((due, id), callback)) = next else {
                break;
            };
            self.timer_due.borrow_mut().remove(&id);
            if due > self.now_millis.get() {
                self.now_millis.set(due);
            }
            callback();
            fired += 1;
        }
        self.now_millis.set(target);
        fired
    }

    fn next_timer_due(&self) -> Option<u64> {
        self.timers
            .borrow()
            .first_key_value()
            .map(|(&(due, _), _)| due)
    }
}

/// Single-threaded scheduler for animation-frame callbacks and delay timers.
///
/// The runtime never reads wall-clock time on its own: the host advances it
/// (directly, or from a [`Clock`] via [`Runtime::pump`]) and decides when a
/// frame is painted.
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// Creates a runtime whose clock starts at `start_millis`.
    pub fn starting_at(start_millis: u64) -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new(start_millis)),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.handle())
    }

    pub fn now_millis(&self) -> u64 {
        self.inner.now_millis.get()
    }

    /// Runs every frame callback queued before this call, in FIFO order.
    /// Returns the number of callbacks that ran.
    pub fn run_frame(&self) -> usize {
        self.inner.run_frame()
    }

    /// Moves the clock forward to `target_millis`, firing due timers in
    /// expiry order. The clock reads each timer's due time while its callback
    /// runs. Returns the number of timers fired.
    pub fn advance_to(&self, target_millis: u64) -> usize {
        self.inner.advance_to(target_millis)
    }

    pub fn advance_by(&self, delta_millis: u64) -> usize {
        let target = self.now_millis().saturating_add(delta_millis);
        self.inner.advance_to(target)
    }

    /// Catches the runtime up with `clock`.
    pub fn pump(&self, clock: &impl Clock) -> usize {
        self.inner.advance_to(clock.now_millis())
    }

    pub fn has_frame_callbacks(&self) -> bool {
        !self.inner.frame_callbacks.borrow().is_empty()
    }

    pub fn pending_timers(&self) -> usize {
        self.inner.timers.borrow().len()
    }

    pub fn next_timer_due(&self) -> Option<u64> {
        self.inner.next_timer_due()
    }

    pub fn frames_run(&self) -> u64 {
        self.inner.frames_run.get()
    }

    /// No frame callbacks and no timers are pending.
    pub fn is_idle(&self) -> bool {
        !self.has_frame_callbacks() && self.pending_timers() == 0
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("now_millis", &self.now_millis())
            .field("frame_callbacks", &self.inner.frame_callbacks.borrow().len())
            .field("pending_timers", &self.pending_timers())
            .finish()
    }
}

/// Weak handle to a [`Runtime`]. Scheduling through a handle whose runtime
/// has been dropped does nothing.
#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
}

impl RuntimeHandle {
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    pub fn now_millis(&self) -> Option<u64> {
        self.inner.upgrade().map(|inner| inner.now_millis.get())
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }

    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        self.inner
            .upgrade()
            .map(|inner| inner.register_frame_callback(Box::new(callback)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.cancel_frame_callback(id))
            .unwrap_or(false)
    }

    pub fn is_frame_callback_pending(&self, id: FrameCallbackId) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.has_frame_callback(id))
            .unwrap_or(false)
    }

    pub fn set_timeout(
        &self,
        delay_millis: u64,
        callback: impl FnOnce() + 'static,
    ) -> Option<TimerId> {
        self.inner
            .upgrade()
            .map(|inner| inner.set_timeout(delay_millis, Box::new(callback)))
    }

    pub fn cancel_timeout(&self, id: TimerId) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.cancel_timeout(id))
            .unwrap_or(false)
    }

    pub fn is_timer_pending(&self, id: TimerId) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.has_timer(id))
            .unwrap_or(false)
    }
}

impl fmt::Debug for RuntimeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeHandle")
            .field("alive", &self.is_alive())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
