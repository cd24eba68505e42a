//! Cancellable multi-step choreography.
//!
//! A [`Sequence`] is a list of deferred steps ("on the next frame do X, then
//! 300ms later do Y"). Each step is scheduled only after the previous one
//! ran, and the whole chain shares one [`CancelToken`]. Cancelling or
//! dropping the [`SequenceHandle`] cancels the pending step and everything
//! after it.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use crate::{FrameCallbackRegistration, FrameClock, TimerRegistration};

/// Cooperative cancellation flag shared by the steps of a sequence.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }

    pub fn is_active(&self) -> bool {
        !self.cancelled.get()
    }
}

enum StepTrigger {
    NextFrame,
    After(u64),
}

struct Step {
    trigger: StepTrigger,
    action: Box<dyn FnOnce() + 'static>,
}

enum PendingStep {
    Frame(FrameCallbackRegistration),
    Timer(TimerRegistration),
}

/// Builder for a chain of deferred steps.
#[must_use = "a sequence does nothing until started"]
pub struct Sequence {
    clock: FrameClock,
    label: &'static str,
    steps: VecDeque<Step>,
}

impl Sequence {
    pub fn new(clock: FrameClock, label: &'static str) -> Self {
        Self {
            clock,
            label,
            steps: VecDeque::new(),
        }
    }

    /// Runs `action` on the next animation frame after the previous step.
    pub fn next_frame(mut self, action: impl FnOnce() + 'static) -> Self {
        self.steps.push_back(Step {
            trigger: StepTrigger::NextFrame,
            action: Box::new(action),
        });
        self
    }

    /// Runs `action` `delay_millis` after the previous step.
    pub fn after(mut self, delay_millis: u64, action: impl FnOnce() + 'static) -> Self {
        self.steps.push_back(Step {
            trigger: StepTrigger::After(delay_millis),
            action: Box::new(action),
        });
        self
    }

    pub fn start(self) -> SequenceHandle {
        let state = Rc::new(RefCell::new(SequenceState {
            clock: self.clock,
            label: self.label,
            token: CancelToken::new(),
            steps: self.steps,
            pending: None,
            finished: false,
        }));
        log::trace!(
            "sequence `{}` started with {} steps",
            self.label,
            state.borrow().steps.len()
        );
        schedule_next(&state);
        SequenceHandle { state }
    }
}

struct SequenceState {
    clock: FrameClock,
    label: &'static str,
    token: CancelToken,
    steps: VecDeque<Step>,
    pending: Option<PendingStep>,
    finished: bool,
}

fn schedule_next(state: &Rc<RefCell<SequenceState>>) {
    let (clock, step) = {
        let mut inner = state.borrow_mut();
        if inner.token.is_cancelled() {
            return;
        }
        match inner.steps.pop_front() {
            Some(step) => (inner.clock.clone(), step),
            None => {
                inner.finished = true;
                log::trace!("sequence `{}` finished", inner.label);
                return;
            }
        }
    };

    let Step { trigger, action } = step;
    let weak = Rc::downgrade(state);
    let fire = move || {
        if let Some(state) = weak.upgrade() {
            run_step(&state, action);
        }
    };
    let pending = match trigger {
        StepTrigger::NextFrame => PendingStep::Frame(clock.with_frame_millis(move |_| fire())),
        StepTrigger::After(delay) => PendingStep::Timer(clock.after_millis(delay, fire)),
    };
    state.borrow_mut().pending = Some(pending);
}

fn run_step(state: &Rc<RefCell<SequenceState>>, action: Box<dyn FnOnce() + 'static>) {
    let token = {
        let mut inner = state.borrow_mut();
        inner.pending = None;
        inner.token.clone()
    };
    if token.is_cancelled() {
        return;
    }
    action();
    schedule_next(state);
}

/// Owner of a running [`Sequence`]. Dropping it cancels the remaining steps.
#[must_use = "dropping the handle cancels the sequence"]
pub struct SequenceHandle {
    state: Rc<RefCell<SequenceState>>,
}

impl SequenceHandle {
    pub fn token(&self) -> CancelToken {
        self.state.borrow().token.clone()
    }

    pub fn label(&self) -> &'static str {
        self.state.borrow().label
    }

    /// All steps ran.
    pub fn is_finished(&self) -> bool {
        self.state.borrow().finished
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.borrow().token.is_cancelled()
    }

    /// Steps remain to run and the sequence was not cancelled.
    pub fn is_pending(&self) -> bool {
        let inner = self.state.borrow();
        !inner.finished && inner.token.is_active()
    }

    /// Cancels the pending step and every later one. Idempotent.
    pub fn cancel(&self) {
        let (pending, steps) = {
            let mut inner = self.state.borrow_mut();
            if inner.finished || inner.token.is_cancelled() {
                return;
            }
            inner.token.cancel();
            log::trace!("sequence `{}` cancelled", inner.label);
            (inner.pending.take(), std::mem::take(&mut inner.steps))
        };
        // Dropped outside the borrow: registrations call back into the runtime
        // and step closures may own arbitrary state.
        drop(pending);
        drop(steps);
    }
}

impl Drop for SequenceHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
#[path = "tests/sequence_tests.rs"]
mod tests;
