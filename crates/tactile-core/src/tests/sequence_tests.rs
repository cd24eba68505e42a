use super::*;
use crate::Runtime;
use std::cell::RefCell;

fn push(log: &Rc<RefCell<Vec<&'static str>>>, entry: &'static str) -> impl FnOnce() + 'static {
    let log = Rc::clone(log);
    move || log.borrow_mut().push(entry)
}

#[test]
fn steps_run_in_order_each_after_the_previous() {
    let runtime = Runtime::new();
    let log = Rc::new(RefCell::new(Vec::new()));

    let handle = Sequence::new(runtime.frame_clock(), "test")
        .next_frame(push(&log, "frame"))
        .after(300, push(&log, "delay"))
        .start();

    // The delay is measured from the frame step, so time alone does nothing.
    runtime.advance_by(500);
    assert!(log.borrow().is_empty());

    runtime.run_frame();
    assert_eq!(*log.borrow(), vec!["frame"]);
    assert!(handle.is_pending());

    runtime.advance_by(299);
    assert_eq!(log.borrow().len(), 1);
    runtime.advance_by(1);
    assert_eq!(*log.borrow(), vec!["frame", "delay"]);
    assert!(handle.is_finished());
    assert!(!handle.is_pending());
    assert!(runtime.is_idle());
}

#[test]
fn cancel_stops_pending_and_later_steps() {
    let runtime = Runtime::new();
    let log = Rc::new(RefCell::new(Vec::new()));

    let handle = Sequence::new(runtime.frame_clock(), "test")
        .after(100, push(&log, "first"))
        .after(100, push(&log, "second"))
        .start();

    runtime.advance_by(100);
    assert_eq!(*log.borrow(), vec!["first"]);

    let token = handle.token();
    handle.cancel();
    handle.cancel();
    assert!(token.is_cancelled());
    assert!(handle.is_cancelled());
    assert!(runtime.is_idle());

    runtime.advance_by(1_000);
    assert_eq!(*log.borrow(), vec!["first"]);
}

#[test]
fn dropping_the_handle_cancels_the_sequence() {
    let runtime = Runtime::new();
    let log = Rc::new(RefCell::new(Vec::new()));

    let handle = Sequence::new(runtime.frame_clock(), "test")
        .next_frame(push(&log, "frame"))
        .start();
    drop(handle);

    runtime.run_frame();
    assert!(log.borrow().is_empty());
    assert!(runtime.is_idle());
}

#[test]
fn a_step_may_cancel_its_own_sequence() {
    let runtime = Runtime::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let slot: Rc<RefCell<Option<SequenceHandle>>> = Rc::new(RefCell::new(None));

    let handle = {
        let slot = Rc::clone(&slot);
        let log_first = Rc::clone(&log);
        Sequence::new(runtime.frame_clock(), "self-cancel")
            .after(10, move || {
                log_first.borrow_mut().push("first");
                if let Some(handle) = slot.borrow_mut().take() {
                    drop(handle);
                }
            })
            .after(10, push(&log, "second"))
            .start()
    };
    *slot.borrow_mut() = Some(handle);

    runtime.advance_by(100);
    assert_eq!(*log.borrow(), vec!["first"]);
    assert!(runtime.is_idle());
}

#[test]
fn empty_sequence_finishes_immediately() {
    let runtime = Runtime::new();
    let handle = Sequence::new(runtime.frame_clock(), "empty").start();
    assert!(handle.is_finished());
    assert_eq!(handle.label(), "empty");
}
