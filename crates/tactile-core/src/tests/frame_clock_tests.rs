use crate::Runtime;
use std::cell::Cell;
use std::rc::Rc;

#[test]
fn dropping_frame_registration_cancels_callback() {
    let runtime = Runtime::new();
    let clock = runtime.frame_clock();
    let ran = Rc::new(Cell::new(false));

    let registration = {
        let ran = Rc::clone(&ran);
        clock.with_frame_millis(move |_| ran.set(true))
    };
    assert!(registration.is_active());
    drop(registration);

    runtime.run_frame();
    assert!(!ran.get());
}

#[test]
fn frame_registration_reports_inactive_after_firing() {
    let runtime = Runtime::new();
    let clock = runtime.frame_clock();
    let ran = Rc::new(Cell::new(0));

    let registration = {
        let ran = Rc::clone(&ran);
        clock.with_frame_millis(move |_| ran.set(ran.get() + 1))
    };
    runtime.run_frame();
    assert!(!registration.is_active());
    registration.cancel();
    runtime.run_frame();
    assert_eq!(ran.get(), 1);
}

#[test]
fn timer_registration_cancel_prevents_firing() {
    let runtime = Runtime::new();
    let clock = runtime.frame_clock();
    let ran = Rc::new(Cell::new(false));

    let registration = {
        let ran = Rc::clone(&ran);
        clock.after_millis(300, move || ran.set(true))
    };
    runtime.advance_by(200);
    assert!(registration.is_active());
    registration.cancel();
    runtime.advance_by(200);
    assert!(!ran.get());
    assert_eq!(runtime.pending_timers(), 0);
}

#[test]
fn registrations_on_dead_runtime_are_inactive() {
    let runtime = Runtime::new();
    let clock = runtime.frame_clock();
    drop(runtime);

    let frame = clock.with_frame_millis(|_| {});
    let timer = clock.after_millis(5, || {});
    assert!(!frame.is_active());
    assert!(!timer.is_active());
    assert_eq!(clock.now_millis(), 0);
}
