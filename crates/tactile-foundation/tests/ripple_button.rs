use std::cell::RefCell;
use std::rc::Rc;

use tactile_core::Lifecycle;
use tactile_foundation::{PointerEvent, RippleButton, RIPPLE_BUTTON_COLOR};
use tactile_testing::GestureRobot;
use tactile_ui_graphics::Rect;

#[test]
fn click_shows_ripple_then_runs_callback() {
    let mut robot = GestureRobot::new();
    let element = robot.add_element(Rect::new(20.0, 20.0, 160.0, 48.0));
    let probe = element.probe.clone();
    let log = Rc::new(RefCell::new(Vec::new()));

    let callback_log = Rc::clone(&log);
    let callback_probe = probe.clone();
    let mut button = RippleButton::new(
        robot.dispatcher(),
        element.id,
        robot.clock(),
        element.surface,
        move || {
            callback_log
                .borrow_mut()
                .push(callback_probe.layer_count());
        },
    );
    button.on_mount();

    robot.click(60.0, 30.0);
    // The ripple layer already exists when the callback runs.
    assert_eq!(*log.borrow(), vec![1]);

    let (_, layer) = probe.layers()[0];
    assert_eq!(layer.color, RIPPLE_BUTTON_COLOR);
    assert_eq!(button.ripple().active_count(), 1);
}

#[test]
fn unmounted_button_ignores_clicks() {
    let mut robot = GestureRobot::new();
    let element = robot.add_element(Rect::new(0.0, 0.0, 100.0, 40.0));
    let clicks = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&clicks);
    let mut button = RippleButton::new(
        robot.dispatcher(),
        element.id,
        robot.clock(),
        element.surface,
        move || *counter.borrow_mut() += 1,
    );

    button.on_mount();
    robot.click(10.0, 10.0);
    button.on_unmount();
    button.on_unmount();
    robot.click(10.0, 10.0);

    assert_eq!(*clicks.borrow(), 1);
    assert_eq!(robot.dispatcher().listener_count(), 0);
    assert_eq!(element.probe.layer_count(), 0);
}

#[test]
fn press_released_elsewhere_does_not_click() {
    let mut robot = GestureRobot::new();
    let element = robot.add_element(Rect::new(0.0, 0.0, 100.0, 40.0));
    let clicks = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&clicks);
    let mut button = RippleButton::new(
        robot.dispatcher(),
        element.id,
        robot.clock(),
        element.surface,
        move || *counter.borrow_mut() += 1,
    );
    button.on_mount();

    robot.press(10.0, 10.0);
    robot.release(300.0, 300.0);
    assert_eq!(*clicks.borrow(), 0);
    assert_eq!(element.probe.inserted_count(), 0);
}

#[test]
fn detached_button_forwards_nothing() {
    let mut robot = GestureRobot::new();
    let element = robot.add_element(Rect::new(0.0, 0.0, 100.0, 40.0));
    element.probe.detach();
    let clicks = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&clicks);
    let mut button = RippleButton::new(
        robot.dispatcher(),
        element.id,
        robot.clock(),
        element.surface,
        move || *counter.borrow_mut() += 1,
    );

    button.on_mount();
    assert!(!button.ripple().is_bound());
    assert_eq!(robot.dispatcher().listener_count(), 0);

    robot
        .dispatcher()
        .dispatch(Some(element.id), PointerEvent::click(10.0, 10.0));
    assert_eq!(*clicks.borrow(), 0);
}

#[test]
fn remount_after_unmount_stays_inert() {
    let mut robot = GestureRobot::new();
    let element = robot.add_element(Rect::new(0.0, 0.0, 100.0, 40.0));
    let clicks = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&clicks);
    let mut button = RippleButton::new(
        robot.dispatcher(),
        element.id,
        robot.clock(),
        element.surface,
        move || *counter.borrow_mut() += 1,
    );

    button.on_mount();
    button.on_unmount();
    button.on_mount();
    assert_eq!(robot.dispatcher().listener_count(), 0);

    robot.click(10.0, 10.0);
    assert_eq!(*clicks.borrow(), 0);
    assert_eq!(element.probe.inserted_count(), 0);
}
