use tactile_core::{Lifecycle, RippleConfig};
use tactile_foundation::{ListenerScope, PointerEvent, Ripple};
use tactile_testing::robot_assertions::{assert_approx_eq, assert_count, assert_rect_approx_eq};
use tactile_testing::{GestureRobot, RecordingSurface, SurfaceProbe};
use tactile_ui_graphics::{Rect, TransitionSpec};

const BUTTON: Rect = Rect::new(100.0, 50.0, 120.0, 40.0);

fn mounted_ripple(robot: &mut GestureRobot) -> (Ripple<RecordingSurface>, SurfaceProbe) {
    let element = robot.add_element(BUTTON);
    let mut ripple = Ripple::new(
        robot.dispatcher(),
        element.id,
        robot.clock(),
        element.surface,
        RippleConfig::default(),
    );
    ripple.on_mount();
    (ripple, element.probe)
}

#[test]
fn click_inserts_centered_layer() {
    let mut robot = GestureRobot::new();
    let (ripple, probe) = mounted_ripple(&mut robot);

    robot.click(130.0, 60.0);

    let ripples = ripple.active_ripples();
    assert_eq!(ripples.len(), 1);
    let instance = ripples[0];
    assert_approx_eq(instance.origin.x, 30.0, 1e-4, "origin x");
    assert_approx_eq(instance.origin.y, 10.0, 1e-4, "origin y");
    assert_eq!(instance.diameter, 120.0);

    let layer = probe.layer(instance.layer).expect("layer inserted");
    assert_rect_approx_eq(
        layer.bounds,
        Rect::new(-30.0, -50.0, 120.0, 120.0),
        1e-4,
        "ripple bounds",
    );
    assert_eq!(layer.visual.transform.scale, 0.0);
    assert_eq!(layer.visual.opacity, 0.75);
    assert_eq!(layer.visual.transition, Some(TransitionSpec::all(600)));
    assert_eq!(layer.color, RippleConfig::default().color);
}

#[test]
fn ripple_expands_on_next_frame() {
    let mut robot = GestureRobot::new();
    let (ripple, probe) = mounted_ripple(&mut robot);
    robot.click(110.0, 70.0);
    let layer = ripple.active_ripples()[0].layer;

    robot.frame();

    let expanded = probe.layer(layer).expect("layer still present");
    assert_eq!(expanded.visual.transform.scale, 2.0);
    assert_eq!(expanded.visual.opacity, 0.0);
    assert_eq!(expanded.visual.transition, Some(TransitionSpec::all(600)));
}

#[test]
fn ripple_removed_at_duration_even_without_frames() {
    let mut robot = GestureRobot::new();
    let (ripple, probe) = mounted_ripple(&mut robot);
    robot.click(110.0, 70.0);
    let layer = ripple.active_ripples()[0].layer;

    robot.advance(599);
    assert_eq!(probe.layer_count(), 1);
    robot.advance(1);
    assert_eq!(probe.layer_count(), 0);
    assert_eq!(probe.removals_of(layer), 1);
    assert_eq!(ripple.active_count(), 0);
    assert!(robot.runtime().is_idle());
}

#[test]
fn rapid_clicks_are_timed_independently() {
    let mut robot = GestureRobot::new();
    let (ripple, probe) = mounted_ripple(&mut robot);

    let mut layers = Vec::new();
    for _ in 0..3 {
        robot.click(150.0, 60.0);
        layers.push(ripple.active_ripples().last().expect("ripple").layer);
        robot.frame();
        robot.advance(100);
    }
    assert_count(&probe.layers(), 3, "layers after three clicks");
    assert_count(&ripple.active_ripples(), 3, "tracked ripples");
    assert_eq!(robot.now_millis(), 300);

    // Created at 0, 100 and 200ms: each goes at its own 600ms mark.
    robot.advance(300);
    assert_eq!(probe.layer_count(), 2);
    assert!(probe.layer(layers[0]).is_none());
    robot.advance(100);
    assert_eq!(probe.layer_count(), 1);
    robot.advance(100);
    assert_eq!(probe.layer_count(), 0);

    for layer in layers {
        assert_eq!(probe.removals_of(layer), 1);
    }
    assert_eq!(probe.inserted_count(), 3);
}

#[test]
fn teardown_twice_releases_listener_once() {
    let mut robot = GestureRobot::new();
    let element = robot.add_element(BUTTON);
    let mut ripple = Ripple::new(
        robot.dispatcher(),
        element.id,
        robot.clock(),
        element.surface,
        RippleConfig::default(),
    );
    ripple.on_mount();
    assert_eq!(
        robot
            .dispatcher()
            .listener_count_for(ListenerScope::Element(element.id)),
        1
    );

    ripple.on_unmount();
    ripple.on_unmount();
    assert_eq!(robot.dispatcher().listener_count(), 0);
    assert!(ripple.is_disposed());

    robot.click(130.0, 60.0);
    assert_eq!(element.probe.inserted_count(), 0);
}

#[test]
fn teardown_cancels_pending_ripple_steps() {
    let mut robot = GestureRobot::new();
    let (mut ripple, probe) = mounted_ripple(&mut robot);
    robot.click(130.0, 60.0);
    assert!(!robot.runtime().is_idle());

    ripple.on_unmount();
    assert!(robot.runtime().is_idle());
    assert_eq!(probe.layer_count(), 0);
    assert_eq!(probe.removed_count(), 1);

    robot.frame();
    robot.advance(1_000);
    assert_eq!(probe.removed_count(), 1);
}

#[test]
fn detached_element_binds_nothing() {
    let mut robot = GestureRobot::new();
    let element = robot.add_element(BUTTON);
    element.probe.detach();
    let mut ripple = Ripple::new(
        robot.dispatcher(),
        element.id,
        robot.clock(),
        element.surface,
        RippleConfig::default(),
    );

    ripple.on_mount();
    assert!(!ripple.is_bound());
    assert_eq!(robot.dispatcher().listener_count(), 0);
    assert!(ripple.trigger(&PointerEvent::click(130.0, 60.0)).is_none());
    ripple.on_unmount();
    ripple.on_unmount();
    assert!(element.probe.events().is_empty());
}

#[test]
fn trigger_after_detach_is_a_noop() {
    let mut robot = GestureRobot::new();
    let (ripple, probe) = mounted_ripple(&mut robot);
    probe.detach();

    assert!(ripple.trigger(&PointerEvent::click(130.0, 60.0)).is_none());
    assert_eq!(probe.inserted_count(), 0);
}

#[test]
fn non_finite_position_is_ignored() {
    let mut robot = GestureRobot::new();
    let (ripple, probe) = mounted_ripple(&mut robot);

    assert!(ripple
        .trigger(&PointerEvent::click(f32::NAN, 60.0))
        .is_none());
    assert_eq!(probe.inserted_count(), 0);
}

#[test]
fn detach_during_ripple_skips_expansion() {
    let mut robot = GestureRobot::new();
    let (ripple, probe) = mounted_ripple(&mut robot);
    robot.click(130.0, 60.0);

    probe.detach();
    robot.frame();
    probe.attach();
    robot.advance(600);

    assert_eq!(ripple.active_count(), 0);
    assert_eq!(probe.removed_count(), 1);
}

#[test]
fn layer_due_while_detached_is_removed_on_teardown() {
    let mut robot = GestureRobot::new();
    let (mut ripple, probe) = mounted_ripple(&mut robot);
    robot.click(130.0, 60.0);
    robot.frame();

    probe.detach();
    robot.advance(600);
    probe.attach();
    robot.advance(10_000);
    assert_eq!(probe.layer_count(), 1);
    assert_eq!(ripple.active_count(), 1);

    ripple.on_unmount();
    assert_eq!(probe.layer_count(), 0);
    assert_eq!(probe.removed_count(), 1);
}

#[test]
fn layer_due_while_detached_is_removed_by_the_next_click() {
    let mut robot = GestureRobot::new();
    let (ripple, probe) = mounted_ripple(&mut robot);
    robot.click(130.0, 60.0);
    let stale = ripple.active_ripples()[0].layer;

    probe.detach();
    robot.advance(600);
    probe.attach();
    probe.clear_events();

    robot.click(150.0, 70.0);
    assert_eq!(probe.removals_of(stale), 1);
    let layers = probe.layers();
    assert_eq!(layers.len(), 1);
    assert_ne!(layers[0].0, stale);

    robot.advance(600);
    assert_eq!(probe.layer_count(), 0);
    assert_eq!(probe.removed_count(), 2);
}
