use super::*;
use tactile_ui_graphics::Easing;

fn close(actual: f32, expected: f32) -> bool {
    (actual - expected).abs() < 1e-4
}

#[test]
fn state_without_transition_applies_immediately() {
    let mut timeline = TransitionTimeline::new(VisualState::IDENTITY, 0);
    let hidden = VisualState::IDENTITY.with_opacity(0.0);
    timeline.retarget(hidden, 100);

    assert_eq!(timeline.sample(100), hidden);
    assert!(!timeline.is_running(100));
}

#[test]
fn linear_opacity_transition_interpolates() {
    let mut timeline = TransitionTimeline::new(VisualState::IDENTITY.with_opacity(0.0), 0);
    let shown = VisualState::IDENTITY
        .with_opacity(1.0)
        .with_transition(TransitionSpec::opacity(400).with_easing(Easing::Linear));
    timeline.retarget(shown, 1_000);

    assert!(close(timeline.sample(1_000).opacity, 0.0));
    assert!(close(timeline.sample(1_100).opacity, 0.25));
    assert!(close(timeline.sample(1_200).opacity, 0.5));
    assert!(timeline.is_running(1_399));
    assert!(close(timeline.sample(1_400).opacity, 1.0));
    assert!(!timeline.is_running(1_400));
    assert!(close(timeline.sample(5_000).opacity, 1.0));
}

#[test]
fn uncovered_properties_jump_to_target() {
    let start = VisualState::IDENTITY.with_translation_x(120.0);
    let mut timeline = TransitionTimeline::new(start, 0);
    // Opacity-only transition: the translation snaps back at once.
    let target = VisualState::IDENTITY
        .with_opacity(0.0)
        .with_transition(TransitionSpec::opacity(300).with_easing(Easing::Linear));
    timeline.retarget(target, 0);

    let mid = timeline.sample(150);
    assert!(close(mid.transform.translate_x, 0.0));
    assert!(close(mid.opacity, 0.5));
}

#[test]
fn retarget_starts_from_presented_value() {
    let mut timeline = TransitionTimeline::new(VisualState::IDENTITY, 0);
    let out = VisualState::IDENTITY
        .with_translation_x(500.0)
        .with_transition(TransitionSpec::transform(300).with_easing(Easing::Linear));
    timeline.retarget(out, 0);
    assert!(close(timeline.sample(150).transform.translate_x, 250.0));

    let back = VisualState::IDENTITY
        .with_transition(TransitionSpec::transform(100).with_easing(Easing::Linear));
    timeline.retarget(back, 150);
    assert!(close(timeline.sample(150).transform.translate_x, 250.0));
    assert!(close(timeline.sample(200).transform.translate_x, 125.0));
    assert_eq!(timeline.target(), back);
}

#[test]
fn eased_transition_stays_within_endpoints() {
    let mut timeline = TransitionTimeline::new(VisualState::IDENTITY.with_opacity(0.0), 0);
    timeline.retarget(
        VisualState::IDENTITY.with_transition(TransitionSpec::opacity(400)),
        0,
    );
    let mut previous = 0.0;
    for t in (0..=400).step_by(40) {
        let opacity = timeline.sample(t).opacity;
        assert!((0.0..=1.0).contains(&opacity));
        assert!(opacity + 1e-6 >= previous, "ease curve must not go backwards");
        previous = opacity;
    }
}

#[test]
fn zero_duration_completes_immediately() {
    let mut timeline = TransitionTimeline::new(VisualState::IDENTITY, 0);
    let scaled = VisualState::IDENTITY
        .with_transform(Transform::scale(2.0))
        .with_transition(TransitionSpec::all(0));
    timeline.retarget(scaled, 10);
    assert_eq!(timeline.progress(10), 1.0);
    assert!(close(timeline.sample(10).transform.scale, 2.0));
}

#[test]
fn transform_lerp_interpolates_each_component() {
    let from = Transform::IDENTITY;
    let to = Transform {
        translate_x: 10.0,
        translate_y: -4.0,
        scale: 3.0,
    };
    let mid = from.lerp(&to, 0.5);
    assert!(close(mid.translate_x, 5.0));
    assert!(close(mid.translate_y, -2.0));
    assert!(close(mid.scale, 2.0));
}
