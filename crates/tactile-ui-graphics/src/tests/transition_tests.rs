use super::*;

#[test]
fn easing_bounds_are_correct() {
    let easings = [
        Easing::Linear,
        Easing::Ease,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::CubicBezier(0.4, 0.0, 0.2, 1.0),
    ];

    for easing in easings {
        assert_eq!(easing.transform(0.0), 0.0, "start for {:?}", easing);
        assert_eq!(easing.transform(1.0), 1.0, "end for {:?}", easing);
        let mid = easing.transform(0.5);
        assert!(mid > 0.0 && mid < 1.0, "midpoint for {:?} was {}", easing, mid);
    }
}

#[test]
fn linear_is_identity_and_clamped() {
    assert_eq!(Easing::Linear.transform(0.25), 0.25);
    assert_eq!(Easing::Linear.transform(-1.0), 0.0);
    assert_eq!(Easing::Linear.transform(2.0), 1.0);
}

#[test]
fn ease_in_starts_slower_than_ease_out() {
    assert!(Easing::EaseIn.transform(0.3) < Easing::EaseOut.transform(0.3));
}

#[test]
fn property_sets_combine() {
    let both = TransitionProperties::OPACITY | TransitionProperties::TRANSFORM;
    assert_eq!(both, TransitionProperties::ALL);
    assert!(both.contains(TransitionProperties::OPACITY));
    assert!(!TransitionProperties::TRANSFORM.contains(TransitionProperties::OPACITY));
    assert!(TransitionProperties::NONE.is_empty());
}

#[test]
fn spec_constructors_pick_properties() {
    let spec = TransitionSpec::transform(300);
    assert!(spec.applies_to(TransitionProperties::TRANSFORM));
    assert!(!spec.applies_to(TransitionProperties::OPACITY));
    assert_eq!(spec.duration_millis, 300);
    assert_eq!(spec.easing, Easing::Ease);

    let spec = TransitionSpec::all(600).with_easing(Easing::Linear);
    assert!(spec.applies_to(TransitionProperties::ALL));
    assert_eq!(spec.easing, Easing::Linear);
}
