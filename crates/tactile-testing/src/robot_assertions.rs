//! Tolerance-based checks for geometry and presented visual state.
//!
//! Controller tests sample eased transitions at arbitrary instants, so
//! exact float equality is too strict for them.

use tactile_ui_graphics::{Rect, VisualState};

/// Fails with `msg` when `actual` is more than `tolerance` away from `expected`.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let off_by = (actual - expected).abs();
    assert!(
        off_by <= tolerance,
        "{msg}: got {actual}, wanted {expected} within {tolerance} (off by {off_by})"
    );
}

pub fn assert_rect_approx_eq(actual: Rect, expected: Rect, tolerance: f32, msg: &str) {
    assert_approx_eq(actual.x, expected.x, tolerance, &format!("{} - x", msg));
    assert_approx_eq(actual.y, expected.y, tolerance, &format!("{} - y", msg));
    assert_approx_eq(
        actual.width,
        expected.width,
        tolerance,
        &format!("{} - width", msg),
    );
    assert_approx_eq(
        actual.height,
        expected.height,
        tolerance,
        &format!("{} - height", msg),
    );
}

/// Compares opacity and transform; the transition must match exactly.
pub fn assert_visual_approx_eq(
    actual: VisualState,
    expected: VisualState,
    tolerance: f32,
    msg: &str,
) {
    assert_approx_eq(
        actual.opacity,
        expected.opacity,
        tolerance,
        &format!("{} - opacity", msg),
    );
    assert_approx_eq(
        actual.transform.translate_x,
        expected.transform.translate_x,
        tolerance,
        &format!("{} - translate_x", msg),
    );
    assert_approx_eq(
        actual.transform.translate_y,
        expected.transform.translate_y,
        tolerance,
        &format!("{} - translate_y", msg),
    );
    assert_approx_eq(
        actual.transform.scale,
        expected.transform.scale,
        tolerance,
        &format!("{} - scale", msg),
    );
    assert_eq!(
        actual.transition, expected.transition,
        "{}: transition mismatch",
        msg
    );
}

pub fn assert_count<T>(items: &[T], expected: usize, msg: &str) {
    assert_eq!(
        items.len(),
        expected,
        "{}: expected {} items, found {}",
        msg,
        expected,
        items.len()
    );
}
