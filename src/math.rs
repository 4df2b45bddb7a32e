//! Angle and scale helpers shared by every generator.

/// Pixels per degree divisor used for pitch translation.
const PITCH_TRANSLATION: f64 = 65.0;

/// Normalize a heading into `[0, 360)`.
pub fn normalize_heading(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Wrap an angular offset into `(-180, 180]`.
pub fn wrap_offset(degrees: f64) -> f64 {
    let wrapped = normalize_heading(degrees);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Clamp `value` into `[min, max]`.
pub fn constrain(value: f64, min: f64, max: f64) -> f64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

pub fn min4(a: f64, b: f64, c: f64, d: f64) -> f64 {
    a.min(b).min(c).min(d)
}

pub fn max4(a: f64, b: f64, c: f64, d: f64) -> f64 {
    a.max(b).max(c).max(d)
}

/// Convert a pitch angle into a vertical pixel offset for a view of the
/// given height.
pub fn pitch_to_pixels(view_height: f64, degrees: f64) -> f64 {
    degrees * view_height / PITCH_TRANSLATION
}

/// Largest tick index generated; windows beyond it yield no ticks.
const TICK_INDEX_LIMIT: f64 = 1.0e12;

/// Round to the nearest multiple of `step`, halves up.
///
/// Saturates instead of overflowing for values far outside any scale.
pub fn snap_to(value: f64, step: i64) -> i64 {
    let index = (value / step as f64 + 0.5).floor();
    if !index.is_finite() {
        return 0;
    }
    (index as i64).saturating_mul(step)
}

/// Fold a pitch angle beyond vertical back into `[-90, 90]` for display.
pub fn fold_pitch(degrees: i64) -> i64 {
    if degrees > 90 {
        180 - degrees
    } else if degrees < -90 {
        -180 - degrees
    } else {
        degrees
    }
}

/// Tick values that are multiples of `step` and lie inside `[start, end]`.
///
/// Values are produced in ascending order as exact integers so repeated
/// stepping never accumulates float drift.
/// A window that cannot be indexed exactly yields no ticks.
pub fn ticks_in(start: f64, end: f64, step: i64) -> impl Iterator<Item = i64> {
    let step_f = step as f64;
    let first = (start / step_f).ceil();
    let last = (end / step_f).floor();
    let in_range = |index: f64| index.abs() <= TICK_INDEX_LIMIT;
    let (first, last) = if step > 0 && in_range(first) && in_range(last) {
        (first as i64, last as i64)
    } else {
        (1, 0)
    };
    (first..=last).filter_map(move |index| index.checked_mul(step))
}

/// Rotate a vector by `degrees` using the screen convention (Y down, positive
/// angles turn clockwise on screen).
pub fn rotate_vec(x: f64, y: f64, degrees: f64) -> (f64, f64) {
    let (sin, cos) = degrees.to_radians().sin_cos();
    (x * cos - y * sin, x * sin + y * cos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_normalization() {
        assert_eq!(normalize_heading(-10.0), 350.0);
        assert_eq!(normalize_heading(360.0), 0.0);
        assert_eq!(normalize_heading(725.0), 5.0);
    }

    #[test]
    fn offset_wraps_half_open() {
        assert_eq!(wrap_offset(180.0), 180.0);
        assert_eq!(wrap_offset(-180.0), 180.0);
        assert_eq!(wrap_offset(190.0), -170.0);
        assert_eq!(wrap_offset(-190.0), 170.0);
    }

    #[test]
    fn snap_rounds_half_up() {
        assert_eq!(snap_to(2.5, 5), 5);
        assert_eq!(snap_to(-2.5, 5), 0);
        assert_eq!(snap_to(-12.5, 5), -10);
        assert_eq!(snap_to(-12.6, 5), -15);
        assert_eq!(snap_to(-2.4, 5), 0);
    }

    #[test]
    fn huge_values_do_not_overflow() {
        assert_eq!(snap_to(1e19, 5), i64::MAX);
        assert_eq!(snap_to(-1e30, 5), i64::MIN);
        assert_eq!(snap_to(f64::INFINITY, 5), 0);
        assert_eq!(ticks_in(1e20 - 25.0, 1e20 + 25.0, 5).count(), 0);
        assert_eq!(ticks_in(0.0, 10.0, 0).count(), 0);
    }

    #[test]
    fn pitch_fold_mirrors_through_vertical() {
        assert_eq!(fold_pitch(100), 80);
        assert_eq!(fold_pitch(-100), -80);
        assert_eq!(fold_pitch(90), 90);
        assert_eq!(fold_pitch(-45), -45);
    }

    #[test]
    fn ticks_cover_window_inclusively() {
        let ticks: Vec<i64> = ticks_in(-7.0, 12.0, 5).collect();
        assert_eq!(ticks, vec![-5, 0, 5, 10]);
        let exact: Vec<i64> = ticks_in(75.0, 125.0, 10).collect();
        assert_eq!(exact.first(), Some(&80));
        assert_eq!(exact.last(), Some(&120));
    }

    #[test]
    fn min_max_of_four() {
        assert_eq!(min4(3.0, -1.0, 2.0, 0.5), -1.0);
        assert_eq!(max4(3.0, -1.0, 7.0, 0.5), 7.0);
        assert_eq!(constrain(9.0, 1.0, 6.0), 6.0);
    }
}
