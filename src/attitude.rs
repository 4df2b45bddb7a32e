//! Pitch ladder and roll scale.
//!
//! Both scales live in the attitude frame: centered on the attitude area and
//! rotated by the negated roll, so they counter-rotate around the fixed
//! airframe symbols.

use crate::config::{PitchScaleConfig, RollScaleConfig};
use crate::layout::PanelLayout;
use crate::math::{fold_pitch, pitch_to_pixels, snap_to};
use crate::render::{DrawList, DrawPrimitive, Stroke, TextAnchor, TextStyle};
use crate::state::FlightState;
use crate::style::Theme;
use crate::transform::Transform;

/// Frame centered on the attitude area and rotated by `-roll`.
///
/// A non-finite roll leaves the frame unrotated.
pub fn attitude_frame(layout: &PanelLayout, roll: f64) -> Transform {
    let frame = Transform::at(layout.attitude.center());
    if roll.is_finite() {
        frame.rotated(-roll)
    } else {
        frame
    }
}

/// Half width factor of a pitch tick, attenuated towards the zenith and nadir.
fn pitch_tick_width(config: &PitchScaleConfig, degrees: i64, major: bool) -> f64 {
    let width = if major {
        config.major_width
    } else {
        config.minor_width
    };
    let angle = degrees as f64;
    if angle.abs() <= config.width_reduction_from {
        return width;
    }
    // 1 at the reduction threshold, 0 at vertical.
    let from_vertical = (90.0 - angle.abs()).abs();
    let t = from_vertical / (90.0 - config.width_reduction_from);
    width * (config.width_reduction * (1.0 - t) + t)
}

/// Pitch ladder around the current pitch.
///
/// Ticks are emitted every `resolution` degrees over `half_range` on each
/// side of the snapped pitch; every second one is major and labelled with
/// the folded angle. Ticks hidden behind the compass disk are skipped.
pub fn pitch_ladder(
    layout: &PanelLayout,
    state: &FlightState,
    config: &PitchScaleConfig,
    theme: &Theme,
) -> DrawList {
    let mut list = DrawList::new();
    let view = layout.attitude_view_size();
    let metrics = &layout.metrics;
    let stroke = Stroke::new(theme.scale, metrics.line_width as f32);
    let label_style = TextStyle::new(theme.scale, metrics.medium_text);
    let frame = attitude_frame(layout, state.roll);
    let visible_bottom = layout.attitude.bottom() - layout.compass_intrusion;

    let snap = snap_to(state.pitch, config.resolution);
    let last = snap.saturating_add(config.half_range);
    let mut next = Some(snap.saturating_sub(config.half_range));
    while let Some(degrees) = next.filter(|degrees| *degrees <= last) {
        next = degrees.checked_add(config.resolution);
        let major = (degrees / config.resolution) % 2 == 0;
        let half_width = pitch_tick_width(config, degrees, major) * view;
        let shift = pitch_to_pixels(view, state.pitch - degrees as f64);
        let tick = frame.translated(0.0, shift);

        if tick.origin().y > visible_bottom {
            continue;
        }

        list.push(DrawPrimitive::line(
            tick.map_xy(-half_width, 0.0),
            tick.map_xy(half_width, 0.0),
            stroke,
        ));

        if major && (config.show_zero || degrees != 0) {
            let text = fold_pitch(degrees).to_string();
            let offset = config.major_width * view + 10.0;
            if config.numbers_left {
                list.push(DrawPrimitive::label(
                    tick.map_xy(-offset, 0.0),
                    TextAnchor::RightCenter,
                    text.clone(),
                    label_style,
                    tick.rotation(),
                ));
            }
            if config.numbers_right {
                list.push(DrawPrimitive::label(
                    tick.map_xy(offset, 0.0),
                    TextAnchor::LeftCenter,
                    text,
                    label_style,
                    tick.rotation(),
                ));
            }
        }
    }
    list
}

/// Roll tick angles in drawing order: the configured positives, zero, then
/// the negatives.
fn roll_tick_sequence(ticks: &[i64]) -> impl Iterator<Item = i64> + '_ {
    ticks
        .iter()
        .copied()
        .chain(std::iter::once(0))
        .chain(ticks.iter().map(|tick| -tick))
}

/// Roll arc with ticks and unsigned labels.
pub fn roll_scale(
    layout: &PanelLayout,
    state: &FlightState,
    config: &RollScaleConfig,
    theme: &Theme,
) -> DrawList {
    let mut list = DrawList::new();
    let view = layout.attitude_view_size();
    let metrics = &layout.metrics;
    let stroke = Stroke::new(theme.scale, metrics.line_width as f32);
    let label_style = TextStyle::new(theme.scale, metrics.medium_text);
    let frame = attitude_frame(layout, state.roll);
    let radius = view * config.radius;

    // The arc is centered on "up", which is -90 degrees on screen.
    list.push(DrawPrimitive::Arc {
        center: frame.origin(),
        radius,
        start_deg: -90.0 - config.range + frame.rotation(),
        sweep_deg: config.range * 2.0,
        stroke: Some(stroke),
        fill: None,
    });

    let label_distance = (config.radius + config.tick_length * 1.7) * view;
    let mut tick_frame = frame;
    let mut previous = 0;
    for degrees in roll_tick_sequence(&config.ticks) {
        tick_frame = tick_frame.rotated((degrees - previous) as f64);
        previous = degrees;
        list.push(DrawPrimitive::line(
            tick_frame.map_xy(0.0, -radius),
            tick_frame.map_xy(0.0, -(1.0 + config.tick_length) * radius),
            stroke,
        ));
        if config.draw_numbers {
            list.push(DrawPrimitive::label(
                tick_frame.map_xy(0.0, -label_distance),
                TextAnchor::TopCenter,
                degrees.abs().to_string(),
                label_style,
                tick_frame.rotation(),
            ));
        }
    }
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PfdConfig;
    use crate::geom::Point;
    use crate::layout::{CanvasSize, plan_layout};

    fn layout() -> PanelLayout {
        plan_layout(CanvasSize::new(960.0, 640.0), &PfdConfig::default()).unwrap()
    }

    fn lines(list: &DrawList) -> Vec<(Point, Point)> {
        list.primitives()
            .iter()
            .filter_map(|primitive| match primitive {
                DrawPrimitive::Line { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn level_ladder_has_zero_tick_on_centerline() {
        let layout = layout();
        let config = PfdConfig::default();
        let list = pitch_ladder(&layout, &FlightState::new(), &config.pitch_scale, &config.theme);
        let center = layout.attitude.center();
        let ticks = lines(&list);
        // -15..=15 in steps of 5.
        assert_eq!(ticks.len(), 7);
        let zero = ticks
            .iter()
            .find(|(from, to)| (from.y - center.y).abs() < 1e-9 && (to.y - center.y).abs() < 1e-9)
            .expect("zero tick");
        assert!(((zero.0.x + zero.1.x) * 0.5 - center.x).abs() < 1e-9);
        let labels: Vec<&str> = list.texts().collect();
        assert_eq!(labels, vec!["-10", "-10", "0", "0", "10", "10"]);
    }

    #[test]
    fn steep_pitch_labels_fold_past_vertical() {
        let layout = layout();
        let config = PfdConfig::default();
        let mut state = FlightState::new();
        state.pitch = 88.0;
        let list = pitch_ladder(&layout, &state, &config.pitch_scale, &config.theme);
        let labels: Vec<&str> = list.texts().collect();
        assert!(labels.contains(&"80"));
        assert!(!labels.contains(&"100"));
        // 100 degrees folds back to 80, so 80 appears for both ticks.
        assert_eq!(labels.iter().filter(|label| **label == "80").count(), 4);
    }

    #[test]
    fn tick_spacing_grows_with_angular_distance() {
        let layout = layout();
        let config = PfdConfig::default();
        let scale = &config.pitch_scale;
        let center = layout.attitude.center();
        let view = layout.attitude_view_size();
        for pitch in [-33.0, -12.5, 0.0, 4.0, 27.5, 61.0] {
            let mut state = FlightState::new();
            state.pitch = pitch;
            let list = pitch_ladder(&layout, &state, scale, &config.theme);
            let ticks = lines(&list);
            assert_eq!(ticks.len(), 7, "pitch {pitch}");

            let first = snap_to(pitch, scale.resolution) - scale.half_range;
            let mut spacing: Vec<(f64, f64)> = ticks
                .iter()
                .enumerate()
                .map(|(index, (from, to))| {
                    let degrees = (first + index as i64 * scale.resolution) as f64;
                    let distance = ((from.y + to.y) * 0.5 - center.y).abs();
                    ((pitch - degrees).abs(), distance)
                })
                .collect();
            spacing.sort_by(|a, b| a.0.total_cmp(&b.0));
            for pair in spacing.windows(2) {
                let ((near_angle, near), (far_angle, far)) = (pair[0], pair[1]);
                if far_angle > near_angle {
                    assert!(far > near, "pitch {pitch}: {pair:?}");
                }
            }
            for (angle, distance) in spacing {
                assert!((distance - angle * view / 65.0).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn tick_width_attenuates_towards_vertical() {
        let config = PitchScaleConfig::default();
        assert_eq!(pitch_tick_width(&config, 30, true), config.major_width);
        let at_vertical = pitch_tick_width(&config, 90, true);
        assert!((at_vertical - config.major_width * config.width_reduction).abs() < 1e-12);
        let midway = pitch_tick_width(&config, 60, true);
        assert!(midway < config.major_width && midway > at_vertical);
    }

    #[test]
    fn ticks_behind_compass_are_skipped() {
        let config = PfdConfig::default();
        // A short canvas lets the compass cover the lower ladder.
        let layout = plan_layout(CanvasSize::new(960.0, 400.0), &config).unwrap();
        assert!(layout.compass_intrusion > 0.0);
        let list = pitch_ladder(&layout, &FlightState::new(), &config.pitch_scale, &config.theme);
        let limit = layout.attitude.bottom() - layout.compass_intrusion;
        for (from, to) in lines(&list) {
            assert!((from.y + to.y) * 0.5 <= limit + 1e-9);
        }
        assert_eq!(lines(&list).len(), 5);
    }

    #[test]
    fn roll_ticks_cover_both_sides() {
        let layout = layout();
        let config = PfdConfig::default();
        let list = roll_scale(&layout, &FlightState::new(), &config.roll_scale, &config.theme);
        let labels: Vec<&str> = list.texts().collect();
        assert_eq!(
            labels,
            vec!["10", "20", "30", "45", "60", "0", "10", "20", "30", "45", "60"]
        );
        let center = layout.attitude.center();
        let radius = layout.attitude_view_size() * config.roll_scale.radius;
        let ticks = lines(&list);
        // The zero tick points straight up.
        let (from, _) = ticks[5];
        assert!((from.x - center.x).abs() < 1e-9);
        assert!((from.y - (center.y - radius)).abs() < 1e-9);
        // The +30 tick leans right, the -30 tick left.
        assert!(ticks[2].0.x > center.x);
        assert!(ticks[8].0.x < center.x);
    }

    #[test]
    fn roll_rotates_the_arc() {
        let layout = layout();
        let config = PfdConfig::default();
        let mut state = FlightState::new();
        state.roll = 20.0;
        let list = roll_scale(&layout, &state, &config.roll_scale, &config.theme);
        match &list.primitives()[0] {
            DrawPrimitive::Arc {
                start_deg,
                sweep_deg,
                ..
            } => {
                assert!((start_deg - (-170.0)).abs() < 1e-9);
                assert_eq!(*sweep_deg, 120.0);
            }
            other => panic!("expected arc, got {other:?}"),
        }
    }

    #[test]
    fn runaway_pitch_does_not_overflow() {
        let layout = layout();
        let config = PfdConfig::default();
        let mut state = FlightState::new();
        state.pitch = 1e19;
        let list = pitch_ladder(&layout, &state, &config.pitch_scale, &config.theme);
        assert!(list.len() <= 7 * 3);
    }

    #[test]
    fn nan_roll_renders_level() {
        let layout = layout();
        let mut state = FlightState::new();
        state.roll = f64::NAN;
        let frame = attitude_frame(&layout, state.roll);
        assert_eq!(frame.rotation(), 0.0);
        assert!(frame.origin().is_finite());
    }
}
