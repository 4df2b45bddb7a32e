//! Airframe-fixed symbols and status texts over the attitude area.

use crate::config::RollScaleConfig;
use crate::layout::PanelLayout;
use crate::render::{DrawList, DrawPrimitive, Stroke, TextAnchor, TextStyle};
use crate::state::{FlightState, aux};
use crate::style::Theme;
use crate::transform::Transform;

/// Length of the side bars and the gull wings, relative to the area width.
const SYMBOL_LENGTH: f64 = 0.15;
/// Outer end of the side bars, relative to the area width.
const SIDE: f64 = 0.5;
/// Receivers report this when a value is not available.
const NOT_REPORTED: f64 = 255.0;

fn reported(value: f64) -> f64 {
    if value == NOT_REPORTED { 0.0 } else { value }
}

/// Secondary speed readout, labelled by its source.
pub fn secondary_speed_text(state: &FlightState) -> String {
    let label = if state.primary_speed_is_gps { "IAS" } else { "GS" };
    match state.secondary_speed() {
        Some(speed) => format!("{label} {speed:.1}"),
        None => format!("{label} ---"),
    }
}

/// Side bars, gull, roll pointer and the status texts.
pub fn airframe_overlay(
    layout: &PanelLayout,
    state: &FlightState,
    roll_scale: &RollScaleConfig,
    theme: &Theme,
) -> DrawList {
    let mut list = DrawList::new();
    let area = layout.attitude;
    let frame = Transform::at(area.center());
    let w = area.width();
    let h = area.height();
    let metrics = &layout.metrics;
    let pen = Stroke::new(theme.airframe, (metrics.line_width * 1.5) as f32);

    for sign in [-1.0, 1.0] {
        list.push(DrawPrimitive::line(
            frame.map_xy(sign * SIDE * w, 0.0),
            frame.map_xy(sign * (SIDE - SYMBOL_LENGTH) * w, 0.0),
            pen,
        ));
    }

    let text = TextStyle::new(theme.scale, metrics.small_text);
    let left = -SIDE * w * 0.9;
    let right = SIDE * w * 0.9;
    let top = SIDE * w / 4.0;
    let voltage = state.aux(aux::VOLTAGE).abs();
    let current = state.aux(aux::CURRENT).abs();
    list.push(DrawPrimitive::label(
        frame.map_xy(left, top),
        TextAnchor::LeftCenter,
        format!("{voltage:.1}V"),
        text,
        0.0,
    ));
    list.push(DrawPrimitive::label(
        frame.map_xy(left, top + metrics.medium_text * 1.1),
        TextAnchor::LeftCenter,
        format!("{current:.1}A"),
        text,
        0.0,
    ));
    list.push(DrawPrimitive::label(
        frame.map_xy(left, top + metrics.medium_text * 3.3),
        TextAnchor::LeftCenter,
        secondary_speed_text(state),
        text,
        0.0,
    ));

    let satellites = reported(state.aux(aux::GPS_SATELLITE));
    list.push(DrawPrimitive::label(
        frame.map_xy(right, top),
        TextAnchor::RightCenter,
        format!("SAT {}", satellites as i64),
        text,
        0.0,
    ));
    let rssi = reported(state.aux(aux::RC_RSSI)) / 254.0;
    list.push(DrawPrimitive::label(
        frame.map_xy(right, top + metrics.small_text * 1.5),
        TextAnchor::RightCenter,
        format!("RSSI {}", (rssi * 100.0) as i64),
        text,
        0.0,
    ));

    let rel = SYMBOL_LENGTH / std::f64::consts::SQRT_2;
    for sign in [1.0, -1.0] {
        list.push(DrawPrimitive::line(
            frame.map_xy(sign * rel * w, rel * w / 2.0),
            frame.origin(),
            pen,
        ));
    }

    let pointer_base = -w * (roll_scale.radius - roll_scale.marker_height) + 1.0;
    list.push(DrawPrimitive::polygon(
        vec![
            frame.map_xy(0.0, -w * roll_scale.radius + 1.0),
            frame.map_xy(-h * roll_scale.marker_width / 2.0, pointer_base),
            frame.map_xy(h * roll_scale.marker_width / 2.0, pointer_base),
        ],
        None,
        Some(pen),
    ));
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PfdConfig;
    use crate::layout::{CanvasSize, plan_layout};

    fn layout() -> PanelLayout {
        plan_layout(CanvasSize::new(960.0, 640.0), &PfdConfig::default()).unwrap()
    }

    #[test]
    fn status_texts_default_to_zero() {
        let list = airframe_overlay(
            &layout(),
            &FlightState::new(),
            &RollScaleConfig::default(),
            &Theme::default(),
        );
        let texts: Vec<&str> = list.texts().collect();
        assert_eq!(texts, vec!["0.0V", "0.0A", "GS ---", "SAT 0", "RSSI 0"]);
    }

    #[test]
    fn unreported_receiver_values_read_zero() {
        let mut state = FlightState::new();
        state.set_aux(aux::GPS_SATELLITE, 255.0);
        state.set_aux(aux::RC_RSSI, 127.0);
        state.set_aux(aux::VOLTAGE, -11.84);
        let roll_scale = RollScaleConfig::default();
        let list = airframe_overlay(&layout(), &state, &roll_scale, &Theme::default());
        let texts: Vec<&str> = list.texts().collect();
        assert!(texts.contains(&"SAT 0"));
        assert!(texts.contains(&"RSSI 50"));
        assert!(texts.contains(&"11.8V"));
    }

    #[test]
    fn secondary_speed_follows_source() {
        let mut state = FlightState::new();
        state.ground_speed = 12.34;
        assert_eq!(secondary_speed_text(&state), "GS 12.3");
        state.primary_speed_is_gps = true;
        assert_eq!(secondary_speed_text(&state), "IAS ---");
        state.primary_speed = 9.0;
        assert_eq!(secondary_speed_text(&state), "IAS 9.0");
    }

    #[test]
    fn symbols_are_symmetric() {
        let layout = layout();
        let list = airframe_overlay(
            &layout,
            &FlightState::new(),
            &RollScaleConfig::default(),
            &Theme::default(),
        );
        let center = layout.attitude.center();
        let bars: Vec<_> = list
            .primitives()
            .iter()
            .filter_map(|primitive| match primitive {
                DrawPrimitive::Line { from, .. } => Some(*from),
                _ => None,
            })
            .collect();
        assert_eq!(bars.len(), 4);
        assert!(((bars[0].x - center.x) + (bars[1].x - center.x)).abs() < 1e-9);
        assert!(((bars[2].x - center.x) + (bars[3].x - center.x)).abs() < 1e-9);
    }
}
