//! Scrolling tape gauges.
//!
//! One generator serves both the altimeter and the airspeed indicator; the
//! [`TapeConfig`] decides span, tick spacing, which edge carries the ticks
//! and whether a trend arrow is drawn.

use crate::config::{
    TAPE_EFFECTIVE_HALF_HEIGHT, TAPE_GAUGES_TICKWIDTH_MAJOR, TAPE_GAUGES_TICKWIDTH_MINOR,
    TAPE_NUMBERS_OFFSET, TapeConfig, TapeOrientation,
};
use crate::geom::{Point, Rect};
use crate::layout::Metrics;
use crate::math::ticks_in;
use crate::render::{DrawList, DrawPrimitive, Fill, Stroke, TextAnchor, TextStyle};
use crate::style::Theme;
use crate::transform::Transform;

/// Readout text, or `---` for an unknown reading.
pub fn readout_text(reading: Option<f64>, decimals: usize) -> String {
    match reading {
        Some(value) => format!("{value:>3.decimals$}"),
        None => "---".to_string(),
    }
}

/// Draw one tape gauge into `area`.
///
/// `reading` is the value under the marker; the scale centers on 0 while it
/// is unknown. `trend` is the rate shown by the trend arrow, if the gauge
/// has one. No arrow is drawn while the reading is unknown.
pub fn tape_gauge(
    area: Rect,
    metrics: &Metrics,
    reading: Option<f64>,
    trend: Option<f64>,
    config: &TapeConfig,
    theme: &Theme,
) -> DrawList {
    let mut list = DrawList::new();
    let edge_width = metrics.edge_width();
    list.push(DrawPrimitive::rect(
        area,
        Some(Fill::Solid(theme.instrument_background)),
        Some(theme.edge_stroke(edge_width)),
    ));

    let w = area.width();
    let effective_half_height = area.height() * TAPE_EFFECTIVE_HALF_HEIGHT;
    let marker_half_height = metrics.medium_text * config.marker_half_height;
    let near_edge = edge_width * 2.0;
    let far_edge = w - near_edge;
    // Ticks hang from `base` towards `dir`; the marker body reaches `body_end`.
    let (base, body_end, dir, number_anchor) = match config.orientation {
        TapeOrientation::TicksLeft => (near_edge, far_edge, 1.0, TextAnchor::LeftCenter),
        TapeOrientation::TicksRight => (far_edge, near_edge, -1.0, TextAnchor::RightCenter),
    };
    let major_end = base + dir * TAPE_GAUGES_TICKWIDTH_MAJOR * w;
    let minor_end = base + dir * TAPE_GAUGES_TICKWIDTH_MINOR * w;
    let numbers_x = TAPE_NUMBERS_OFFSET * w;
    let marker_tip = (base * 2.0 + major_end) / 3.0;

    let frame = Transform::at(Point::new(area.left(), area.center().y));
    let scale_center = reading.unwrap_or(0.0);
    let half_span = config.span / 2.0;
    for tick in ticks_in(
        scale_center - half_span,
        scale_center + half_span,
        config.resolution,
    ) {
        let y = -(tick as f64 - scale_center) * effective_half_height / half_span;
        let color = if tick < 0 { theme.warning } else { theme.scale };
        let stroke = Stroke::new(color, metrics.line_width as f32);
        if tick % config.major_resolution == 0 {
            list.push(DrawPrimitive::line(
                frame.map_xy(base, y),
                frame.map_xy(major_end, y),
                stroke,
            ));
            list.push(DrawPrimitive::label(
                frame.map_xy(numbers_x, y),
                number_anchor,
                tick.abs().to_string(),
                TextStyle::new(color, metrics.medium_text),
                0.0,
            ));
        } else {
            list.push(DrawPrimitive::line(
                frame.map_xy(base, y),
                frame.map_xy(minor_end, y),
                stroke,
            ));
        }
    }

    let pen = Stroke::new(theme.scale, metrics.line_width as f32);
    let shoulder = marker_tip + dir * marker_half_height;
    list.push(DrawPrimitive::polygon(
        vec![
            frame.map_xy(marker_tip, 0.0),
            frame.map_xy(shoulder, marker_half_height),
            frame.map_xy(body_end, marker_half_height),
            frame.map_xy(body_end, -marker_half_height),
            frame.map_xy(shoulder, -marker_half_height),
        ],
        Some(Fill::Solid(theme.marker_fill)),
        Some(pen),
    ));
    list.push(DrawPrimitive::label(
        frame.map_xy((marker_tip + body_end) / 2.0, 0.0),
        TextAnchor::Center,
        readout_text(reading, config.readout_decimals),
        TextStyle::new(theme.scale, metrics.medium_text),
        0.0,
    ));

    if let (Some(trend_config), Some(_), Some(rate)) = (config.trend, reading, trend) {
        let tip = -rate / trend_config.span * effective_half_height;
        // Short arrows would hide behind the marker.
        if tip.abs() >= marker_half_height {
            let sign = if tip > 0.0 { 1.0 } else { -1.0 };
            let x = body_end - dir * w * trend_config.width / 2.0;
            let end = frame.map_xy(x, tip);
            list.push(DrawPrimitive::line(
                frame.map_xy(x, marker_half_height * sign),
                end,
                pen,
            ));
            let head = (tip - marker_half_height * sign)
                .abs()
                .min(w * trend_config.width / 3.0);
            for side in [1.0, -1.0] {
                list.push(DrawPrimitive::line(
                    frame.map_xy(x + side * head, tip - sign * head),
                    end,
                    pen,
                ));
            }
        }
    }
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Color;

    fn area() -> Rect {
        Rect::from_xywh(785.5, 0.0, 174.5, 610.9)
    }

    fn metrics() -> Metrics {
        Metrics::for_width(960.0)
    }

    fn altimeter(reading: Option<f64>, trend: Option<f64>) -> DrawList {
        tape_gauge(
            area(),
            &metrics(),
            reading,
            trend,
            &TapeConfig::altimeter(),
            &Theme::default(),
        )
    }

    fn line_count(list: &DrawList) -> usize {
        list.primitives()
            .iter()
            .filter(|primitive| matches!(primitive, DrawPrimitive::Line { .. }))
            .count()
    }

    #[test]
    fn readout_formats() {
        assert_eq!(readout_text(Some(100.0), 0), "100");
        assert_eq!(readout_text(Some(5.0), 0), "  5");
        assert_eq!(readout_text(Some(50.0), 1), "50.0");
        assert_eq!(readout_text(None, 1), "---");
    }

    #[test]
    fn altimeter_marker_reads_altitude() {
        let list = altimeter(Some(100.0), None);
        assert_eq!(list.texts().last(), Some("100"));
        // 75..=125 every 5, labelled every 10.
        let labels: Vec<&str> = list.texts().collect();
        assert_eq!(labels, vec!["80", "90", "100", "110", "120", "100"]);
    }

    #[test]
    fn negative_ticks_use_warning_color_and_unsigned_labels() {
        let list = altimeter(Some(2.0), None);
        let theme = Theme::default();
        let mut saw_warning = false;
        for primitive in list.primitives() {
            if let DrawPrimitive::Text { text, style, .. } = primitive {
                assert!(!text.starts_with('-'));
                if text == "20" && style.color == theme.warning {
                    saw_warning = true;
                }
            }
        }
        assert!(saw_warning);
        let labels: Vec<&str> = list.texts().collect();
        assert_eq!(labels, vec!["20", "10", "0", "10", "20", "  2"]);
    }

    #[test]
    fn unknown_reading_centers_scale_on_zero() {
        let list = altimeter(None, Some(3.0));
        let texts: Vec<&str> = list.texts().collect();
        assert_eq!(texts.last(), Some(&"---"));
        assert!(texts.contains(&"0"));
    }

    #[test]
    fn unknown_reading_draws_no_trend_arrow() {
        let steady = line_count(&altimeter(None, Some(0.0)));
        assert_eq!(line_count(&altimeter(None, None)), steady);
        assert_eq!(line_count(&altimeter(None, Some(3.0))), steady);
        assert_eq!(line_count(&altimeter(None, Some(-40.0))), steady);
        // The same climb rate draws an arrow once the altitude is known.
        assert_eq!(
            line_count(&altimeter(Some(0.0), Some(3.0))),
            line_count(&altimeter(Some(0.0), None)) + 3
        );
    }

    #[test]
    fn zero_tick_sits_on_marker() {
        let list = altimeter(Some(0.0), None);
        let center = area().center().y;
        let zero_tick = list
            .primitives()
            .iter()
            .find_map(|primitive| match primitive {
                DrawPrimitive::Text { text, position, .. } if text == "0" => Some(*position),
                _ => None,
            })
            .unwrap();
        assert!((zero_tick.y - center).abs() < 1e-9);
    }

    #[test]
    fn small_vertical_speed_is_hidden_behind_marker() {
        let base = line_count(&altimeter(Some(50.0), None));
        assert_eq!(line_count(&altimeter(Some(50.0), Some(0.0))), base);
        assert_eq!(line_count(&altimeter(Some(50.0), Some(0.3))), base);
        assert_eq!(line_count(&altimeter(Some(50.0), Some(2.0))), base + 3);
    }

    #[test]
    fn climb_arrow_points_up_with_capped_head() {
        let list = altimeter(Some(50.0), Some(5.0));
        let lines: Vec<(Point, Point)> = list
            .primitives()
            .iter()
            .filter_map(|primitive| match primitive {
                DrawPrimitive::Line { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect();
        let (shaft_from, shaft_to) = lines[lines.len() - 3];
        let center = area().center().y;
        assert!(shaft_to.y < shaft_from.y);
        assert!((shaft_to.y - (center - area().height() * 0.45)).abs() < 1e-9);
        let (head_from, head_to) = lines[lines.len() - 1];
        assert_eq!(head_to, shaft_to);
        let cap = area().width() * 0.2 / 3.0;
        assert!(((head_from.x - head_to.x).abs() - cap).abs() < 1e-9);
    }

    fn airspeed(reading: f64) -> DrawList {
        tape_gauge(
            Rect::from_xywh(0.0, 0.0, 174.5, 610.9),
            &metrics(),
            Some(reading),
            None,
            &TapeConfig::airspeed(),
            &Theme::default(),
        )
    }

    #[test]
    fn airspeed_below_zero_uses_warning_color() {
        let theme = Theme::default();
        // 3.0 shows -4..=10; the four negative ticks are warnings.
        let warnings = airspeed(3.0)
            .primitives()
            .iter()
            .filter(|primitive| {
                matches!(primitive, DrawPrimitive::Line { stroke, .. } if stroke.color == theme.warning)
            })
            .count();
        assert_eq!(warnings, 4);

        // -2.0 shows -9..=5, labelled at -5, 0 and 5.
        let list = airspeed(-2.0);
        let labels: Vec<(&str, Color)> = list
            .primitives()
            .iter()
            .filter_map(|primitive| match primitive {
                DrawPrimitive::Text { text, style, .. } => Some((text.as_str(), style.color)),
                _ => None,
            })
            .collect();
        assert_eq!(
            labels,
            vec![
                ("5", theme.warning),
                ("0", theme.scale),
                ("5", theme.scale),
                ("-2.0", theme.scale),
            ]
        );
    }

    #[test]
    fn airspeed_ticks_hang_from_the_right() {
        let area = Rect::from_xywh(0.0, 0.0, 174.5, 610.9);
        let list = tape_gauge(
            area,
            &metrics(),
            Some(50.0),
            Some(10.0),
            &TapeConfig::airspeed(),
            &Theme::default(),
        );
        assert_eq!(list.texts().last(), Some("50.0"));
        let marker = list
            .primitives()
            .iter()
            .find_map(|primitive| match primitive {
                DrawPrimitive::FilledPath {
                    points,
                    fill: Some(Fill::Solid(color)),
                    ..
                } if *color == Color::BLACK => Some(points.clone()),
                _ => None,
            })
            .unwrap();
        // Tip on the right, body towards the left edge.
        assert!(marker[0].x > marker[2].x);
        // No trend arrow on the airspeed tape: one line per tick.
        assert_eq!(line_count(&list), 15);
    }
}
