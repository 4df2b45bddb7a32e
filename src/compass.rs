//! Heading disk below the attitude area.
//!
//! The disk is centered on [`PanelLayout::compass`] and rotated so the
//! current heading sits under the lubber mark at the top. Only the part of
//! the scale inside [`PanelLayout::compass_half_span`] is generated.

use crate::config::CompassConfig;
use crate::geom::{Point, Rect};
use crate::layout::PanelLayout;
use crate::math::{constrain, normalize_heading, ticks_in, wrap_offset};
use crate::render::{
    DrawList, DrawPrimitive, Fill, Stroke, TextAnchor, TextStyle, rounded_rect_points,
};
use crate::state::FlightState;
use crate::style::Theme;
use crate::transform::Transform;

const WIND_NAMES: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
const INNER_RADIUS: f64 = 0.96;
const LABEL_RADIUS: f64 = 0.75;
const READOUT_CENTER: f64 = -0.52;
const READOUT_HEIGHT: f64 = 0.28;
const READOUT_TEXT: f64 = -0.38;

/// Heading readout text: rounded heading in `000..=359`.
pub fn heading_text(yaw: f64) -> String {
    format!("{:03}", (yaw.round() as i64).rem_euclid(360))
}

/// Compass disk with scale, lubber mark, readout and deviation indicator.
pub fn compass_disk(
    layout: &PanelLayout,
    state: &FlightState,
    config: &CompassConfig,
    show_navigation: bool,
    theme: &Theme,
) -> DrawList {
    let mut list = DrawList::new();
    let metrics = &layout.metrics;
    let center = layout.compass_center();
    let radius = layout.compass_radius();
    let inner = radius * INNER_RADIUS;
    let edge = theme.edge_stroke(metrics.edge_width());
    let scale_pen = Stroke::new(theme.compass_scale, metrics.fine_line_width as f32);

    list.push(DrawPrimitive::Arc {
        center,
        radius,
        start_deg: 0.0,
        sweep_deg: 360.0,
        stroke: Some(edge),
        fill: Some(theme.instrument_background),
    });

    let yaw = state.yaw;
    let half_span = layout.compass_half_span;
    let mut ticks = ticks_in(yaw - half_span, yaw + half_span, config.resolution).peekable();
    let first = ticks.peek().copied().unwrap_or_default();
    for tick in ticks.take_while(|tick| tick.saturating_sub(first) < 360) {
        let display = tick.rem_euclid(360);
        let offset = wrap_offset(tick as f64 - yaw);
        let frame = Transform::at(center).rotated(offset);
        let major = display % config.major_tick == 0;
        let mut drew_arrow = false;

        if display % 30 == 0 && display % 90 != 0 {
            list.push(DrawPrimitive::label(
                frame.map_xy(0.0, -inner * LABEL_RADIUS),
                TextAnchor::Center,
                (display / 10).to_string(),
                TextStyle::new(theme.compass_scale, metrics.small_text),
                offset,
            ));
        } else {
            if display != 0 && display % config.arrow_tick == 0 {
                let half_width = inner * config.marker_width / 4.0;
                list.push(DrawPrimitive::polygon(
                    vec![
                        frame.map_xy(0.0, -inner * (1.0 - config.marker_height / 2.0)),
                        frame.map_xy(half_width, -inner),
                        frame.map_xy(-half_width, -inner),
                    ],
                    Some(Fill::Solid(theme.compass_scale)),
                    Some(scale_pen),
                ));
                drew_arrow = true;
            }
            if display % 45 == 0 {
                list.push(DrawPrimitive::label(
                    frame.map_xy(0.0, -inner * LABEL_RADIUS),
                    TextAnchor::Center,
                    WIND_NAMES[(display / 45) as usize % WIND_NAMES.len()],
                    TextStyle::new(theme.compass_scale, metrics.medium_text),
                    offset,
                ));
            }
        }

        let start = if drew_arrow { -inner * 0.94 } else { -inner };
        let end = if major { -inner * 0.86 } else { -inner * 0.90 };
        list.push(DrawPrimitive::line(
            frame.map_xy(0.0, start),
            frame.map_xy(0.0, end),
            scale_pen,
        ));
    }

    let frame = Transform::at(center);
    let lubber_half = radius * config.marker_width / 2.0;
    let lubber_base = -radius - radius * config.marker_height - 2.0;
    list.push(DrawPrimitive::polygon(
        vec![
            frame.map_xy(0.0, -radius - 2.0),
            frame.map_xy(lubber_half, lubber_base),
            frame.map_xy(-lubber_half, lubber_base),
        ],
        None,
        Some(scale_pen),
    ));

    // Keep the readout box on the canvas.
    let readout_bottom = frame
        .map_xy(0.0, radius * (READOUT_CENTER + READOUT_HEIGHT))
        .y;
    let upshift = (readout_bottom - layout.canvas.height).max(0.0);
    let readout = Rect::from_xywh(
        center.x - radius / 3.0,
        center.y + radius * READOUT_CENTER - upshift,
        radius * 2.0 / 3.0,
        radius * READOUT_HEIGHT,
    );
    list.push(DrawPrimitive::polygon(
        rounded_rect_points(readout, metrics.edge_width() * 2.0 / 3.0, 4),
        None,
        Some(edge),
    ));
    list.push(DrawPrimitive::label(
        frame.map_xy(0.0, radius * READOUT_TEXT - upshift),
        TextAnchor::Center,
        heading_text(normalize_heading(yaw)),
        TextStyle::new(theme.scale, metrics.large_text),
        0.0,
    ));

    if show_navigation {
        if let Some(line) = deviation_indicator(center, radius, state, config) {
            list.push(DrawPrimitive::line(
                line.0,
                line.1,
                Stroke::new(theme.compass_scale, metrics.line_width as f32),
            ));
        }
    }
    list
}

/// Endpoints of the course deviation bar, when a course is active.
///
/// The bar is a chord of a circle of `crosstrack_radius` times the disk
/// radius, offset sideways in proportion to the clamped crosstrack error and
/// turned towards the target bearing.
fn deviation_indicator(
    center: Point,
    radius: f64,
    state: &FlightState,
    config: &CompassConfig,
) -> Option<(Point, Point)> {
    let bearing = state.navigation_bearing()?;
    let error = state.crosstrack_error()?;
    let error = constrain(error, -config.crosstrack_max, config.crosstrack_max);
    let r = radius * config.crosstrack_radius;
    let x = error / config.crosstrack_max * r;
    let y = (r * r - x * x).max(0.0).sqrt();
    let frame = Transform::at(center).rotated(wrap_offset(bearing - state.yaw));
    Some((frame.map_xy(x, y), frame.map_xy(x, -y)))
}
