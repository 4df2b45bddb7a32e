//! Sky, ground and horizon line.

use crate::attitude::attitude_frame;
use crate::geom::{Point, Rect};
use crate::layout::PanelLayout;
use crate::math::{max4, min4, pitch_to_pixels};
use crate::render::{Color, DrawList, DrawPrimitive, Fill, GradientStop, Stroke};
use crate::state::FlightState;
use crate::style::Theme;
use crate::transform::Transform;

/// Pitch covered by the sky and ground gradients.
const GRADIENT_SPAN_DEG: f64 = 60.0;

fn gradient(frame: &Transform, far: Point, far_color: Color, near_color: Color) -> Fill {
    Fill::LinearGradient {
        start: frame.map(far),
        end: frame.origin(),
        stops: [
            GradientStop {
                offset: 0.0,
                color: far_color,
            },
            GradientStop {
                offset: 1.0,
                color: near_color,
            },
        ],
    }
}

/// Sky and ground fills covering the whole canvas, plus the horizon line.
pub fn horizon(layout: &PanelLayout, state: &FlightState, theme: &Theme) -> DrawList {
    let mut list = DrawList::new();
    let view = layout.attitude_view_size();
    let frame = attitude_frame(layout, state.roll)
        .translated(0.0, pitch_to_pixels(view, state.pitch));
    let gradient_end = pitch_to_pixels(view, GRADIENT_SPAN_DEG);

    // Bounding box of the canvas in the horizon frame.
    let canvas = Rect::from_xywh(0.0, 0.0, layout.canvas.width, layout.canvas.height);
    let [a, b, c, d] = canvas.corners().map(|corner| frame.invert(corner));
    let min_x = min4(a.x, b.x, c.x, d.x);
    let max_x = max4(a.x, b.x, c.x, d.x);
    let min_y = min4(a.y, b.y, c.y, d.y);
    let max_y = max4(a.y, b.y, c.y, d.y);

    if min_y < 0.0 {
        list.push(DrawPrimitive::polygon(
            vec![
                frame.map_xy(min_x, 0.0),
                frame.map_xy(min_x, min_y),
                frame.map_xy(max_x, min_y),
                frame.map_xy(max_x, 0.0),
            ],
            Some(gradient(
                &frame,
                Point::new(0.0, -gradient_end),
                theme.sky_far,
                theme.sky_near,
            )),
            None,
        ));
    }
    if max_y > 0.0 {
        list.push(DrawPrimitive::polygon(
            vec![
                frame.map_xy(max_x, 0.0),
                frame.map_xy(max_x, max_y),
                frame.map_xy(min_x, max_y),
                frame.map_xy(min_x, 0.0),
            ],
            Some(gradient(
                &frame,
                Point::new(0.0, gradient_end),
                theme.ground_far,
                theme.ground_near,
            )),
            None,
        ));
    }

    list.push(DrawPrimitive::line(
        frame.map_xy(min_x, 0.0),
        frame.map_xy(max_x, 0.0),
        Stroke::new(theme.horizon, layout.metrics.line_width as f32),
    ));
    list
}
