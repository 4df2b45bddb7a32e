use gpui::{App, Background, PathBuilder, Pixels, TextRun, Window, font, point, px};

use crate::geom::Point;
use crate::render::{
    Color, DrawList, DrawPrimitive, Fill, GradientStop, Stroke, TextAnchor, TextStyle,
};

use super::config::PfdViewConfig;

/// Paint a frame whose primitives are relative to `origin`.
pub(crate) fn paint_frame(
    list: &DrawList,
    origin: Point,
    config: &PfdViewConfig,
    window: &mut Window,
    cx: &mut App,
) {
    let at = |p: &Point| Point::new(p.x + origin.x, p.y + origin.y);
    for primitive in list.primitives() {
        match primitive {
            DrawPrimitive::Line { from, to, stroke } => {
                paint_polyline(window, &[at(from), at(to)], false, *stroke);
            }
            DrawPrimitive::Arc {
                center,
                radius,
                start_deg,
                sweep_deg,
                stroke,
                fill,
            } => {
                let closed = sweep_deg.abs() >= 360.0;
                let points = tessellate_arc(
                    at(center),
                    *radius,
                    *start_deg,
                    *sweep_deg,
                    config.arc_step_deg,
                );
                if let Some(color) = fill {
                    let mut outline = points.clone();
                    if !closed {
                        outline.push(at(center));
                    }
                    paint_polygon(window, &outline, Fill::Solid(*color));
                }
                if let Some(stroke) = stroke {
                    paint_polyline(window, &points, closed, *stroke);
                }
            }
            DrawPrimitive::FilledPath {
                points,
                fill,
                stroke,
            } => {
                let points: Vec<Point> = points.iter().map(at).collect();
                if let Some(fill) = fill {
                    let fill = match *fill {
                        Fill::LinearGradient { start, end, stops } => Fill::LinearGradient {
                            start: at(&start),
                            end: at(&end),
                            stops,
                        },
                        solid => solid,
                    };
                    paint_polygon(window, &points, fill);
                }
                if let Some(stroke) = stroke {
                    paint_polyline(window, &points, true, *stroke);
                }
            }
            DrawPrimitive::Text {
                position,
                anchor,
                text,
                style,
                ..
            } => {
                // Labels are painted upright at their rotated anchor.
                paint_text(
                    window,
                    cx,
                    at(position),
                    *anchor,
                    text,
                    style,
                    config.font_family,
                );
            }
        }
    }
}

fn to_point(p: Point) -> gpui::Point<Pixels> {
    point(px(p.x as f32), px(p.y as f32))
}

fn tessellate_arc(
    center: Point,
    radius: f64,
    start_deg: f64,
    sweep_deg: f64,
    step_deg: f64,
) -> Vec<Point> {
    let sweep = sweep_deg.clamp(-360.0, 360.0);
    let pieces = (sweep.abs() / step_deg.max(0.5)).ceil().max(1.0) as usize;
    (0..=pieces)
        .map(|i| {
            let angle = (start_deg + sweep * i as f64 / pieces as f64).to_radians();
            Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
        })
        .collect()
}

fn paint_polyline(window: &mut Window, points: &[Point], closed: bool, stroke: Stroke) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    let mut builder = PathBuilder::stroke(px(stroke.width.max(0.5)));
    builder.move_to(to_point(*first));
    for p in rest {
        builder.line_to(to_point(*p));
    }
    if closed {
        builder.close();
    }
    if let Ok(path) = builder.build() {
        window.paint_path(path, to_rgba(stroke.color));
    }
}

fn paint_polygon(window: &mut Window, points: &[Point], fill: Fill) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    if rest.len() < 2 {
        return;
    }
    let mut builder = PathBuilder::fill();
    builder.move_to(to_point(*first));
    for p in rest {
        builder.line_to(to_point(*p));
    }
    builder.close();
    let background = match fill {
        Fill::Solid(color) => Background::from(to_hsla(color)),
        Fill::LinearGradient { start, end, stops } => {
            gradient_background(points, start, end, &stops)
                .unwrap_or_else(|| Background::from(to_hsla(fill.average_color())))
        }
    };
    if let Ok(path) = builder.build() {
        window.paint_path(path, background);
    }
}

/// Map a two-point gradient onto GPUI's angle based gradient, which spans the
/// bounding box of the painted path.
fn gradient_background(
    points: &[Point],
    start: Point,
    end: Point,
    stops: &[GradientStop; 2],
) -> Option<Background> {
    let (dx, dy) = (end.x - start.x, end.y - start.y);
    let length = dx.hypot(dy);
    if length <= f64::EPSILON {
        return None;
    }
    let (ux, uy) = (dx / length, dy / length);
    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    let project = |x: f64, y: f64| x * ux + y * uy;
    let corners = [
        project(min_x, min_y),
        project(max_x, min_y),
        project(max_x, max_y),
        project(min_x, max_y),
    ];
    let low = corners.iter().copied().fold(f64::INFINITY, f64::min);
    let high = corners.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = high - low;
    if span.is_nan() || span <= f64::EPSILON {
        return None;
    }
    let position = |p: Point| ((project(p.x, p.y) - low) / span).clamp(0.0, 1.0) as f32;
    // Zero degrees points up, growing clockwise.
    let angle = dx.atan2(-dy).to_degrees() as f32;
    Some(gpui::linear_gradient(
        angle,
        gpui::linear_color_stop(to_hsla(stops[0].color), position(start)),
        gpui::linear_color_stop(to_hsla(stops[1].color), position(end)),
    ))
}

fn paint_text(
    window: &mut Window,
    cx: &mut App,
    position: Point,
    anchor: TextAnchor,
    text: &str,
    style: &TextStyle,
    family: &'static str,
) {
    if text.is_empty() {
        return;
    }
    let font_size = px(style.size);
    let run = TextRun {
        len: text.len(),
        font: font(family),
        color: to_hsla(style.color),
        background_color: None,
        underline: None,
        strikethrough: None,
    };
    let shaped = window
        .text_system()
        .shape_line(text.to_string().into(), font_size, &[run], None);
    let line_height = shaped.ascent + shaped.descent;
    let width = f32::from(shaped.width);
    let height = f32::from(line_height);
    let (x, y) = (position.x as f32, position.y as f32);
    let (left, top) = match anchor {
        TextAnchor::Center => (x - width * 0.5, y - height * 0.5),
        TextAnchor::LeftCenter => (x, y - height * 0.5),
        TextAnchor::RightCenter => (x - width, y - height * 0.5),
        TextAnchor::TopCenter => (x - width * 0.5, y),
    };
    let _ = shaped.paint(point(px(left), px(top)), line_height, window, cx);
}

fn to_rgba(color: Color) -> gpui::Rgba {
    gpui::Rgba {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }
}

fn to_hsla(color: Color) -> gpui::Hsla {
    gpui::Hsla::from(to_rgba(color))
}
