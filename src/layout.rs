//! Panel placement for a canvas size.

use crate::config::{LARGE_TEXT_SIZE, LINE_WIDTH, MEDIUM_TEXT_SIZE, PfdConfig, SMALL_TEXT_SIZE};
use crate::geom::{Point, Rect};
use crate::math::constrain;

/// Canvas size in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Check whether anything can be drawn on this canvas.
    pub fn is_drawable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Stroke widths and text sizes derived from the canvas width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub line_width: f64,
    pub fine_line_width: f64,
    pub small_text: f64,
    pub medium_text: f64,
    pub large_text: f64,
}

impl Metrics {
    pub fn for_width(width: f64) -> Self {
        Self {
            line_width: constrain(width * LINE_WIDTH, 1.0, 6.0),
            fine_line_width: constrain(width * LINE_WIDTH * 2.0 / 3.0, 1.0, 2.0),
            small_text: width * SMALL_TEXT_SIZE,
            medium_text: width * MEDIUM_TEXT_SIZE,
            large_text: width * LARGE_TEXT_SIZE,
        }
    }

    /// Width of instrument box outlines.
    pub fn edge_width(&self) -> f64 {
        self.fine_line_width
    }
}

/// Placement of every instrument on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelLayout {
    pub canvas: CanvasSize,
    pub attitude: Rect,
    pub airspeed: Rect,
    pub altimeter: Rect,
    /// Bounding square of the compass disk. It may extend past the canvas.
    pub compass: Rect,
    /// Half the heading window visible on the compass, in degrees.
    pub compass_half_span: f64,
    /// How far the compass disk reaches into the attitude area.
    pub compass_intrusion: f64,
    pub metrics: Metrics,
}

impl PanelLayout {
    /// Reference size of the attitude area; the larger of its sides.
    pub fn attitude_view_size(&self) -> f64 {
        self.attitude.width().max(self.attitude.height())
    }

    pub fn compass_center(&self) -> Point {
        self.compass.center()
    }

    pub fn compass_radius(&self) -> f64 {
        self.compass.width() * 0.5
    }
}

/// Place the panels, or `None` when the canvas cannot hold them.
pub fn plan_layout(canvas: CanvasSize, config: &PfdConfig) -> Option<PanelLayout> {
    if !canvas.is_drawable() {
        return None;
    }
    let CanvasSize { width, height } = canvas;

    let preferred_attitude_width = width;
    let tape_width = (width / 5.5).max((width - preferred_attitude_width) * 0.5);
    let attitude_width = width - 2.0 * tape_width;
    let attitude_height = height.min(attitude_width);
    let attitude = Rect::from_xywh(tape_width, 0.0, attitude_width, attitude_height);
    let airspeed = Rect::from_xywh(0.0, 0.0, tape_width, attitude_height);
    let altimeter = Rect::from_xywh(attitude.right(), 0.0, tape_width, attitude_height);

    let compass_cfg = &config.compass;
    let size = compass_cfg.relative_width * attitude.width();
    let radius = size * 0.5;
    let unconstrained = attitude.bottom() + size / 4.0;
    let max_drop = attitude.width() * 0.5 * compass_cfg.bottom_margin;
    let constrained = if height - unconstrained > max_drop {
        height - max_drop
    } else {
        unconstrained
    };
    let center_y = (constrained * 2.0 + unconstrained) / 3.0;
    let compass = Rect::from_xywh(
        attitude.left() + (attitude.width() - size) * 0.5,
        center_y - radius,
        size,
        size,
    );

    let compass_half_span = if height - center_y < radius {
        let ratio = constrain((center_y - height) / radius, -1.0, 1.0);
        (ratio.acos().to_degrees() + compass_cfg.resolution as f64).min(180.0)
    } else {
        180.0
    };
    let compass_intrusion = (radius + attitude.bottom() - center_y).max(0.0);

    Some(PanelLayout {
        canvas,
        attitude,
        airspeed,
        altimeter,
        compass,
        compass_half_span,
        compass_intrusion,
        metrics: Metrics::for_width(width),
    })
}
