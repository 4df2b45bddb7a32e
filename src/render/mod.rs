//! Drawing primitives produced by the instrument generators.
//!
//! These types are backend-agnostic. Every coordinate is already resolved to
//! screen pixels; consumers never apply a transform of their own.

use crate::geom::{Point, Rect};

/// RGBA color.
///
/// All components are expected to be in the 0.0..=1.0 range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Create a new color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque red.
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0, 1.0);

    /// Build a color from hue, saturation and value, each in 0.0..=1.0.
    pub fn from_hsv(h: f32, s: f32, v: f32, a: f32) -> Self {
        let h = (h.rem_euclid(1.0)) * 6.0;
        let sector = h.floor();
        let f = h - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        let (r, g, b) = match sector as u8 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        Self::new(r, g, b, a)
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }
}

/// Line stroke styling.
///
/// The width is expressed in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
}

impl Stroke {
    pub const fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

/// One color stop of a gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient axis, 0.0 at `start` and 1.0 at `end`.
    pub offset: f32,
    pub color: Color,
}

/// Area fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fill {
    /// Uniform color.
    Solid(Color),
    /// Two-stop linear gradient between screen points, padded beyond the ends.
    LinearGradient {
        /// Screen point where the first stop applies.
        start: Point,
        /// Screen point where the second stop applies.
        end: Point,
        /// Gradient stops.
        stops: [GradientStop; 2],
    },
}

impl Fill {
    /// A representative color, used by backends without gradient support.
    pub fn average_color(&self) -> Color {
        match self {
            Self::Solid(color) => *color,
            Self::LinearGradient { stops, .. } => {
                let [a, b] = stops.map(|stop| stop.color);
                Color::new(
                    (a.r + b.r) * 0.5,
                    (a.g + b.g) * 0.5,
                    (a.b + b.b) * 0.5,
                    (a.a + b.a) * 0.5,
                )
            }
        }
    }
}

/// Which point of the text box the text position refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    /// Box center.
    Center,
    /// Middle of the left edge.
    LeftCenter,
    /// Middle of the right edge.
    RightCenter,
    /// Middle of the top edge.
    TopCenter,
}

/// Text styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Text color.
    pub color: Color,
    /// Font size in pixels.
    pub size: f32,
}

impl TextStyle {
    pub fn new(color: Color, size: f64) -> Self {
        Self {
            color,
            size: size as f32,
        }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            size: 12.0,
        }
    }
}

/// A single resolved drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawPrimitive {
    /// Straight line segment.
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    /// Circular arc, optionally filled as a sector.
    ///
    /// Angles are in degrees, measured clockwise on screen from the +X axis.
    /// A sweep of 360 describes a full circle.
    Arc {
        center: Point,
        radius: f64,
        start_deg: f64,
        sweep_deg: f64,
        stroke: Option<Stroke>,
        fill: Option<Color>,
    },
    /// Closed polygon with optional fill and outline.
    FilledPath {
        points: Vec<Point>,
        fill: Option<Fill>,
        stroke: Option<Stroke>,
    },
    /// Text placed relative to an anchor point.
    Text {
        position: Point,
        anchor: TextAnchor,
        text: String,
        style: TextStyle,
        /// Rotation of the glyph baseline in degrees, clockwise on screen.
        rotation_deg: f64,
    },
}

impl DrawPrimitive {
    /// Convenience constructor for a line.
    pub fn line(from: Point, to: Point, stroke: Stroke) -> Self {
        Self::Line { from, to, stroke }
    }

    /// Convenience constructor for an axis-aligned rectangle path.
    pub fn rect(rect: Rect, fill: Option<Fill>, stroke: Option<Stroke>) -> Self {
        Self::FilledPath {
            points: rect.corners().to_vec(),
            fill,
            stroke,
        }
    }

    /// Convenience constructor for text.
    pub fn label(
        position: Point,
        anchor: TextAnchor,
        text: impl Into<String>,
        style: TextStyle,
        rotation_deg: f64,
    ) -> Self {
        Self::Text {
            position,
            anchor,
            text: text.into(),
            style,
            rotation_deg,
        }
    }

    /// Convenience constructor for a closed polygon.
    pub fn polygon(points: Vec<Point>, fill: Option<Fill>, stroke: Option<Stroke>) -> Self {
        Self::FilledPath {
            points,
            fill,
            stroke,
        }
    }

    /// Text content, when this is a text primitive.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// Ordered primitive list. Earlier primitives are painted underneath later ones.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DrawList {
    primitives: Vec<DrawPrimitive>,
}

impl DrawList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a primitive.
    pub fn push(&mut self, primitive: DrawPrimitive) {
        self.primitives.push(primitive);
    }

    /// Append all primitives of another list.
    pub fn append(&mut self, mut other: DrawList) {
        self.primitives.append(&mut other.primitives);
    }

    /// Access all primitives.
    pub fn primitives(&self) -> &[DrawPrimitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Iterate over all text strings in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.primitives.iter().filter_map(DrawPrimitive::text)
    }

    /// Consume the list.
    pub fn into_vec(self) -> Vec<DrawPrimitive> {
        self.primitives
    }
}

impl Extend<DrawPrimitive> for DrawList {
    fn extend<T: IntoIterator<Item = DrawPrimitive>>(&mut self, iter: T) {
        self.primitives.extend(iter);
    }
}

/// Corner points of a rectangle with rounded corners.
///
/// Each corner is approximated by `segments` straight pieces.
pub fn rounded_rect_points(rect: Rect, radius: f64, segments: usize) -> Vec<Point> {
    let radius = radius.min(rect.width() * 0.5).min(rect.height() * 0.5).max(0.0);
    if radius <= 0.0 || segments == 0 {
        return rect.corners().to_vec();
    }
    // Corner centers paired with the screen angle where each corner starts,
    // walking clockwise from the top-left.
    let corners = [
        (Point::new(rect.min.x + radius, rect.min.y + radius), 180.0),
        (Point::new(rect.max.x - radius, rect.min.y + radius), 270.0),
        (Point::new(rect.max.x - radius, rect.max.y - radius), 0.0),
        (Point::new(rect.min.x + radius, rect.max.y - radius), 90.0),
    ];
    let mut points = Vec::with_capacity(4 * (segments + 1));
    for (center, start) in corners {
        for step in 0..=segments {
            let angle = (start + 90.0 * step as f64 / segments as f64).to_radians();
            points.push(Point::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            ));
        }
    }
    points
}
