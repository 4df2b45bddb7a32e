//! Rigid coordinate frames between instrument-local and screen space.
//!
//! Generators describe their geometry in a local frame (for example a frame
//! rotated by the current roll) and map every point to the screen before it
//! leaves the generator. Frames are values: deriving a new frame never
//! mutates the one it was derived from.

use crate::geom::Point;
use crate::math::rotate_vec;

/// A rotation followed by a translation, mapping local points to the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    origin: Point,
    rotation: f64,
}

impl Transform {
    /// The identity frame.
    pub const IDENTITY: Self = Self {
        origin: Point::ORIGIN,
        rotation: 0.0,
    };

    /// A frame whose local origin sits at `origin` on screen.
    pub fn at(origin: Point) -> Self {
        Self {
            origin,
            rotation: 0.0,
        }
    }

    /// Screen position of the local origin.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Accumulated rotation in degrees, clockwise on screen.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Derive a frame translated along the current local axes.
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        let (x, y) = rotate_vec(dx, dy, self.rotation);
        Self {
            origin: Point::new(self.origin.x + x, self.origin.y + y),
            rotation: self.rotation,
        }
    }

    /// Derive a frame rotated about its local origin.
    pub fn rotated(self, degrees: f64) -> Self {
        Self {
            origin: self.origin,
            rotation: self.rotation + degrees,
        }
    }

    /// Compose with a frame expressed in this frame's local space.
    pub fn then(self, local: Transform) -> Self {
        Self {
            origin: self.map(local.origin),
            rotation: self.rotation + local.rotation,
        }
    }

    /// Map a local point into screen space.
    pub fn map(&self, point: Point) -> Point {
        let (x, y) = rotate_vec(point.x, point.y, self.rotation);
        Point::new(self.origin.x + x, self.origin.y + y)
    }

    /// Map local coordinates into screen space.
    pub fn map_xy(&self, x: f64, y: f64) -> Point {
        self.map(Point::new(x, y))
    }

    /// Map a screen point back into local space.
    pub fn invert(&self, point: Point) -> Point {
        let (x, y) = rotate_vec(
            point.x - self.origin.x,
            point.y - self.origin.y,
            -self.rotation,
        );
        Point::new(x, y)
    }
}
