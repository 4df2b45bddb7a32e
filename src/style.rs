//! Instrument palette.

use crate::render::{Color, Stroke};

/// Colors used across the instrument panels.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Sky gradient color far above the horizon.
    pub sky_far: Color,
    /// Sky gradient color at the horizon.
    pub sky_near: Color,
    /// Ground gradient color far below the horizon.
    pub ground_far: Color,
    /// Ground gradient color at the horizon.
    pub ground_near: Color,
    /// Horizon line color.
    pub horizon: Color,
    /// Translucent fill behind tape gauges and the compass disk.
    pub instrument_background: Color,
    /// Outline color of instrument boxes.
    pub instrument_edge: Color,
    /// Scale markings drawn over the attitude area and tapes.
    pub scale: Color,
    /// Compass disk markings.
    pub compass_scale: Color,
    /// Airframe-fixed reference symbols.
    pub airframe: Color,
    /// Tape ticks below zero.
    pub warning: Color,
    /// Fill of the tape readout markers.
    pub marker_fill: Color,
}

impl Theme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pen used for instrument outlines at the given width.
    pub fn edge_stroke(&self, width: f64) -> Stroke {
        Stroke::new(self.instrument_edge, width as f32)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            sky_far: Color::from_hsv(0.6, 1.0, 0.7, 1.0),
            sky_near: Color::from_hsv(0.6, 0.25, 0.9, 1.0),
            ground_far: Color::from_hsv(0.25, 1.0, 0.5, 1.0),
            ground_near: Color::from_hsv(0.25, 0.25, 0.5, 1.0),
            horizon: Color::GREEN,
            instrument_background: Color::from_hsv(0.0, 0.0, 0.3, 0.3),
            instrument_edge: Color::from_hsv(0.0, 0.0, 0.65, 0.5),
            scale: Color::WHITE,
            compass_scale: Color::BLACK,
            airframe: Color::RED,
            warning: Color::RED,
            marker_fill: Color::BLACK,
        }
    }
}
