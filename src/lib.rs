//! gpui_pfd is a primary flight display geometry engine.
//! It turns a flight state snapshot and a canvas size into an ordered list of
//! resolved drawing primitives; the optional `gpui` feature paints them.

#![forbid(unsafe_code)]

pub mod attitude;
pub mod compass;
pub mod config;
pub mod geom;
pub mod horizon;
pub mod layout;
pub mod math;
pub mod overlay;
pub mod pfd;
pub mod render;
pub mod state;
pub mod style;
pub mod tape;
pub mod transform;

#[cfg(feature = "gpui")]
pub mod gpui_backend;

pub use config::{
    CompassConfig, ConfigError, PfdConfig, PfdConfigBuilder, PitchScaleConfig, RollScaleConfig,
    TapeConfig, TapeOrientation, TrendConfig,
};
pub use geom::{Point, Rect};
pub use layout::{CanvasSize, Metrics, PanelLayout, plan_layout};
pub use pfd::{PrimaryFlightDisplay, compose_frame};
pub use render::{
    Color, DrawList, DrawPrimitive, Fill, GradientStop, Stroke, TextAnchor, TextStyle,
};
pub use state::{
    FlightState, FlightStateHandle, GpsStatus, TelemetrySample, UNKNOWN_ALTITUDE,
    UNKNOWN_BEARING, UNKNOWN_SPEED,
};
pub use style::Theme;
pub use transform::Transform;

#[cfg(feature = "gpui")]
pub use gpui_backend::{PfdView, PfdViewConfig};
