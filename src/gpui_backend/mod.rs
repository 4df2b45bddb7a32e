//! GPUI integration for gpui_pfd.
//!
//! This module provides a GPUI view that computes a frame from a shared
//! [`FlightStateHandle`](crate::state::FlightStateHandle) on every paint and
//! repaints on a fixed timer.

mod config;
mod paint;
mod view;

pub use config::PfdViewConfig;
pub use view::PfdView;
