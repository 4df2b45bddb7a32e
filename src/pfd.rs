//! Frame composition.

use crate::attitude::{pitch_ladder, roll_scale};
use crate::compass::compass_disk;
use crate::config::PfdConfig;
use crate::horizon::horizon;
use crate::layout::{CanvasSize, PanelLayout, plan_layout};
use crate::overlay::airframe_overlay;
use crate::render::DrawList;
use crate::state::FlightState;
use crate::tape::tape_gauge;

/// Primary flight display.
///
/// Holds only configuration: every [`render`](Self::render) call is
/// independent and returns the same list for the same inputs.
#[derive(Debug, Clone, Default)]
pub struct PrimaryFlightDisplay {
    config: PfdConfig,
}

/// The configuration itself when valid, the defaults otherwise.
fn checked(config: PfdConfig) -> PfdConfig {
    match config.validate() {
        Ok(()) => config,
        Err(err) => {
            log::warn!("invalid instrument configuration, using defaults: {err}");
            PfdConfig::default()
        }
    }
}

impl PrimaryFlightDisplay {
    /// Create a display; an invalid configuration is replaced by the defaults.
    pub fn new(config: PfdConfig) -> Self {
        Self {
            config: checked(config),
        }
    }

    pub fn config(&self) -> &PfdConfig {
        &self.config
    }

    /// Replace the configuration; an invalid one is replaced by the defaults.
    pub fn set_config(&mut self, config: PfdConfig) {
        self.config = checked(config);
    }

    /// Panel placement for a canvas, `None` when nothing can be drawn.
    pub fn layout(&self, canvas: CanvasSize) -> Option<PanelLayout> {
        plan_layout(canvas, &self.config)
    }

    /// Compute the primitives of one frame, back to front.
    pub fn render(&self, state: &FlightState, canvas: CanvasSize) -> DrawList {
        compose_validated(state, canvas, &self.config)
    }
}

/// Compute the primitives of one frame with the given configuration.
///
/// Paint order is horizon, attitude scales, airframe symbols, compass disk,
/// altimeter and airspeed tape. A degenerate canvas yields an empty list and
/// an invalid configuration draws with the defaults.
pub fn compose_frame(state: &FlightState, canvas: CanvasSize, config: &PfdConfig) -> DrawList {
    match config.validate() {
        Ok(()) => compose_validated(state, canvas, config),
        Err(err) => {
            log::warn!("invalid instrument configuration, using defaults: {err}");
            compose_validated(state, canvas, &PfdConfig::default())
        }
    }
}

fn compose_validated(state: &FlightState, canvas: CanvasSize, config: &PfdConfig) -> DrawList {
    let Some(layout) = plan_layout(canvas, config) else {
        log::debug!(
            "skipping frame for degenerate canvas {}x{}",
            canvas.width,
            canvas.height
        );
        return DrawList::new();
    };
    let state = state.sanitized();
    let theme = &config.theme;

    let mut list = horizon(&layout, &state, theme);
    list.append(roll_scale(&layout, &state, &config.roll_scale, theme));
    list.append(pitch_ladder(&layout, &state, &config.pitch_scale, theme));
    list.append(airframe_overlay(&layout, &state, &config.roll_scale, theme));
    list.append(compass_disk(
        &layout,
        &state,
        &config.compass,
        config.show_navigation,
        theme,
    ));
    list.append(tape_gauge(
        layout.altimeter,
        &layout.metrics,
        state.displayed_altitude(),
        state.vertical_velocity(),
        &config.altimeter,
        theme,
    ));
    list.append(tape_gauge(
        layout.airspeed,
        &layout.metrics,
        state.displayed_speed(),
        None,
        &config.airspeed,
        theme,
    ));

    log::trace!(
        "composed {} primitives for {}x{} canvas, compass half span {:.1}",
        list.len(),
        canvas.width,
        canvas.height,
        layout.compass_half_span
    );
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::DrawPrimitive;
    use crate::state::FlightStateHandle;

    fn scenario_state() -> FlightState {
        let mut state = FlightState::new();
        state.yaw = 90.0;
        state.primary_altitude = 100.0;
        state.vertical_velocity = 0.0;
        state.primary_speed = 50.0;
        state
    }

    fn canvas() -> CanvasSize {
        CanvasSize::new(960.0, 640.0)
    }

    #[test]
    fn level_flight_scenario() {
        let pfd = PrimaryFlightDisplay::default();
        let list = pfd.render(&scenario_state(), canvas());
        let texts: Vec<&str> = list.texts().collect();
        assert!(texts.contains(&"090"));
        assert!(texts.contains(&"100"));
        // Airspeed readout is the final primitive.
        assert_eq!(texts.last(), Some(&"50.0"));

        let layout = pfd.layout(canvas()).unwrap();
        let center = layout.attitude.center();
        let on_centerline = list.primitives().iter().any(|primitive| match primitive {
            DrawPrimitive::Line { from, to, stroke } => {
                stroke.color == pfd.config().theme.scale
                    && (from.y - center.y).abs() < 1e-9
                    && (to.y - center.y).abs() < 1e-9
                    && ((from.x + to.x) * 0.5 - center.x).abs() < 1e-9
            }
            _ => false,
        });
        assert!(on_centerline);
    }

    #[test]
    fn horizon_is_painted_first() {
        let list = PrimaryFlightDisplay::default().render(&scenario_state(), canvas());
        assert!(matches!(
            list.primitives()[0],
            DrawPrimitive::FilledPath { .. }
        ));
    }

    #[test]
    fn rendering_is_idempotent() {
        let pfd = PrimaryFlightDisplay::default();
        let state = scenario_state();
        assert_eq!(pfd.render(&state, canvas()), pfd.render(&state, canvas()));
    }

    #[test]
    fn nan_roll_renders_level_then_recovers() {
        let pfd = PrimaryFlightDisplay::default();
        let mut state = scenario_state();
        state.roll = f64::NAN;
        let nan_frame = pfd.render(&state, canvas());
        state.roll = 0.0;
        let level_frame = pfd.render(&state, canvas());
        assert_eq!(nan_frame, level_frame);

        state.roll = 30.0;
        let banked = pfd.render(&state, canvas());
        assert_ne!(banked, level_frame);
        for primitive in banked.primitives() {
            if let DrawPrimitive::Line { from, to, .. } = primitive {
                assert!(from.is_finite() && to.is_finite());
            }
        }
    }

    #[test]
    fn infinite_crosstrack_draws_no_deviation_bar() {
        let pfd = PrimaryFlightDisplay::default();
        let mut state = scenario_state();
        state.navigation_target_bearing = 45.0;
        let baseline = pfd.render(&state, canvas()).len();
        state.navigation_crosstrack_error = f64::INFINITY;
        assert_eq!(pfd.render(&state, canvas()).len(), baseline);
        state.navigation_crosstrack_error = 200.0;
        assert_eq!(pfd.render(&state, canvas()).len(), baseline + 1);

        let hidden = PfdConfig::builder().show_navigation(false).build().unwrap();
        assert_eq!(compose_frame(&state, canvas(), &hidden).len(), baseline);
    }

    #[test]
    fn unknown_readings_show_placeholders() {
        let list = PrimaryFlightDisplay::default().render(&FlightState::new(), canvas());
        let placeholders = list.texts().filter(|text| *text == "---").count();
        assert_eq!(placeholders, 2);
        assert!(list.texts().any(|text| text == "GS ---"));
    }

    #[test]
    fn degenerate_canvas_yields_empty_frame() {
        let pfd = PrimaryFlightDisplay::default();
        assert!(pfd.render(&scenario_state(), CanvasSize::new(0.0, 0.0)).is_empty());
        assert!(pfd.render(&scenario_state(), CanvasSize::new(-5.0, 300.0)).is_empty());
    }

    #[test]
    fn runaway_readings_still_render() {
        let pfd = PrimaryFlightDisplay::default();
        let mut state = scenario_state();
        state.pitch = 1e19;
        state.yaw = 1e20;
        state.primary_altitude = 1e20;
        state.vertical_velocity = 4.0;
        state.primary_speed = -1e30;
        let list = pfd.render(&state, canvas());
        assert!(!list.is_empty());
        let texts: Vec<&str> = list.texts().collect();
        assert_eq!(texts.iter().filter(|text| **text == "---").count(), 2);
        for primitive in list.primitives() {
            if let DrawPrimitive::Line { from, to, .. } = primitive {
                assert!(from.is_finite() && to.is_finite());
            }
        }
    }

    #[test]
    fn unknown_altitude_hides_climb_arrow() {
        let pfd = PrimaryFlightDisplay::default();
        let mut state = FlightState::new();
        state.vertical_velocity = 0.0;
        let level = pfd.render(&state, canvas()).len();
        state.vertical_velocity = 3.0;
        assert_eq!(pfd.render(&state, canvas()).len(), level);
        state.primary_altitude = 100.0;
        let known_level = {
            let mut steady = state.clone();
            steady.vertical_velocity = 0.0;
            pfd.render(&steady, canvas()).len()
        };
        assert_eq!(pfd.render(&state, canvas()).len(), known_level + 3);
    }

    #[test]
    fn invalid_configuration_falls_back_to_defaults() {
        let mut config = PfdConfig::default();
        config.compass.resolution = 0;
        config.altimeter.major_resolution = 0;
        let pfd = PrimaryFlightDisplay::new(config.clone());
        assert_eq!(pfd.config(), &PfdConfig::default());

        let mut display = PrimaryFlightDisplay::default();
        display.set_config(config.clone());
        assert_eq!(display.config(), &PfdConfig::default());

        let state = scenario_state();
        assert_eq!(
            compose_frame(&state, canvas(), &config),
            PrimaryFlightDisplay::default().render(&state, canvas())
        );
    }

    #[test]
    fn telemetry_feeds_the_frame() {
        let handle = FlightStateHandle::new();
        handle.update_attitude(0.0, 0.0, std::f64::consts::FRAC_PI_2);
        handle.update_gps_altitude(42.0);
        handle.set_primary_sources(false, true);
        let list = PrimaryFlightDisplay::default().render(&handle.snapshot(), canvas());
        let texts: Vec<&str> = list.texts().collect();
        assert!(texts.contains(&"090"));
        assert!(texts.contains(&" 42"));
    }
}
