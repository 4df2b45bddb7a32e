//! Flight state snapshot and telemetry ingest.
//!
//! Telemetry producers write through a [`FlightStateHandle`]; the renderer
//! takes one [`FlightStateHandle::snapshot`] per frame and never holds the
//! lock while computing geometry.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::math::{normalize_heading, wrap_offset};

/// Speed reading meaning "no data".
pub const UNKNOWN_SPEED: f64 = -1.0;
/// Altitude and vertical speed reading meaning "no data".
pub const UNKNOWN_ALTITUDE: f64 = -1000.0;
/// Navigation bearing meaning "no target".
pub const UNKNOWN_BEARING: f64 = 0.0;
/// Readings larger than this in magnitude cannot be placed on a scale and
/// are treated as unknown.
pub const READING_LIMIT: f64 = 1.0e9;

/// Auxiliary parameter names recognized by the overlays.
pub mod aux {
    pub const VOLTAGE: &str = "voltage";
    pub const CURRENT: &str = "current";
    pub const REMAINING: &str = "remaining";
    pub const GPS_FIX: &str = "gps_fix";
    pub const GPS_SATELLITE: &str = "gps_satellite";
    pub const RC_RSSI: &str = "rc_rssi";
    pub const RC_NOISE: &str = "rc_noise";
    pub const RC_ERRORS: &str = "rc_errors";
}

/// Everything the instrument needs to draw one frame.
///
/// Angles are in degrees. Sentinel-bearing fields are better read through
/// the `Option` accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightState {
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
    pub roll_rate: f64,
    pub pitch_rate: f64,
    pub yaw_rate: f64,
    pub primary_speed: f64,
    pub ground_speed: f64,
    pub primary_altitude: f64,
    pub gps_altitude: f64,
    pub vertical_velocity: f64,
    pub latitude: f64,
    pub longitude: f64,
    /// Bearing to the navigation target, [`UNKNOWN_BEARING`] when none.
    pub navigation_target_bearing: f64,
    /// Signed crosstrack error; infinite when no course is active.
    pub navigation_crosstrack_error: f64,
    /// The tape shows ground speed instead of the primary speed.
    pub primary_speed_is_gps: bool,
    /// The tape shows GPS altitude instead of the primary altitude.
    pub primary_altitude_is_gps: bool,
    aux: HashMap<String, f64>,
}

impl Default for FlightState {
    fn default() -> Self {
        Self {
            roll: 0.0,
            pitch: 0.0,
            yaw: 0.0,
            roll_rate: 0.0,
            pitch_rate: 0.0,
            yaw_rate: 0.0,
            primary_speed: UNKNOWN_SPEED,
            ground_speed: UNKNOWN_SPEED,
            primary_altitude: UNKNOWN_ALTITUDE,
            gps_altitude: UNKNOWN_ALTITUDE,
            vertical_velocity: UNKNOWN_ALTITUDE,
            latitude: 0.0,
            longitude: 0.0,
            navigation_target_bearing: UNKNOWN_BEARING,
            navigation_crosstrack_error: f64::INFINITY,
            primary_speed_is_gps: false,
            primary_altitude_is_gps: false,
            aux: HashMap::new(),
        }
    }
}

fn known(value: f64, unknown: f64) -> Option<f64> {
    (value != unknown && value.abs() <= READING_LIMIT).then_some(value)
}

impl FlightState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Altitude shown on the altimeter tape, following the source selection.
    pub fn displayed_altitude(&self) -> Option<f64> {
        if self.primary_altitude_is_gps {
            known(self.gps_altitude, UNKNOWN_ALTITUDE)
        } else {
            known(self.primary_altitude, UNKNOWN_ALTITUDE)
        }
    }

    /// Speed shown on the airspeed tape, following the source selection.
    pub fn displayed_speed(&self) -> Option<f64> {
        if self.primary_speed_is_gps {
            known(self.ground_speed, UNKNOWN_SPEED)
        } else {
            known(self.primary_speed, UNKNOWN_SPEED)
        }
    }

    /// The speed not shown on the tape, for the secondary readout.
    pub fn secondary_speed(&self) -> Option<f64> {
        if self.primary_speed_is_gps {
            known(self.primary_speed, UNKNOWN_SPEED)
        } else {
            known(self.ground_speed, UNKNOWN_SPEED)
        }
    }

    pub fn vertical_velocity(&self) -> Option<f64> {
        known(self.vertical_velocity, UNKNOWN_ALTITUDE)
    }

    pub fn navigation_bearing(&self) -> Option<f64> {
        known(self.navigation_target_bearing, UNKNOWN_BEARING)
    }

    /// Crosstrack error, `None` while no course is active.
    pub fn crosstrack_error(&self) -> Option<f64> {
        self.navigation_crosstrack_error
            .is_finite()
            .then_some(self.navigation_crosstrack_error)
    }

    /// Auxiliary parameter by name, 0 when never reported.
    pub fn aux(&self, name: &str) -> f64 {
        self.aux.get(name).copied().unwrap_or(0.0)
    }

    pub fn set_aux(&mut self, name: impl Into<String>, value: f64) {
        self.aux.insert(name.into(), value);
    }

    /// Copy of this state that is safe to render.
    ///
    /// Non-finite attitude angles become 0 for this frame, yaw is wrapped
    /// into `[0, 360)` and pitch into `(-180, 180]`. Non-finite
    /// readings fall back to their unknown sentinels and a NaN crosstrack
    /// error disables the deviation indicator.
    pub fn sanitized(&self) -> Self {
        fn finite_or(value: f64, fallback: f64) -> f64 {
            if value.is_finite() { value } else { fallback }
        }
        let mut state = self.clone();
        state.roll = finite_or(state.roll, 0.0);
        state.pitch = wrap_offset(finite_or(state.pitch, 0.0));
        state.yaw = normalize_heading(finite_or(state.yaw, 0.0));
        state.primary_speed = finite_or(state.primary_speed, UNKNOWN_SPEED);
        state.ground_speed = finite_or(state.ground_speed, UNKNOWN_SPEED);
        state.primary_altitude = finite_or(state.primary_altitude, UNKNOWN_ALTITUDE);
        state.gps_altitude = finite_or(state.gps_altitude, UNKNOWN_ALTITUDE);
        state.vertical_velocity = finite_or(state.vertical_velocity, UNKNOWN_ALTITUDE);
        state.navigation_target_bearing =
            finite_or(state.navigation_target_bearing, UNKNOWN_BEARING);
        if state.navigation_crosstrack_error.is_nan() {
            state.navigation_crosstrack_error = f64::INFINITY;
        }
        state
    }
}

/// GPS receiver status report.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GpsStatus {
    pub fix_type: f64,
    pub satellites: f64,
    /// Accepted for completeness; not displayed.
    pub horizontal_accuracy: f64,
    /// Accepted for completeness; not displayed.
    pub vertical_accuracy: f64,
}

/// One telemetry update, as produced by a link decoder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TelemetrySample {
    /// Attitude in radians.
    Attitude { roll: f64, pitch: f64, yaw: f64 },
    /// Attitude rates in radians per second.
    AttitudeRates { roll: f64, pitch: f64, yaw: f64 },
    GlobalPosition { latitude: f64, longitude: f64, altitude: f64 },
    PrimaryAltitude(f64),
    GpsAltitude(f64),
    VerticalVelocity(f64),
    PrimarySpeed(f64),
    GroundSpeed(f64),
    Battery { voltage: f64, current: f64, remaining: f64 },
    Gps(GpsStatus),
    Rc { rssi: f64, noise: f64, errors: f64 },
    /// Target bearing in degrees and crosstrack error.
    Navigation { bearing: f64, crosstrack: f64 },
    PrimarySources { speed_is_gps: bool, altitude_is_gps: bool },
}

/// Shared, thread-safe flight state.
///
/// The handle clones cheaply and can be moved into telemetry tasks. Each
/// field keeps its last finite value: NaN samples are dropped.
#[derive(Debug, Clone, Default)]
pub struct FlightStateHandle {
    state: Arc<RwLock<FlightState>>,
}

impl FlightStateHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing state.
    pub fn from_state(state: FlightState) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Read the state. The lock is held for the duration of the callback.
    pub fn read<R>(&self, f: impl FnOnce(&FlightState) -> R) -> R {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    /// Mutate the state. The lock is held for the duration of the callback.
    pub fn write<R>(&self, f: impl FnOnce(&mut FlightState) -> R) -> R {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    /// Clone the current state for one frame.
    pub fn snapshot(&self) -> FlightState {
        self.read(FlightState::clone)
    }

    /// Attitude in radians.
    pub fn update_attitude(&self, roll: f64, pitch: f64, yaw: f64) {
        self.write(|state| {
            store(&mut state.roll, roll.to_degrees(), "roll");
            store(&mut state.pitch, pitch.to_degrees(), "pitch");
            store(&mut state.yaw, yaw.to_degrees(), "yaw");
        });
    }

    /// Attitude rates in radians per second.
    pub fn update_attitude_rates(&self, roll: f64, pitch: f64, yaw: f64) {
        self.write(|state| {
            store(&mut state.roll_rate, roll.to_degrees(), "roll rate");
            store(&mut state.pitch_rate, pitch.to_degrees(), "pitch rate");
            store(&mut state.yaw_rate, yaw.to_degrees(), "yaw rate");
        });
    }

    pub fn update_global_position(&self, latitude: f64, longitude: f64, altitude: f64) {
        self.write(|state| {
            store(&mut state.latitude, latitude, "latitude");
            store(&mut state.longitude, longitude, "longitude");
            store(&mut state.gps_altitude, altitude, "gps altitude");
        });
    }

    pub fn update_primary_altitude(&self, altitude: f64) {
        self.write(|state| store(&mut state.primary_altitude, altitude, "primary altitude"));
    }

    pub fn update_gps_altitude(&self, altitude: f64) {
        self.write(|state| store(&mut state.gps_altitude, altitude, "gps altitude"));
    }

    pub fn update_vertical_velocity(&self, rate: f64) {
        self.write(|state| store(&mut state.vertical_velocity, rate, "vertical velocity"));
    }

    pub fn update_primary_speed(&self, speed: f64) {
        self.write(|state| store(&mut state.primary_speed, speed, "primary speed"));
    }

    pub fn update_ground_speed(&self, speed: f64) {
        self.write(|state| store(&mut state.ground_speed, speed, "ground speed"));
    }

    pub fn update_battery(&self, voltage: f64, current: f64, remaining: f64) {
        self.write(|state| {
            store_aux(state, aux::VOLTAGE, voltage);
            store_aux(state, aux::CURRENT, current);
            store_aux(state, aux::REMAINING, remaining);
        });
    }

    pub fn update_gps_status(&self, status: GpsStatus) {
        self.write(|state| {
            store_aux(state, aux::GPS_FIX, status.fix_type);
            store_aux(state, aux::GPS_SATELLITE, status.satellites);
        });
    }

    pub fn update_rc_status(&self, rssi: f64, noise: f64, errors: f64) {
        self.write(|state| {
            store_aux(state, aux::RC_RSSI, rssi);
            store_aux(state, aux::RC_NOISE, noise);
            store_aux(state, aux::RC_ERRORS, errors);
        });
    }

    /// Target bearing in degrees and crosstrack error.
    ///
    /// An infinite crosstrack error is stored as is and hides the deviation
    /// indicator.
    pub fn update_navigation(&self, bearing: f64, crosstrack: f64) {
        self.write(|state| {
            store(&mut state.navigation_target_bearing, bearing, "target bearing");
            if crosstrack.is_nan() {
                log::debug!("discarding NaN crosstrack error");
            } else {
                state.navigation_crosstrack_error = crosstrack;
            }
        });
    }

    pub fn set_primary_sources(&self, speed_is_gps: bool, altitude_is_gps: bool) {
        self.write(|state| {
            state.primary_speed_is_gps = speed_is_gps;
            state.primary_altitude_is_gps = altitude_is_gps;
        });
    }

    /// Dispatch a decoded telemetry sample.
    pub fn apply(&self, sample: TelemetrySample) {
        match sample {
            TelemetrySample::Attitude { roll, pitch, yaw } => self.update_attitude(roll, pitch, yaw),
            TelemetrySample::AttitudeRates { roll, pitch, yaw } => {
                self.update_attitude_rates(roll, pitch, yaw)
            }
            TelemetrySample::GlobalPosition {
                latitude,
                longitude,
                altitude,
            } => self.update_global_position(latitude, longitude, altitude),
            TelemetrySample::PrimaryAltitude(value) => self.update_primary_altitude(value),
            TelemetrySample::GpsAltitude(value) => self.update_gps_altitude(value),
            TelemetrySample::VerticalVelocity(value) => self.update_vertical_velocity(value),
            TelemetrySample::PrimarySpeed(value) => self.update_primary_speed(value),
            TelemetrySample::GroundSpeed(value) => self.update_ground_speed(value),
            TelemetrySample::Battery {
                voltage,
                current,
                remaining,
            } => self.update_battery(voltage, current, remaining),
            TelemetrySample::Gps(status) => self.update_gps_status(status),
            TelemetrySample::Rc {
                rssi,
                noise,
                errors,
            } => self.update_rc_status(rssi, noise, errors),
            TelemetrySample::Navigation {
                bearing,
                crosstrack,
            } => self.update_navigation(bearing, crosstrack),
            TelemetrySample::PrimarySources {
                speed_is_gps,
                altitude_is_gps,
            } => self.set_primary_sources(speed_is_gps, altitude_is_gps),
        }
    }
}

fn store(slot: &mut f64, value: f64, name: &str) {
    if value.is_nan() {
        log::debug!("discarding NaN {name} sample");
    } else {
        *slot = value;
    }
}

fn store_aux(state: &mut FlightState, name: &str, value: f64) {
    if value.is_nan() {
        log::debug!("discarding NaN {name} sample");
    } else {
        state.set_aux(name, value);
    }
}
