//! Instrument tunables.
//!
//! Every threshold used by the generators is a named constant below. The
//! [`PfdConfig`] defaults are built from these constants; a validated
//! configuration can be assembled with [`PfdConfig::builder`].

use thiserror::Error;

use crate::style::Theme;

/// Relative stroke width of scale lines, as a fraction of canvas width.
pub const LINE_WIDTH: f64 = 0.0036;
/// Small text size as a fraction of canvas width.
pub const SMALL_TEXT_SIZE: f64 = 0.03;
pub const MEDIUM_TEXT_SIZE: f64 = SMALL_TEXT_SIZE * 1.2;
pub const LARGE_TEXT_SIZE: f64 = MEDIUM_TEXT_SIZE * 1.2;

/// Half sweep of the roll arc in degrees.
pub const ROLL_SCALE_RANGE: f64 = 60.0;
pub const ROLL_SCALE_TICKMARK_LENGTH: f64 = 0.04;
pub const ROLL_SCALE_RADIUS: f64 = 0.42;
pub const ROLL_SCALE_MARKER_WIDTH: f64 = 0.06;
pub const ROLL_SCALE_MARKER_HEIGHT: f64 = 0.04;
/// Roll tick angles; each one is also drawn mirrored.
pub const ROLL_SCALE_TICKS: [i64; 5] = [10, 20, 30, 45, 60];

pub const PITCH_SCALE_RESOLUTION: i64 = 5;
pub const PITCH_SCALE_HALFRANGE: i64 = 15;
pub const PITCH_SCALE_MAJOR_WIDTH: f64 = 0.1;
pub const PITCH_SCALE_MINOR_WIDTH: f64 = 0.066;
/// Pitch ticks further than this from the horizon get thinner.
pub const PITCH_SCALE_WIDTH_REDUCTION_FROM: f64 = 30.0;
/// Width factor reached at the zenith and nadir.
pub const PITCH_SCALE_WIDTH_REDUCTION: f64 = 0.3;
pub const SHOW_ZERO_ON_SCALES: bool = true;

pub const CROSSTRACK_MAX: f64 = 1000.0;
/// CDI deflection radius as a fraction of the compass radius.
pub const CROSSTRACK_RADIUS: f64 = 0.6;

pub const COMPASS_DISK_RESOLUTION: i64 = 10;
pub const COMPASS_DISK_MAJOR_TICK: i64 = 10;
pub const COMPASS_DISK_ARROW_TICK: i64 = 45;
pub const COMPASS_DISK_MARKER_WIDTH: f64 = 0.2;
pub const COMPASS_DISK_MARKER_HEIGHT: f64 = 0.133;
/// Compass diameter as a fraction of the attitude area width.
pub const COMPASS_RELATIVE_WIDTH: f64 = 0.75;
/// Largest drop of the compass center below the attitude area, as a fraction
/// of half the attitude width.
pub const COMPASS_BOTTOM_MARGIN: f64 = 0.78;

pub const TAPE_GAUGES_TICKWIDTH_MAJOR: f64 = 0.25;
pub const TAPE_GAUGES_TICKWIDTH_MINOR: f64 = 0.15;
/// Fraction of the tape height used for half the scale span.
pub const TAPE_EFFECTIVE_HALF_HEIGHT: f64 = 0.45;
/// Horizontal position of tape numbers as a fraction of tape width.
pub const TAPE_NUMBERS_OFFSET: f64 = 0.42;

/// Altitude difference between top and bottom of the altimeter scale.
pub const ALTIMETER_LINEAR_SPAN: f64 = 50.0;
pub const ALTIMETER_LINEAR_RESOLUTION: i64 = 5;
pub const ALTIMETER_LINEAR_MAJOR_RESOLUTION: i64 = 10;
/// Vertical speed shown as a full half-height arrow.
pub const ALTIMETER_VVI_SPAN: f64 = 5.0;
pub const ALTIMETER_VVI_WIDTH: f64 = 0.2;

pub const AIRSPEED_LINEAR_SPAN: f64 = 15.0;
pub const AIRSPEED_LINEAR_RESOLUTION: i64 = 1;
pub const AIRSPEED_LINEAR_MAJOR_RESOLUTION: i64 = 5;

/// Errors reported when assembling a [`PfdConfig`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A tick resolution was zero or negative.
    #[error("{scale} resolution must be positive, got {value}")]
    NonPositiveResolution { scale: &'static str, value: i64 },
    /// A scale span was not a positive finite number.
    #[error("{scale} span must be positive and finite, got {value}")]
    InvalidSpan { scale: &'static str, value: f64 },
    /// The pitch ladder half range was negative.
    #[error("pitch scale half range must not be negative, got {0}")]
    NegativeHalfRange(i64),
    /// The pitch width attenuation parameters are out of range.
    #[error("pitch width reduction from {from} deg with factor {factor} is out of range")]
    WidthReduction { from: f64, factor: f64 },
    /// The crosstrack clamp was not a positive finite number.
    #[error("crosstrack maximum must be positive and finite, got {0}")]
    CrosstrackMax(f64),
}

/// Pitch ladder settings.
#[derive(Debug, Clone, PartialEq)]
pub struct PitchScaleConfig {
    /// Degrees between ticks; every second tick is major.
    pub resolution: i64,
    /// Degrees shown on either side of the snapped center.
    pub half_range: i64,
    /// Half width of major ticks, as a fraction of the view size.
    pub major_width: f64,
    /// Half width of minor ticks, as a fraction of the view size.
    pub minor_width: f64,
    pub width_reduction_from: f64,
    pub width_reduction: f64,
    /// Label the zero tick.
    pub show_zero: bool,
    pub numbers_left: bool,
    pub numbers_right: bool,
}

impl Default for PitchScaleConfig {
    fn default() -> Self {
        Self {
            resolution: PITCH_SCALE_RESOLUTION,
            half_range: PITCH_SCALE_HALFRANGE,
            major_width: PITCH_SCALE_MAJOR_WIDTH,
            minor_width: PITCH_SCALE_MINOR_WIDTH,
            width_reduction_from: PITCH_SCALE_WIDTH_REDUCTION_FROM,
            width_reduction: PITCH_SCALE_WIDTH_REDUCTION,
            show_zero: SHOW_ZERO_ON_SCALES,
            numbers_left: true,
            numbers_right: true,
        }
    }
}

/// Roll arc settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RollScaleConfig {
    /// Half sweep of the arc in degrees.
    pub range: f64,
    /// Arc radius as a fraction of the view size.
    pub radius: f64,
    pub tick_length: f64,
    pub marker_width: f64,
    pub marker_height: f64,
    /// Positive tick angles; negatives and zero are added automatically.
    pub ticks: Vec<i64>,
    pub draw_numbers: bool,
}

impl Default for RollScaleConfig {
    fn default() -> Self {
        Self {
            range: ROLL_SCALE_RANGE,
            radius: ROLL_SCALE_RADIUS,
            tick_length: ROLL_SCALE_TICKMARK_LENGTH,
            marker_width: ROLL_SCALE_MARKER_WIDTH,
            marker_height: ROLL_SCALE_MARKER_HEIGHT,
            ticks: ROLL_SCALE_TICKS.to_vec(),
            draw_numbers: true,
        }
    }
}

/// Compass disk settings.
#[derive(Debug, Clone, PartialEq)]
pub struct CompassConfig {
    /// Degrees between generated ticks.
    pub resolution: i64,
    pub major_tick: i64,
    pub arrow_tick: i64,
    pub marker_width: f64,
    pub marker_height: f64,
    pub relative_width: f64,
    pub bottom_margin: f64,
    pub crosstrack_max: f64,
    pub crosstrack_radius: f64,
}

impl Default for CompassConfig {
    fn default() -> Self {
        Self {
            resolution: COMPASS_DISK_RESOLUTION,
            major_tick: COMPASS_DISK_MAJOR_TICK,
            arrow_tick: COMPASS_DISK_ARROW_TICK,
            marker_width: COMPASS_DISK_MARKER_WIDTH,
            marker_height: COMPASS_DISK_MARKER_HEIGHT,
            relative_width: COMPASS_RELATIVE_WIDTH,
            bottom_margin: COMPASS_BOTTOM_MARGIN,
            crosstrack_max: CROSSTRACK_MAX,
            crosstrack_radius: CROSSTRACK_RADIUS,
        }
    }
}

/// Side of the tape that carries ticks and the readout marker tip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapeOrientation {
    /// Ticks hang from the left edge; numbers and marker body to the right.
    TicksLeft,
    /// Ticks hang from the right edge; numbers and marker body to the left.
    TicksRight,
}

/// Vertical trend arrow settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendConfig {
    /// Rate drawn as a full half-height arrow.
    pub span: f64,
    /// Arrow column width as a fraction of the tape width.
    pub width: f64,
}

/// Settings of one tape gauge instance.
#[derive(Debug, Clone, PartialEq)]
pub struct TapeConfig {
    /// Value difference between top and bottom of the scale.
    pub span: f64,
    /// Value between ticks.
    pub resolution: i64,
    /// Value between labelled major ticks.
    pub major_resolution: i64,
    pub orientation: TapeOrientation,
    /// Marker half height as a multiple of the medium text size.
    pub marker_half_height: f64,
    /// Digits after the decimal point in the readout.
    pub readout_decimals: usize,
    pub trend: Option<TrendConfig>,
}

impl TapeConfig {
    /// Default altimeter.
    pub fn altimeter() -> Self {
        Self {
            span: ALTIMETER_LINEAR_SPAN,
            resolution: ALTIMETER_LINEAR_RESOLUTION,
            major_resolution: ALTIMETER_LINEAR_MAJOR_RESOLUTION,
            orientation: TapeOrientation::TicksLeft,
            marker_half_height: 0.8,
            readout_decimals: 0,
            trend: Some(TrendConfig {
                span: ALTIMETER_VVI_SPAN,
                width: ALTIMETER_VVI_WIDTH,
            }),
        }
    }

    /// Default airspeed indicator.
    pub fn airspeed() -> Self {
        Self {
            span: AIRSPEED_LINEAR_SPAN,
            resolution: AIRSPEED_LINEAR_RESOLUTION,
            major_resolution: AIRSPEED_LINEAR_MAJOR_RESOLUTION,
            orientation: TapeOrientation::TicksRight,
            marker_half_height: 1.0,
            readout_decimals: 1,
            trend: None,
        }
    }

    fn validate(&self, scale: &'static str) -> Result<(), ConfigError> {
        if !(self.span.is_finite() && self.span > 0.0) {
            return Err(ConfigError::InvalidSpan {
                scale,
                value: self.span,
            });
        }
        for value in [self.resolution, self.major_resolution] {
            if value <= 0 {
                return Err(ConfigError::NonPositiveResolution { scale, value });
            }
        }
        if let Some(trend) = self.trend {
            if !(trend.span.is_finite() && trend.span > 0.0) {
                return Err(ConfigError::InvalidSpan {
                    scale,
                    value: trend.span,
                });
            }
        }
        Ok(())
    }
}

/// Complete instrument configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PfdConfig {
    pub pitch_scale: PitchScaleConfig,
    pub roll_scale: RollScaleConfig,
    pub compass: CompassConfig,
    pub altimeter: TapeConfig,
    pub airspeed: TapeConfig,
    /// Draw the course deviation indicator when navigation data is present.
    pub show_navigation: bool,
    pub theme: Theme,
}

impl Default for PfdConfig {
    fn default() -> Self {
        Self {
            pitch_scale: PitchScaleConfig::default(),
            roll_scale: RollScaleConfig::default(),
            compass: CompassConfig::default(),
            altimeter: TapeConfig::altimeter(),
            airspeed: TapeConfig::airspeed(),
            show_navigation: true,
            theme: Theme::default(),
        }
    }
}

impl PfdConfig {
    /// Start building a configuration from the defaults.
    pub fn builder() -> PfdConfigBuilder {
        PfdConfigBuilder::default()
    }

    /// Check every setting the generators rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pitch = &self.pitch_scale;
        if pitch.resolution <= 0 {
            return Err(ConfigError::NonPositiveResolution {
                scale: "pitch",
                value: pitch.resolution,
            });
        }
        if pitch.half_range < 0 {
            return Err(ConfigError::NegativeHalfRange(pitch.half_range));
        }
        if !(0.0..90.0).contains(&pitch.width_reduction_from)
            || !(pitch.width_reduction > 0.0 && pitch.width_reduction <= 1.0)
        {
            return Err(ConfigError::WidthReduction {
                from: pitch.width_reduction_from,
                factor: pitch.width_reduction,
            });
        }
        let compass = &self.compass;
        for value in [compass.resolution, compass.major_tick, compass.arrow_tick] {
            if value <= 0 {
                return Err(ConfigError::NonPositiveResolution {
                    scale: "compass",
                    value,
                });
            }
        }
        if !(compass.crosstrack_max.is_finite() && compass.crosstrack_max > 0.0) {
            return Err(ConfigError::CrosstrackMax(compass.crosstrack_max));
        }
        self.altimeter.validate("altimeter")?;
        self.airspeed.validate("airspeed")?;
        Ok(())
    }
}

/// Builder for a validated [`PfdConfig`].
#[derive(Debug, Default)]
pub struct PfdConfigBuilder {
    config: PfdConfig,
}

impl PfdConfigBuilder {
    pub fn pitch_scale(mut self, pitch_scale: PitchScaleConfig) -> Self {
        self.config.pitch_scale = pitch_scale;
        self
    }

    pub fn roll_scale(mut self, roll_scale: RollScaleConfig) -> Self {
        self.config.roll_scale = roll_scale;
        self
    }

    pub fn compass(mut self, compass: CompassConfig) -> Self {
        self.config.compass = compass;
        self
    }

    pub fn altimeter(mut self, altimeter: TapeConfig) -> Self {
        self.config.altimeter = altimeter;
        self
    }

    pub fn airspeed(mut self, airspeed: TapeConfig) -> Self {
        self.config.airspeed = airspeed;
        self
    }

    /// Enable or disable the course deviation indicator.
    pub fn show_navigation(mut self, show: bool) -> Self {
        self.config.show_navigation = show;
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.config.theme = theme;
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<PfdConfig, ConfigError> {
        if let Err(err) = self.config.validate() {
            log::debug!("rejected instrument configuration: {err}");
            return Err(err);
        }
        Ok(self.config)
    }
}
