use std::time::Duration;

/// Configuration for the GPUI flight display view.
#[derive(Debug, Clone)]
pub struct PfdViewConfig {
    /// Interval between repaints started by [`PfdView::start_refresh`](super::PfdView::start_refresh).
    pub refresh_interval: Duration,
    /// Largest angle covered by one straight piece when tessellating arcs.
    pub arc_step_deg: f64,
    /// Font family used for every label.
    pub font_family: &'static str,
}

impl Default for PfdViewConfig {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_millis(40),
            arc_step_deg: 4.0,
            font_family: ".SystemUIFont",
        }
    }
}
