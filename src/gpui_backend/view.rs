use gpui::prelude::*;
use gpui::{App, AsyncWindowContext, ContentMask, Entity, Timer, Window, canvas, div};

use crate::geom::Point;
use crate::layout::CanvasSize;
use crate::pfd::PrimaryFlightDisplay;
use crate::state::FlightStateHandle;

use super::config::PfdViewConfig;
use super::paint::paint_frame;

/// A GPUI view that paints a [`PrimaryFlightDisplay`].
///
/// Every paint takes one snapshot of the shared flight state, so telemetry
/// may keep writing through the [`FlightStateHandle`] from other tasks.
#[derive(Clone)]
pub struct PfdView {
    flight: FlightStateHandle,
    display: PrimaryFlightDisplay,
    config: PfdViewConfig,
}

impl PfdView {
    /// Create a view with its own flight state and the default [`PfdViewConfig`].
    pub fn new(display: PrimaryFlightDisplay) -> Self {
        Self::with_config(display, PfdViewConfig::default())
    }

    pub fn with_config(display: PrimaryFlightDisplay, config: PfdViewConfig) -> Self {
        Self {
            flight: FlightStateHandle::new(),
            display,
            config,
        }
    }

    /// Paint from an existing flight state handle.
    pub fn with_flight_state(mut self, flight: FlightStateHandle) -> Self {
        self.flight = flight;
        self
    }

    /// Handle for feeding telemetry into this view.
    pub fn flight_state(&self) -> FlightStateHandle {
        self.flight.clone()
    }

    pub fn display(&self) -> &PrimaryFlightDisplay {
        &self.display
    }

    /// Repaint `view` every [`PfdViewConfig::refresh_interval`] until the
    /// window closes.
    pub fn start_refresh(view: Entity<Self>, window: &mut Window, cx: &mut App) {
        let interval = view.read(cx).config.refresh_interval;
        window
            .spawn(cx, move |cx: &mut AsyncWindowContext| {
                let mut cx = cx.clone();
                async move {
                    loop {
                        Timer::after(interval).await;
                        let updated = cx.update(|_, cx| {
                            view.update(cx, |_view, view_cx| view_cx.notify());
                        });
                        if updated.is_err() {
                            log::debug!("flight display window closed, stopping refresh");
                            break;
                        }
                    }
                }
            })
            .detach();
    }
}

impl Render for PfdView {
    fn render(&mut self, _window: &mut Window, _cx: &mut Context<Self>) -> impl IntoElement {
        let flight = self.flight.clone();
        let display = self.display.clone();
        let config = self.config.clone();

        div().size_full().bg(gpui::black()).child(
            canvas(
                move |bounds, _, _| {
                    let size = CanvasSize::new(
                        f32::from(bounds.size.width) as f64,
                        f32::from(bounds.size.height) as f64,
                    );
                    let origin = Point::new(
                        f32::from(bounds.origin.x) as f64,
                        f32::from(bounds.origin.y) as f64,
                    );
                    (display.render(&flight.snapshot(), size), origin)
                },
                move |bounds, (frame, origin), window, cx| {
                    window.with_content_mask(Some(ContentMask { bounds }), |window| {
                        paint_frame(&frame, origin, &config, window, cx);
                    });
                },
            )
            .size_full(),
        )
    }
}
