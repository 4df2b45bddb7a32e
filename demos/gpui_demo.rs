use std::time::Duration;

use gpui::{
    AppContext, Application, AsyncWindowContext, Bounds, Timer, WindowBounds, WindowOptions, px,
    size,
};

use gpui_pfd::gpui_backend::PfdView;
use gpui_pfd::{FlightStateHandle, GpsStatus, PfdConfig, PrimaryFlightDisplay, TelemetrySample};

struct FlightDemo {
    view: gpui::Entity<PfdView>,
    flight: FlightStateHandle,
}

impl FlightDemo {
    fn new(cx: &mut gpui::Context<Self>) -> Self {
        let config = PfdConfig::builder()
            .show_navigation(true)
            .build()
            .unwrap_or_default();
        let view = PfdView::new(PrimaryFlightDisplay::new(config));
        let flight = view.flight_state();
        flight.set_primary_sources(false, false);
        flight.update_gps_status(GpsStatus {
            fix_type: 3.0,
            satellites: 9.0,
            ..GpsStatus::default()
        });
        Self {
            view: cx.new(|_| view),
            flight,
        }
    }
}

impl gpui::Render for FlightDemo {
    fn render(
        &mut self,
        _window: &mut gpui::Window,
        _cx: &mut gpui::Context<Self>,
    ) -> impl gpui::IntoElement {
        self.view.clone()
    }
}

/// Feed a slow banked circuit into the flight state, the way a link decoder would.
fn spawn_telemetry(window: &mut gpui::Window, cx: &mut gpui::App, flight: FlightStateHandle) {
    window
        .spawn(cx, move |_cx: &mut AsyncWindowContext| async move {
            let mut t = 0.0_f64;
            loop {
                Timer::after(Duration::from_millis(20)).await;
                t += 0.02;
                let roll = 25.0_f64.to_radians() * (t * 0.3).sin();
                let pitch = 6.0_f64.to_radians() * (t * 0.5).sin();
                let yaw = (t * 0.2) % std::f64::consts::TAU;
                let climb = 3.0 * (t * 0.5).cos();
                for sample in [
                    TelemetrySample::Attitude { roll, pitch, yaw },
                    TelemetrySample::PrimaryAltitude(120.0 + 20.0 * (t * 0.5).sin()),
                    TelemetrySample::VerticalVelocity(climb),
                    TelemetrySample::PrimarySpeed(22.0 + 3.0 * (t * 0.7).sin()),
                    TelemetrySample::GroundSpeed(20.0 + 2.0 * (t * 0.4).cos()),
                    TelemetrySample::Battery {
                        voltage: 12.4 - t * 0.001,
                        current: 9.0 + climb,
                        remaining: 80.0,
                    },
                    TelemetrySample::Rc {
                        rssi: 92.0,
                        noise: 20.0,
                        errors: 0.0,
                    },
                    TelemetrySample::Navigation {
                        bearing: 45.0,
                        crosstrack: 40.0 * (t * 0.1).sin(),
                    },
                ] {
                    flight.apply(sample);
                }
            }
        })
        .detach();
}

fn main() {
    env_logger::init();

    Application::new().run(|cx| {
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                None,
                size(px(960.0), px(640.0)),
                cx,
            ))),
            ..Default::default()
        };

        cx.open_window(options, |window, cx| {
            let demo = cx.new(FlightDemo::new);
            let flight = demo.read(cx).flight.clone();
            let view = demo.read(cx).view.clone();
            spawn_telemetry(window, cx, flight);
            PfdView::start_refresh(view, window, cx);
            demo
        })
        .unwrap();
    });
}
