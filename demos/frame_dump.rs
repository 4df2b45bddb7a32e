use gpui_pfd::{
    CanvasSize, DrawPrimitive, FlightStateHandle, GpsStatus, PfdConfig, PrimaryFlightDisplay,
};

fn main() {
    env_logger::init();

    let flight = FlightStateHandle::new();
    flight.update_attitude(12.0_f64.to_radians(), 4.0_f64.to_radians(), 1.5);
    flight.update_primary_altitude(120.0);
    flight.update_vertical_velocity(1.8);
    flight.update_primary_speed(21.4);
    flight.update_ground_speed(19.9);
    flight.update_battery(11.7, 8.2, 64.0);
    flight.update_gps_status(GpsStatus {
        fix_type: 3.0,
        satellites: 11.0,
        ..GpsStatus::default()
    });
    flight.update_navigation(100.0, 12.5);

    let config = match PfdConfig::builder().build() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            return;
        }
    };
    let display = PrimaryFlightDisplay::new(config);
    let frame = display.render(&flight.snapshot(), CanvasSize::new(960.0, 640.0));

    let (mut lines, mut arcs, mut paths, mut texts) = (0, 0, 0, 0);
    for primitive in frame.primitives() {
        match primitive {
            DrawPrimitive::Line { .. } => lines += 1,
            DrawPrimitive::Arc { .. } => arcs += 1,
            DrawPrimitive::FilledPath { .. } => paths += 1,
            DrawPrimitive::Text { .. } => texts += 1,
        }
    }
    println!(
        "{} primitives: {lines} lines, {arcs} arcs, {paths} paths, {texts} texts",
        frame.len()
    );
    for text in frame.texts() {
        println!("  {text:?}");
    }
}
