//! Fuzz target: `ControllerConfig` decode + validation
//!
//! Decodes arbitrary bytes as a postcard-encoded config.  Anything that
//! decodes must either be rejected by `validate()` or produce a service
//! that starts and ticks without panicking.
//!
//! cargo fuzz run fuzz_config_decode

#![no_main]

use incubator::app::events::AppEvent;
use incubator::app::ports::{ActuatorPort, EventSink, SensorPort};
use incubator::app::service::ControllerService;
use incubator::config::ControllerConfig;
use incubator::control::duty::Duty;
use incubator::error::SensorError;
use incubator::sensors::{ControlInput, SensorCode};
use libfuzzer_sys::fuzz_target;

struct Board(u8);

impl SensorPort for Board {
    fn read_temperature_code(&mut self) -> Result<SensorCode, SensorError> {
        Ok(SensorCode(self.0))
    }
    fn read_control_input(&mut self) -> ControlInput {
        ControlInput::new(1)
    }
}

impl ActuatorPort for Board {
    fn enable_heater(&mut self) {}
    fn disable_heater(&mut self) {}
    fn set_duty(&mut self, _duty: Duty) {}
    fn set_running_indicator(&mut self, _on: bool) {}
    fn set_at_setpoint_indicator(&mut self, _on: bool) {}
}

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let Ok(config) = postcard::from_bytes::<ControllerConfig>(data) else {
        return;
    };
    let Ok(mut app) = ControllerService::new(config) else {
        return;
    };
    let mut board = Board(data.first().copied().unwrap_or(128));
    app.start(&mut board, &mut Discard);
    for code in data.iter().take(32) {
        board.0 = *code;
        app.tick(&mut board, &mut Discard);
    }
});
