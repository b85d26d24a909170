//! Incubator controller firmware — main entry point.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                   │
//! │                                                           │
//! │   HardwareAdapter (Sensor + Actuator)   LogEventSink      │
//! │                                                           │
//! │   ──────────────── Port Trait Boundary ────────────────   │
//! │                                                           │
//! │   ┌───────────────────────────────────────────────────┐   │
//! │   │        ControllerService (pure logic)             │   │
//! │   │        FSM · calibration · PID                    │   │
//! │   └───────────────────────────────────────────────────┘   │
//! │                                                           │
//! │   step timer ──▶ Scheduler (8-bit period counter)         │
//! └───────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{AnyOutputPin, PinDriver};
use log::info;

use incubator::adapters::hardware::HardwareAdapter;
use incubator::adapters::log_sink::LogEventSink;
use incubator::app::ports::{ScheduleFiredKind, SchedulerDelegate};
use incubator::app::service::ControllerService;
use incubator::config::ControllerConfig;
use incubator::drivers::esp_adc::OneshotAdc;
use incubator::drivers::hw_timer;
use incubator::drivers::indicator::Indicator;
use incubator::drivers::slow_pwm::SlowPwm;
use incubator::pins;
use incubator::scheduler::Scheduler;
use incubator::sensors::control_knob::ControlKnob;
use incubator::sensors::temperature::TemperatureSensor;

// ── Scheduler delegate ────────────────────────────────────────
//
// Routes the two period-boundary events: the generator reload first, then
// the control cycle whose duty is latched for the following period.

struct PeriodDelegate<'a, 'd> {
    app: &'a mut ControllerService,
    hw: &'a mut Board<'d>,
    sink: &'a mut LogEventSink,
}

type Board<'d> = HardwareAdapter<
    incubator::drivers::esp_adc::EspAdcChannel,
    incubator::drivers::esp_adc::EspAdcChannel,
    PinDriver<'d, AnyOutputPin, esp_idf_hal::gpio::Output>,
    PinDriver<'d, AnyOutputPin, esp_idf_hal::gpio::Output>,
>;

impl SchedulerDelegate for PeriodDelegate<'_, '_> {
    fn on_schedule_fired(&mut self, kind: ScheduleFiredKind) {
        match kind {
            ScheduleFiredKind::DutyReload => self.hw.reload_duty(),
            ScheduleFiredKind::ControlTick => self.app.tick(&mut *self.hw, &mut *self.sink),
        }
    }
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Incubator v{}                       ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = ControllerConfig::default();
    config.validate()?;
    info!(
        "Config: P={:.6}s set={:.1}\u{00b0}C kp={} ki={} kd={} duty=[{}, {}]",
        config.period_secs,
        config.set_point(),
        config.kp,
        config.ki,
        config.kd,
        config.duty_min,
        config.duty_max,
    );

    // ── 3. Peripherals ────────────────────────────────────────
    let adc = OneshotAdc::new_unit1()?;
    let thermistor = TemperatureSensor::new(
        adc.channel(pins::THERMISTOR_ADC_CHANNEL)?,
        config.sensor_poll_limit,
    );
    let knob = ControlKnob::new(adc.channel(pins::KNOB_ADC_CHANNEL)?, config.sensor_poll_limit);

    // SAFETY: each GPIO number is claimed exactly once, here.
    let (relay, led_running, led_setpoint) = unsafe {
        (
            AnyOutputPin::new(pins::HEATER_RELAY_GPIO),
            AnyOutputPin::new(pins::LED_RUNNING_GPIO),
            AnyOutputPin::new(pins::LED_AT_SETPOINT_GPIO),
        )
    };

    let mut hw: Board<'_> = HardwareAdapter::new(
        thermistor,
        knob,
        SlowPwm::new(PinDriver::output(relay)?, pins::HEATER_RELAY_POLARITY),
        Indicator::new(PinDriver::output(led_running)?),
        Indicator::new(PinDriver::output(led_setpoint)?),
    );
    let mut sink = LogEventSink::new();

    // ── 4. Controller service ─────────────────────────────────
    let mut app = ControllerService::new(config.clone())?;
    app.start(&mut hw, &mut sink);

    // ── 5. Period counter ─────────────────────────────────────
    let mut sched = Scheduler::new();
    hw_timer::start_step_timer(Scheduler::step_micros(config.period_secs))?;

    info!("System ready. Entering control loop.");

    loop {
        let steps = hw_timer::take_pending_steps();
        if steps == 0 {
            FreeRtos::delay_ms(1);
            continue;
        }
        for _ in 0..steps {
            let mut delegate = PeriodDelegate {
                app: &mut app,
                hw: &mut hw,
                sink: &mut sink,
            };
            sched.step(&mut delegate);
            hw.update_relay(sched.phase());
        }
    }
}
