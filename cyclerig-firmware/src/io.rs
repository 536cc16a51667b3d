//! Rig wiring
//!
//! Valve outputs and the strap sensor on the RP2040 GPIOs:
//!
//! | Peripheral | GPIO |
//! |------------|------|
//! | Sled valve | 2 |
//! | Strap clamp valve | 3 |
//! | Tension button valve | 4 |
//! | Weld button valve | 5 |
//! | Rocker lever valve | 6 |
//! | Knife valve | 7 |
//! | Strap sensor (active low, pull-up) | 10 |
//! | Panel UART0 TX/RX | 0/1 |

use embassy_rp::gpio::{Input, Level, Output, Pin, Pull};
use embassy_rp::Peri;

use cyclerig_core::traits::CylinderId;
use cyclerig_drivers::cylinder::PneumaticCylinder;
use cyclerig_drivers::input::{DebounceConfig, DebouncedInput};
use cyclerig_drivers::peripherals::{PeripheralError, Peripherals};
use cyclerig_drivers::pins::{EhInput, EhOutput};
use cyclerig_drivers::stepper::StepDirStepper;

/// Number of pneumatic cylinders on the rig
pub const CYLINDER_COUNT: usize = 6;

/// Strap sensor debounce time
const STRAP_DEBOUNCE_MS: u32 = 50;

pub type Valve = EhOutput<Output<'static>>;
pub type Cylinder = PneumaticCylinder<Valve>;
pub type Sensor = DebouncedInput<EhInput<Input<'static>>>;
pub type Feed = StepDirStepper<Valve, Valve, Valve>;

/// Everything the strapping cycle drives and reads
///
/// Six cylinders and the strap sensor; the strapping rig has no stepper
/// axis, so the stepper capacity is zero.
pub type RigPeripherals = Peripherals<Cylinder, Sensor, Feed, CYLINDER_COUNT, 1, 0>;

/// Cylinder ids by function
#[derive(Debug, Clone, Copy)]
pub struct Cylinders {
    pub sled: CylinderId,
    pub strap_clamp: CylinderId,
    pub tension: CylinderId,
    pub weld: CylinderId,
    pub rocker_lever: CylinderId,
    pub knife: CylinderId,
}

/// Pins taken from the RP2040 peripherals
pub struct RigPins {
    pub sled: Peri<'static, embassy_rp::peripherals::PIN_2>,
    pub strap_clamp: Peri<'static, embassy_rp::peripherals::PIN_3>,
    pub tension: Peri<'static, embassy_rp::peripherals::PIN_4>,
    pub weld: Peri<'static, embassy_rp::peripherals::PIN_5>,
    pub rocker_lever: Peri<'static, embassy_rp::peripherals::PIN_6>,
    pub knife: Peri<'static, embassy_rp::peripherals::PIN_7>,
    pub strap_sensor: Peri<'static, embassy_rp::peripherals::PIN_10>,
}

fn cylinder(pin: Peri<'static, impl Pin>) -> Cylinder {
    PneumaticCylinder::new(EhOutput::new(Output::new(pin, Level::Low)))
}

/// Set up the valves and the strap sensor
pub fn build(pins: RigPins) -> Result<(RigPeripherals, Cylinders), PeripheralError> {
    let mut io = RigPeripherals::new();

    let cylinders = Cylinders {
        sled: io.add_cylinder(cylinder(pins.sled))?,
        strap_clamp: io.add_cylinder(cylinder(pins.strap_clamp))?,
        tension: io.add_cylinder(cylinder(pins.tension))?,
        weld: io.add_cylinder(cylinder(pins.weld))?,
        rocker_lever: io.add_cylinder(cylinder(pins.rocker_lever))?,
        knife: io.add_cylinder(cylinder(pins.knife))?,
    };

    let sensor = DebouncedInput::new(
        EhInput::new(Input::new(pins.strap_sensor, Pull::Up)),
        DebounceConfig {
            debounce_ms: STRAP_DEBOUNCE_MS,
            active_high: false,
        },
    );
    let strap = io.add_switch(sensor)?;
    io.set_strap_sensor(strap)?;

    Ok((io, cylinders))
}
