//! Shared test fixtures

use core::cell::Cell;
use std::rc::Rc;

use cyclerig_hal::{InputPin, OutputPin};

use crate::cylinder::PneumaticCylinder;
use crate::input::{DebounceConfig, DebouncedInput};
use crate::peripherals::Peripherals;
use crate::stepper::{StepDirConfig, StepDirStepper};

/// Output pin whose level can be observed through a clone
#[derive(Clone, Default)]
pub struct FakeOutput(Rc<Cell<bool>>);

impl FakeOutput {
    pub fn is_high(&self) -> bool {
        self.0.get()
    }
}

impl OutputPin for FakeOutput {
    fn set_high(&mut self) {
        self.0.set(true);
    }

    fn set_low(&mut self) {
        self.0.set(false);
    }

    fn is_set_high(&self) -> bool {
        self.0.get()
    }
}

/// Input pin whose level can be driven through a clone
#[derive(Clone)]
pub struct FakeInput(Rc<Cell<bool>>);

impl FakeInput {
    pub fn new(level: bool) -> Self {
        Self(Rc::new(Cell::new(level)))
    }

    pub fn set(&self, level: bool) {
        self.0.set(level);
    }
}

impl InputPin for FakeInput {
    fn is_high(&mut self) -> bool {
        self.0.get()
    }
}

pub type TestStepper = StepDirStepper<FakeOutput, FakeOutput, FakeOutput>;

pub type TestIo =
    Peripherals<PneumaticCylinder<FakeOutput>, DebouncedInput<FakeInput>, TestStepper, 2, 2, 1>;

/// Handles to the pins behind a [`TestIo`]
pub struct TestPins {
    pub valves: [FakeOutput; 2],
    /// Switch 0, also the strap sensor (starts present)
    pub strap: FakeInput,
    /// Switch 1 (starts inactive)
    pub sensor: FakeInput,
}

/// Two cylinders, two switches and one stepper
pub fn test_io() -> (TestIo, TestPins) {
    let pins = TestPins {
        valves: [FakeOutput::default(), FakeOutput::default()],
        strap: FakeInput::new(true),
        sensor: FakeInput::new(false),
    };

    let mut io = TestIo::new();
    for valve in pins.valves.iter() {
        io.add_cylinder(PneumaticCylinder::new(valve.clone())).unwrap();
    }
    let strap = io
        .add_switch(DebouncedInput::new(pins.strap.clone(), DebounceConfig::default()))
        .unwrap();
    io.add_switch(DebouncedInput::new(pins.sensor.clone(), DebounceConfig::default()))
        .unwrap();
    io.set_strap_sensor(strap).unwrap();
    io.add_stepper(StepDirStepper::new(
        FakeOutput::default(),
        FakeOutput::default(),
        FakeOutput::default(),
        StepDirConfig::default(),
    ))
    .unwrap();

    (io, pins)
}
