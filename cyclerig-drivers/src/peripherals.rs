//! Ready-made peripheral set
//!
//! Collects the rig's cylinders, switches and steppers in wiring order and
//! implements [`RigIo`] over them. The uptime clock is driven by the same
//! elapsed time that advances the drivers.

use heapless::Vec;

use cyclerig_core::traits::{
    Clock, CylinderDriver, CylinderId, RigIo, StepperDriver, StepperId, SwitchId, SwitchInput,
};

use crate::TimedDriver;

/// Peripheral registration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PeripheralError {
    /// No slot left for this kind of peripheral
    Full,
    /// Referenced switch does not exist
    UnknownSwitch,
}

/// Rig peripherals
pub struct Peripherals<C, W, T, const NC: usize, const NW: usize, const NT: usize> {
    cylinders: Vec<C, NC>,
    switches: Vec<W, NW>,
    steppers: Vec<T, NT>,
    strap_sensor: Option<SwitchId>,
    uptime_ms: u32,
}

impl<C, W, T, const NC: usize, const NW: usize, const NT: usize> Default
    for Peripherals<C, W, T, NC, NW, NT>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<C, W, T, const NC: usize, const NW: usize, const NT: usize> Peripherals<C, W, T, NC, NW, NT> {
    /// Create an empty peripheral set
    pub const fn new() -> Self {
        Self {
            cylinders: Vec::new(),
            switches: Vec::new(),
            steppers: Vec::new(),
            strap_sensor: None,
            uptime_ms: 0,
        }
    }

    /// Add a cylinder, returning its id
    pub fn add_cylinder(&mut self, cylinder: C) -> Result<CylinderId, PeripheralError> {
        self.cylinders
            .push(cylinder)
            .map_err(|_| PeripheralError::Full)?;
        Ok(CylinderId((self.cylinders.len() - 1) as u8))
    }

    /// Add a switch input, returning its id
    pub fn add_switch(&mut self, switch: W) -> Result<SwitchId, PeripheralError> {
        self.switches.push(switch).map_err(|_| PeripheralError::Full)?;
        Ok(SwitchId((self.switches.len() - 1) as u8))
    }

    /// Add a stepper, returning its id
    pub fn add_stepper(&mut self, stepper: T) -> Result<StepperId, PeripheralError> {
        self.steppers.push(stepper).map_err(|_| PeripheralError::Full)?;
        Ok(StepperId((self.steppers.len() - 1) as u8))
    }

    /// Use a switch as the strap magazine sensor (active = strap present)
    ///
    /// Without a strap sensor the magazine is always considered full.
    pub fn set_strap_sensor(&mut self, id: SwitchId) -> Result<(), PeripheralError> {
        if id.0 as usize >= self.switches.len() {
            return Err(PeripheralError::UnknownSwitch);
        }
        self.strap_sensor = Some(id);
        Ok(())
    }

    /// Number of cylinders
    pub fn cylinder_count(&self) -> usize {
        self.cylinders.len()
    }
}

impl<C, W, T, const NC: usize, const NW: usize, const NT: usize> Clock
    for Peripherals<C, W, T, NC, NW, NT>
{
    fn now_ms(&self) -> u32 {
        self.uptime_ms
    }
}

impl<C, W, T, const NC: usize, const NW: usize, const NT: usize> RigIo
    for Peripherals<C, W, T, NC, NW, NT>
where
    C: CylinderDriver + TimedDriver,
    W: SwitchInput + TimedDriver,
    T: StepperDriver + TimedDriver,
{
    type Cylinder = C;
    type Switch = W;
    type Stepper = T;

    fn cylinder(&mut self, id: CylinderId) -> Option<&mut C> {
        self.cylinders.get_mut(id.0 as usize)
    }

    fn switch(&mut self, id: SwitchId) -> Option<&mut W> {
        self.switches.get_mut(id.0 as usize)
    }

    fn stepper(&mut self, id: StepperId) -> Option<&mut T> {
        self.steppers.get_mut(id.0 as usize)
    }

    fn strap_present(&mut self) -> bool {
        match self.strap_sensor {
            Some(id) => self
                .switches
                .get(id.0 as usize)
                .map(|s| s.is_active())
                .unwrap_or(true),
            None => true,
        }
    }

    fn update(&mut self, delta_ms: u32) {
        self.uptime_ms = self.uptime_ms.wrapping_add(delta_ms);
        for cylinder in self.cylinders.iter_mut() {
            cylinder.update_with_delta(delta_ms);
        }
        for switch in self.switches.iter_mut() {
            switch.update_with_delta(delta_ms);
        }
        for stepper in self.steppers.iter_mut() {
            stepper.update_with_delta(delta_ms);
        }
    }

    fn release_all(&mut self) {
        for cylinder in self.cylinders.iter_mut() {
            cylinder.retract();
        }
        for stepper in self.steppers.iter_mut() {
            stepper.stop();
        }
    }
}
