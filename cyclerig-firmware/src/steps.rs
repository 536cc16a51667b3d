//! The strapping cycle
//!
//! One cycle opens the tool, pulls strap through it, tensions, welds and
//! cuts, then lets go of the strap for the next cycle.

use cyclerig_core::sequence::{RegistryError, StepRegistry};
use cyclerig_drivers::steps::{ActuateStep, StepKind, StrokeStep};

use crate::io::{Cylinders, RigPeripherals};

/// Number of steps in one strapping cycle
pub const CYCLE_LEN: usize = 8;

pub type RigStep = StepKind<RigPeripherals>;
pub type CycleRegistry = StepRegistry<RigStep, CYCLE_LEN>;

// Valve timings (ms)
const ROCKER_PUSH_MS: u32 = 1500;
const ROCKER_RELEASE_MS: u32 = 1000;
const SLED_SETTLE_MS: u32 = 800;
const CLAMP_SETTLE_MS: u32 = 500;
const TENSION_PUSH_MS: u32 = 2000;
const TENSION_RELEASE_MS: u32 = 500;
const WELD_PUSH_MS: u32 = 600;
const WELD_RELEASE_MS: u32 = 400;
const KNIFE_PUSH_MS: u32 = 400;
const KNIFE_RELEASE_MS: u32 = 400;

/// Build the cycle in execution order
pub fn strapping_cycle(c: &Cylinders) -> Result<CycleRegistry, RegistryError> {
    let steps = [
        StepKind::Stroke(StrokeStep::new(
            "ROCKER LEVER",
            c.rocker_lever,
            ROCKER_PUSH_MS,
            ROCKER_RELEASE_MS,
        )),
        StepKind::Actuate(ActuateStep::extend("SLED FORWARD", c.sled, SLED_SETTLE_MS)),
        StepKind::Actuate(ActuateStep::extend("CLAMP", c.strap_clamp, CLAMP_SETTLE_MS)),
        StepKind::Actuate(ActuateStep::retract("SLED BACK", c.sled, SLED_SETTLE_MS)),
        StepKind::Stroke(StrokeStep::new(
            "TENSION",
            c.tension,
            TENSION_PUSH_MS,
            TENSION_RELEASE_MS,
        )),
        StepKind::Stroke(StrokeStep::new("WELD", c.weld, WELD_PUSH_MS, WELD_RELEASE_MS)),
        StepKind::Stroke(StrokeStep::new("CUT", c.knife, KNIFE_PUSH_MS, KNIFE_RELEASE_MS)),
        StepKind::Actuate(ActuateStep::retract(
            "RELEASE CLAMP",
            c.strap_clamp,
            CLAMP_SETTLE_MS,
        )),
    ];

    let mut registry = CycleRegistry::new();
    for step in steps {
        registry.register(step)?;
    }
    Ok(registry)
}
