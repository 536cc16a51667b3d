//! Hardware abstraction traits
//!
//! These traits define the interface between the step logic and the
//! hardware-specific driver implementations.

pub mod clock;
pub mod cylinder;
pub mod io;
pub mod stepper;
pub mod switch;

pub use clock::Clock;
pub use cylinder::CylinderDriver;
pub use io::{CylinderId, RigIo, StepperId, SwitchId};
pub use stepper::{Direction, StepperDriver, StepperError};
pub use switch::{Edge, SwitchInput};
