//! Cylinder drivers

pub mod pneumatic;

pub use pneumatic::{PneumaticCylinder, StrokePhase};
