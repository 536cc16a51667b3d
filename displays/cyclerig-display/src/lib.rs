//! Touch panel page model for the rig
//!
//! This crate provides:
//! - `InstructionSink` trait for wherever panel instructions end up
//! - `PanelRenderer`, which turns a `RigView` into the minimal set of
//!   instructions that brings the panel up to date
//! - `PanelAction` and `interpret`, which map panel events onto operator
//!   commands
//!
//! # Architecture
//!
//! The layout (pages, components, fonts) lives in the panel's own project
//! file. This crate only knows the component names and touch ids of the main
//! page. Rendering is synchronous into a sink; the firmware drains the sink
//! to the UART.

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod input;
pub mod layout;
pub mod renderer;

// Re-export key types
pub use backend::{DisplayError, InstructionSink, Outbox};
pub use input::{interpret, PanelAction};
pub use renderer::PanelRenderer;
