//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the acquisition rules of the logger: per-sensor
//! failure containment, validation and record stamping.  All interaction
//! with hardware, files and the clock happens through **port traits**
//! defined in [`ports`], keeping this layer fully testable without real
//! peripherals.

pub mod events;
pub mod ports;
pub mod record;
pub mod service;
