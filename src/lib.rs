//! SensorLog library.
//!
//! Everything except bus bring-up is host-testable: drivers are generic
//! over the `embedded-hal` traits and the acquisition core talks to the
//! outside world only through the ports in [`app::ports`].  The Raspberry
//! Pi bus adapter is compiled with the `rpi` feature.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod pins;
pub mod sensors;
pub mod shutdown;
pub mod validation;
