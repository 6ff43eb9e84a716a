//! spritebatch core
//!
//! Shared building blocks for the spritebatch crates: fixed-point sprite math,
//! logging setup and profiling hooks.

pub mod logging;
pub mod math;
pub mod profiling;
