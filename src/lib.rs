//! Operations center for satellite constellations.
//!
//! Wraps [`constellation_core`] with the outer surfaces a runnable tool needs:
//! configuration, logging, scripted flight plans and human-readable output.

pub mod config;
pub mod logging;
pub mod plan;
pub mod render;

pub use constellation_core as core;
