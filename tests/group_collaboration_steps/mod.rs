//! Step definitions for group formation, channel and allocation scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
