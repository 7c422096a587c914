//! Adapter implementations of project ports.

pub mod memory;
