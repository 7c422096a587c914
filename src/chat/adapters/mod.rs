//! Adapter implementations of chat ports.

pub mod memory;
