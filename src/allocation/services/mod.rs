//! Application services for supervisor allocation.

mod allocation;

pub use allocation::AllocationService;
