//! Read models for the allocation dashboard.

mod load;

pub use load::SupervisorLoad;
