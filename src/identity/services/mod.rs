//! Application services for identity resolution.

mod guard;
mod resolver;

pub(crate) use guard::denied;
pub use resolver::IdentityResolver;
