//! Actor roles.

use super::ParseRoleError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of an authenticated actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Student working on an individual or group project.
    Student,
    /// Academic supervisor owning projects and approving phases.
    Supervisor,
    /// Administrator who allocates students and may act on any project.
    SuperAdmin,
}

impl Role {
    /// All roles in escalating order.
    pub const ALL: [Self; 3] = [Self::Student, Self::Supervisor, Self::SuperAdmin];

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Supervisor => "supervisor",
            Self::SuperAdmin => "super-admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    /// Parses a role claim.
    ///
    /// `admin` is accepted as a supervisor alias because existing clients
    /// issue supervisor tokens under that name.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "student" => Ok(Self::Student),
            "supervisor" | "admin" => Ok(Self::Supervisor),
            "super-admin" | "super_admin" | "superadmin" => Ok(Self::SuperAdmin),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}
