//! Descriptive project fields.

use super::ProjectDomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Validated title, description, and scheduling metadata of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDetails {
    title: String,
    description: String,
    department: Option<String>,
    deadline: Option<DateTime<Utc>>,
}

impl ProjectDetails {
    /// Creates validated project details.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyTitle`] or
    /// [`ProjectDomainError::EmptyDescription`] when either field is blank.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, ProjectDomainError> {
        let checked_title = non_blank(title.into()).ok_or(ProjectDomainError::EmptyTitle)?;
        let checked_description =
            non_blank(description.into()).ok_or(ProjectDomainError::EmptyDescription)?;
        Ok(Self {
            title: checked_title,
            description: checked_description,
            department: None,
            deadline: None,
        })
    }

    /// Sets the owning department; blank values are ignored.
    #[must_use]
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = non_blank(department.into());
        self
    }

    /// Sets the submission deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the department, if any.
    #[must_use]
    pub fn department(&self) -> Option<&str> {
        self.department.as_deref()
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_owned())
}
