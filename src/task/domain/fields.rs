//! Validated scalar types for task fields.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated task title, 2 to 35 characters after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    const MIN_CHARS: usize = 2;
    const MAX_CHARS: usize = 35;

    /// Creates a validated task title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTitleLength`] when the trimmed
    /// value is shorter than 2 or longer than 35 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        let length = normalized.chars().count();
        if length < Self::MIN_CHARS || length > Self::MAX_CHARS {
            return Err(TaskDomainError::InvalidTitleLength(length));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated task description, 10 to 150 characters after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskDescription(String);

impl TaskDescription {
    const MIN_CHARS: usize = 10;
    const MAX_CHARS: usize = 150;

    /// Creates a validated task description.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDescriptionLength`] when the
    /// trimmed value is shorter than 10 or longer than 150 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        let length = normalized.chars().count();
        if length < Self::MIN_CHARS || length > Self::MAX_CHARS {
            return Err(TaskDomainError::InvalidDescriptionLength(length));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the description as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskDescription {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered task severity from 1 (low) to 3 (high).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Priority(u8);

impl Priority {
    /// Lowest severity.
    pub const LOW: Self = Self(1);
    /// Middle severity.
    pub const MEDIUM: Self = Self(2);
    /// Highest severity.
    pub const HIGH: Self = Self(3);

    /// Creates a validated priority.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidPriority`] when the value is
    /// outside the 1 to 3 range.
    pub const fn new(value: u8) -> Result<Self, TaskDomainError> {
        if value < 1 || value > 3 {
            return Err(TaskDomainError::InvalidPriority(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric severity.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
