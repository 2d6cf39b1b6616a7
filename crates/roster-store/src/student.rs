//! The student record type.

use serde::{Deserialize, Serialize};

/// One student record: a name, a unique ID, and a grade.
///
/// Field order matches the wire format of the backing file: a JSON
/// object with exactly `name`, `id`, and `grade`, all strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// The student's name.
    pub name: String,

    /// Unique student ID. Immutable after creation.
    pub id: String,

    /// The student's grade.
    pub grade: String,
}

impl Student {
    /// Creates a new `Student` from the given fields.
    ///
    /// Performs no trimming or validation; that is the store's job.
    #[must_use]
    pub fn new(name: impl Into<String>, id: impl Into<String>, grade: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            grade: grade.into(),
        }
    }
}
