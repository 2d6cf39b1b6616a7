//! The student store: an in-memory collection mirrored to a JSON file.
//!
//! The store exclusively owns the in-memory list; the backing file is
//! a durable mirror, not a separate source of truth. Every successful
//! mutation serializes the entire collection and overwrites the file.
//!
//! # Persistence failure policy
//!
//! - `add`: the appended record is removed again (rollback), so memory
//!   matches the last persisted state.
//! - `delete`: the removed record is re-appended (rollback); its
//!   position after rollback is the end of the list, not its original
//!   index.
//! - `update`: the mutated fields are kept. This asymmetry with
//!   add/delete is deliberate, documented behavior.
//!
//! The store assumes single-writer access. Callers that handle
//! concurrent requests must serialize mutations, e.g. behind a mutex.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Result, RosterError};
use crate::student::Student;

/// The authoritative in-memory collection of student records, kept
/// consistent with a JSON file mirror.
///
/// Constructed explicitly with a file path; there are no ambient
/// singletons. Records are held in insertion order and no two records
/// ever share an `id`.
#[derive(Debug)]
pub struct StudentStore {
    /// Path to the backing JSON file.
    path: PathBuf,

    /// The in-memory collection, in insertion order.
    students: Vec<Student>,
}

impl StudentStore {
    /// Creates an empty store backed by the given file path.
    ///
    /// Does not touch the filesystem until the first mutation.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            students: Vec::new(),
        }
    }

    /// Loads a store from the backing file.
    ///
    /// A missing file yields an empty store. A file that cannot be
    /// read or parsed is logged and swallowed into an empty store;
    /// parse failures never surface to the caller and are not retried.
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let students = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => match serde_json::from_str::<Vec<Student>>(&contents) {
                Ok(students) => {
                    debug!(
                        path = %path.display(),
                        count = students.len(),
                        "Loaded student records"
                    );
                    students
                }
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to parse student records, starting with an empty collection"
                    );
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to read student records, starting with an empty collection"
                );
                Vec::new()
            }
        };

        Self { path, students }
    }

    /// Returns the path to the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns all records in insertion order.
    #[must_use]
    pub fn list(&self) -> &[Student] {
        &self.students
    }

    /// Returns the record with the given ID, if present.
    ///
    /// Linear scan; the collection is small by design.
    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    /// Returns the current number of records.
    #[must_use]
    pub fn count(&self) -> usize {
        self.students.len()
    }

    /// Adds a new student record and persists the collection.
    ///
    /// All three fields are trimmed before validation and storage.
    /// Validation order: duplicate ID, then empty name, ID, and grade.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateId`, `InvalidName`, `InvalidId`, or
    /// `InvalidGrade` on validation failure, leaving the collection
    /// unchanged. Returns `SaveFailed` if the file write fails; the
    /// appended record is rolled back first.
    pub async fn add(&mut self, name: &str, id: &str, grade: &str) -> Result<()> {
        let name = name.trim();
        let id = id.trim();
        let grade = grade.trim();

        if self.get_by_id(id).is_some() {
            return Err(RosterError::duplicate_id(id));
        }
        if name.is_empty() {
            return Err(RosterError::InvalidName);
        }
        if id.is_empty() {
            return Err(RosterError::InvalidId);
        }
        if grade.is_empty() {
            return Err(RosterError::InvalidGrade);
        }

        self.students.push(Student::new(name, id, grade));

        if let Err(e) = self.save().await {
            // Compensating action: drop the append so memory matches
            // the last persisted state.
            self.students.pop();
            return Err(e);
        }

        debug!(id, "Student record added");
        Ok(())
    }

    /// Updates the name and/or grade of an existing record, then
    /// persists the collection. The ID is immutable.
    ///
    /// Omitted fields are left untouched; updating with both fields
    /// omitted succeeds without changing the record. Provided fields
    /// are trimmed and validated before any field is changed.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record matches `id`, or
    /// `InvalidName`/`InvalidGrade` if a provided field is empty after
    /// trimming; in both cases nothing is changed. Returns
    /// `SaveFailed` if the file write fails. Unlike add and delete,
    /// the in-memory mutation is kept on save failure.
    pub async fn update(&mut self, id: &str, name: Option<&str>, grade: Option<&str>) -> Result<()> {
        let name = name.map(str::trim);
        let grade = grade.map(str::trim);

        let Some(index) = self.students.iter().position(|s| s.id == id) else {
            return Err(RosterError::not_found(id));
        };

        // Validate both fields before touching the record.
        if name == Some("") {
            return Err(RosterError::InvalidName);
        }
        if grade == Some("") {
            return Err(RosterError::InvalidGrade);
        }

        let student = &mut self.students[index];
        if let Some(name) = name {
            student.name = name.to_string();
        }
        if let Some(grade) = grade {
            student.grade = grade.to_string();
        }

        self.save().await?;

        debug!(id, "Student record updated");
        Ok(())
    }

    /// Removes the record with the given ID and persists the
    /// collection.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record matches `id`. Returns
    /// `SaveFailed` if the file write fails; the removed record is
    /// re-appended first (rollback does not restore its original
    /// position).
    pub async fn delete(&mut self, id: &str) -> Result<()> {
        let Some(index) = self.students.iter().position(|s| s.id == id) else {
            return Err(RosterError::not_found(id));
        };

        let removed = self.students.remove(index);

        if let Err(e) = self.save().await {
            self.students.push(removed);
            return Err(e);
        }

        debug!(id, "Student record deleted");
        Ok(())
    }

    /// Writes the entire collection to the backing file.
    ///
    /// The file is fully overwritten with a pretty-printed JSON array
    /// (2-space indent). There are no partial writes or append logs.
    async fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.students)
            .map_err(|e| RosterError::save_failed(&self.path, e.to_string()))?;

        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| RosterError::save_failed(&self.path, e.to_string()))?;

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
