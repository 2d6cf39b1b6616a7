//! Error types for the roster service.
//!
//! This module defines the error hierarchy for store mutations,
//! persistence, and configuration loading.

use std::path::PathBuf;

/// A specialized `Result` type for roster operations.
pub type Result<T> = std::result::Result<T, RosterError>;

/// Errors that can occur while managing student records.
///
/// Validation variants carry the exact message reported to API
/// clients; configuration variants include an actionable suggestion.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// A record with the same ID already exists in the collection.
    #[error("Student ID '{id}' already exists. IDs must be unique.")]
    DuplicateId {
        /// The conflicting student ID.
        id: String,
    },

    /// The student name was empty after trimming.
    #[error("Student name cannot be empty.")]
    InvalidName,

    /// The student ID was empty after trimming.
    #[error("Student ID cannot be empty.")]
    InvalidId,

    /// The student grade was empty after trimming.
    #[error("Student grade cannot be empty.")]
    InvalidGrade,

    /// No record matched the requested ID.
    #[error("Student with ID '{id}' not found.")]
    NotFound {
        /// The ID that was looked up.
        id: String,
    },

    // ========================================================================
    // Persistence Errors
    // ========================================================================
    /// Writing the backing file failed.
    ///
    /// The store rolls back in-memory changes for add and delete when
    /// this is returned; update keeps its mutation (see `StudentStore`).
    #[error("Failed to save student records to '{path}': {message}")]
    SaveFailed {
        /// Path to the backing file.
        path: PathBuf,
        /// Description of the write failure.
        message: String,
    },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid JSON syntax in the configuration file.
    #[error("Invalid JSON in config file '{path}': {message}\n\nSuggestion: Validate your roster.json with a JSON linter")]
    ConfigParse {
        /// Path to the configuration file.
        path: PathBuf,
        /// Description of the parse error.
        message: String,
    },

    /// Configuration validation failed.
    #[error("Invalid configuration: {message}\n\nSuggestion: {suggestion}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
        /// Actionable suggestion for the user.
        suggestion: String,
    },

    // ========================================================================
    // General I/O Errors
    // ========================================================================
    /// General I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RosterError {
    /// Creates a new `DuplicateId` error.
    #[must_use]
    pub fn duplicate_id(id: impl Into<String>) -> Self {
        Self::DuplicateId { id: id.into() }
    }

    /// Creates a new `NotFound` error.
    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Creates a new `SaveFailed` error.
    #[must_use]
    pub fn save_failed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::SaveFailed {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new `ConfigParse` error.
    #[must_use]
    pub fn config_parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ConfigParse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new `ConfigValidation` error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Returns `true` if this error is a request validation failure.
    ///
    /// Validation failures are client errors: a duplicate ID or a
    /// field that was empty after trimming.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::DuplicateId { .. } | Self::InvalidName | Self::InvalidId | Self::InvalidGrade
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = RosterError::duplicate_id("S1");
        assert_eq!(
            err.to_string(),
            "Student ID 'S1' already exists. IDs must be unique."
        );

        let err = RosterError::not_found("S9");
        assert_eq!(err.to_string(), "Student with ID 'S9' not found.");

        assert_eq!(
            RosterError::InvalidName.to_string(),
            "Student name cannot be empty."
        );
        assert_eq!(
            RosterError::InvalidGrade.to_string(),
            "Student grade cannot be empty."
        );
    }

    #[test]
    fn test_save_failed_display() {
        let err = RosterError::save_failed("/data/students.json", "disk full");
        let msg = err.to_string();
        assert!(msg.contains("/data/students.json"));
        assert!(msg.contains("disk full"));
    }

    #[test]
    fn test_config_validation_display_includes_suggestion() {
        let err = RosterError::config_validation("port must be greater than 0", "Set port");
        let msg = err.to_string();
        assert!(msg.contains("port must be greater than 0"));
        assert!(msg.contains("Suggestion"));
    }

    #[test]
    fn test_is_validation() {
        assert!(RosterError::duplicate_id("S1").is_validation());
        assert!(RosterError::InvalidName.is_validation());
        assert!(RosterError::InvalidId.is_validation());
        assert!(RosterError::InvalidGrade.is_validation());

        assert!(!RosterError::not_found("S1").is_validation());
        assert!(!RosterError::save_failed("x.json", "denied").is_validation());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: RosterError = io_err.into();
        assert!(matches!(err, RosterError::Io(_)));
    }
}
