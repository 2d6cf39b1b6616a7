//! Student record store for the roster service.
//!
//! Maintains the authoritative in-memory collection of student records
//! and mirrors it to a JSON file on every mutation.

pub mod error;
pub mod store;
pub mod student;

pub use error::{Result, RosterError};
pub use store::StudentStore;
pub use student::Student;
