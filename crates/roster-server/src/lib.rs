//! Roster HTTP server
//!
//! Serves the student record store over a JSON REST API.

pub mod api;
pub mod config;

pub use api::{
    create_router, AppState, CreateStudentRequest, ErrorResponse, ListStudentsResponse,
    MessageResponse, StudentResponse, UpdateStudentRequest,
};
pub use config::Config;
