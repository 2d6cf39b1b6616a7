//! HTTP API endpoints for the roster server.
//!
//! This module maps the five store operations 1:1 onto REST routes.
//!
//! # Endpoints
//!
//! - `GET /api/students` - List all student records with a count
//! - `GET /api/students/{id}` - Fetch a single record by ID
//! - `POST /api/students` - Create a record
//! - `PUT /api/students/{id}` - Partially update a record (name/grade)
//! - `DELETE /api/students/{id}` - Delete a record
//!
//! Every JSON response carries a `success` flag; failures carry a
//! `message`. No store error propagates as a transport fault.
//!
//! # Example
//!
//! ```no_run
//! use roster_server::{AppState, Config, create_router};
//! use roster_store::StudentStore;
//!
//! # async fn example() {
//! let config = Config::default();
//! let store = StudentStore::load(&config.data_file).await;
//! let state = AppState::new(config, store);
//!
//! let router = create_router(state);
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await.unwrap();
//! axum::serve(listener, router).await.unwrap();
//! # }
//! ```

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use roster_store::{RosterError, Student, StudentStore};

use crate::Config;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating a student record.
///
/// Missing fields default to empty strings and fail validation in the
/// store, so the client gets a field-specific message rather than a
/// decode error.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudentRequest {
    /// The student's name.
    #[serde(default)]
    pub name: String,
    /// Unique student ID.
    #[serde(default)]
    pub id: String,
    /// The student's grade.
    #[serde(default)]
    pub grade: String,
}

/// Request body for updating a student record.
///
/// Omitted fields are left unchanged. The ID comes from the URL and is
/// immutable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStudentRequest {
    /// New name, if provided.
    pub name: Option<String>,
    /// New grade, if provided.
    pub grade: Option<String>,
}

/// Response body for the list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListStudentsResponse {
    /// Always `true` for this endpoint.
    pub success: bool,
    /// All records in insertion order.
    pub students: Vec<Student>,
    /// Number of records.
    pub count: usize,
}

/// Response body for the single-record endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentResponse {
    /// Whether the lookup succeeded.
    pub success: bool,
    /// The matching record.
    pub student: Student,
}

/// Response body for successful mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Human-readable outcome description.
    pub message: String,
}

/// Error response body returned on failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `false` for error responses.
    pub success: bool,
    /// Description of the failure.
    pub message: String,
}

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the HTTP server.
///
/// The store assumes single-writer access, so it sits behind a mutex
/// that serializes mutations across concurrent handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Config,
    /// The student record store.
    pub store: Arc<Mutex<StudentStore>>,
}

impl AppState {
    /// Creates a new `AppState` from a configuration and a loaded store.
    #[must_use]
    pub fn new(config: Config, store: StudentStore) -> Self {
        Self {
            config,
            store: Arc::new(Mutex::new(store)),
        }
    }
}

// ============================================================================
// API Error Type
// ============================================================================

/// Internal error type for API handlers.
#[derive(Debug)]
enum ApiError {
    /// Client error: validation failure or missing payload.
    BadRequest(String),
    /// The requested record does not exist.
    NotFound(String),
    /// Persistence or other server-side failure.
    Internal(String),
}

impl ApiError {
    /// Maps a store error to its default HTTP classification.
    fn from_store(err: RosterError) -> Self {
        if err.is_validation() {
            return Self::BadRequest(err.to_string());
        }
        match err {
            RosterError::NotFound { .. } => Self::NotFound(err.to_string()),
            _ => Self::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse {
            success: false,
            message,
        });
        (status, body).into_response()
    }
}

// ============================================================================
// Router Setup
// ============================================================================

/// Creates the HTTP router with all API endpoints.
///
/// # Returns
///
/// An axum `Router` configured with:
/// - All API routes under `/api`
/// - CORS middleware for development
/// - Tracing middleware for request logging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS for development (allow all origins)
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/students", get(list_students).post(create_student))
        .route(
            "/students/:id",
            get(get_student).put(update_student).delete(delete_student),
        );

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

// ============================================================================
// Handlers
// ============================================================================

/// Handler for `GET /api/students`.
async fn list_students(State(state): State<Arc<AppState>>) -> Json<ListStudentsResponse> {
    let store = state.store.lock().await;
    let students = store.list().to_vec();

    Json(ListStudentsResponse {
        success: true,
        count: students.len(),
        students,
    })
}

/// Handler for `GET /api/students/{id}`.
async fn get_student(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<StudentResponse>, ApiError> {
    let store = state.store.lock().await;

    store.get_by_id(&id).map_or_else(
        || Err(ApiError::NotFound("Student not found".to_string())),
        |student| {
            Ok(Json(StudentResponse {
                success: true,
                student: student.clone(),
            }))
        },
    )
}

/// Handler for `POST /api/students`.
///
/// A missing or undecodable body is a client error, not a transport
/// fault.
async fn create_student(
    State(state): State<Arc<AppState>>,
    payload: Option<Json<CreateStudentRequest>>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Some(Json(request)) = payload else {
        return Err(ApiError::BadRequest("No data provided".to_string()));
    };

    let mut store = state.store.lock().await;

    match store.add(&request.name, &request.id, &request.grade).await {
        Ok(()) => {
            info!(id = %request.id.trim(), "Student record created");
            Ok((
                StatusCode::CREATED,
                Json(MessageResponse {
                    success: true,
                    message: format!("Student '{}' added successfully.", request.name.trim()),
                }),
            ))
        }
        Err(e) => {
            warn!(error = %e, "Failed to create student record");
            Err(ApiError::from_store(e))
        }
    }
}

/// Handler for `PUT /api/students/{id}`.
///
/// A missing ID is reported as a client error (400) here, not 404;
/// only get and delete use 404 for absent records.
async fn update_student(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Option<Json<UpdateStudentRequest>>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Some(Json(request)) = payload else {
        return Err(ApiError::BadRequest("No data provided".to_string()));
    };

    let mut store = state.store.lock().await;

    match store
        .update(&id, request.name.as_deref(), request.grade.as_deref())
        .await
    {
        Ok(()) => {
            info!(id = %id, "Student record updated");
            Ok(Json(MessageResponse {
                success: true,
                message: format!("Student '{id}' updated successfully."),
            }))
        }
        Err(e @ RosterError::NotFound { .. }) => {
            warn!(id = %id, "Cannot update: student not found");
            Err(ApiError::BadRequest(e.to_string()))
        }
        Err(e) => {
            warn!(error = %e, "Failed to update student record");
            Err(ApiError::from_store(e))
        }
    }
}

/// Handler for `DELETE /api/students/{id}`.
async fn delete_student(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut store = state.store.lock().await;

    match store.delete(&id).await {
        Ok(()) => {
            info!(id = %id, "Student record deleted");
            Ok(Json(MessageResponse {
                success: true,
                message: format!("Student '{id}' deleted successfully."),
            }))
        }
        Err(e) => {
            warn!(error = %e, "Failed to delete student record");
            Err(ApiError::from_store(e))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
