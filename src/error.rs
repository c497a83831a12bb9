use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;
use tracing::{debug, error};

/// Failures of the attendance operations. Every variant maps to a
/// synchronous client-visible response; nothing here is retried.
#[derive(Debug, Display)]
pub enum AttendanceError {
    #[display(fmt = "Attendance record not found")]
    RecordNotFound { id: i64 },

    #[display(fmt = "No active check-in record found for employee")]
    NoOpenSession { employee_name: String },

    #[display(fmt = "Attendance record is already checked out")]
    AlreadyClosed { id: i64 },

    #[display(fmt = "Employee already has an open session")]
    AlreadyCheckedIn { employee_name: String },

    #[display(fmt = "employee_name must not be empty")]
    EmptyEmployeeName,

    #[display(fmt = "Internal Server Error")]
    Db(sqlx::Error),
}

impl From<sqlx::Error> for AttendanceError {
    fn from(e: sqlx::Error) -> Self {
        AttendanceError::Db(e)
    }
}

impl ResponseError for AttendanceError {
    fn status_code(&self) -> StatusCode {
        match self {
            AttendanceError::RecordNotFound { .. } | AttendanceError::NoOpenSession { .. } => {
                StatusCode::NOT_FOUND
            }
            AttendanceError::AlreadyClosed { .. } | AttendanceError::AlreadyCheckedIn { .. } => {
                StatusCode::CONFLICT
            }
            AttendanceError::EmptyEmployeeName => StatusCode::BAD_REQUEST,
            AttendanceError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AttendanceError::Db(e) => {
                error!(error = %e, "attendance storage operation failed");
            }
            AttendanceError::RecordNotFound { id } => {
                debug!(id, "checkout requested for unknown attendance record");
            }
            AttendanceError::NoOpenSession { employee_name } => {
                debug!(employee = %employee_name, "checkout requested with no open session");
            }
            AttendanceError::AlreadyClosed { id } => {
                debug!(id, "checkout requested for already closed record");
            }
            AttendanceError::AlreadyCheckedIn { employee_name } => {
                debug!(employee = %employee_name, "check-in rejected, session already open");
            }
            AttendanceError::EmptyEmployeeName => {}
        }
        HttpResponse::build(self.status_code()).json(json!({
            "message": self.to_string()
        }))
    }
}
