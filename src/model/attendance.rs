use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One check-in-to-check-out interval for an employee.
/// A record with no `check_out` is an open session.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct AttendanceRecord {
    #[schema(example = 1)]
    pub id: i64,

    /// Free-text employee name, not a foreign key into any registry.
    #[schema(example = "Kim")]
    pub employee_name: String,

    #[schema(example = "2024-01-10T09:00:00Z", value_type = String, format = "date-time")]
    pub check_in: DateTime<Utc>,

    #[schema(example = "2024-01-10T17:30:00Z", value_type = Option<String>, format = "date-time")]
    pub check_out: Option<DateTime<Utc>>,
}

impl AttendanceRecord {
    pub fn is_open(&self) -> bool {
        self.check_out.is_none()
    }
}
