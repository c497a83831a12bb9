use crate::api::attendance::{CheckInRequest, CheckOutRequest};
use crate::model::attendance::AttendanceRecord;
use crate::service::summary::AttendanceSummary;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance Tracking API",
        version = "1.0.0",
        description = r#"
## Employee Attendance Tracking

Tracks employee work sessions (check-in / check-out events) and derives
per-employee time-worked summaries.

### Key Features
- **Check-in**
  - Open a new work session for an employee
- **Check-out**
  - Close a session by record id, or by employee name (closes the most
    recently opened session)
- **Summary**
  - Daily and monthly hour totals per employee, recomputed from all
    closed sessions on every request

### Response Format
- JSON-based RESTful responses
- Error responses carry a `message` field
"#,
    ),
    paths(
        crate::api::attendance::check_in,
        crate::api::attendance::check_out_by_id,
        crate::api::attendance::check_out_by_name,
        crate::api::attendance::list_attendance,
        crate::api::attendance::summary,
    ),
    components(
        schemas(
            AttendanceRecord,
            AttendanceSummary,
            CheckInRequest,
            CheckOutRequest,
        )
    ),
    tags(
        (name = "Attendance", description = "Attendance tracking APIs"),
    )
)]
pub struct ApiDoc;
