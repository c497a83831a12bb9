use actix_web::{HttpResponse, web};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::error::AttendanceError;
use crate::model::attendance::AttendanceRecord;
use crate::service::summary::AttendanceSummary;
use crate::service::{CheckInService, CheckOutService, SummaryAggregator};
use crate::store::AttendanceStore;

#[derive(Deserialize, ToSchema)]
pub struct CheckInRequest {
    #[schema(example = "Kim")]
    pub employee_name: String,
}

#[derive(Deserialize, ToSchema)]
pub struct CheckOutRequest {
    #[schema(example = "Kim")]
    pub employee_name: String,
}

#[derive(Deserialize, IntoParams)]
pub struct ListQuery {
    #[param(example = 0)]
    pub offset: Option<i64>,

    #[param(example = 100)]
    pub limit: Option<i64>,
}

/// Check-in endpoint
#[utoipa::path(
    post,
    path = "/api/v1/attendance",
    request_body = CheckInRequest,
    responses(
        (status = 201, description = "Session opened", body = AttendanceRecord),
        (status = 400, description = "Empty employee name"),
        (status = 409, description = "Employee already checked in (single-open-session mode)"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn check_in(
    service: web::Data<CheckInService>,
    payload: web::Json<CheckInRequest>,
) -> Result<HttpResponse, AttendanceError> {
    let record = service.open(&payload.employee_name).await?;
    Ok(HttpResponse::Created().json(record))
}

/// Check-out by record id
#[utoipa::path(
    put,
    path = "/api/v1/attendance/{id}/checkout",
    params(
        ("id", description = "Attendance record ID")
    ),
    responses(
        (status = 200, description = "Session closed", body = AttendanceRecord),
        (status = 404, description = "Attendance record not found"),
        (status = 409, description = "Record is already checked out"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn check_out_by_id(
    service: web::Data<CheckOutService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AttendanceError> {
    let record = service.close_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(record))
}

/// Check-out by employee name, closing the most recently opened session
#[utoipa::path(
    put,
    path = "/api/v1/attendance/checkout",
    request_body = CheckOutRequest,
    responses(
        (status = 200, description = "Session closed", body = AttendanceRecord),
        (status = 404, description = "No active check-in record found for employee"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn check_out_by_name(
    service: web::Data<CheckOutService>,
    payload: web::Json<CheckOutRequest>,
) -> Result<HttpResponse, AttendanceError> {
    let record = service.close_by_name(&payload.employee_name).await?;
    Ok(HttpResponse::Ok().json(record))
}

/// List attendance records
#[utoipa::path(
    get,
    path = "/api/v1/attendance",
    params(ListQuery),
    responses(
        (status = 200, description = "Records in insertion order", body = [AttendanceRecord]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    store: web::Data<AttendanceStore>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AttendanceError> {
    let offset = query.offset.unwrap_or(0).max(0);
    let limit = query.limit.unwrap_or(100).clamp(0, 1000);
    let records = store.list(offset, limit).await?;
    Ok(HttpResponse::Ok().json(records))
}

/// Per-employee daily and monthly hour totals over all closed sessions
#[utoipa::path(
    get,
    path = "/api/v1/attendance/summary",
    responses(
        (status = 200, description = "Nested daily/monthly totals", body = AttendanceSummary),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn summary(
    aggregator: web::Data<SummaryAggregator>,
) -> Result<HttpResponse, AttendanceError> {
    let summary = aggregator.summarize().await?;
    Ok(HttpResponse::Ok().json(summary))
}
