use actix_web::{HttpResponse, web};
use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use utoipa::{IntoParams, ToSchema};

use crate::error::ApiError;
use crate::model::attendance::Attendance;
use crate::service;
use crate::utils::month::{month_bounds, month_key, parse_month};

#[derive(Deserialize, ToSchema)]
pub struct AttendanceStamp {
    #[schema(example = 1001)]
    pub employee_id: Option<u64>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateAttendance {
    #[schema(example = "2024-01-10T08:00:00", value_type = String, format = "date-time")]
    pub check_in: Option<NaiveDateTime>,

    #[schema(example = "2024-01-10T17:00:00", value_type = String, format = "date-time")]
    pub check_out: Option<NaiveDateTime>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct SummaryQuery {
    #[param(example = 1001)]
    pub employee_id: Option<u64>,

    /// Month in YYYY-MM format; defaults to the current month.
    #[param(example = "2024-01")]
    pub month: Option<String>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct AttendanceQuery {
    #[param(example = 1001)]
    pub employee_id: Option<u64>,

    /// Month in YYYY-MM format.
    #[param(example = "2024-01")]
    pub month: Option<String>,

    #[param(example = 1)]
    pub page: Option<u32>,

    #[param(example = 10)]
    pub per_page: Option<u32>,
}

#[derive(Serialize, ToSchema)]
pub struct AttendanceListResponse {
    pub data: Vec<Attendance>,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

// Helper enum for typed SQLx binding
enum FilterValue {
    U64(u64),
    Date(NaiveDate),
}

fn require_employee_id(payload: &AttendanceStamp) -> Result<u64, ApiError> {
    payload
        .employee_id
        .ok_or_else(|| ApiError::validation("employee_id is required"))
}

/// Check-in endpoint
#[utoipa::path(
    post,
    path = "/api/attendance/check-in",
    request_body = AttendanceStamp,
    responses(
        (status = 201, description = "Checked in", body = Attendance),
        (status = 400, description = "Missing employee id"),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "Already checked in today", body = Object, example = json!({
            "message": "Already checked in today"
        }))
    ),
    tag = "Attendance"
)]
pub async fn check_in(
    pool: web::Data<MySqlPool>,
    payload: web::Json<AttendanceStamp>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = require_employee_id(&payload)?;
    let now = Local::now().naive_local();

    let record = service::attendance::check_in(pool.get_ref(), employee_id, now).await?;

    Ok(HttpResponse::Created().json(record))
}

/// Check-out endpoint
#[utoipa::path(
    post,
    path = "/api/attendance/check-out",
    request_body = AttendanceStamp,
    responses(
        (status = 200, description = "Checked out, derived metrics persisted", body = Attendance),
        (status = 400, description = "Missing employee id"),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "No check-in today or already checked out", body = Object, example = json!({
            "message": "Already checked out today"
        }))
    ),
    tag = "Attendance"
)]
pub async fn check_out(
    pool: web::Data<MySqlPool>,
    payload: web::Json<AttendanceStamp>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = require_employee_id(&payload)?;
    let now = Local::now().naive_local();

    let record = service::attendance::check_out(pool.get_ref(), employee_id, now).await?;

    Ok(HttpResponse::Ok().json(record))
}

/// Monthly per-employee attendance totals
#[utoipa::path(
    get,
    path = "/api/attendance/summary",
    params(SummaryQuery),
    responses(
        (status = 200, description = "Per-employee totals for the month",
         body = [service::attendance::AttendanceSummary]),
        (status = 400, description = "Malformed month")
    ),
    tag = "Attendance"
)]
pub async fn summary(
    pool: web::Data<MySqlPool>,
    query: web::Query<SummaryQuery>,
) -> Result<HttpResponse, ApiError> {
    let month = match query.month.as_deref() {
        Some(value) => parse_month(value)?,
        None => month_key(Local::now().date_naive()),
    };

    let summaries =
        service::attendance::monthly_summary(pool.get_ref(), query.employee_id, month).await?;

    Ok(HttpResponse::Ok().json(summaries))
}

/// Paginated attendance list, filterable by employee and month
#[utoipa::path(
    get,
    path = "/api/attendance",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "Paginated attendance rows", body = AttendanceListResponse),
        (status = 400, description = "Malformed month")
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    pool: web::Data<MySqlPool>,
    query: web::Query<AttendanceQuery>,
) -> Result<HttpResponse, ApiError> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(10).clamp(1, 100);
    let offset = (page - 1) * per_page;

    // -------------------------
    // WHERE clause
    // -------------------------
    let mut where_sql = String::from(" WHERE 1=1");
    let mut args: Vec<FilterValue> = Vec::new();

    if let Some(employee_id) = query.employee_id {
        where_sql.push_str(" AND employee_id = ?");
        args.push(FilterValue::U64(employee_id));
    }

    if let Some(month) = query.month.as_deref() {
        let (start, end) = month_bounds(parse_month(month)?);
        where_sql.push_str(" AND work_date >= ? AND work_date < ?");
        args.push(FilterValue::Date(start));
        args.push(FilterValue::Date(end));
    }

    // -------------------------
    // COUNT query
    // -------------------------
    let count_sql = format!("SELECT COUNT(*) FROM attendance{}", where_sql);

    let mut count_q = sqlx::query_scalar::<_, i64>(&count_sql);
    for arg in &args {
        count_q = match arg {
            FilterValue::U64(v) => count_q.bind(*v),
            FilterValue::Date(d) => count_q.bind(*d),
        };
    }

    let total = count_q.fetch_one(pool.get_ref()).await?;

    // -------------------------
    // DATA query
    // -------------------------
    let data_sql = format!(
        r#"
        SELECT id, employee_id, work_date, check_in, check_out, worked_hours, work_days
        FROM attendance
        {}
        ORDER BY work_date DESC, employee_id
        LIMIT ? OFFSET ?
        "#,
        where_sql
    );

    let mut data_q = sqlx::query_as::<_, Attendance>(&data_sql);
    for arg in args {
        data_q = match arg {
            FilterValue::U64(v) => data_q.bind(v),
            FilterValue::Date(d) => data_q.bind(d),
        };
    }

    let records = data_q
        .bind(per_page as i64)
        .bind(offset as i64)
        .fetch_all(pool.get_ref())
        .await?;

    Ok(HttpResponse::Ok().json(AttendanceListResponse {
        data: records,
        page,
        per_page,
        total,
    }))
}

/// Edit an attendance record's timestamps
#[utoipa::path(
    put,
    path = "/api/attendance/{attendance_id}",
    params(
        ("attendance_id" = u64, Path, description = "Attendance record ID")
    ),
    request_body = UpdateAttendance,
    responses(
        (status = 200, description = "Record updated, metrics re-derived", body = Attendance),
        (status = 400, description = "No fields provided"),
        (status = 404, description = "Attendance record not found"),
        (status = 409, description = "Check-out precedes check-in")
    ),
    tag = "Attendance"
)]
pub async fn update_attendance(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    body: web::Json<UpdateAttendance>,
) -> Result<HttpResponse, ApiError> {
    if body.check_in.is_none() && body.check_out.is_none() {
        return Err(ApiError::validation("No fields provided for update"));
    }

    let record = service::attendance::update_times(
        pool.get_ref(),
        path.into_inner(),
        body.check_in,
        body.check_out,
    )
    .await?;

    Ok(HttpResponse::Ok().json(record))
}
