use actix_web::{HttpResponse, web};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use utoipa::{IntoParams, ToSchema};

use crate::error::ApiError;
use crate::model::payroll::PayrollRecord;
use crate::service;
use crate::service::payroll::{PayrollFailure, PayrollOutcome};
use crate::utils::month::{month_key, parse_month};

#[derive(Deserialize, ToSchema)]
pub struct CalculatePayroll {
    /// Any date inside the target month; normalized to its first day.
    #[schema(example = "2024-01-01", value_type = String, format = "date")]
    pub month: NaiveDate,

    #[schema(example = 1001)]
    pub employee_id: Option<u64>,
}

#[derive(Serialize, ToSchema)]
pub struct PayrollRunResponse {
    #[schema(example = "Computed payroll for 01/2024")]
    pub message: String,

    pub results: Vec<PayrollOutcome>,

    pub failures: Vec<PayrollFailure>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct ByDepartmentQuery {
    #[param(example = 10)]
    pub department_id: Option<u64>,

    /// Month in YYYY-MM format; defaults to the current month.
    #[param(example = "2024-01")]
    pub month: Option<String>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct PayrollQuery {
    /// Month in YYYY-MM format.
    #[param(example = "2024-01")]
    pub month: Option<String>,

    #[param(example = 1001)]
    pub employee_id: Option<u64>,

    #[param(example = 1)]
    pub page: Option<u32>,

    #[param(example = 10)]
    pub per_page: Option<u32>,
}

#[derive(Serialize, ToSchema)]
pub struct PayrollListResponse {
    pub data: Vec<PayrollRecord>,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

// Helper enum for typed SQLx binding
enum FilterValue {
    U64(u64),
    Date(NaiveDate),
}

/// Monthly payroll run
#[utoipa::path(
    post,
    path = "/api/payroll/calculate",
    request_body = CalculatePayroll,
    responses(
        (status = 200, description = "Per-employee payroll outcomes", body = PayrollRunResponse),
        (status = 404, description = "Employee not found")
    ),
    tag = "Payroll"
)]
pub async fn calculate_payroll(
    pool: web::Data<MySqlPool>,
    payload: web::Json<CalculatePayroll>,
) -> Result<HttpResponse, ApiError> {
    let month = month_key(payload.month);

    let run = service::payroll::bulk_recompute(pool.get_ref(), month, payload.employee_id).await?;

    tracing::info!(
        month = %month,
        computed = run.results.len(),
        failed = run.failures.len(),
        "Payroll run finished"
    );

    Ok(HttpResponse::Ok().json(PayrollRunResponse {
        message: format!("Computed payroll for {}", month.format("%m/%Y")),
        results: run.results,
        failures: run.failures,
    }))
}

/// Payroll rows for one department
#[utoipa::path(
    get,
    path = "/api/payroll/by-department",
    params(ByDepartmentQuery),
    responses(
        (status = 200, description = "Payroll rows for the department and month", body = [PayrollRecord]),
        (status = 400, description = "Missing department id or malformed month"),
        (status = 404, description = "Department not found")
    ),
    tag = "Payroll"
)]
pub async fn payroll_by_department(
    pool: web::Data<MySqlPool>,
    query: web::Query<ByDepartmentQuery>,
) -> Result<HttpResponse, ApiError> {
    let department_id = query
        .department_id
        .ok_or_else(|| ApiError::validation("department_id is required"))?;

    let month = match query.month.as_deref() {
        Some(value) => parse_month(value)?,
        None => month_key(Local::now().date_naive()),
    };

    let rows = service::payroll::by_department(pool.get_ref(), department_id, month).await?;

    Ok(HttpResponse::Ok().json(rows))
}

/// Paginated payroll list, filterable by month and employee
#[utoipa::path(
    get,
    path = "/api/payroll",
    params(PayrollQuery),
    responses(
        (status = 200, description = "Paginated payroll rows", body = PayrollListResponse),
        (status = 400, description = "Malformed month")
    ),
    tag = "Payroll"
)]
pub async fn list_payrolls(
    pool: web::Data<MySqlPool>,
    query: web::Query<PayrollQuery>,
) -> Result<HttpResponse, ApiError> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(10).clamp(1, 100);
    let offset = (page - 1) * per_page;

    let mut where_sql = String::from(" WHERE 1=1");
    let mut args: Vec<FilterValue> = Vec::new();

    if let Some(month) = query.month.as_deref() {
        where_sql.push_str(" AND month = ?");
        args.push(FilterValue::Date(parse_month(month)?));
    }

    if let Some(employee_id) = query.employee_id {
        where_sql.push_str(" AND employee_id = ?");
        args.push(FilterValue::U64(employee_id));
    }

    let count_sql = format!("SELECT COUNT(*) FROM payroll_record{}", where_sql);

    let mut count_q = sqlx::query_scalar::<_, i64>(&count_sql);
    for arg in &args {
        count_q = match arg {
            FilterValue::U64(v) => count_q.bind(*v),
            FilterValue::Date(d) => count_q.bind(*d),
        };
    }

    let total = count_q.fetch_one(pool.get_ref()).await?;

    let data_sql = format!(
        r#"
        SELECT id, employee_id, month, total_days, net_pay, computed_at
        FROM payroll_record
        {}
        ORDER BY month DESC, employee_id
        LIMIT ? OFFSET ?
        "#,
        where_sql
    );

    let mut data_q = sqlx::query_as::<_, PayrollRecord>(&data_sql);
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

    Ok(HttpResponse::Ok().json(PayrollListResponse {
        data: records,
        page,
        per_page,
        total,
    }))
}

/// Get a payroll row by ID
#[utoipa::path(
    get,
    path = "/api/payroll/{payroll_id}",
    params(
        ("payroll_id" = u64, Path, description = "Payroll record ID")
    ),
    responses(
        (status = 200, body = PayrollRecord),
        (status = 404, description = "Payroll record not found")
    ),
    tag = "Payroll"
)]
pub async fn get_payroll(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let payroll_id = path.into_inner();

    let record = sqlx::query_as::<_, PayrollRecord>(
        r#"
        SELECT id, employee_id, month, total_days, net_pay, computed_at
        FROM payroll_record
        WHERE id = ?
        "#,
    )
    .bind(payroll_id)
    .fetch_optional(pool.get_ref())
    .await?
    .ok_or(ApiError::NotFound("Payroll record"))?;

    Ok(HttpResponse::Ok().json(record))
}
