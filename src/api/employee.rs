use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::MySqlPool;
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

use crate::error::{ApiError, is_constraint_violation};
use crate::model::employee::Employee;
use crate::utils::db_utils::{build_update_sql, execute_update};
use crate::utils::{employee_cache, employee_filter};

/// Columns the dynamic update endpoint may touch.
const UPDATABLE_COLUMNS: &[&str] = &[
    "first_name",
    "last_name",
    "email",
    "phone",
    "hire_date",
    "job_id",
    "salary",
    "manager_id",
    "department_id",
];

#[derive(Deserialize, Serialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "Duong")]
    pub first_name: String,

    #[schema(example = "Ho")]
    pub last_name: String,

    #[schema(example = "duong.ho@company.com", nullable = true)]
    pub email: Option<String>,

    #[schema(example = "+84912345678", nullable = true)]
    pub phone: Option<String>,

    #[schema(example = "2024-01-01", value_type = String, format = "date")]
    pub hire_date: NaiveDate,

    #[schema(example = 3)]
    pub job_id: u64,

    #[schema(example = "22000000.00", value_type = String)]
    pub salary: Decimal,

    #[schema(example = 7, nullable = true)]
    pub manager_id: Option<u64>,

    #[schema(example = 10, nullable = true)]
    pub department_id: Option<u64>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct EmployeeQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub department_id: Option<u64>,
    pub job_id: Option<u64>,
    pub search: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeListResponse {
    pub data: Vec<Employee>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 10)]
    pub per_page: u32,
    #[schema(example = 42)]
    pub total: i64,
}

/// Employee plus the manager name resolved at read time.
#[derive(Serialize, ToSchema)]
pub struct EmployeeDetail {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[schema(value_type = String, format = "date")]
    pub hire_date: NaiveDate,
    pub job_id: u64,
    #[schema(value_type = String)]
    pub salary: Decimal,
    pub manager_id: Option<u64>,
    #[schema(example = "Lan Nguyen", nullable = true)]
    pub manager_name: Option<String>,
    pub department_id: Option<u64>,
}

// Helper enum for typed SQLx binding
enum FilterValue {
    U64(u64),
    Str(String),
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employee",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = Object, example = json!({
            "id": 1001,
            "message": "Employee created"
        })),
        (status = 400, description = "Negative salary or unknown reference")
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateEmployee>,
) -> Result<HttpResponse, ApiError> {
    if payload.salary < Decimal::ZERO {
        return Err(ApiError::validation("salary must be non-negative"));
    }

    let result = sqlx::query(
        r#"
        INSERT INTO employee
        (first_name, last_name, email, phone, hire_date, job_id, salary, manager_id, department_id)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&payload.first_name)
    .bind(&payload.last_name)
    .bind(&payload.email)
    .bind(&payload.phone)
    .bind(payload.hire_date)
    .bind(payload.job_id)
    .bind(payload.salary)
    .bind(payload.manager_id)
    .bind(payload.department_id)
    .execute(pool.get_ref())
    .await;

    let result = match result {
        Ok(r) => r,
        Err(e) if is_constraint_violation(&e) => {
            return Err(ApiError::validation(
                "unknown job, manager, or department reference",
            ));
        }
        Err(e) => return Err(e.into()),
    };

    let id = result.last_insert_id();

    employee_filter::insert(id);
    employee_cache::cache_name(id, format!("{} {}", payload.first_name, payload.last_name)).await;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "id": id,
        "message": "Employee created"
    })))
}

/// Paginated employee list
#[utoipa::path(
    get,
    path = "/api/employee",
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Paginated employee list", body = EmployeeListResponse)
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    pool: web::Data<MySqlPool>,
    query: web::Query<EmployeeQuery>,
) -> Result<HttpResponse, ApiError> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
    let offset = (page - 1) * per_page;

    // ---------- build WHERE clause dynamically ----------
    let mut where_sql = String::from(" WHERE 1=1");
    let mut args: Vec<FilterValue> = Vec::new();

    if let Some(department_id) = query.department_id {
        where_sql.push_str(" AND department_id = ?");
        args.push(FilterValue::U64(department_id));
    }

    if let Some(job_id) = query.job_id {
        where_sql.push_str(" AND job_id = ?");
        args.push(FilterValue::U64(job_id));
    }

    if let Some(search) = &query.search {
        where_sql.push_str(" AND (first_name LIKE ? OR last_name LIKE ? OR email LIKE ?)");
        let like = format!("%{}%", search);
        args.push(FilterValue::Str(like.clone()));
        args.push(FilterValue::Str(like.clone()));
        args.push(FilterValue::Str(like));
    }

    // ---------- total count ----------
    let count_sql = format!("SELECT COUNT(*) FROM employee{}", where_sql);
    debug!(sql = %count_sql, "Counting employees");

    let mut count_q = sqlx::query_scalar::<_, i64>(&count_sql);
    for arg in &args {
        count_q = match arg {
            FilterValue::U64(v) => count_q.bind(*v),
            FilterValue::Str(s) => count_q.bind(s.clone()),
        };
    }

    let total = count_q.fetch_one(pool.get_ref()).await?;

    // ---------- data query ----------
    let data_sql = format!(
        r#"
        SELECT id, first_name, last_name, email, phone, hire_date, job_id, salary,
               manager_id, department_id
        FROM employee
        {}
        ORDER BY id DESC
        LIMIT ? OFFSET ?
        "#,
        where_sql
    );
    debug!(sql = %data_sql, page, per_page, "Fetching employees");

    let mut data_q = sqlx::query_as::<_, Employee>(&data_sql);
    for arg in args {
        data_q = match arg {
            FilterValue::U64(v) => data_q.bind(v),
            FilterValue::Str(s) => data_q.bind(s),
        };
    }

    let employees = data_q
        .bind(per_page as i64)
        .bind(offset as i64)
        .fetch_all(pool.get_ref())
        .await?;

    Ok(HttpResponse::Ok().json(EmployeeListResponse {
        data: employees,
        page,
        per_page,
        total,
    }))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/employee/{employee_id}",
    params(
        ("employee_id" = u64, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = EmployeeDetail),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    let employee = sqlx::query_as::<_, Employee>(
        r#"
        SELECT id, first_name, last_name, email, phone, hire_date, job_id, salary,
               manager_id, department_id
        FROM employee
        WHERE id = ?
        "#,
    )
    .bind(employee_id)
    .fetch_optional(pool.get_ref())
    .await?
    .ok_or(ApiError::NotFound("Employee"))?;

    let manager_name = match employee.manager_id {
        Some(manager_id) => employee_cache::display_name(pool.get_ref(), manager_id).await,
        None => None,
    };

    Ok(HttpResponse::Ok().json(EmployeeDetail {
        id: employee.id,
        first_name: employee.first_name,
        last_name: employee.last_name,
        email: employee.email,
        phone: employee.phone,
        hire_date: employee.hire_date,
        job_id: employee.job_id,
        salary: employee.salary,
        manager_id: employee.manager_id,
        manager_name,
        department_id: employee.department_id,
    }))
}

/// Update Employee
#[utoipa::path(
    put,
    path = "/api/employee/{employee_id}",
    params(
        ("employee_id" = u64, Path, description = "Employee ID")
    ),
    request_body = Object,
    responses(
        (status = 200, description = "Employee updated"),
        (status = 400, description = "Unknown field or negative salary"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn update_employee(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    body: web::Json<Value>,
) -> actix_web::Result<HttpResponse> {
    let employee_id = path.into_inner();

    if let Some(salary) = body.get("salary") {
        let salary = salary
            .as_str()
            .and_then(|s| s.parse::<Decimal>().ok())
            .or_else(|| salary.as_f64().and_then(Decimal::from_f64_retain));

        match salary {
            Some(value) if value >= Decimal::ZERO => {}
            _ => return Err(ApiError::validation("salary must be non-negative").into()),
        }
    }

    let update = build_update_sql("employee", &body, UPDATABLE_COLUMNS, "id", employee_id)?;

    let affected = execute_update(pool.get_ref(), update)
        .await
        .map_err(ApiError::from)?;

    if affected == 0 {
        return Err(ApiError::NotFound("Employee").into());
    }

    // Name or manager edits invalidate the cached display name.
    employee_cache::invalidate(employee_id).await;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Employee updated"
    })))
}

/// Delete Employee
#[utoipa::path(
    delete,
    path = "/api/employee/{employee_id}",
    params(
        ("employee_id" = u64, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee deleted; attendance and payroll rows cascade"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    let result = sqlx::query("DELETE FROM employee WHERE id = ?")
        .bind(employee_id)
        .execute(pool.get_ref())
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Employee"));
    }

    employee_filter::remove(employee_id);
    employee_cache::invalidate(employee_id).await;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Employee deleted"
    })))
}
