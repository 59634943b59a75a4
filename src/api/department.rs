use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::Value;
use sqlx::MySqlPool;
use utoipa::ToSchema;

use crate::error::{ApiError, is_constraint_violation};
use crate::model::department::Department;
use crate::model::employee::Employee;
use crate::utils::db_utils::{build_update_sql, execute_update};

const UPDATABLE_COLUMNS: &[&str] = &["name", "location_id"];

#[derive(Deserialize, ToSchema)]
pub struct CreateDepartment {
    #[schema(example = "Engineering")]
    pub name: String,

    #[schema(example = 1, nullable = true)]
    pub location_id: Option<u64>,
}

/// Create Department
#[utoipa::path(
    post,
    path = "/api/department",
    request_body = CreateDepartment,
    responses(
        (status = 201, description = "Department created"),
        (status = 400, description = "Unknown location reference")
    ),
    tag = "Department"
)]
pub async fn create_department(
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateDepartment>,
) -> Result<HttpResponse, ApiError> {
    let result = sqlx::query("INSERT INTO department (name, location_id) VALUES (?, ?)")
        .bind(&payload.name)
        .bind(payload.location_id)
        .execute(pool.get_ref())
        .await;

    let result = match result {
        Ok(r) => r,
        Err(e) if is_constraint_violation(&e) => {
            return Err(ApiError::validation("unknown location reference"));
        }
        Err(e) => return Err(e.into()),
    };

    Ok(HttpResponse::Created().json(serde_json::json!({
        "id": result.last_insert_id(),
        "message": "Department created"
    })))
}

/// List Departments
#[utoipa::path(
    get,
    path = "/api/department",
    responses(
        (status = 200, description = "All departments", body = [Department])
    ),
    tag = "Department"
)]
pub async fn list_departments(pool: web::Data<MySqlPool>) -> Result<HttpResponse, ApiError> {
    let departments = sqlx::query_as::<_, Department>(
        "SELECT id, name, location_id FROM department ORDER BY id",
    )
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(departments))
}

/// Get Department by ID
#[utoipa::path(
    get,
    path = "/api/department/{department_id}",
    params(
        ("department_id" = u64, Path, description = "Department ID")
    ),
    responses(
        (status = 200, body = Department),
        (status = 404, description = "Department not found")
    ),
    tag = "Department"
)]
pub async fn get_department(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let department = sqlx::query_as::<_, Department>(
        "SELECT id, name, location_id FROM department WHERE id = ?",
    )
    .bind(path.into_inner())
    .fetch_optional(pool.get_ref())
    .await?
    .ok_or(ApiError::NotFound("Department"))?;

    Ok(HttpResponse::Ok().json(department))
}

/// Update Department
#[utoipa::path(
    put,
    path = "/api/department/{department_id}",
    params(
        ("department_id" = u64, Path, description = "Department ID")
    ),
    request_body = Object,
    responses(
        (status = 200, description = "Department updated"),
        (status = 404, description = "Department not found")
    ),
    tag = "Department"
)]
pub async fn update_department(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    body: web::Json<Value>,
) -> actix_web::Result<HttpResponse> {
    let department_id = path.into_inner();

    let update = build_update_sql("department", &body, UPDATABLE_COLUMNS, "id", department_id)?;

    let affected = execute_update(pool.get_ref(), update)
        .await
        .map_err(ApiError::from)?;

    if affected == 0 {
        return Err(ApiError::NotFound("Department").into());
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Department updated"
    })))
}

/// Delete Department
#[utoipa::path(
    delete,
    path = "/api/department/{department_id}",
    params(
        ("department_id" = u64, Path, description = "Department ID")
    ),
    responses(
        (status = 200, description = "Department deleted"),
        (status = 404, description = "Department not found")
    ),
    tag = "Department"
)]
pub async fn delete_department(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let result = sqlx::query("DELETE FROM department WHERE id = ?")
        .bind(path.into_inner())
        .execute(pool.get_ref())
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Department"));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Department deleted"
    })))
}

/// Employees in a department
#[utoipa::path(
    get,
    path = "/api/department/{department_id}/employees",
    params(
        ("department_id" = u64, Path, description = "Department ID")
    ),
    responses(
        (status = 200, description = "Employees assigned to the department", body = [Employee]),
        (status = 404, description = "Department not found")
    ),
    tag = "Department"
)]
pub async fn department_employees(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let department_id = path.into_inner();

    let found: Option<(u64,)> = sqlx::query_as("SELECT id FROM department WHERE id = ?")
        .bind(department_id)
        .fetch_optional(pool.get_ref())
        .await?;

    if found.is_none() {
        return Err(ApiError::NotFound("Department"));
    }

    let employees = sqlx::query_as::<_, Employee>(
        r#"
        SELECT id, first_name, last_name, email, phone, hire_date, job_id, salary,
               manager_id, department_id
        FROM employee
        WHERE department_id = ?
        ORDER BY id
        "#,
    )
    .bind(department_id)
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(employees))
}
