use actix_web::{HttpResponse, web};
use serde::Deserialize;
use sqlx::MySqlPool;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::model::dependent::Dependent;
use crate::service;

#[derive(Deserialize, ToSchema)]
pub struct CreateDependent {
    #[schema(example = "Minh")]
    pub first_name: String,

    #[schema(example = "Ho")]
    pub last_name: String,

    #[schema(example = "child")]
    pub relationship: String,
}

/// Dependents of an employee
#[utoipa::path(
    get,
    path = "/api/employee/{employee_id}/dependents",
    params(
        ("employee_id" = u64, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Dependents of the employee", body = [Dependent]),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn list_dependents(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    service::ensure_employee(pool.get_ref(), employee_id).await?;

    let dependents = sqlx::query_as::<_, Dependent>(
        r#"
        SELECT id, first_name, last_name, relationship, employee_id
        FROM dependent
        WHERE employee_id = ?
        ORDER BY id
        "#,
    )
    .bind(employee_id)
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(dependents))
}

/// Add a dependent to an employee
#[utoipa::path(
    post,
    path = "/api/employee/{employee_id}/dependents",
    params(
        ("employee_id" = u64, Path, description = "Employee ID")
    ),
    request_body = CreateDependent,
    responses(
        (status = 201, description = "Dependent added"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn add_dependent(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<CreateDependent>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    service::ensure_employee(pool.get_ref(), employee_id).await?;

    let result = sqlx::query(
        r#"
        INSERT INTO dependent (first_name, last_name, relationship, employee_id)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&payload.first_name)
    .bind(&payload.last_name)
    .bind(&payload.relationship)
    .bind(employee_id)
    .execute(pool.get_ref())
    .await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "id": result.last_insert_id(),
        "message": "Dependent added"
    })))
}
