//! CRUD for the organizational reference tables: regions, countries,
//! locations, and jobs. These feed employee and department records; the
//! payroll core only reads them.

use actix_web::{HttpResponse, web};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::MySqlPool;
use utoipa::ToSchema;

use crate::error::{ApiError, is_constraint_violation};
use crate::model::country::Country;
use crate::model::job::Job;
use crate::model::location::Location;
use crate::model::region::Region;

#[derive(Deserialize, ToSchema)]
pub struct CreateRegion {
    #[schema(example = "Asia Pacific")]
    pub name: String,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateCountry {
    /// Two-letter country code.
    #[schema(example = "VN")]
    pub id: String,

    #[schema(example = "Vietnam", nullable = true)]
    pub name: Option<String>,

    #[schema(example = 1)]
    pub region_id: u64,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateLocation {
    #[schema(example = "12 Ly Thuong Kiet", nullable = true)]
    pub street_address: Option<String>,

    #[schema(example = "100000", nullable = true)]
    pub postal_code: Option<String>,

    #[schema(example = "Hanoi")]
    pub city: String,

    #[schema(example = "Hoan Kiem", nullable = true)]
    pub state_province: Option<String>,

    #[schema(example = "VN")]
    pub country_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateJob {
    #[schema(example = "Software Engineer")]
    pub title: String,

    #[schema(example = "15000000.00", value_type = String, nullable = true)]
    pub min_salary: Option<Decimal>,

    #[schema(example = "45000000.00", value_type = String, nullable = true)]
    pub max_salary: Option<Decimal>,
}

/// Create Region
#[utoipa::path(
    post,
    path = "/api/org/region",
    request_body = CreateRegion,
    responses((status = 201, description = "Region created")),
    tag = "Organization"
)]
pub async fn create_region(
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateRegion>,
) -> Result<HttpResponse, ApiError> {
    let result = sqlx::query("INSERT INTO region (name) VALUES (?)")
        .bind(&payload.name)
        .execute(pool.get_ref())
        .await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "id": result.last_insert_id(),
        "message": "Region created"
    })))
}

/// List Regions
#[utoipa::path(
    get,
    path = "/api/org/region",
    responses((status = 200, body = [Region])),
    tag = "Organization"
)]
pub async fn list_regions(pool: web::Data<MySqlPool>) -> Result<HttpResponse, ApiError> {
    let regions = sqlx::query_as::<_, Region>("SELECT id, name FROM region ORDER BY id")
        .fetch_all(pool.get_ref())
        .await?;

    Ok(HttpResponse::Ok().json(regions))
}

/// Delete Region
#[utoipa::path(
    delete,
    path = "/api/org/region/{region_id}",
    params(("region_id" = u64, Path, description = "Region ID")),
    responses(
        (status = 200, description = "Region deleted"),
        (status = 404, description = "Region not found")
    ),
    tag = "Organization"
)]
pub async fn delete_region(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let result = sqlx::query("DELETE FROM region WHERE id = ?")
        .bind(path.into_inner())
        .execute(pool.get_ref())
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Region"));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Region deleted" })))
}

/// Create Country
#[utoipa::path(
    post,
    path = "/api/org/country",
    request_body = CreateCountry,
    responses(
        (status = 201, description = "Country created"),
        (status = 400, description = "Bad code or unknown region")
    ),
    tag = "Organization"
)]
pub async fn create_country(
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateCountry>,
) -> Result<HttpResponse, ApiError> {
    if payload.id.len() != 2 || !payload.id.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ApiError::validation("country id must be a two-letter code"));
    }

    let result = sqlx::query("INSERT INTO country (id, name, region_id) VALUES (?, ?, ?)")
        .bind(payload.id.to_uppercase())
        .bind(&payload.name)
        .bind(payload.region_id)
        .execute(pool.get_ref())
        .await;

    match result {
        Ok(_) => {}
        Err(e) if is_constraint_violation(&e) => {
            return Err(ApiError::validation(
                "duplicate country code or unknown region reference",
            ));
        }
        Err(e) => return Err(e.into()),
    }

    Ok(HttpResponse::Created().json(serde_json::json!({ "message": "Country created" })))
}

/// List Countries
#[utoipa::path(
    get,
    path = "/api/org/country",
    responses((status = 200, body = [Country])),
    tag = "Organization"
)]
pub async fn list_countries(pool: web::Data<MySqlPool>) -> Result<HttpResponse, ApiError> {
    let countries =
        sqlx::query_as::<_, Country>("SELECT id, name, region_id FROM country ORDER BY id")
            .fetch_all(pool.get_ref())
            .await?;

    Ok(HttpResponse::Ok().json(countries))
}

/// Delete Country
#[utoipa::path(
    delete,
    path = "/api/org/country/{country_id}",
    params(("country_id" = String, Path, description = "Two-letter country code")),
    responses(
        (status = 200, description = "Country deleted"),
        (status = 404, description = "Country not found")
    ),
    tag = "Organization"
)]
pub async fn delete_country(
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let result = sqlx::query("DELETE FROM country WHERE id = ?")
        .bind(path.into_inner().to_uppercase())
        .execute(pool.get_ref())
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Country"));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Country deleted" })))
}

/// Create Location
#[utoipa::path(
    post,
    path = "/api/org/location",
    request_body = CreateLocation,
    responses(
        (status = 201, description = "Location created"),
        (status = 400, description = "Unknown country reference")
    ),
    tag = "Organization"
)]
pub async fn create_location(
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateLocation>,
) -> Result<HttpResponse, ApiError> {
    let result = sqlx::query(
        r#"
        INSERT INTO location (street_address, postal_code, city, state_province, country_id)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&payload.street_address)
    .bind(&payload.postal_code)
    .bind(&payload.city)
    .bind(&payload.state_province)
    .bind(&payload.country_id)
    .execute(pool.get_ref())
    .await;

    let result = match result {
        Ok(r) => r,
        Err(e) if is_constraint_violation(&e) => {
            return Err(ApiError::validation("unknown country reference"));
        }
        Err(e) => return Err(e.into()),
    };

    Ok(HttpResponse::Created().json(serde_json::json!({
        "id": result.last_insert_id(),
        "message": "Location created"
    })))
}

/// List Locations
#[utoipa::path(
    get,
    path = "/api/org/location",
    responses((status = 200, body = [Location])),
    tag = "Organization"
)]
pub async fn list_locations(pool: web::Data<MySqlPool>) -> Result<HttpResponse, ApiError> {
    let locations = sqlx::query_as::<_, Location>(
        r#"
        SELECT id, street_address, postal_code, city, state_province, country_id
        FROM location
        ORDER BY id
        "#,
    )
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(locations))
}

/// Delete Location
#[utoipa::path(
    delete,
    path = "/api/org/location/{location_id}",
    params(("location_id" = u64, Path, description = "Location ID")),
    responses(
        (status = 200, description = "Location deleted"),
        (status = 404, description = "Location not found")
    ),
    tag = "Organization"
)]
pub async fn delete_location(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let result = sqlx::query("DELETE FROM location WHERE id = ?")
        .bind(path.into_inner())
        .execute(pool.get_ref())
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Location"));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Location deleted" })))
}

/// Create Job
#[utoipa::path(
    post,
    path = "/api/org/job",
    request_body = CreateJob,
    responses(
        (status = 201, description = "Job created"),
        (status = 400, description = "Invalid salary range")
    ),
    tag = "Organization"
)]
pub async fn create_job(
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateJob>,
) -> Result<HttpResponse, ApiError> {
    if let (Some(min), Some(max)) = (payload.min_salary, payload.max_salary) {
        if min > max {
            return Err(ApiError::validation("min_salary cannot exceed max_salary"));
        }
    }

    let result = sqlx::query("INSERT INTO job (title, min_salary, max_salary) VALUES (?, ?, ?)")
        .bind(&payload.title)
        .bind(payload.min_salary)
        .bind(payload.max_salary)
        .execute(pool.get_ref())
        .await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "id": result.last_insert_id(),
        "message": "Job created"
    })))
}

/// List Jobs
#[utoipa::path(
    get,
    path = "/api/org/job",
    responses((status = 200, body = [Job])),
    tag = "Organization"
)]
pub async fn list_jobs(pool: web::Data<MySqlPool>) -> Result<HttpResponse, ApiError> {
    let jobs =
        sqlx::query_as::<_, Job>("SELECT id, title, min_salary, max_salary FROM job ORDER BY id")
            .fetch_all(pool.get_ref())
            .await?;

    Ok(HttpResponse::Ok().json(jobs))
}

/// Delete Job
#[utoipa::path(
    delete,
    path = "/api/org/job/{job_id}",
    params(("job_id" = u64, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job deleted"),
        (status = 404, description = "Job not found")
    ),
    tag = "Organization"
)]
pub async fn delete_job(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let result = sqlx::query("DELETE FROM job WHERE id = ?")
        .bind(path.into_inner())
        .execute(pool.get_ref())
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Job"));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Job deleted" })))
}
