use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Job {
    pub id: u64,
    pub title: String,
    #[schema(value_type = String, nullable = true)]
    pub min_salary: Option<Decimal>,
    #[schema(value_type = String, nullable = true)]
    pub max_salary: Option<Decimal>,
}
