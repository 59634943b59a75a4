use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Dependent {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub relationship: String,
    pub employee_id: u64,
}
