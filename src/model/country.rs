use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Countries use a two-letter code as their primary key.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Country {
    pub id: String,
    pub name: Option<String>,
    pub region_id: u64,
}
