use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Location {
    pub id: u64,
    pub street_address: Option<String>,
    pub postal_code: Option<String>,
    pub city: String,
    pub state_province: Option<String>,
    pub country_id: String,
}
