use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Monthly payroll row, keyed by (employee, first day of month).
/// `computed_at` is set once at creation and never touched by recomputes.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct PayrollRecord {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = 1001)]
    pub employee_id: u64,

    #[schema(example = "2024-01-01", value_type = String, format = "date")]
    pub month: NaiveDate,

    #[schema(example = "22.00", value_type = String)]
    pub total_days: Decimal,

    #[schema(example = "22000000.00", value_type = String)]
    pub net_pay: Decimal,

    #[schema(example = "2024-02-01T09:30:00", value_type = String, format = "date-time")]
    pub computed_at: NaiveDateTime,
}
