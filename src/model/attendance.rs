use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One row per employee per calendar day. `worked_hours` and `work_days` are
/// derived whenever both timestamps are present; `work_date` is pinned at
/// creation and never moves, even when the check-out lands on a later day.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Attendance {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = 1001)]
    pub employee_id: u64,

    #[schema(example = "2024-01-10", value_type = String, format = "date")]
    pub work_date: NaiveDate,

    #[schema(example = "2024-01-10T08:00:00", value_type = String, format = "date-time", nullable = true)]
    pub check_in: Option<NaiveDateTime>,

    #[schema(example = "2024-01-10T17:00:00", value_type = String, format = "date-time", nullable = true)]
    pub check_out: Option<NaiveDateTime>,

    #[schema(example = "9.00", value_type = String, nullable = true)]
    pub worked_hours: Option<Decimal>,

    #[schema(example = "1.12", value_type = String, nullable = true)]
    pub work_days: Option<Decimal>,
}
