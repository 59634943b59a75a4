pub mod attendance;
pub mod payroll;

use sqlx::MySqlPool;

use crate::error::ApiError;
use crate::utils::employee_filter;

/// Verify an employee id exists. A warmed filter miss short-circuits without
/// a query; a hit can be a false positive, so the database still decides.
pub(crate) async fn ensure_employee(pool: &MySqlPool, employee_id: u64) -> Result<(), ApiError> {
    if employee_filter::is_warmed() && !employee_filter::might_exist(employee_id) {
        return Err(ApiError::NotFound("Employee"));
    }

    let found: Option<(u64,)> = sqlx::query_as("SELECT id FROM employee WHERE id = ?")
        .bind(employee_id)
        .fetch_optional(pool)
        .await?;

    found.map(|_| ()).ok_or(ApiError::NotFound("Employee"))
}
