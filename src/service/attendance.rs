//! Attendance recorder: daily check-in/check-out lifecycle and the derived
//! worked-hours / work-day metrics.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;
use sqlx::MySqlPool;
use utoipa::ToSchema;

use crate::error::{ApiError, is_constraint_violation};
use crate::model::attendance::Attendance;
use crate::utils::employee_cache;
use crate::utils::month::month_bounds;

/// Hours that count as one full work-day.
const FULL_DAY_HOURS: Decimal = dec!(8);

#[derive(Debug, PartialEq)]
pub struct AttendanceMetrics {
    pub worked_hours: Decimal,
    pub work_days: Decimal,
}

/// Derive worked hours and the work-day fraction from a check-in/check-out
/// pair. Runs on every persist where both timestamps are present.
///
/// The work-day fraction is rounded from the full-precision hours, and the
/// stored hours are rounded separately; both use half-to-even. A check-out on
/// a later calendar day still yields the full duration (hours may exceed 24)
/// and never moves the record's work date.
pub fn derive_attendance_metrics(
    check_in: NaiveDateTime,
    check_out: NaiveDateTime,
) -> AttendanceMetrics {
    let seconds = (check_out - check_in).num_seconds();
    let hours = Decimal::from(seconds) / dec!(3600);

    AttendanceMetrics {
        worked_hours: hours.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven),
        work_days: (hours / FULL_DAY_HOURS)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven),
    }
}

/// Locate or create today's record and stamp the check-in.
///
/// The unique (employee_id, work_date) key serializes concurrent check-ins;
/// losing the insert race means adopting the existing row, not erroring.
pub async fn check_in(
    pool: &MySqlPool,
    employee_id: u64,
    now: NaiveDateTime,
) -> Result<Attendance, ApiError> {
    super::ensure_employee(pool, employee_id).await?;

    let today = now.date();

    let inserted = sqlx::query(
        r#"
        INSERT INTO attendance (employee_id, work_date, check_in)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(employee_id)
    .bind(today)
    .bind(now)
    .execute(pool)
    .await;

    match inserted {
        Ok(_) => {}
        Err(e) if is_constraint_violation(&e) => {
            let existing = fetch_for_day(pool, employee_id, today)
                .await?
                .ok_or(ApiError::NotFound("Attendance record"))?;

            if existing.check_in.is_some() {
                return Err(ApiError::Conflict("Already checked in today"));
            }

            sqlx::query("UPDATE attendance SET check_in = ? WHERE id = ?")
                .bind(now)
                .bind(existing.id)
                .execute(pool)
                .await?;
        }
        Err(e) => return Err(e.into()),
    }

    fetch_for_day(pool, employee_id, today)
        .await?
        .ok_or(ApiError::NotFound("Attendance record"))
}

/// Stamp the check-out on today's record and persist the derived metrics in
/// the same write.
pub async fn check_out(
    pool: &MySqlPool,
    employee_id: u64,
    now: NaiveDateTime,
) -> Result<Attendance, ApiError> {
    super::ensure_employee(pool, employee_id).await?;

    let today = now.date();

    let record = fetch_for_day(pool, employee_id, today)
        .await?
        .ok_or(ApiError::Conflict("No check-in recorded for today"))?;

    let check_in = record
        .check_in
        .ok_or(ApiError::Conflict("No check-in recorded for today"))?;

    if record.check_out.is_some() {
        return Err(ApiError::Conflict("Already checked out today"));
    }

    if now < check_in {
        return Err(ApiError::Conflict("Check-out cannot precede check-in"));
    }

    let metrics = derive_attendance_metrics(check_in, now);

    sqlx::query(
        r#"
        UPDATE attendance
        SET check_out = ?, worked_hours = ?, work_days = ?
        WHERE id = ?
        "#,
    )
    .bind(now)
    .bind(metrics.worked_hours)
    .bind(metrics.work_days)
    .bind(record.id)
    .execute(pool)
    .await?;

    fetch_for_day(pool, employee_id, today)
        .await?
        .ok_or(ApiError::NotFound("Attendance record"))
}

/// Edit either timestamp of an existing record. The derivation reruns
/// whenever both timestamps end up present, through the same single UPDATE.
pub async fn update_times(
    pool: &MySqlPool,
    id: u64,
    check_in: Option<NaiveDateTime>,
    check_out: Option<NaiveDateTime>,
) -> Result<Attendance, ApiError> {
    let record = fetch_by_id(pool, id)
        .await?
        .ok_or(ApiError::NotFound("Attendance record"))?;

    let new_in = check_in.or(record.check_in);
    let new_out = check_out.or(record.check_out);

    let metrics = match (new_in, new_out) {
        (Some(start), Some(end)) => {
            if end < start {
                return Err(ApiError::Conflict("Check-out cannot precede check-in"));
            }
            Some(derive_attendance_metrics(start, end))
        }
        _ => None,
    };

    sqlx::query(
        r#"
        UPDATE attendance
        SET check_in = ?, check_out = ?, worked_hours = ?, work_days = ?
        WHERE id = ?
        "#,
    )
    .bind(new_in)
    .bind(new_out)
    .bind(metrics.as_ref().map(|m| m.worked_hours))
    .bind(metrics.as_ref().map(|m| m.work_days))
    .bind(id)
    .execute(pool)
    .await?;

    fetch_by_id(pool, id)
        .await?
        .ok_or(ApiError::NotFound("Attendance record"))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AttendanceSummary {
    #[schema(example = 1001)]
    pub employee_id: u64,

    #[schema(example = "Duong Ho")]
    pub name: String,

    #[schema(example = "20.00", value_type = String)]
    pub total_days: Decimal,

    #[schema(example = "160.00", value_type = String)]
    pub total_hours: Decimal,

    #[schema(example = 20)]
    pub records: i64,
}

/// Per-employee totals over every record whose work date falls in the given
/// month. Read-only.
pub async fn monthly_summary(
    pool: &MySqlPool,
    employee_id: Option<u64>,
    month: NaiveDate,
) -> Result<Vec<AttendanceSummary>, ApiError> {
    let (start, end) = month_bounds(month);

    let rows: Vec<(u64, Decimal, Decimal, i64)> = if let Some(id) = employee_id {
        sqlx::query_as(
            r#"
            SELECT employee_id,
                   COALESCE(SUM(work_days), 0),
                   COALESCE(SUM(worked_hours), 0),
                   COUNT(*)
            FROM attendance
            WHERE work_date >= ? AND work_date < ? AND employee_id = ?
            GROUP BY employee_id
            ORDER BY employee_id
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(id)
        .fetch_all(pool)
        .await?
    } else {
        sqlx::query_as(
            r#"
            SELECT employee_id,
                   COALESCE(SUM(work_days), 0),
                   COALESCE(SUM(worked_hours), 0),
                   COUNT(*)
            FROM attendance
            WHERE work_date >= ? AND work_date < ?
            GROUP BY employee_id
            ORDER BY employee_id
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?
    };

    let mut summaries = Vec::with_capacity(rows.len());
    for (employee_id, total_days, total_hours, records) in rows {
        let name = employee_cache::display_name(pool, employee_id)
            .await
            .unwrap_or_default();

        summaries.push(AttendanceSummary {
            employee_id,
            name,
            total_days,
            total_hours,
            records,
        });
    }

    Ok(summaries)
}

async fn fetch_for_day(
    pool: &MySqlPool,
    employee_id: u64,
    work_date: NaiveDate,
) -> Result<Option<Attendance>, sqlx::Error> {
    sqlx::query_as::<_, Attendance>(
        r#"
        SELECT id, employee_id, work_date, check_in, check_out, worked_hours, work_days
        FROM attendance
        WHERE employee_id = ? AND work_date = ?
        "#,
    )
    .bind(employee_id)
    .bind(work_date)
    .fetch_optional(pool)
    .await
}

async fn fetch_by_id(pool: &MySqlPool, id: u64) -> Result<Option<Attendance>, sqlx::Error> {
    sqlx::query_as::<_, Attendance>(
        r#"
        SELECT id, employee_id, work_date, check_in, check_out, worked_hours, work_days
        FROM attendance
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn stamp(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn nine_hour_day() {
        let metrics = derive_attendance_metrics(
            stamp(2024, 1, 10, 8, 0, 0),
            stamp(2024, 1, 10, 17, 0, 0),
        );

        assert_eq!(metrics.worked_hours, dec!(9.00));
        // 9 / 8 = 1.125 rounds half-to-even to 1.12
        assert_eq!(metrics.work_days, dec!(1.12));
    }

    #[test]
    fn full_eight_hour_day() {
        let metrics = derive_attendance_metrics(
            stamp(2024, 1, 10, 9, 0, 0),
            stamp(2024, 1, 10, 17, 0, 0),
        );

        assert_eq!(metrics.worked_hours, dec!(8.00));
        assert_eq!(metrics.work_days, dec!(1.00));
    }

    #[test]
    fn half_to_even_rounds_up_when_preceding_digit_is_odd() {
        // 9.5 / 8 = 1.1875 -> 1.19
        let metrics = derive_attendance_metrics(
            stamp(2024, 1, 10, 8, 0, 0),
            stamp(2024, 1, 10, 17, 30, 0),
        );

        assert_eq!(metrics.worked_hours, dec!(9.50));
        assert_eq!(metrics.work_days, dec!(1.19));
    }

    #[test]
    fn one_hour_rounds_down_to_even() {
        // 1 / 8 = 0.125 -> 0.12
        let metrics = derive_attendance_metrics(
            stamp(2024, 1, 10, 8, 0, 0),
            stamp(2024, 1, 10, 9, 0, 0),
        );

        assert_eq!(metrics.work_days, dec!(0.12));
    }

    #[test]
    fn overnight_shift_keeps_full_duration() {
        let metrics = derive_attendance_metrics(
            stamp(2024, 1, 10, 22, 0, 0),
            stamp(2024, 1, 11, 6, 0, 0),
        );

        assert_eq!(metrics.worked_hours, dec!(8.00));
        assert_eq!(metrics.work_days, dec!(1.00));
    }

    #[test]
    fn duration_past_twenty_four_hours_is_not_clamped() {
        let metrics = derive_attendance_metrics(
            stamp(2024, 1, 10, 8, 0, 0),
            stamp(2024, 1, 11, 10, 0, 0),
        );

        assert_eq!(metrics.worked_hours, dec!(26.00));
        assert_eq!(metrics.work_days, dec!(3.25));
    }

    #[test]
    fn zero_duration() {
        let at = stamp(2024, 1, 10, 8, 0, 0);
        let metrics = derive_attendance_metrics(at, at);

        assert_eq!(metrics.worked_hours, dec!(0.00));
        assert_eq!(metrics.work_days, dec!(0.00));
    }

    #[test]
    fn sub_hour_durations_keep_two_decimals() {
        // 45 minutes = 0.75h; 0.75 / 8 = 0.09375 -> 0.09
        let metrics = derive_attendance_metrics(
            stamp(2024, 1, 10, 8, 0, 0),
            stamp(2024, 1, 10, 8, 45, 0),
        );

        assert_eq!(metrics.worked_hours, dec!(0.75));
        assert_eq!(metrics.work_days, dec!(0.09));
    }
}
