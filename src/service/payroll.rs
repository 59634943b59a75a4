//! Payroll aggregator: monthly payroll rows computed from attendance
//! work-day totals.

use chrono::{Local, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;
use sqlx::MySqlPool;
use utoipa::ToSchema;

use crate::error::{ApiError, is_constraint_violation};
use crate::model::payroll::PayrollRecord;
use crate::utils::month::{month_bounds, month_key};

/// Assumed standard working days per month; the per-day wage rate is the
/// monthly base salary divided by this.
pub const STANDARD_WORKDAYS_PER_MONTH: Decimal = dec!(22);

/// Net pay for a month: work-day total times the per-day rate, rounded
/// half-to-even to currency precision.
pub fn compute_net_pay(total_days: Decimal, base_salary: Decimal) -> Decimal {
    let daily_rate = base_salary / STANDARD_WORKDAYS_PER_MONTH;
    (total_days * daily_rate).round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

/// Pay to persist given a fresh total. A zero total leaves the prior pay in
/// place rather than recomputing it; new records start the "prior" at zero.
fn next_net_pay(total_days: Decimal, base_salary: Decimal, prior_net_pay: Decimal) -> Decimal {
    if total_days > Decimal::ZERO {
        compute_net_pay(total_days, base_salary)
    } else {
        prior_net_pay
    }
}

/// The employee columns a payroll run needs.
#[derive(Debug, sqlx::FromRow)]
pub struct EmployeePay {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub salary: Decimal,
}

impl EmployeePay {
    fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PayrollOutcome {
    #[schema(example = 1001)]
    pub employee_id: u64,

    #[schema(example = "Duong Ho")]
    pub name: String,

    #[schema(example = "22000000.00", value_type = String)]
    pub base_salary: Decimal,

    #[schema(example = "22.00", value_type = String)]
    pub total_days: Decimal,

    #[schema(example = "22000000.00", value_type = String)]
    pub net_pay: Decimal,

    #[schema(example = true)]
    pub created: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PayrollFailure {
    #[schema(example = 1001)]
    pub employee_id: u64,

    #[schema(example = "Duong Ho")]
    pub name: String,

    #[schema(example = "internal server error")]
    pub error: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PayrollRun {
    pub results: Vec<PayrollOutcome>,
    pub failures: Vec<PayrollFailure>,
}

/// Recompute one employee's payroll row for the month containing
/// `month_first_day`.
///
/// Sums attendance work-days over the month, then creates or updates the
/// (employee, month) row. Idempotent: rerunning with unchanged attendance
/// writes the same totals. `computed_at` is stamped at creation only.
pub async fn recompute(
    pool: &MySqlPool,
    employee: &EmployeePay,
    month_first_day: NaiveDate,
) -> Result<PayrollOutcome, ApiError> {
    let month = month_key(month_first_day);
    let (start, end) = month_bounds(month);

    let total_days: Decimal = sqlx::query_scalar(
        r#"
        SELECT COALESCE(SUM(work_days), 0)
        FROM attendance
        WHERE employee_id = ? AND work_date >= ? AND work_date < ?
        "#,
    )
    .bind(employee.id)
    .bind(start)
    .bind(end)
    .fetch_one(pool)
    .await?;

    let existing = fetch_row(pool, employee.id, month).await?;

    let (net_pay, created) = match existing {
        Some((id, prior_net_pay)) => {
            let net_pay = update_row(pool, id, total_days, employee.salary, prior_net_pay).await?;
            (net_pay, false)
        }
        None => {
            let net_pay = next_net_pay(total_days, employee.salary, Decimal::ZERO);

            let inserted = sqlx::query(
                r#"
                INSERT INTO payroll_record (employee_id, month, total_days, net_pay, computed_at)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(employee.id)
            .bind(month)
            .bind(total_days)
            .bind(net_pay)
            .bind(Local::now().naive_local())
            .execute(pool)
            .await;

            match inserted {
                Ok(_) => (net_pay, true),
                Err(e) if is_constraint_violation(&e) => {
                    // Lost a concurrent creation race; the row exists now.
                    let (id, prior_net_pay) = fetch_row(pool, employee.id, month)
                        .await?
                        .ok_or(ApiError::NotFound("Payroll record"))?;

                    let net_pay =
                        update_row(pool, id, total_days, employee.salary, prior_net_pay).await?;
                    (net_pay, false)
                }
                Err(e) => return Err(e.into()),
            }
        }
    };

    Ok(PayrollOutcome {
        employee_id: employee.id,
        name: employee.display_name(),
        base_salary: employee.salary,
        total_days,
        net_pay,
        created,
    })
}

/// Run `recompute` over all employees, or one. A failing employee is
/// reported and skipped; the rest of the batch still runs.
pub async fn bulk_recompute(
    pool: &MySqlPool,
    month_first_day: NaiveDate,
    employee_id: Option<u64>,
) -> Result<PayrollRun, ApiError> {
    let employees: Vec<EmployeePay> = match employee_id {
        Some(id) => {
            let employee = sqlx::query_as::<_, EmployeePay>(
                "SELECT id, first_name, last_name, salary FROM employee WHERE id = ?",
            )
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or(ApiError::NotFound("Employee"))?;

            vec![employee]
        }
        None => {
            sqlx::query_as::<_, EmployeePay>(
                "SELECT id, first_name, last_name, salary FROM employee ORDER BY id",
            )
            .fetch_all(pool)
            .await?
        }
    };

    let mut run = PayrollRun {
        results: Vec::with_capacity(employees.len()),
        failures: Vec::new(),
    };

    for employee in &employees {
        match recompute(pool, employee, month_first_day).await {
            Ok(outcome) => run.results.push(outcome),
            Err(e) => {
                tracing::error!(error = %e, employee_id = employee.id, "Payroll recompute failed");
                run.failures.push(PayrollFailure {
                    employee_id: employee.id,
                    name: employee.display_name(),
                    error: e.to_string(),
                });
            }
        }
    }

    Ok(run)
}

/// Payroll rows for a department and month. Pure read.
pub async fn by_department(
    pool: &MySqlPool,
    department_id: u64,
    month_first_day: NaiveDate,
) -> Result<Vec<PayrollRecord>, ApiError> {
    let found: Option<(u64,)> = sqlx::query_as("SELECT id FROM department WHERE id = ?")
        .bind(department_id)
        .fetch_optional(pool)
        .await?;

    if found.is_none() {
        return Err(ApiError::NotFound("Department"));
    }

    let rows = sqlx::query_as::<_, PayrollRecord>(
        r#"
        SELECT p.id, p.employee_id, p.month, p.total_days, p.net_pay, p.computed_at
        FROM payroll_record p
        JOIN employee e ON e.id = p.employee_id
        WHERE e.department_id = ? AND p.month = ?
        ORDER BY p.employee_id
        "#,
    )
    .bind(department_id)
    .bind(month_key(month_first_day))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

async fn fetch_row(
    pool: &MySqlPool,
    employee_id: u64,
    month: NaiveDate,
) -> Result<Option<(u64, Decimal)>, sqlx::Error> {
    sqlx::query_as("SELECT id, net_pay FROM payroll_record WHERE employee_id = ? AND month = ?")
        .bind(employee_id)
        .bind(month)
        .fetch_optional(pool)
        .await
}

async fn update_row(
    pool: &MySqlPool,
    id: u64,
    total_days: Decimal,
    base_salary: Decimal,
    prior_net_pay: Decimal,
) -> Result<Decimal, sqlx::Error> {
    let net_pay = next_net_pay(total_days, base_salary, prior_net_pay);

    sqlx::query("UPDATE payroll_record SET total_days = ?, net_pay = ? WHERE id = ?")
        .bind(total_days)
        .bind(net_pay)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(net_pay)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_month_pays_full_salary() {
        // 22 days at salary/22 per day is exactly the base salary.
        assert_eq!(
            compute_net_pay(dec!(22), dec!(22000000)),
            dec!(22000000.00)
        );
    }

    #[test]
    fn fractional_days_round_half_to_even() {
        // 10000000 / 22 * 1.12 = 509090.9090... -> 509090.91
        assert_eq!(compute_net_pay(dec!(1.12), dec!(10000000)), dec!(509090.91));
    }

    #[test]
    fn half_month() {
        assert_eq!(compute_net_pay(dec!(11), dec!(22000000)), dec!(11000000.00));
    }

    #[test]
    fn zero_days_pays_nothing_on_a_new_record() {
        assert_eq!(
            next_net_pay(dec!(0), dec!(22000000), Decimal::ZERO),
            Decimal::ZERO
        );
    }

    #[test]
    fn zero_days_carries_prior_pay_forward() {
        // An existing record that aggregates to zero keeps its old pay.
        assert_eq!(
            next_net_pay(dec!(0), dec!(22000000), dec!(5000000.00)),
            dec!(5000000.00)
        );
    }

    #[test]
    fn positive_days_always_recompute() {
        // The carried-forward value is ignored once attendance exists.
        assert_eq!(
            next_net_pay(dec!(22), dec!(22000000), dec!(5000000.00)),
            dec!(22000000.00)
        );
    }

    #[test]
    fn recompute_with_same_inputs_is_idempotent() {
        let first = compute_net_pay(dec!(17.38), dec!(13500000));
        let second = compute_net_pay(dec!(17.38), dec!(13500000));
        assert_eq!(first, second);
    }
}
