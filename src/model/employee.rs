use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "first_name": "Duong",
        "last_name": "Ho",
        "email": "duong.ho@company.com",
        "phone": "+84912345678",
        "hire_date": "2024-01-01",
        "job_id": 3,
        "salary": "22000000.00",
        "manager_id": null,
        "department_id": 10
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "Duong")]
    pub first_name: String,

    #[schema(example = "Ho")]
    pub last_name: String,

    #[schema(example = "duong.ho@company.com", nullable = true)]
    pub email: Option<String>,

    #[schema(example = "+84912345678", nullable = true)]
    pub phone: Option<String>,

    #[schema(example = "2024-01-01", value_type = String, format = "date")]
    pub hire_date: NaiveDate,

    #[schema(example = 3)]
    pub job_id: u64,

    /// Monthly base salary.
    #[schema(example = "22000000.00", value_type = String)]
    pub salary: Decimal,

    #[schema(example = 7, nullable = true)]
    pub manager_id: Option<u64>,

    #[schema(example = 10, nullable = true)]
    pub department_id: Option<u64>,
}
