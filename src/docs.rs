use crate::api::attendance::{
    AttendanceListResponse, AttendanceQuery, AttendanceStamp, SummaryQuery, UpdateAttendance,
};
use crate::api::department::CreateDepartment;
use crate::api::dependent::CreateDependent;
use crate::api::employee::{CreateEmployee, EmployeeDetail, EmployeeListResponse, EmployeeQuery};
use crate::api::org::{CreateCountry, CreateJob, CreateLocation, CreateRegion};
use crate::api::payroll::{
    ByDepartmentQuery, CalculatePayroll, PayrollListResponse, PayrollQuery, PayrollRunResponse,
};
use crate::model::attendance::Attendance;
use crate::model::country::Country;
use crate::model::department::Department;
use crate::model::dependent::Dependent;
use crate::model::employee::Employee;
use crate::model::job::Job;
use crate::model::location::Location;
use crate::model::payroll::PayrollRecord;
use crate::model::region::Region;
use crate::service::attendance::AttendanceSummary;
use crate::service::payroll::{PayrollFailure, PayrollOutcome};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HR Back Office API",
        version = "1.0.0",
        description = r#"
## HR Back Office

Back-office service for employees, organizational structure, daily
attendance, and monthly payroll.

### Key Features
- **Organization**
  - Regions, countries, locations, departments, and jobs
- **Employees**
  - Profiles with manager hierarchy and dependents
- **Attendance**
  - Daily check-in/check-out with derived worked hours and work-day fractions
- **Payroll**
  - Monthly payroll computed from attendance work-day totals

### Response Format
- JSON-based RESTful responses
- Pagination supported for list endpoints

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::attendance::check_in,
        crate::api::attendance::check_out,
        crate::api::attendance::summary,
        crate::api::attendance::list_attendance,
        crate::api::attendance::update_attendance,

        crate::api::payroll::calculate_payroll,
        crate::api::payroll::payroll_by_department,
        crate::api::payroll::list_payrolls,
        crate::api::payroll::get_payroll,

        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,

        crate::api::dependent::list_dependents,
        crate::api::dependent::add_dependent,

        crate::api::department::create_department,
        crate::api::department::list_departments,
        crate::api::department::get_department,
        crate::api::department::update_department,
        crate::api::department::delete_department,
        crate::api::department::department_employees,

        crate::api::org::create_region,
        crate::api::org::list_regions,
        crate::api::org::delete_region,
        crate::api::org::create_country,
        crate::api::org::list_countries,
        crate::api::org::delete_country,
        crate::api::org::create_location,
        crate::api::org::list_locations,
        crate::api::org::delete_location,
        crate::api::org::create_job,
        crate::api::org::list_jobs,
        crate::api::org::delete_job
    ),
    components(
        schemas(
            Attendance,
            AttendanceStamp,
            UpdateAttendance,
            SummaryQuery,
            AttendanceQuery,
            AttendanceListResponse,
            AttendanceSummary,
            PayrollRecord,
            CalculatePayroll,
            PayrollRunResponse,
            PayrollOutcome,
            PayrollFailure,
            ByDepartmentQuery,
            PayrollQuery,
            PayrollListResponse,
            Employee,
            EmployeeDetail,
            CreateEmployee,
            EmployeeQuery,
            EmployeeListResponse,
            Dependent,
            CreateDependent,
            Department,
            CreateDepartment,
            Region,
            CreateRegion,
            Country,
            CreateCountry,
            Location,
            CreateLocation,
            Job,
            CreateJob
        )
    ),
    tags(
        (name = "Attendance", description = "Daily check-in/check-out and monthly summaries"),
        (name = "Payroll", description = "Monthly payroll runs and payroll views"),
        (name = "Employee", description = "Employee profiles and dependents"),
        (name = "Department", description = "Departments and their staffing"),
        (name = "Organization", description = "Regions, countries, locations, and jobs"),
    )
)]
pub struct ApiDoc;
