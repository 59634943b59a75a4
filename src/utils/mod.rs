pub mod db_utils;
pub mod employee_cache;
pub mod employee_filter;
pub mod month;
