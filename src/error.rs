use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Error taxonomy surfaced by the API.
///
/// Storage-level duplicate-key races are never mapped here directly; call
/// sites resolve them with a re-fetch (get-or-create) and only construct a
/// `Conflict` when the business rule is genuinely violated.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed input: bad month string, missing required identifier.
    #[error("{0}")]
    Validation(String),

    /// Unknown entity, named by kind.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Business-rule violation (duplicate check-in, check-out before
    /// check-in, ...). Not a system fault.
    #[error("{0}")]
    Conflict(&'static str),

    #[error("internal server error")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::Validation(msg.into())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Database(e) = self {
            tracing::error!(error = %e, "database failure");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Internal Server Error"
            }));
        }

        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "message": self.to_string()
        }))
    }
}

/// MySQL reports both duplicate-key and other constraint violations under
/// SQLSTATE 23000.
pub fn is_constraint_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23000"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(
            ApiError::validation("bad month").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound("Employee").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Conflict("Already checked in today").status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn not_found_names_the_entity() {
        assert_eq!(ApiError::NotFound("Employee").to_string(), "Employee not found");
    }
}
