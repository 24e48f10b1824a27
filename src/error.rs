//!
//! # Error Handling
//!
//! `AppError` is the single, closed error type shared by the repositories, the
//! services and the HTTP layer. Every variant renders as a JSON body of the
//! form `{"message": "..."}` with a fixed status code, so handlers never match
//! on message text to pick a response.
//!
//! `From` conversions for `sqlx::Error`, `validator::ValidationErrors`,
//! `jsonwebtoken::errors::Error` and `bcrypt::BcryptError` let the `?`
//! operator cross layer boundaries.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use log::error;
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// SQLSTATE raised by Postgres when a unique constraint is violated.
const UNIQUE_VIOLATION: &str = "23505";

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Registration attempted with an email that already belongs to a user (HTTP 400).
    DuplicateEmail,
    /// Login with an unknown email or a wrong password (HTTP 401).
    InvalidCredentials,
    /// The request carries no usable identity: missing, malformed or expired
    /// token, or a token whose user no longer exists (HTTP 401).
    Unauthenticated(String),
    /// The todo does not exist (HTTP 404).
    NotFound,
    /// The todo exists but belongs to another user (HTTP 403).
    AccessDenied,
    /// Input was well-formed but failed validation rules (HTTP 400).
    ValidationError(String),
    /// The request body, query string or path could not be parsed (HTTP 400).
    BadRequest(String),
    /// A database operation failed (HTTP 500). The detail is logged, not returned.
    Database(String),
    /// Any other unexpected server-side failure (HTTP 500).
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::DuplicateEmail => write!(f, "Email already exists"),
            AppError::InvalidCredentials => write!(f, "Invalid credentials"),
            AppError::Unauthenticated(msg) => write!(f, "Unauthenticated: {}", msg),
            AppError::NotFound => write!(f, "Todo not found"),
            AppError::AccessDenied => write!(f, "Access denied"),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::Database(msg) => write!(f, "Database Error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl AppError {
    /// The message placed in the JSON body sent to the client.
    pub fn client_message(&self) -> String {
        match self {
            AppError::DuplicateEmail => "Email already exists".to_string(),
            AppError::InvalidCredentials => "Unauthorized".to_string(),
            AppError::Unauthenticated(msg) => msg.clone(),
            AppError::NotFound => "Todo not found".to_string(),
            AppError::AccessDenied => "Forbidden".to_string(),
            AppError::ValidationError(msg) | AppError::BadRequest(msg) => msg.clone(),
            AppError::Database(_) | AppError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::DuplicateEmail | AppError::ValidationError(_) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::InvalidCredentials | AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AppError::AccessDenied => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Database(_) | AppError::Internal(_) = self {
            error!("{}", self);
        }
        HttpResponse::build(self.status_code()).json(json!({
            "message": self.client_message()
        }))
    }
}

/// Unique violations become `DuplicateEmail`, since `users.email` is the only
/// unique column written by the application. Everything else is a database error.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        if let Some(db_error) = error.as_database_error() {
            if db_error.code().as_deref() == Some(UNIQUE_VIOLATION) {
                return AppError::DuplicateEmail;
            }
        }
        AppError::Database(error.to_string())
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthenticated(format!("Invalid token: {}", error))
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::Internal(format!("Password hashing failed: {}", error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_error_statuses() {
        let cases = [
            (AppError::DuplicateEmail, 400),
            (AppError::ValidationError("bad".into()), 400),
            (AppError::BadRequest("bad json".into()), 400),
            (AppError::InvalidCredentials, 401),
            (AppError::Unauthenticated("Missing token".into()), 401),
            (AppError::AccessDenied, 403),
            (AppError::NotFound, 404),
            (AppError::Database("pool timed out".into()), 500),
            (AppError::Internal("boom".into()), 500),
        ];
        for (error, expected) in cases {
            assert_eq!(error.error_response().status(), expected, "{:?}", error);
        }
    }

    #[actix_rt::test]
    async fn test_error_body_is_message_json() {
        let response = AppError::InvalidCredentials.error_response();
        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, json!({ "message": "Unauthorized" }));
    }

    #[actix_rt::test]
    async fn test_database_detail_is_hidden() {
        let response = AppError::Database("relation \"users\" does not exist".into()).error_response();
        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "Internal server error");
    }

    #[test]
    fn test_row_not_found_is_database_error() {
        let error: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(error, AppError::Database(_)));
    }
}
