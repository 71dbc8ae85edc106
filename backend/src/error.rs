//! Error taxonomy shared by every service.
//!
//! | Variant      | Meaning                                         | HTTP |
//! |--------------|-------------------------------------------------|------|
//! | `Validation` | malformed input, nothing was written            | 400  |
//! | `Unauthorized` | no acting owner on an owner-scoped route      | 401  |
//! | `NotFound`   | id, handle or token does not resolve            | 404  |
//! | `Conflict`   | transition from an incompatible state           | 409  |
//! | `Dependency` | analyzer or notifier unavailable                | 503  |
//! | `Storage`    | the relational store failed                     | 500  |
//!
//! `Dependency` errors rarely reach a client: the create and invite flows
//! recover from them locally.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::lifecycle::TransitionError;
use common::model::analysis::AnalysisError;
use common::model::testimonial::DraftError;
use common::model::SettingsError;
use log::error;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Dependency(String),
    #[error("storage failure: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl AppError {
    pub fn invalid_link() -> Self {
        AppError::NotFound("This confirmation link is invalid or has expired.".to_string())
    }

    fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation",
            AppError::Unauthorized(_) => "unauthorized",
            AppError::NotFound(_) => "not_found",
            AppError::Conflict(_) => "conflict",
            AppError::Dependency(_) => "dependency",
            AppError::Storage(_) => "storage",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Dependency(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Storage(e) => {
                error!("storage failure: {}", e);
                "Internal storage error".to_string()
            }
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.kind(),
            message,
        })
    }
}

impl From<DraftError> for AppError {
    fn from(e: DraftError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl From<SettingsError> for AppError {
    fn from(e: SettingsError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl From<AnalysisError> for AppError {
    fn from(e: AnalysisError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl From<TransitionError> for AppError {
    fn from(e: TransitionError) -> Self {
        match e {
            TransitionError::LinkExpired => AppError::invalid_link(),
            other => AppError::Conflict(other.to_string()),
        }
    }
}
