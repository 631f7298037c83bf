use actix_web::{error::BlockingError, http::StatusCode, HttpResponse, ResponseError};
use log::{error, warn};
use std::fmt::Display;
use thiserror::Error;

use crate::store::StoreError;

/// Every failure leaves the api as plain text, which the client shows as is.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        let message = e.to_string();
        match e {
            StoreError::Invalid(_) | StoreError::MissingLineItem(_) | StoreError::AlreadyPaid(_) => {
                AppError::BadRequest(message)
            }
            StoreError::UnknownService(_) | StoreError::UnknownInvoice(_) => {
                AppError::NotFound(message)
            }
            StoreError::Io(_) => AppError::Internal(message),
        }
    }
}

impl AppError {
    pub fn internal(detail: impl Display) -> Self {
        AppError::Internal(format!("Error al procesar la solicitud: {}", detail))
    }
}

impl From<BlockingError> for AppError {
    fn from(e: BlockingError) -> Self {
        AppError::internal(e)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Internal(message) => error!("{}", message),
            AppError::BadRequest(message) | AppError::NotFound(message) => {
                warn!("rechazada: {}", message)
            }
        }
        HttpResponse::build(self.status_code())
            .content_type("text/plain; charset=utf-8")
            .body(self.to_string())
    }
}
