use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use super::{ErrorKind, TransactionError};
use crate::{
    constants::{CREATE_FAILURE_MESSAGE, MINT_FAILURE_MESSAGE, REQUEST_TIMEOUT_MESSAGE},
    models::ErrorResponse,
};

/// Failure of an API operation, rendered as `{ error, kind, details }`.
///
/// Pipeline failures are `500`; a handler that exceeds the request deadline
/// is `504`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Candy machine creation failed: {0}")]
    CreationFailed(TransactionError),

    #[error("Minting from Candy Machine failed: {0}")]
    MintFailed(TransactionError),

    #[error("Request exceeded {0}s")]
    RequestTimeout(u64),
}

impl ApiError {
    fn summary(&self) -> &'static str {
        match self {
            ApiError::CreationFailed(_) => CREATE_FAILURE_MESSAGE,
            ApiError::MintFailed(_) => MINT_FAILURE_MESSAGE,
            ApiError::RequestTimeout(_) => REQUEST_TIMEOUT_MESSAGE,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::CreationFailed(err) | ApiError::MintFailed(err) => err.kind(),
            ApiError::RequestTimeout(_) => ErrorKind::NetworkUnavailable,
        }
    }

    pub fn details(&self) -> String {
        match self {
            ApiError::CreationFailed(err) | ApiError::MintFailed(err) => err.details().to_string(),
            ApiError::RequestTimeout(seconds) => {
                format!("request handler did not finish within {seconds}s")
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::RequestTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.summary().to_string(),
            kind: self.kind(),
            details: self.details(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_rt::test]
    async fn test_creation_failure_renders_kind_and_details() {
        let error = ApiError::CreationFailed(TransactionError::NetworkUnavailable(
            "blockhash fetch failed".into(),
        ));
        let response = error.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body()).await.unwrap();
        let body: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(body.error, CREATE_FAILURE_MESSAGE);
        assert_eq!(body.kind, ErrorKind::NetworkUnavailable);
        assert_eq!(body.details, "blockhash fetch failed");
    }

    #[actix_rt::test]
    async fn test_mint_failure_uses_mint_summary() {
        let error = ApiError::MintFailed(TransactionError::StateInconsistency("none".into()));
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(error.error_response().into_body()).await.unwrap();
        let body: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(body.error, MINT_FAILURE_MESSAGE);
        assert_eq!(body.kind, ErrorKind::StateInconsistency);
    }

    #[actix_rt::test]
    async fn test_request_timeout_is_gateway_timeout() {
        let error = ApiError::RequestTimeout(30);
        assert_eq!(error.status_code(), StatusCode::GATEWAY_TIMEOUT);

        let body = to_bytes(error.error_response().into_body()).await.unwrap();
        let body: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(body.error, REQUEST_TIMEOUT_MESSAGE);
        assert_eq!(body.kind, ErrorKind::NetworkUnavailable);
        assert!(body.details.contains("30s"));
    }
}
