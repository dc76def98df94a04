//! Typed errors raised by a failed service call.

use apicall_http::Response;

use crate::{ErrorCategory, ValidationErrors};

/// Everything a raised error carries about the failed call.
#[derive(Clone, Debug)]
pub struct ErrorDetails {
    /// The category that selected this error. May differ from the variant
    /// when a mapping routes a category elsewhere (e.g. fallback).
    pub category: ErrorCategory,
    /// The response that triggered the failure, if one was received.
    pub response: Option<Response>,
    pub errors: ValidationErrors,
    pub message: String,
}

/// Errors surfaced by [`try_call`](crate::try_call).
///
/// Variants form two branches under the generic request error: `Client`
/// plus the 4xx leaves, and `Server` plus the 5xx leaves. `Validation`
/// stands apart and never involves an HTTP call.
#[derive(thiserror::Error, Debug)]
pub enum ServiceError {
    #[error("{}", .0.message)]
    Validation(ErrorDetails),
    #[error("{}", .0.message)]
    Request(ErrorDetails),
    #[error("{}", .0.message)]
    Client(ErrorDetails),
    #[error("{}", .0.message)]
    Server(ErrorDetails),
    #[error("{}", .0.message)]
    BadRequest(ErrorDetails),
    #[error("{}", .0.message)]
    Unauthorized(ErrorDetails),
    #[error("{}", .0.message)]
    Forbidden(ErrorDetails),
    #[error("{}", .0.message)]
    NotFound(ErrorDetails),
    #[error("{}", .0.message)]
    NotAcceptable(ErrorDetails),
    #[error("{}", .0.message)]
    ProxyAuthenticationRequired(ErrorDetails),
    #[error("{}", .0.message)]
    RequestTimeout(ErrorDetails),
    #[error("{}", .0.message)]
    Conflict(ErrorDetails),
    #[error("{}", .0.message)]
    UnprocessableEntity(ErrorDetails),
    #[error("{}", .0.message)]
    TooManyRequests(ErrorDetails),
    #[error("{}", .0.message)]
    InternalServerError(ErrorDetails),
    #[error("{}", .0.message)]
    NotImplemented(ErrorDetails),
    #[error("{}", .0.message)]
    BadGateway(ErrorDetails),
    #[error("{}", .0.message)]
    ServiceUnavailable(ErrorDetails),
    #[error("{}", .0.message)]
    GatewayTimeout(ErrorDetails),
}

impl ServiceError {
    pub fn details(&self) -> &ErrorDetails {
        match self {
            Self::Validation(d)
            | Self::Request(d)
            | Self::Client(d)
            | Self::Server(d)
            | Self::BadRequest(d)
            | Self::Unauthorized(d)
            | Self::Forbidden(d)
            | Self::NotFound(d)
            | Self::NotAcceptable(d)
            | Self::ProxyAuthenticationRequired(d)
            | Self::RequestTimeout(d)
            | Self::Conflict(d)
            | Self::UnprocessableEntity(d)
            | Self::TooManyRequests(d)
            | Self::InternalServerError(d)
            | Self::NotImplemented(d)
            | Self::BadGateway(d)
            | Self::ServiceUnavailable(d)
            | Self::GatewayTimeout(d) => d,
        }
    }

    /// Name of the variant, as a category tag.
    pub fn kind(&self) -> ErrorCategory {
        match self {
            Self::Validation(_) => ErrorCategory::ValidationError,
            Self::Request(_) => ErrorCategory::RequestError,
            Self::Client(_) => ErrorCategory::ClientError,
            Self::Server(_) => ErrorCategory::ServerError,
            Self::BadRequest(_) => ErrorCategory::BadRequest,
            Self::Unauthorized(_) => ErrorCategory::Unauthorized,
            Self::Forbidden(_) => ErrorCategory::Forbidden,
            Self::NotFound(_) => ErrorCategory::NotFound,
            Self::NotAcceptable(_) => ErrorCategory::NotAcceptable,
            Self::ProxyAuthenticationRequired(_) => ErrorCategory::ProxyAuthenticationRequired,
            Self::RequestTimeout(_) => ErrorCategory::RequestTimeout,
            Self::Conflict(_) => ErrorCategory::Conflict,
            Self::UnprocessableEntity(_) => ErrorCategory::UnprocessableEntity,
            Self::TooManyRequests(_) => ErrorCategory::TooManyRequests,
            Self::InternalServerError(_) => ErrorCategory::InternalServerError,
            Self::NotImplemented(_) => ErrorCategory::NotImplemented,
            Self::BadGateway(_) => ErrorCategory::BadGateway,
            Self::ServiceUnavailable(_) => ErrorCategory::ServiceUnavailable,
            Self::GatewayTimeout(_) => ErrorCategory::GatewayTimeout,
        }
    }

    /// `Client` or one of the 4xx leaves.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Client(_)
                | Self::BadRequest(_)
                | Self::Unauthorized(_)
                | Self::Forbidden(_)
                | Self::NotFound(_)
                | Self::NotAcceptable(_)
                | Self::ProxyAuthenticationRequired(_)
                | Self::RequestTimeout(_)
                | Self::Conflict(_)
                | Self::UnprocessableEntity(_)
                | Self::TooManyRequests(_)
        )
    }

    /// `Server` or one of the 5xx leaves.
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::Server(_)
                | Self::InternalServerError(_)
                | Self::NotImplemented(_)
                | Self::BadGateway(_)
                | Self::ServiceUnavailable(_)
                | Self::GatewayTimeout(_)
        )
    }

    /// Anything under the request error, i.e. everything but validation.
    pub fn is_request_error(&self) -> bool {
        !matches!(self, Self::Validation(_))
    }

    pub fn category(&self) -> &ErrorCategory {
        &self.details().category
    }

    pub fn response(&self) -> Option<&Response> {
        self.details().response.as_ref()
    }

    pub fn status(&self) -> Option<u16> {
        self.response().map(|r| r.status)
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.details().errors
    }

    pub fn message(&self) -> &str {
        &self.details().message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(category: ErrorCategory) -> ErrorDetails {
        ErrorDetails {
            category,
            response: Some(Response::empty(404)),
            errors: ValidationErrors::new(),
            message: "Not found".to_string(),
        }
    }

    #[test]
    fn display_is_message() {
        let err = ServiceError::NotFound(details(ErrorCategory::NotFound));
        assert_eq!(err.to_string(), "Not found");
    }

    #[test]
    fn client_branch() {
        let err = ServiceError::NotFound(details(ErrorCategory::NotFound));
        assert!(err.is_client_error());
        assert!(!err.is_server_error());
        assert!(err.is_request_error());
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn server_branch() {
        let err = ServiceError::BadGateway(details(ErrorCategory::BadGateway));
        assert!(err.is_server_error());
        assert!(!err.is_client_error());
    }

    #[test]
    fn generic_request_error_is_neither_branch() {
        let err = ServiceError::Request(details(ErrorCategory::Custom("quota".into())));
        assert!(!err.is_client_error());
        assert!(!err.is_server_error());
        assert!(err.is_request_error());
        assert_eq!(err.kind(), ErrorCategory::RequestError);
        assert_eq!(err.category(), &ErrorCategory::Custom("quota".into()));
    }

    #[test]
    fn validation_is_not_a_request_error() {
        let err = ServiceError::Validation(details(ErrorCategory::ValidationError));
        assert!(!err.is_request_error());
    }
}
