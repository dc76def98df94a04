//! Invocation wrapper: attribute validation, the HTTP action, then
//! response classification, surfaced either as an [`Outcome`] or as a
//! typed [`ServiceError`].

use std::future::Future;

use apicall_http::{Connection, Response};
use serde::Serialize;

use crate::{Classifier, ErrorCategory, ErrorDetails, ServiceError, ValidationErrors};

/// A single API operation.
///
/// Implementors provide the connection and the action; validation and the
/// classifier have defaults.
pub trait ApiService: Sync {
    fn connection(&self) -> &Connection;

    /// Checks the service's own attributes before any request is made.
    fn validate(&self, _errors: &mut ValidationErrors) {}

    /// Performs the HTTP call.
    fn perform(
        &self,
        connection: &Connection,
    ) -> impl Future<Output = Result<Response, apicall_http::Error>> + Send;

    fn classifier(&self) -> &Classifier {
        Classifier::shared()
    }
}

/// Result of a non-raising [`call`].
#[derive(Clone, Debug, Serialize)]
pub struct Outcome {
    success: bool,
    errors: ValidationErrors,
    response: Option<Response>,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// The response, when the action ran and the server answered.
    pub fn response(&self) -> Option<&Response> {
        self.response.as_ref()
    }

    /// Failure category recorded under `base`, if the call got that far.
    pub fn category(&self) -> Option<ErrorCategory> {
        self.errors.base_category()
    }

    pub fn into_parts(self) -> (bool, ValidationErrors, Option<Response>) {
        (self.success, self.errors, self.response)
    }
}

enum Run {
    /// Attribute validation failed; nothing was sent.
    Invalid(ValidationErrors),
    /// The server answered; `errors` is empty on success.
    Completed {
        response: Response,
        errors: ValidationErrors,
    },
    /// The HTTP layer raised. `errors` holds the category it maps to.
    /// A raised response that passes classification is `Completed` instead.
    Raised {
        error: apicall_http::Error,
        errors: ValidationErrors,
    },
}

async fn run<S: ApiService>(service: &S) -> Run {
    let mut errors = ValidationErrors::new();
    service.validate(&mut errors);
    if !errors.is_empty() {
        tracing::debug!("Validation failed: {}", errors.full_messages().join(", "));
        return Run::Invalid(errors);
    }

    let classifier = service.classifier();
    match service.perform(service.connection()).await {
        Ok(response) => {
            classifier.validate(&response, &mut errors);
            Run::Completed { response, errors }
        }
        Err(apicall_http::Error::Status(response)) => {
            if classifier.validate(&response, &mut errors) {
                Run::Completed { response, errors }
            } else {
                Run::Raised {
                    error: apicall_http::Error::Status(response),
                    errors,
                }
            }
        }
        Err(error) => {
            tracing::error!("Request failed: {}", error);
            errors.add_category(&ErrorCategory::RequestError);
            Run::Raised { error, errors }
        }
    }
}

/// Runs the service and always returns an [`Outcome`]; check
/// [`Outcome::is_success`].
pub async fn call<S: ApiService>(service: &S) -> Outcome {
    match run(service).await {
        Run::Invalid(errors) => Outcome {
            success: false,
            errors,
            response: None,
        },
        Run::Completed { response, errors } => Outcome {
            success: errors.is_empty(),
            errors,
            response: Some(response),
        },
        Run::Raised { error, errors } => Outcome {
            success: false,
            errors,
            response: error.into_response(),
        },
    }
}

/// Runs the service and returns the response, or the error the active
/// mapping selects for the failure. Low-level HTTP errors are always
/// re-mapped, never returned as-is.
pub async fn try_call<S: ApiService>(service: &S) -> Result<Response, ServiceError> {
    let classifier = service.classifier();
    match run(service).await {
        Run::Invalid(errors) => {
            let message = errors.full_messages().join(", ");
            Err(classifier.exception_mapping().build(ErrorDetails {
                category: ErrorCategory::ValidationError,
                response: None,
                errors,
                message,
            }))
        }
        Run::Completed { response, errors } if errors.is_empty() => Ok(response),
        Run::Completed { response, errors } => {
            Err(classifier.exception_for(Some(response), errors, None))
        }
        Run::Raised { error, errors } => {
            let message = match error.response() {
                Some(_) => None,
                None => Some(error.to_string()),
            };
            Err(classifier.exception_for(error.into_response(), errors, message))
        }
    }
}
