//! Category → error factory table.

use std::collections::BTreeMap;

use crate::{ErrorCategory, ErrorDetails, ServiceError};

/// Builds the error raised for a category. Enum variant constructors such
/// as `ServiceError::NotFound` already have this shape.
pub type ErrorFactory = fn(ErrorDetails) -> ServiceError;

/// Errors building a replacement mapping.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum MappingError {
    #[error("exception mapping must define a request_error fallback")]
    MissingFallback,
}

/// Which error each category raises.
///
/// Every mapping resolves `request_error`, so [`resolve`](Self::resolve)
/// always produces a factory: categories without an entry fall back to it.
#[derive(Clone, Debug)]
pub struct ExceptionMapping {
    entries: BTreeMap<ErrorCategory, ErrorFactory>,
}

impl Default for ExceptionMapping {
    /// Each built-in category raises its own variant.
    fn default() -> Self {
        let entries = ErrorCategory::ALL
            .into_iter()
            .filter_map(|category| default_factory(&category).map(|f| (category, f)))
            .collect();
        Self { entries }
    }
}

impl ExceptionMapping {
    /// A full replacement table. Categories not listed route through the
    /// table's own `request_error` entry, which must be present.
    pub fn from_entries<I>(entries: I) -> Result<Self, MappingError>
    where
        I: IntoIterator<Item = (ErrorCategory, ErrorFactory)>,
    {
        let entries: BTreeMap<_, _> = entries.into_iter().collect();
        if !entries.contains_key(&ErrorCategory::RequestError) {
            return Err(MappingError::MissingFallback);
        }
        Ok(Self { entries })
    }

    /// Overrides one entry, keeping the rest of the table.
    pub fn with(mut self, category: ErrorCategory, factory: ErrorFactory) -> Self {
        self.entries.insert(category, factory);
        self
    }

    pub fn get(&self, category: &ErrorCategory) -> Option<ErrorFactory> {
        self.entries.get(category).copied()
    }

    pub fn contains(&self, category: &ErrorCategory) -> bool {
        self.entries.contains_key(category)
    }

    /// The factory for `category`, or the `request_error` fallback.
    pub fn resolve(&self, category: &ErrorCategory) -> ErrorFactory {
        self.get(category)
            .or_else(|| self.get(&ErrorCategory::RequestError))
            .unwrap_or(ServiceError::Request)
    }

    /// Builds the error for `details.category`.
    pub fn build(&self, details: ErrorDetails) -> ServiceError {
        let factory = self.resolve(&details.category);
        factory(details)
    }

    pub fn categories(&self) -> impl Iterator<Item = &ErrorCategory> {
        self.entries.keys()
    }
}

/// The variant a built-in category raises by default.
pub fn default_factory(category: &ErrorCategory) -> Option<ErrorFactory> {
    let factory: ErrorFactory = match category {
        ErrorCategory::ValidationError => ServiceError::Validation,
        ErrorCategory::RequestError => ServiceError::Request,
        ErrorCategory::ClientError => ServiceError::Client,
        ErrorCategory::ServerError => ServiceError::Server,
        ErrorCategory::BadRequest => ServiceError::BadRequest,
        ErrorCategory::Unauthorized => ServiceError::Unauthorized,
        ErrorCategory::Forbidden => ServiceError::Forbidden,
        ErrorCategory::NotFound => ServiceError::NotFound,
        ErrorCategory::NotAcceptable => ServiceError::NotAcceptable,
        ErrorCategory::ProxyAuthenticationRequired => ServiceError::ProxyAuthenticationRequired,
        ErrorCategory::RequestTimeout => ServiceError::RequestTimeout,
        ErrorCategory::Conflict => ServiceError::Conflict,
        ErrorCategory::UnprocessableEntity => ServiceError::UnprocessableEntity,
        ErrorCategory::TooManyRequests => ServiceError::TooManyRequests,
        ErrorCategory::InternalServerError => ServiceError::InternalServerError,
        ErrorCategory::NotImplemented => ServiceError::NotImplemented,
        ErrorCategory::BadGateway => ServiceError::BadGateway,
        ErrorCategory::ServiceUnavailable => ServiceError::ServiceUnavailable,
        ErrorCategory::GatewayTimeout => ServiceError::GatewayTimeout,
        ErrorCategory::Custom(_) => return None,
    };
    Some(factory)
}
