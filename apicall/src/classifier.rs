//! Response classification: status predicates in a fixed precedence order,
//! plus construction of the error a failed classification raises.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use apicall_http::Response;

use crate::messages::Catalog;
use crate::{ErrorCategory, ErrorDetails, ExceptionMapping, ServiceError, ValidationErrors};

/// A check on a response that detects one category.
pub type Predicate = Arc<dyn Fn(&Response) -> bool + Send + Sync>;

/// Order in which built-in predicates are consulted. Specific 5xx leaves,
/// then any 5xx, then specific 4xx leaves, then 400, then any 4xx.
/// `bad_request` comes after the other leaves so an API that overloads 400
/// can be split up by overriding a more specific predicate.
pub static PRECEDENCE: [ErrorCategory; 17] = [
    ErrorCategory::NotImplemented,
    ErrorCategory::BadGateway,
    ErrorCategory::ServiceUnavailable,
    ErrorCategory::GatewayTimeout,
    ErrorCategory::InternalServerError,
    ErrorCategory::ServerError,
    ErrorCategory::Unauthorized,
    ErrorCategory::Forbidden,
    ErrorCategory::NotFound,
    ErrorCategory::NotAcceptable,
    ErrorCategory::ProxyAuthenticationRequired,
    ErrorCategory::RequestTimeout,
    ErrorCategory::Conflict,
    ErrorCategory::UnprocessableEntity,
    ErrorCategory::TooManyRequests,
    ErrorCategory::BadRequest,
    ErrorCategory::ClientError,
];

fn matches_status(category: &ErrorCategory, status: u16) -> bool {
    match category {
        ErrorCategory::ServerError => status >= 500,
        ErrorCategory::ClientError => status >= 400,
        other => other.status_code() == Some(status),
    }
}

/// The built-in predicate for a category, or `None` for categories that
/// are not detected from a response (`validation_error`, `request_error`,
/// custom tags).
pub fn status_predicate(category: &ErrorCategory) -> Option<Predicate> {
    if !PRECEDENCE.contains(category) {
        return None;
    }
    let category = category.clone();
    Some(Arc::new(move |response: &Response| {
        matches_status(&category, response.status)
    }))
}

/// Turns responses into success or a failure category, and failure
/// categories into [`ServiceError`]s.
#[derive(Clone, Default)]
pub struct Classifier {
    /// Consumer rules, checked in insertion order before the built-ins.
    rules: Vec<(ErrorCategory, Predicate)>,
    /// Replacements for built-in predicates, consulted in their slot.
    overrides: HashMap<ErrorCategory, Predicate>,
    mapping: ExceptionMapping,
}

impl fmt::Debug for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Classifier")
            .field(
                "rules",
                &self.rules.iter().map(|(c, _)| c).collect::<Vec<_>>(),
            )
            .field("overrides", &self.overrides.keys().collect::<Vec<_>>())
            .field("mapping", &self.mapping)
            .finish()
    }
}

impl Classifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide classifier with the default predicates and mapping.
    pub fn shared() -> &'static Classifier {
        static SHARED: OnceLock<Classifier> = OnceLock::new();
        SHARED.get_or_init(Classifier::default)
    }

    /// Replaces the predicate of a built-in category. The replacement is
    /// consulted at the same precedence position. Categories without a
    /// built-in slot are added as a rule instead.
    pub fn with_predicate<F>(mut self, category: ErrorCategory, predicate: F) -> Self
    where
        F: Fn(&Response) -> bool + Send + Sync + 'static,
    {
        let predicate: Predicate = Arc::new(predicate);
        if PRECEDENCE.contains(&category) {
            self.overrides.insert(category, predicate);
        } else {
            self.rules.push((category, predicate));
        }
        self
    }

    /// Adds a rule checked before every built-in predicate, typically for
    /// a custom category.
    pub fn with_rule<F>(mut self, category: ErrorCategory, predicate: F) -> Self
    where
        F: Fn(&Response) -> bool + Send + Sync + 'static,
    {
        let predicate: Predicate = Arc::new(predicate);
        self.rules.push((category, predicate));
        self
    }

    pub fn with_mapping(mut self, mapping: ExceptionMapping) -> Self {
        self.mapping = mapping;
        self
    }

    pub fn exception_mapping(&self) -> &ExceptionMapping {
        &self.mapping
    }

    /// Returns `None` for success, otherwise the first matching category.
    ///
    /// A response that is itself a collection is a page of a list endpoint
    /// and counts as success without looking at the status.
    pub fn classify(&self, response: &Response) -> Option<ErrorCategory> {
        if response.is_collection() {
            return None;
        }
        for (category, predicate) in &self.rules {
            if predicate(response) {
                return Some(category.clone());
            }
        }
        PRECEDENCE
            .iter()
            .find(|category| match self.overrides.get(*category) {
                Some(predicate) => predicate(response),
                None => matches_status(category, response.status),
            })
            .cloned()
    }

    /// Response validation phase: on failure records the category under
    /// `base` and stops. Returns whether the response passed.
    pub fn validate(&self, response: &Response, errors: &mut ValidationErrors) -> bool {
        match self.classify(response) {
            None => true,
            Some(category) => {
                tracing::warn!(
                    "Response with status {} classified as {}",
                    response.status,
                    category
                );
                errors.add_category(&category);
                false
            }
        }
    }

    /// Builds the error for the category recorded under `base`, falling
    /// back to `request_error`. Without a message, the category's default
    /// message is used.
    pub fn exception_for(
        &self,
        response: Option<Response>,
        errors: ValidationErrors,
        message: Option<String>,
    ) -> ServiceError {
        let category = errors
            .base_category()
            .unwrap_or(ErrorCategory::RequestError);
        let message = message.unwrap_or_else(|| Catalog::global().category_message(&category));
        self.mapping.build(ErrorDetails {
            category,
            response,
            errors,
            message,
        })
    }
}
