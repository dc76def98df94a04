//! Classification of API responses into success or a typed failure.
//!
//! A [`Classifier`] runs status predicates in a fixed precedence order and
//! maps the detected [`ErrorCategory`] to a [`ServiceError`] through an
//! [`ExceptionMapping`]. Services implementing [`ApiService`] are run with
//! [`call`] (returns an [`Outcome`]) or [`try_call`] (returns a `Result`).

mod category;
pub mod classifier;
mod error;
pub mod mapping;
pub mod messages;
mod service;
pub mod validation;

pub use apicall_http;
pub use apicall_http::{Body, Connection, Response};

pub use category::ErrorCategory;
pub use classifier::{Classifier, Predicate};
pub use error::{ErrorDetails, ServiceError};
pub use mapping::{ErrorFactory, ExceptionMapping, MappingError};
pub use service::{call, try_call, ApiService, Outcome};
pub use validation::ValidationErrors;
