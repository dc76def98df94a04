//! The closed set of reasons an API call can fail.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// Why an API call failed.
///
/// The 19 built-in tags cover attribute validation, the generic request /
/// client / server buckets, and one leaf per well-known status code.
/// `Custom` carries tags introduced by consumer-supplied rules.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorCategory {
    ValidationError,
    RequestError,
    ClientError,
    ServerError,
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    NotAcceptable,
    ProxyAuthenticationRequired,
    RequestTimeout,
    Conflict,
    UnprocessableEntity,
    TooManyRequests,
    InternalServerError,
    NotImplemented,
    BadGateway,
    ServiceUnavailable,
    GatewayTimeout,
    Custom(String),
}

impl ErrorCategory {
    /// Every built-in category, in declaration order.
    pub const ALL: [ErrorCategory; 19] = [
        ErrorCategory::ValidationError,
        ErrorCategory::RequestError,
        ErrorCategory::ClientError,
        ErrorCategory::ServerError,
        ErrorCategory::BadRequest,
        ErrorCategory::Unauthorized,
        ErrorCategory::Forbidden,
        ErrorCategory::NotFound,
        ErrorCategory::NotAcceptable,
        ErrorCategory::ProxyAuthenticationRequired,
        ErrorCategory::RequestTimeout,
        ErrorCategory::Conflict,
        ErrorCategory::UnprocessableEntity,
        ErrorCategory::TooManyRequests,
        ErrorCategory::InternalServerError,
        ErrorCategory::NotImplemented,
        ErrorCategory::BadGateway,
        ErrorCategory::ServiceUnavailable,
        ErrorCategory::GatewayTimeout,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::ValidationError => "validation_error",
            Self::RequestError => "request_error",
            Self::ClientError => "client_error",
            Self::ServerError => "server_error",
            Self::BadRequest => "bad_request",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::NotAcceptable => "not_acceptable",
            Self::ProxyAuthenticationRequired => "proxy_authentication_required",
            Self::RequestTimeout => "request_timeout",
            Self::Conflict => "conflict",
            Self::UnprocessableEntity => "unprocessable_entity",
            Self::TooManyRequests => "too_many_requests",
            Self::InternalServerError => "internal_server_error",
            Self::NotImplemented => "not_implemented",
            Self::BadGateway => "bad_gateway",
            Self::ServiceUnavailable => "service_unavailable",
            Self::GatewayTimeout => "gateway_timeout",
            Self::Custom(name) => name.as_str(),
        }
    }

    /// The exact status code a leaf category is bound to.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::BadRequest => Some(400),
            Self::Unauthorized => Some(401),
            Self::Forbidden => Some(403),
            Self::NotFound => Some(404),
            Self::NotAcceptable => Some(406),
            Self::ProxyAuthenticationRequired => Some(407),
            Self::RequestTimeout => Some(408),
            Self::Conflict => Some(409),
            Self::UnprocessableEntity => Some(422),
            Self::TooManyRequests => Some(429),
            Self::InternalServerError => Some(500),
            Self::NotImplemented => Some(501),
            Self::BadGateway => Some(502),
            Self::ServiceUnavailable => Some(503),
            Self::GatewayTimeout => Some(504),
            _ => None,
        }
    }

    /// Leaf category for an exact status code, if one exists.
    pub fn from_status(status: u16) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.status_code() == Some(status))
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorCategory {
    type Err = std::convert::Infallible;

    /// Unknown tags are kept as `Custom`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .unwrap_or_else(|| Self::Custom(s.to_string())))
    }
}

impl Serialize for ErrorCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip_through_from_str() {
        for category in ErrorCategory::ALL {
            let parsed: ErrorCategory = category.as_str().parse().unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn unknown_tag_is_custom() {
        let parsed: ErrorCategory = "quota_exceeded".parse().unwrap();
        assert_eq!(parsed, ErrorCategory::Custom("quota_exceeded".to_string()));
        assert!(parsed.is_custom());
        assert_eq!(parsed.to_string(), "quota_exceeded");
    }

    #[test]
    fn fifteen_leaves_have_status_codes() {
        let leaves: Vec<_> = ErrorCategory::ALL
            .iter()
            .filter_map(|c| c.status_code())
            .collect();
        assert_eq!(
            leaves,
            vec![400, 401, 403, 404, 406, 407, 408, 409, 422, 429, 500, 501, 502, 503, 504]
        );
    }

    #[test]
    fn from_status_finds_leaf() {
        assert_eq!(ErrorCategory::from_status(429), Some(ErrorCategory::TooManyRequests));
        assert_eq!(ErrorCategory::from_status(418), None);
    }

    #[test]
    fn serializes_as_tag() {
        let json = serde_json::to_string(&ErrorCategory::ProxyAuthenticationRequired).unwrap();
        assert_eq!(json, "\"proxy_authentication_required\"");
    }
}
