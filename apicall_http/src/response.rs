use serde::Serialize;
use serde_json::Value;

/// Payload of a completed HTTP call.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Body {
    #[default]
    Empty,
    Json(Value),
    Text(String),
}

impl Body {
    /// Parses a raw payload: empty stays empty, valid JSON becomes `Json`,
    /// anything else is kept verbatim as `Text`.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Body::Empty;
        }
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => Body::Json(value),
            Err(_) => Body::Text(raw.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Body::Empty)
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Body::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Looks up a top-level key of a JSON object body.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_json()?.get(key)
    }
}

/// Result of an HTTP call: status code plus body.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Response {
    pub status: u16,
    pub body: Body,
}

impl Response {
    pub fn new(status: u16, body: Body) -> Self {
        Self { status, body }
    }

    /// A response with no payload.
    pub fn empty(status: u16) -> Self {
        Self::new(status, Body::Empty)
    }

    /// A response with a JSON payload.
    pub fn json(status: u16, value: Value) -> Self {
        Self::new(status, Body::Json(value))
    }

    /// An already-unwrapped page of a collection endpoint.
    pub fn collection<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Self::json(200, Value::Array(items.into_iter().collect()))
    }

    /// True when the response *is* a collection (a top-level JSON array),
    /// as opposed to an object that merely contains one.
    pub fn is_collection(&self) -> bool {
        matches!(self.body, Body::Json(Value::Array(_)))
    }
}
