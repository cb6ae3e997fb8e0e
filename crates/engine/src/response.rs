use error::GraphqlError;
use indexmap::IndexMap;
use operation::{ConstValue, Name};

/// The response envelope. `data` is always serialized, `null` when the request failed before
/// execution or when an error reached the root.
#[derive(Debug, Default, Clone, PartialEq, serde::Serialize)]
pub struct Response {
    pub data: Option<IndexMap<Name, ConstValue>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphqlError>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub extensions: IndexMap<String, serde_json::Value>,
}

impl Response {
    pub(crate) fn request_error(error: impl Into<GraphqlError>) -> Self {
        Response {
            data: None,
            errors: vec![error.into()],
            extensions: IndexMap::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_request_errors(&self) -> bool {
        self.errors.iter().any(GraphqlError::is_request_error)
    }

    #[must_use]
    pub fn with_extension(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.extensions.insert(key.into(), value.into());
        self
    }

    /// JSON form of the response. A response that can't be serialized is logged and
    /// becomes `null`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|err| {
            tracing::warn!("Could not serialize the response: {err}");
            serde_json::Value::Null
        })
    }
}
