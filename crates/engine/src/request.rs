use schema::Data;

/// A GraphQL request: the document, the operation to run and its inputs.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub query: String,
    #[serde(default)]
    pub operation_name: Option<String>,
    #[serde(default)]
    pub variables: serde_json::Map<String, serde_json::Value>,
    /// Parent value of the root fields.
    #[serde(skip)]
    pub root_value: serde_json::Value,
    /// Per-request values made available to resolvers.
    #[serde(skip)]
    pub data: Data,
}

impl Request {
    pub fn new(query: impl Into<String>) -> Self {
        Request {
            query: query.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    /// Variables given as a JSON object. Anything else is ignored.
    #[must_use]
    pub fn variables(mut self, variables: serde_json::Value) -> Self {
        if let serde_json::Value::Object(variables) = variables {
            self.variables = variables;
        }
        self
    }

    #[must_use]
    pub fn root_value(mut self, root_value: serde_json::Value) -> Self {
        self.root_value = root_value;
        self
    }

    #[must_use]
    pub fn data<T: std::any::Any + Send + Sync>(mut self, value: T) -> Self {
        self.data.insert(value);
        self
    }
}
