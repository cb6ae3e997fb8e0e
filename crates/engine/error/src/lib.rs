mod code;
mod path;

pub use code::*;
pub use operation::Location;
pub use path::*;
use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq)]
pub struct GraphqlError {
    pub message: Cow<'static, str>,
    pub code: ErrorCode,
    pub locations: Vec<Location>,
    pub path: Option<ErrorPath>,
    // Serialized as a map, but kept as a Vec for efficiency.
    pub extensions: Vec<(Cow<'static, str>, serde_json::Value)>,
}

impl GraphqlError {
    pub fn new(message: impl Into<Cow<'static, str>>, code: ErrorCode) -> Self {
        GraphqlError {
            message: message.into(),
            code,
            locations: Vec::new(),
            path: None,
            extensions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.locations.push(location);
        self
    }

    #[must_use]
    pub fn with_locations(mut self, locations: impl IntoIterator<Item = Location>) -> Self {
        self.locations.extend(locations);
        self
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<ErrorPath>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_extension(mut self, key: impl Into<Cow<'static, str>>, value: impl Into<serde_json::Value>) -> Self {
        let key = key.into();
        self.extensions.push((key, value.into()));
        self
    }

    #[must_use]
    pub fn with_extensions(
        mut self,
        extensions: impl IntoIterator<Item = (impl Into<Cow<'static, str>>, impl Into<serde_json::Value>)>,
    ) -> Self {
        for (key, value) in extensions {
            self.extensions.push((key.into(), value.into()));
        }
        self
    }

    /// Errors raised by resolvers don't know where they happened, the engine locates them once.
    /// Errors that already carry a path were located by a nested field and are kept as is.
    #[must_use]
    pub fn located(mut self, locations: impl IntoIterator<Item = Location>, path: impl FnOnce() -> ErrorPath) -> Self {
        if self.locations.is_empty() {
            self.locations.extend(locations);
        }
        if self.path.is_none() {
            self.path = Some(path());
        }
        self
    }

    pub fn is_request_error(&self) -> bool {
        self.code.is_request_error()
    }

    // ------------- //
    // Common errors //
    // ------------- //

    pub fn resolver(message: impl Into<Cow<'static, str>>) -> Self {
        GraphqlError::new(message, ErrorCode::ResolverError)
    }

    pub fn completion(message: impl Into<Cow<'static, str>>) -> Self {
        GraphqlError::new(message, ErrorCode::CompletionError)
    }
}

impl std::fmt::Display for GraphqlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.message.fmt(f)
    }
}

impl std::error::Error for GraphqlError {}

impl From<&'static str> for GraphqlError {
    fn from(message: &'static str) -> Self {
        GraphqlError::resolver(message)
    }
}

impl From<String> for GraphqlError {
    fn from(message: String) -> Self {
        GraphqlError::resolver(message)
    }
}

impl From<operation::Error> for GraphqlError {
    fn from(err: operation::Error) -> Self {
        let locations = err.locations().to_vec();
        GraphqlError::new(err.to_string(), err.kind().into()).with_locations(locations)
    }
}

impl serde::Serialize for GraphqlError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("message", &self.message)?;
        if !self.locations.is_empty() {
            map.serialize_entry("locations", &self.locations)?;
        }
        if let Some(path) = &self.path {
            map.serialize_entry("path", path)?;
        }
        if !self.extensions.is_empty() {
            map.serialize_entry("extensions", &SerializableExtensions(&self.extensions))?;
        }
        map.end()
    }
}

struct SerializableExtensions<'a>(&'a [(Cow<'static, str>, serde_json::Value)]);

impl serde::Serialize for SerializableExtensions<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_map(self.0.iter().map(|(key, value)| (key, value)))
    }
}
