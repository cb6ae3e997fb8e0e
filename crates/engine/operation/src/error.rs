use std::borrow::Cow;

use crate::Location;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Parsing,
    Validation,
    Variable,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{message}")]
    Parsing {
        message: Cow<'static, str>,
        locations: Vec<Location>,
    },
    #[error("{message}")]
    Validation {
        message: Cow<'static, str>,
        locations: Vec<Location>,
    },
    #[error("{message}")]
    Variable {
        message: Cow<'static, str>,
        locations: Vec<Location>,
    },
}

impl Error {
    pub(crate) fn parsing(message: impl Into<Cow<'static, str>>) -> Self {
        Error::Parsing {
            message: message.into(),
            locations: Vec::new(),
        }
    }

    pub(crate) fn validation(message: impl Into<Cow<'static, str>>) -> Self {
        Error::Validation {
            message: message.into(),
            locations: Vec::new(),
        }
    }

    pub(crate) fn variable(message: impl Into<Cow<'static, str>>) -> Self {
        Error::Variable {
            message: message.into(),
            locations: Vec::new(),
        }
    }

    pub(crate) fn with_location(mut self, location: impl Into<Location>) -> Self {
        match &mut self {
            Error::Parsing { locations, .. } | Error::Validation { locations, .. } | Error::Variable { locations, .. } => {
                locations.push(location.into())
            }
        }
        self
    }

    pub(crate) fn with_locations(mut self, locations: impl IntoIterator<Item = Location>) -> Self {
        match &mut self {
            Error::Parsing { locations: loc, .. }
            | Error::Validation { locations: loc, .. }
            | Error::Variable { locations: loc, .. } => loc.extend(locations),
        }
        self
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Parsing { .. } => ErrorKind::Parsing,
            Error::Validation { .. } => ErrorKind::Validation,
            Error::Variable { .. } => ErrorKind::Variable,
        }
    }

    pub fn locations(&self) -> &[Location] {
        match self {
            Error::Parsing { locations, .. } | Error::Validation { locations, .. } | Error::Variable { locations, .. } => {
                locations
            }
        }
    }
}
