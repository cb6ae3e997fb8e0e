use std::rc::Rc;

use error::{ErrorPath, ErrorPathSegment};
use operation::Name;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PathKey {
    Field(Name),
    Index(usize),
}

/// Position of a value in the response: an immutable chain from the value up to the root.
///
/// Every resolved field or list item adds one segment pointing to its parent, segments are
/// shared and never modified.
#[derive(Debug)]
pub(crate) struct Path {
    prev: Option<Rc<Path>>,
    key: PathKey,
    typename: Option<Name>,
}

impl Path {
    pub fn new(prev: Option<&Rc<Path>>, key: PathKey, typename: Option<Name>) -> Rc<Path> {
        Rc::new(Path {
            prev: prev.cloned(),
            key,
            typename,
        })
    }

    pub fn field(prev: Option<&Rc<Path>>, response_key: Name, typename: Name) -> Rc<Path> {
        Self::new(prev, PathKey::Field(response_key), Some(typename))
    }

    pub fn index(prev: &Rc<Path>, index: usize) -> Rc<Path> {
        Self::new(Some(prev), PathKey::Index(index), None)
    }

    pub fn key(&self) -> &PathKey {
        &self.key
    }

    /// Name of the object type owning the field, absent for list items.
    pub fn typename(&self) -> Option<&Name> {
        self.typename.as_ref()
    }

    /// Keys from the root to this segment.
    pub fn as_list(&self) -> Vec<PathKey> {
        let mut keys = Vec::new();
        let mut current = Some(self);
        while let Some(path) = current {
            keys.push(path.key.clone());
            current = path.prev.as_deref();
        }
        keys.reverse();
        keys
    }

    pub fn to_error_path(&self) -> ErrorPath {
        let mut path = ErrorPath::new();
        for key in self.as_list() {
            path.push(match key {
                PathKey::Field(name) => ErrorPathSegment::Field(name),
                PathKey::Index(index) => ErrorPathSegment::Index(index),
            });
        }
        path
    }
}
