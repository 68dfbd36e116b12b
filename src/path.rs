//! Key paths for locating failing values inside nested structures.
//!
//! This module provides [`KeyPath`] and [`PathSegment`]. Paths produced by a
//! check are relative to the value that check was given; container runtypes
//! prepend their own segment as errors travel upward, so the path seen by the
//! caller of the outermost check runs from the root to the failing leaf.

use std::fmt::{self, Display};

/// A segment of a key path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A field/property access (e.g., `user`, `email`)
    Field(String),
    /// An array index access (e.g., `[0]`, `[42]`)
    Index(usize),
}

impl PathSegment {
    /// Creates a new field segment.
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }

    /// Creates a new index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

impl Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, "{}", name),
            PathSegment::Index(idx) => write!(f, "[{}]", idx),
        }
    }
}

/// A path to a value in a nested JSON structure.
///
/// Segments are kept structured; the string form is produced only by
/// `Display`. Index segments render as `[i]` and every segment after the
/// first is separated by a dot.
///
/// # Example
///
/// ```rust
/// use runtypes::KeyPath;
///
/// let path = KeyPath::root()
///     .push_field("users")
///     .push_index(0)
///     .push_field("email");
/// assert_eq!(path.to_string(), "users.[0].email");
///
/// let nested = KeyPath::from_index(1).prepend_index(2);
/// assert_eq!(nested.to_string(), "[2].[1]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct KeyPath {
    segments: Vec<PathSegment>,
}

impl KeyPath {
    /// Creates an empty path representing the checked value itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a path from a single field segment.
    pub fn from_field(name: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::Field(name.into())],
        }
    }

    /// Creates a path from a single index segment.
    pub fn from_index(idx: usize) -> Self {
        Self {
            segments: vec![PathSegment::Index(idx)],
        }
    }

    /// Returns a new path with a field segment appended.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.into()));
        Self { segments }
    }

    /// Returns a new path with an index segment appended.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Returns this path with a field segment placed in front.
    ///
    /// Used by keyed containers when relaying a child's error upward.
    pub fn prepend_field(self, name: impl Into<String>) -> Self {
        self.prepend(PathSegment::Field(name.into()))
    }

    /// Returns this path with an index segment placed in front.
    pub fn prepend_index(self, index: usize) -> Self {
        self.prepend(PathSegment::Index(index))
    }

    fn prepend(mut self, segment: PathSegment) -> Self {
        self.segments.insert(0, segment);
        self
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the path segments, outermost first.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Returns the parent path (all segments except the last), or None if this is root.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            None
        } else {
            Some(Self {
                segments: self.segments[..self.segments.len() - 1].to_vec(),
            })
        }
    }

    /// Returns the last segment, or None if this is root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }
}

impl Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
