#[cfg(test)]
mod tests;

use crate::{PATH_SEPARATOR, error::PathError};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::{fmt, str::FromStr};

///
/// NodePath
///
/// A possibly-nested field reference, stored as a singly linked chain of
/// named segments in root-to-leaf order (`customer` → `address` → `city`).
///
/// Paths are immutable once built. `append` copies the root-to-leaf spine
/// and returns a new chain, so every previously handed-out `NodePath`
/// keeps its shape. Each chain is exclusively owned; there is no shared
/// sub-structure between paths.
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NodePath {
    segment: String,
    child: Option<Box<Self>>,
}

impl NodePath {
    /// Build a chain where each successive segment becomes the child of the
    /// previous one.
    pub fn new<I, S>(segments: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments = collect_segments(segments)?;

        Self::from_validated(segments).ok_or(PathError::Empty)
    }

    /// Build a single-segment (leaf) path.
    pub fn leaf(segment: impl Into<String>) -> Result<Self, PathError> {
        Self::new([segment])
    }

    /// Return a new chain with `segments` inserted below the deepest leaf.
    /// `self` is left untouched.
    pub fn append<I, S>(&self, segments: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tail = Self::new(segments)?;

        Ok(self.graft(tail))
    }

    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        self.child.is_none()
    }

    #[must_use]
    pub const fn is_parent(&self) -> bool {
        self.child.is_some()
    }

    /// Name of the current (root-most) segment.
    #[must_use]
    pub fn segment(&self) -> &str {
        &self.segment
    }

    #[must_use]
    pub fn child(&self) -> Option<&Self> {
        self.child.as_deref()
    }

    /// Iterate segment names in root-to-leaf order.
    #[must_use]
    pub fn segments(&self) -> Segments<'_> {
        Segments { next: Some(self) }
    }

    /// Number of segments in the chain (always at least one).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// Name of the terminal segment.
    #[must_use]
    pub fn last(&self) -> &str {
        let mut node = self;
        while let Some(child) = node.child.as_deref() {
            node = child;
        }

        &node.segment
    }

    // Copy the spine down to the current leaf and hang `tail` below it.
    fn graft(&self, tail: Self) -> Self {
        let child = match self.child.as_deref() {
            Some(child) => child.graft(tail),
            None => tail,
        };

        Self {
            segment: self.segment.clone(),
            child: Some(Box::new(child)),
        }
    }

    fn from_validated(segments: Vec<String>) -> Option<Self> {
        segments.into_iter().rev().fold(None, |child, segment| {
            Some(Self {
                segment,
                child: child.map(Box::new),
            })
        })
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, segment) in self.segments().enumerate() {
            if index > 0 {
                write!(f, "{PATH_SEPARATOR}")?;
            }
            f.write_str(segment)?;
        }

        Ok(())
    }
}

impl FromStr for NodePath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(PathError::Empty);
        }

        Self::new(s.split(PATH_SEPARATOR))
    }
}

impl Serialize for NodePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NodePath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let dotted = String::deserialize(deserializer)?;

        dotted.parse().map_err(de::Error::custom)
    }
}

///
/// Segments
///
/// Borrowing root-to-leaf iterator over a `NodePath`.
///

#[derive(Clone, Debug)]
pub struct Segments<'a> {
    next: Option<&'a NodePath>,
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.child.as_deref();

        Some(node.segment.as_str())
    }
}

impl<'a> IntoIterator for &'a NodePath {
    type Item = &'a str;
    type IntoIter = Segments<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments()
    }
}

///
/// PathBuilder
///
/// Segment-less starting point for incrementally assembling a path.
/// The first appended segment fills the unset root; later segments are
/// hung below the current leaf.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PathBuilder {
    root: Option<NodePath>,
}

impl PathBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self { root: None }
    }

    pub fn segment(self, segment: impl Into<String>) -> Result<Self, PathError> {
        self.append([segment])
    }

    pub fn append<I, S>(self, segments: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tail = NodePath::new(segments)?;
        let root = match self.root {
            Some(root) => root.graft(tail),
            None => tail,
        };

        Ok(Self { root: Some(root) })
    }

    /// True while no segment has been supplied.
    #[must_use]
    pub const fn is_unset(&self) -> bool {
        self.root.is_none()
    }

    #[must_use]
    pub const fn peek(&self) -> Option<&NodePath> {
        self.root.as_ref()
    }

    pub fn build(self) -> Result<NodePath, PathError> {
        self.root.ok_or(PathError::Empty)
    }
}

impl From<NodePath> for PathBuilder {
    fn from(root: NodePath) -> Self {
        Self { root: Some(root) }
    }
}

// Materialize and validate a segment sequence.
fn collect_segments<I, S>(segments: I) -> Result<Vec<String>, PathError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
    if segments.is_empty() {
        return Err(PathError::Empty);
    }

    for (index, segment) in segments.iter().enumerate() {
        if segment.is_empty() {
            return Err(PathError::EmptySegment { index });
        }
        if segment.contains(PATH_SEPARATOR) {
            return Err(PathError::InvalidSegment {
                index,
                segment: segment.clone(),
            });
        }
    }

    Ok(segments)
}
