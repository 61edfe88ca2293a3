//! Path resolution against a queryable root.
//!
//! Resolution is a fold over the path's segments: start at the root, ask the
//! current handle for the named attribute or relation, descend, repeat.
//! Nothing is cached between calls; every predicate evaluation re-resolves
//! from the root it is handed.

use crate::{
    obs::sink::{MetricsEvent, record},
    path::NodePath,
};
use std::fmt::Debug;

///
/// Queryable
///
/// Capability supplied by the query engine: a root or intermediate field
/// handle that can produce the handle one segment deeper. The same type
/// represents the root, relations, and terminal fields.
///
/// Lookup errors belong to the engine and are propagated unchanged.
///

pub trait Queryable: Sized {
    type Error: Debug;

    fn get(&self, segment: &str) -> Result<Self, Self::Error>;
}

/// Walk `path` from `root`, one `get` per segment.
pub fn resolve<Q: Queryable>(root: &Q, path: &NodePath) -> Result<Q, Q::Error> {
    let resolved = root.get(path.segment()).and_then(|head| {
        path.segments()
            .skip(1)
            .try_fold(head, |handle, segment| handle.get(segment))
    });

    match &resolved {
        Ok(_) => record(MetricsEvent::PathResolved {
            depth: path.depth(),
        }),
        Err(err) => {
            tracing::debug!(path = %path, error = ?err, "path resolution failed");
            record(MetricsEvent::ResolveFailed);
        }
    }

    resolved
}
