//! ## Crate layout
//! - `core`: paths, runtime values, lazy predicates, engine capabilities,
//!   the in-memory engine, and observability.
//! - `error`: the public error type with a stable class taxonomy.
//!
//! The `prelude` module carries the vocabulary needed to build and
//! evaluate filters; engines are reached through `core::engine`.

pub use nodepath_core as core;

pub mod error;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::Error;

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::core::{
        builder::{Criteria, ExprBuilder as _},
        path::{NodePath, PathBuilder},
        predicate::{Conditional, InitParam, LikeMode, Predicate, PresencePolicy},
        resolve::Queryable as _,
        value::{Record, Value},
    };
    pub use serde::{Deserialize, Serialize};
}
