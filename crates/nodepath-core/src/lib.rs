//! Core runtime for nodepath: nested field paths, runtime values, lazily
//! resolved predicates, and the engine capabilities they evaluate against.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod builder;
pub mod engine;
pub mod error;
pub mod obs;
pub mod path;
pub mod predicate;
pub mod resolve;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// CONSTANTS
///

/// Separator used by the dotted path form (`customer.address.city`).
pub const PATH_SEPARATOR: char = '.';

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No engines, sinks, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        builder::ExprBuilder,
        path::{NodePath, PathBuilder},
        predicate::{Conditional, InitParam, LikeMode, Predicate, PresencePolicy},
        resolve::Queryable,
        value::{Record, Value},
    };
}
