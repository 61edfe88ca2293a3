//! Engine implementations of the `Queryable` / `ExprBuilder` capabilities.
//!
//! Real query engines live outside this crate; `memory` is the reference
//! engine used to filter already-loaded records and to pin down semantics
//! in tests.

pub mod memory;
