use crate::{resolve::Queryable, value::Value};

///
/// Criteria
///
/// Transient pairing of a resolved field handle with the literal it is
/// compared against. Built per expression and handed to the builder by value.
///

#[derive(Debug)]
pub struct Criteria<'a, Q> {
    pub field: Q,
    pub value: &'a Value,
}

impl<'a, Q> Criteria<'a, Q> {
    #[must_use]
    pub const fn new(field: Q, value: &'a Value) -> Self {
        Self { field, value }
    }
}

///
/// ExprBuilder
///
/// Capability supplied by the query engine: constructs boolean expressions
/// over resolved field handles and combines them.
///
/// `Expr` is whatever the engine evaluates (a bool for in-memory
/// filtering, a plan node for a planner). Resolution errors from `Q` flow
/// through `Error` unchanged via `From`.
///

pub trait ExprBuilder<Q: Queryable> {
    type Expr;
    type Error: From<Q::Error>;

    /// Constant expression; used for the identity predicates.
    fn literal(&mut self, value: bool) -> Result<Self::Expr, Self::Error>;

    fn equal(&mut self, criteria: Criteria<'_, Q>) -> Result<Self::Expr, Self::Error>;

    /// `pattern` is already in like-operand form (`%` / `_` wildcards, `\` escape).
    fn like(&mut self, field: Q, pattern: &str) -> Result<Self::Expr, Self::Error>;

    fn in_list(&mut self, field: Q, values: &[Value]) -> Result<Self::Expr, Self::Error>;

    fn is_null(&mut self, field: Q) -> Result<Self::Expr, Self::Error>;

    fn is_not_null(&mut self, field: Q) -> Result<Self::Expr, Self::Error>;

    fn gte(&mut self, criteria: Criteria<'_, Q>) -> Result<Self::Expr, Self::Error>;

    fn lte(&mut self, criteria: Criteria<'_, Q>) -> Result<Self::Expr, Self::Error>;

    /// Inclusive range on both ends.
    fn between(
        &mut self,
        field: Q,
        lower: &Value,
        upper: &Value,
    ) -> Result<Self::Expr, Self::Error>;

    fn and(&mut self, exprs: Vec<Self::Expr>) -> Result<Self::Expr, Self::Error>;

    fn or(&mut self, exprs: Vec<Self::Expr>) -> Result<Self::Expr, Self::Error>;

    fn not(&mut self, expr: Self::Expr) -> Result<Self::Expr, Self::Error>;
}
