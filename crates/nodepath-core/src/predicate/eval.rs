use crate::{
    builder::{Criteria, ExprBuilder},
    predicate::Predicate,
    resolve::{Queryable, resolve},
};

impl Predicate {
    ///
    /// Materialize this predicate against an execution-time root.
    ///
    /// Every leaf resolves its path from `root` and asks `builder` for the
    /// matching expression; composites combine child expressions through
    /// the builder. Resolution errors propagate unchanged.
    ///
    pub fn evaluate<Q, B>(&self, root: &Q, builder: &mut B) -> Result<B::Expr, B::Error>
    where
        Q: Queryable,
        B: ExprBuilder<Q>,
    {
        match self {
            Self::True => builder.literal(true),
            Self::False => builder.literal(false),

            Self::And(children) => {
                let exprs = evaluate_all(children, root, builder)?;
                builder.and(exprs)
            }
            Self::Or(children) => {
                let exprs = evaluate_all(children, root, builder)?;
                builder.or(exprs)
            }
            Self::Not(inner) => {
                let expr = inner.evaluate(root, builder)?;
                builder.not(expr)
            }

            Self::Equal { path, value } => {
                let field = resolve(root, path)?;
                builder.equal(Criteria::new(field, value))
            }
            Self::Like { path, pattern } => {
                let field = resolve(root, path)?;
                builder.like(field, pattern)
            }
            Self::In { path, values } => {
                let field = resolve(root, path)?;
                builder.in_list(field, values)
            }
            Self::IsNull { path } => {
                let field = resolve(root, path)?;
                builder.is_null(field)
            }
            Self::IsNotNull { path } => {
                let field = resolve(root, path)?;
                builder.is_not_null(field)
            }

            Self::Range { path, lower, upper } => match (lower, upper) {
                (Some(lower), Some(upper)) => {
                    let field = resolve(root, path)?;
                    builder.between(field, lower, upper)
                }
                (Some(lower), None) => {
                    let field = resolve(root, path)?;
                    builder.gte(Criteria::new(field, lower))
                }
                (None, Some(upper)) => {
                    let field = resolve(root, path)?;
                    builder.lte(Criteria::new(field, upper))
                }
                (None, None) => builder.literal(true),
            },
        }
    }
}

fn evaluate_all<Q, B>(
    children: &[Predicate],
    root: &Q,
    builder: &mut B,
) -> Result<Vec<B::Expr>, B::Error>
where
    Q: Queryable,
    B: ExprBuilder<Q>,
{
    children
        .iter()
        .map(|child| child.evaluate(root, builder))
        .collect()
}
