use crate::{predicate::Predicate, value::Value};
use std::fmt;

///
/// Explain rendering
///
/// Human-readable filter text for logs and diagnostics, e.g.
/// `customer.city = 'Berlin' AND total >= 10`. Not a query language;
/// nothing parses this back.
///

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::True => f.write_str("TRUE"),
            Self::False => f.write_str("FALSE"),
            Self::And(children) => write_junction(f, children, " AND "),
            Self::Or(children) => write_junction(f, children, " OR "),
            Self::Not(inner) => {
                f.write_str("NOT ")?;
                write_operand(f, inner)
            }
            Self::Equal { path, value } => write!(f, "{path} = {value}"),
            Self::Like { path, pattern } => {
                write!(f, "{path} LIKE {}", Value::Text(pattern.clone()))
            }
            Self::In { path, values } => {
                write!(f, "{path} IN {}", Value::List(values.clone()))
            }
            Self::IsNull { path } => write!(f, "{path} IS NULL"),
            Self::IsNotNull { path } => write!(f, "{path} IS NOT NULL"),
            Self::Range { path, lower, upper } => match (lower, upper) {
                (Some(lower), Some(upper)) => write!(f, "{path} BETWEEN {lower} AND {upper}"),
                (Some(lower), None) => write!(f, "{path} >= {lower}"),
                (None, Some(upper)) => write!(f, "{path} <= {upper}"),
                (None, None) => f.write_str("TRUE"),
            },
        }
    }
}

fn write_junction(f: &mut fmt::Formatter<'_>, children: &[Predicate], sep: &str) -> fmt::Result {
    match children {
        [] => f.write_str(if sep == " AND " { "TRUE" } else { "FALSE" }),
        [only] => write!(f, "{only}"),
        _ => {
            for (index, child) in children.iter().enumerate() {
                if index > 0 {
                    f.write_str(sep)?;
                }
                write_operand(f, child)?;
            }
            Ok(())
        }
    }
}

// Composite operands are parenthesized so precedence survives rendering.
fn write_operand(f: &mut fmt::Formatter<'_>, predicate: &Predicate) -> fmt::Result {
    match predicate {
        Predicate::And(children) | Predicate::Or(children) if children.len() > 1 => {
            write!(f, "({predicate})")
        }
        Predicate::Range {
            lower: Some(_),
            upper: Some(_),
            ..
        } => write!(f, "({predicate})"),
        _ => write!(f, "{predicate}"),
    }
}
