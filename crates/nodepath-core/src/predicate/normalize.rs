use crate::{
    predicate::Predicate,
    value::{Value, canonical_cmp},
};
use std::cmp::Ordering;

///
/// Normalize a predicate into a canonical, deterministic form.
///
/// Normalization guarantees:
/// - Logical equivalence is preserved
/// - Nested AND / OR nodes are flattened
/// - Neutral elements are removed (True in AND, False in OR)
/// - Absorbing elements collapse the node (False in AND, True in OR)
/// - Double negation is eliminated
/// - Unbounded ranges become True and empty `In` sets become False
/// - Child predicates are deterministically ordered and deduplicated
///
/// This is used to ensure:
/// - consistent fingerprints for equivalent filters
/// - predictable test behavior
///
#[must_use]
pub fn normalize(predicate: &Predicate) -> Predicate {
    match predicate {
        Predicate::True => Predicate::True,
        Predicate::False => Predicate::False,

        Predicate::And(children) => normalize_junction(children, Junction::And),
        Predicate::Or(children) => normalize_junction(children, Junction::Or),
        Predicate::Not(inner) => normalize_not(inner),

        Predicate::In { path, values } => {
            if values.is_empty() {
                return Predicate::False;
            }

            let mut values = values.clone();
            values.sort_by(canonical_cmp);
            values.dedup();

            Predicate::In {
                path: path.clone(),
                values,
            }
        }
        Predicate::Range {
            lower: None,
            upper: None,
            ..
        } => Predicate::True,

        leaf => leaf.clone(),
    }
}

#[derive(Clone, Copy, Eq, PartialEq)]
enum Junction {
    And,
    Or,
}

impl Junction {
    // Element that can be dropped from this junction.
    const fn neutral(self) -> Predicate {
        match self {
            Self::And => Predicate::True,
            Self::Or => Predicate::False,
        }
    }

    // Element that decides the whole junction.
    const fn absorbing(self) -> Predicate {
        match self {
            Self::And => Predicate::False,
            Self::Or => Predicate::True,
        }
    }

    fn wrap(self, children: Vec<Predicate>) -> Predicate {
        match self {
            Self::And => Predicate::And(children),
            Self::Or => Predicate::Or(children),
        }
    }

    fn unwrap(self, predicate: Predicate) -> Result<Vec<Predicate>, Predicate> {
        match (self, predicate) {
            (Self::And, Predicate::And(children)) | (Self::Or, Predicate::Or(children)) => {
                Ok(children)
            }
            (_, other) => Err(other),
        }
    }
}

fn normalize_junction(children: &[Predicate], junction: Junction) -> Predicate {
    let neutral = junction.neutral();
    let absorbing = junction.absorbing();
    let mut flat = Vec::with_capacity(children.len());

    for child in children {
        let child = normalize(child);

        // normalized children are already flat, so one level is enough
        let grandchildren = match junction.unwrap(child) {
            Ok(grandchildren) => grandchildren,
            Err(single) => vec![single],
        };

        for child in grandchildren {
            if child == absorbing {
                return absorbing;
            }
            if child != neutral {
                flat.push(child);
            }
        }
    }

    flat.sort_by(canonical_cmp_predicate);
    flat.dedup();

    match flat.len() {
        0 => neutral,
        1 => flat.remove(0),
        _ => junction.wrap(flat),
    }
}

fn normalize_not(inner: &Predicate) -> Predicate {
    match normalize(inner) {
        Predicate::True => Predicate::False,
        Predicate::False => Predicate::True,
        Predicate::Not(double) => *double,
        other => Predicate::Not(Box::new(other)),
    }
}

///
/// Total structural order over predicates, used to sort junction children.
///
/// Orders by variant rank, then path, then literal payload.
///
fn canonical_cmp_predicate(left: &Predicate, right: &Predicate) -> Ordering {
    let rank = predicate_rank(left).cmp(&predicate_rank(right));
    if rank != Ordering::Equal {
        return rank;
    }

    let path = left.path().cmp(&right.path());
    if path != Ordering::Equal {
        return path;
    }

    match (left, right) {
        (Predicate::And(a), Predicate::And(b)) | (Predicate::Or(a), Predicate::Or(b)) => {
            cmp_slices(a, b, canonical_cmp_predicate)
        }
        (Predicate::Not(a), Predicate::Not(b)) => canonical_cmp_predicate(a, b),
        (Predicate::Equal { value: a, .. }, Predicate::Equal { value: b, .. }) => {
            canonical_cmp(a, b)
        }
        (Predicate::Like { pattern: a, .. }, Predicate::Like { pattern: b, .. }) => a.cmp(b),
        (Predicate::In { values: a, .. }, Predicate::In { values: b, .. }) => {
            cmp_slices(a, b, canonical_cmp)
        }
        (
            Predicate::Range {
                lower: left_lower,
                upper: left_upper,
                ..
            },
            Predicate::Range {
                lower: right_lower,
                upper: right_upper,
                ..
            },
        ) => cmp_bound(left_lower.as_ref(), right_lower.as_ref())
            .then_with(|| cmp_bound(left_upper.as_ref(), right_upper.as_ref())),
        _ => Ordering::Equal,
    }
}

const fn predicate_rank(predicate: &Predicate) -> u8 {
    match predicate {
        Predicate::True => 0,
        Predicate::False => 1,
        Predicate::IsNull { .. } => 2,
        Predicate::IsNotNull { .. } => 3,
        Predicate::Equal { .. } => 4,
        Predicate::In { .. } => 5,
        Predicate::Range { .. } => 6,
        Predicate::Like { .. } => 7,
        Predicate::Not(_) => 8,
        Predicate::And(_) => 9,
        Predicate::Or(_) => 10,
    }
}

fn cmp_bound(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    match (left, right) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(left), Some(right)) => canonical_cmp(left, right),
    }
}

fn cmp_slices<T>(left: &[T], right: &[T], cmp: impl Fn(&T, &T) -> Ordering) -> Ordering {
    for (left, right) in left.iter().zip(right.iter()) {
        let ordering = cmp(left, right);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    left.len().cmp(&right.len())
}
