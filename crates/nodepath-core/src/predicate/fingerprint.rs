use crate::{
    path::NodePath,
    predicate::{Predicate, normalize},
    value::Value,
};
use sha2::{Digest, Sha256};
use std::fmt;

///
/// Fingerprint
///
/// Stable SHA-256 digest of a normalized predicate. Equivalent filters
/// (same clauses in a different order or nesting) share a fingerprint,
/// so query layers can use it as a cache key.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }

        Ok(())
    }
}

/// Fingerprint the normalized form of `predicate`.
#[must_use]
pub fn fingerprint(predicate: &Predicate) -> Fingerprint {
    let mut hasher = Sha256::new();
    hash_predicate(&mut hasher, &normalize(predicate));

    Fingerprint(hasher.finalize().into())
}

fn hash_predicate(hasher: &mut Sha256, predicate: &Predicate) {
    match predicate {
        Predicate::True => write_tag(hasher, 0x21),
        Predicate::False => write_tag(hasher, 0x22),
        Predicate::And(children) => {
            write_tag(hasher, 0x23);
            write_len_u32(hasher, children.len());
            for child in children {
                hash_predicate(hasher, child);
            }
        }
        Predicate::Or(children) => {
            write_tag(hasher, 0x24);
            write_len_u32(hasher, children.len());
            for child in children {
                hash_predicate(hasher, child);
            }
        }
        Predicate::Not(inner) => {
            write_tag(hasher, 0x25);
            hash_predicate(hasher, inner);
        }
        Predicate::Equal { path, value } => {
            write_tag(hasher, 0x26);
            write_path(hasher, path);
            write_value(hasher, value);
        }
        Predicate::Like { path, pattern } => {
            write_tag(hasher, 0x27);
            write_path(hasher, path);
            write_str(hasher, pattern);
        }
        Predicate::In { path, values } => {
            write_tag(hasher, 0x28);
            write_path(hasher, path);
            write_len_u32(hasher, values.len());
            for value in values {
                write_value(hasher, value);
            }
        }
        Predicate::IsNull { path } => {
            write_tag(hasher, 0x29);
            write_path(hasher, path);
        }
        Predicate::IsNotNull { path } => {
            write_tag(hasher, 0x2a);
            write_path(hasher, path);
        }
        Predicate::Range { path, lower, upper } => {
            write_tag(hasher, 0x2b);
            write_path(hasher, path);
            write_bound(hasher, lower.as_ref());
            write_bound(hasher, upper.as_ref());
        }
    }
}

fn write_path(hasher: &mut Sha256, path: &NodePath) {
    write_len_u32(hasher, path.depth());
    for segment in path {
        write_str(hasher, segment);
    }
}

fn write_bound(hasher: &mut Sha256, bound: Option<&Value>) {
    match bound {
        Some(value) => {
            write_tag(hasher, 0x01);
            write_value(hasher, value);
        }
        None => write_tag(hasher, 0x00),
    }
}

///
/// Encode one value, tagged by variant, into the hash stream.
///

fn write_value(hasher: &mut Sha256, value: &Value) {
    match value {
        Value::Null => write_tag(hasher, 0x40),
        Value::Bool(v) => {
            write_tag(hasher, 0x41);
            hasher.update([u8::from(*v)]);
        }
        Value::Int(v) => {
            write_tag(hasher, 0x42);
            hasher.update(v.to_be_bytes());
        }
        Value::Uint(v) => {
            write_tag(hasher, 0x43);
            hasher.update(v.to_be_bytes());
        }
        Value::Text(text) => {
            write_tag(hasher, 0x44);
            write_str(hasher, text);
        }
        Value::Timestamp(ts) => {
            write_tag(hasher, 0x45);
            hasher.update(ts.assume_utc().unix_timestamp_nanos().to_be_bytes());
        }
        Value::List(items) => {
            write_tag(hasher, 0x46);
            write_len_u32(hasher, items.len());
            for item in items {
                write_value(hasher, item);
            }
        }
        Value::Record(record) => {
            write_tag(hasher, 0x47);
            write_len_u32(hasher, record.len());
            for (name, value) in record.iter() {
                write_str(hasher, name);
                write_value(hasher, value);
            }
        }
    }
}

///
/// Encode one string with length prefix into the hash stream.
///

fn write_str(hasher: &mut Sha256, value: &str) {
    write_len_u32(hasher, value.len());
    hasher.update(value.as_bytes());
}

/// Encode a platform-sized length as u32 with deterministic saturation.
fn write_len_u32(hasher: &mut Sha256, len: usize) {
    let len = u32::try_from(len).unwrap_or(u32::MAX);
    hasher.update(len.to_be_bytes());
}

fn write_tag(hasher: &mut Sha256, tag: u8) {
    hasher.update([tag]);
}
