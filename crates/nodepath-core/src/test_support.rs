use crate::{
    path::NodePath,
    value::{Record, Value},
};

/// Parse a dotted test path.
pub(crate) fn path(dotted: &str) -> NodePath {
    dotted.parse().expect("test path should parse")
}

/// `Order { id, total, customer: Customer { name, city } }`
pub(crate) fn order(id: i64, city: &str, total: i64) -> Value {
    let customer = Record::new()
        .with("name", format!("customer-{id}"))
        .with("city", city);

    Value::Record(
        Record::new()
            .with("id", id)
            .with("total", total)
            .with("customer", customer),
    )
}

pub(crate) fn orders() -> Vec<Value> {
    vec![
        order(1, "Berlin", 40),
        order(2, "Paris", 20),
        order(3, "Berlin", 35),
        order(4, "Paris", 10),
    ]
}
