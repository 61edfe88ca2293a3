use nodepath::{
    Error,
    core::{
        engine::memory::{matches, select},
        error::ErrorClass,
        predicate::fingerprint,
    },
    prelude::*,
};
use time::macros::datetime;

fn path(dotted: &str) -> NodePath {
    dotted.parse().expect("test path should parse")
}

/// `Order { id, placed_at, total, customer: Customer { name, city } }`
fn order(id: i64, city: &str, total: i64, placed_at: time::PrimitiveDateTime) -> Value {
    let customer = Record::new()
        .with("name", format!("customer-{id}"))
        .with("city", city);

    Value::Record(
        Record::new()
            .with("id", id)
            .with("placed_at", placed_at)
            .with("total", total)
            .with("customer", customer),
    )
}

fn orders() -> Vec<Value> {
    vec![
        order(1, "Berlin", 40, datetime!(2024-01-05 09:00)),
        order(2, "Paris", 20, datetime!(2024-01-20 12:30)),
        order(3, "Berlin", 35, datetime!(2024-02-02 18:15)),
        order(4, "Paris", 10, datetime!(2024-03-11 07:45)),
    ]
}

fn ids(rows: &[&Value]) -> Vec<i64> {
    rows.iter()
        .filter_map(|row| match row.as_record()?.get("id")? {
            Value::Int(id) => Some(*id),
            _ => None,
        })
        .collect()
}

#[test]
fn nested_equality_selects_by_customer_city() {
    let rows = orders();
    let city = NodePath::new(["customer", "city"]).expect("two segment path");

    let berlin = select(&rows, &Predicate::equal(city.clone(), "Berlin")).unwrap();
    let paris = select(&rows, &Predicate::equal(city, "Paris")).unwrap();

    assert_eq!(ids(&berlin), [1, 3]);
    assert_eq!(ids(&paris), [2, 4]);
}

#[test]
fn timestamp_between_is_inclusive() {
    let rows = orders();
    let january = Predicate::between(
        path("placed_at"),
        datetime!(2024-01-05 09:00),
        datetime!(2024-01-31 23:59),
    );

    assert_eq!(ids(&select(&rows, &january).unwrap()), [1, 2]);
}

#[test]
fn half_open_timestamp_ranges() {
    let rows = orders();
    let since = Predicate::between(path("placed_at"), datetime!(2024-02-01 00:00), None::<i64>);
    let until = Predicate::between(path("placed_at"), Value::Null, datetime!(2024-01-20 12:30));

    assert_eq!(ids(&select(&rows, &since).unwrap()), [3, 4]);
    assert_eq!(ids(&select(&rows, &until).unwrap()), [1, 2]);
}

#[test]
fn open_range_leaves_filter_unchanged() {
    let rows = orders();
    let berlin = Predicate::equal(path("customer.city"), "Berlin");
    let open = Predicate::between(path("placed_at"), Value::Null, Value::Null);

    let combined = open & berlin.clone();

    assert_eq!(combined, berlin);
    assert_eq!(ids(&select(&rows, &combined).unwrap()), [1, 3]);
}

#[test]
fn search_form_assembles_only_provided_filters() {
    let rows = orders();

    // name, city, min_total, max_total
    let form: (Option<&str>, Option<&str>, Option<i64>, Option<i64>) =
        (None, Some("Berlin"), Some(36), None);

    let filter = Conditional::new(Predicate::True)
        .with_policy(PresencePolicy::NonEmpty)
        .and_if(form.0, |v| {
            Predicate::like(path("customer.name"), v.as_text().unwrap_or_default())
        })
        .and_if(form.1, |v| Predicate::equal(path("customer.city"), v))
        .build()
        & Predicate::between(path("total"), form.2, form.3);

    assert_eq!(
        filter.to_string(),
        "customer.city = 'Berlin' AND total >= 36"
    );
    assert_eq!(ids(&select(&rows, &filter).unwrap()), [1]);
}

#[test]
fn initialize_guards_the_relation_and_applies_params() {
    let rows = orders();
    let filter = Predicate::initialize(
        path("customer"),
        [
            InitParam::of(path("customer.city"), "Paris"),
            InitParam::of(path("total"), None::<i64>),
        ],
    );

    assert_eq!(ids(&select(&rows, &filter).unwrap()), [2, 4]);
}

#[test]
fn like_and_in_compose_with_or() {
    let rows = orders();
    let filter = Predicate::like(path("customer.name"), "-1")
        | Predicate::in_(path("total"), [10, 35]);

    assert_eq!(ids(&select(&rows, &filter).unwrap()), [1, 3, 4]);
}

#[test]
fn negated_filter_selects_the_complement() {
    let rows = orders();
    let filter = !Predicate::equal(path("customer.city"), "Berlin");

    assert_eq!(ids(&select(&rows, &filter).unwrap()), [2, 4]);
}

#[test]
fn predicates_are_reusable_across_rows() {
    let filter = Predicate::gte(path("total"), 20);
    let rows = orders();

    let first: Vec<bool> = rows.iter().map(|row| matches(row, &filter).unwrap()).collect();
    let second: Vec<bool> = rows.iter().map(|row| matches(row, &filter).unwrap()).collect();

    assert_eq!(first, [true, true, true, false]);
    assert_eq!(first, second);
}

#[test]
fn resolution_failures_surface_through_the_public_error() {
    let rows = orders();
    let err: Error = select(&rows, &Predicate::is_null(path("customer.zip")))
        .map_err(Error::from)
        .expect_err("unknown field must fail");

    assert_eq!(err.class(), ErrorClass::Resolution);
}

#[test]
fn malformed_paths_surface_through_the_public_error() {
    let err: Error = NodePath::new(["customer", ""])
        .map_err(Error::from)
        .expect_err("empty segment must fail");

    assert_eq!(err.class(), ErrorClass::Construction);

    let err: Error = PathBuilder::new()
        .build()
        .map_err(Error::from)
        .expect_err("unset builder must fail");

    assert_eq!(err.class(), ErrorClass::Construction);
}

#[test]
fn stored_filters_round_trip_and_keep_their_fingerprint() {
    let filter = Predicate::equal(path("customer.city"), "Berlin")
        & Predicate::between(
            path("placed_at"),
            datetime!(2024-01-01 00:00),
            datetime!(2024-12-31 23:59),
        );

    let json = serde_json::to_string(&filter).expect("filter serializes");
    let back: Predicate = serde_json::from_str(&json).expect("filter deserializes");

    assert_eq!(back, filter);
    assert_eq!(fingerprint(&back), fingerprint(&filter));
}

#[test]
fn version_is_exported() {
    assert!(!nodepath::VERSION.is_empty());
}
