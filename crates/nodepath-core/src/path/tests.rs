use crate::{
    error::PathError,
    path::{NodePath, PathBuilder},
};
use proptest::prelude::*;

fn path(segments: &[&str]) -> NodePath {
    NodePath::new(segments.iter().copied()).expect("test path should build")
}

#[test]
fn single_segment_path_is_leaf() {
    let p = path(&["name"]);

    assert!(p.is_leaf());
    assert!(!p.is_parent());
    assert_eq!(p.segment(), "name");
    assert_eq!(p.depth(), 1);
}

#[test]
fn nested_path_links_children_in_order() {
    let p = path(&["customer", "address", "city"]);

    assert!(p.is_parent());
    let address = p.child().expect("customer should have a child");
    assert_eq!(address.segment(), "address");
    let city = address.child().expect("address should have a child");
    assert_eq!(city.segment(), "city");
    assert!(city.is_leaf());
    assert_eq!(p.last(), "city");
}

#[test]
fn empty_input_is_rejected() {
    let err = NodePath::new(Vec::<String>::new()).expect_err("empty path must fail");

    assert_eq!(err, PathError::Empty);
}

#[test]
fn malformed_segments_are_rejected_with_their_index() {
    assert_eq!(
        NodePath::new(["a", ""]),
        Err(PathError::EmptySegment { index: 1 })
    );
    assert_eq!(
        NodePath::new(["a.b"]),
        Err(PathError::InvalidSegment {
            index: 0,
            segment: "a.b".to_string(),
        })
    );
}

#[test]
fn append_leaves_original_untouched() {
    let p1 = path(&["a"]);
    let p2 = p1.append(["b"]).expect("append should succeed");

    assert!(p1.is_leaf());
    assert_eq!(p1.segment(), "a");
    assert_eq!(p2.to_string(), "a.b");
}

#[test]
fn append_inserts_below_deepest_leaf() {
    let base = path(&["customer", "address"]);
    let extended = base.append(["city", "code"]).expect("append should succeed");

    assert_eq!(
        extended.segments().collect::<Vec<_>>(),
        ["customer", "address", "city", "code"]
    );
    assert_eq!(base.to_string(), "customer.address");
}

#[test]
fn append_with_no_segments_fails() {
    let base = path(&["customer"]);

    assert_eq!(base.append(Vec::<&str>::new()), Err(PathError::Empty));
}

#[test]
fn builder_fills_unset_root_first() {
    let builder = PathBuilder::new();
    assert!(builder.is_unset());

    let built = builder
        .segment("customer")
        .and_then(|b| b.segment("city"))
        .and_then(PathBuilder::build)
        .expect("builder should produce a path");

    assert_eq!(built.segment(), "customer");
    assert_eq!(built.to_string(), "customer.city");
}

#[test]
fn unset_builder_does_not_build() {
    assert_eq!(PathBuilder::new().build(), Err(PathError::Empty));
}

#[test]
fn dotted_form_parses_and_displays() {
    let p: NodePath = "customer.address.city".parse().expect("dotted path parses");

    assert_eq!(p, path(&["customer", "address", "city"]));
    assert_eq!(p.to_string(), "customer.address.city");
    assert_eq!("".parse::<NodePath>(), Err(PathError::Empty));
    assert_eq!(
        "a..b".parse::<NodePath>(),
        Err(PathError::EmptySegment { index: 1 })
    );
}

#[test]
fn serde_uses_dotted_string() {
    let p = path(&["customer", "city"]);

    let json = serde_json::to_string(&p).expect("path serializes");
    assert_eq!(json, "\"customer.city\"");

    let back: NodePath = serde_json::from_str(&json).expect("path deserializes");
    assert_eq!(back, p);
    assert!(serde_json::from_str::<NodePath>("\"\"").is_err());
}

fn arb_segments() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z][a-z0-9_]{0,6}", 1..6)
}

proptest! {
    #[test]
    fn walking_the_chain_yields_the_input(segments in arb_segments()) {
        let p = NodePath::new(segments.clone()).expect("valid segments build");

        let walked: Vec<String> = p.segments().map(str::to_string).collect();
        prop_assert_eq!(&walked, &segments);
        prop_assert_eq!(p.is_leaf(), segments.len() == 1);
        prop_assert_eq!(p.depth(), segments.len());
    }

    #[test]
    fn append_is_persistent(base in arb_segments(), tail in arb_segments()) {
        let p = NodePath::new(base.clone()).expect("valid segments build");
        let before = p.clone();
        let extended = p.append(tail.clone()).expect("valid tail appends");

        prop_assert_eq!(&p, &before);

        let mut expected = base;
        expected.extend(tail);
        let walked: Vec<String> = extended.segments().map(str::to_string).collect();
        prop_assert_eq!(walked, expected);
    }
}
