//! Integration tests for KeyPath.

use runtypes::{KeyPath, PathSegment};

#[test]
fn test_path_construction_and_display() {
    assert_eq!(KeyPath::root().to_string(), "");
    assert_eq!(KeyPath::root().push_field("name").to_string(), "name");
    assert_eq!(KeyPath::root().push_index(0).to_string(), "[0]");

    let path = KeyPath::root()
        .push_field("users")
        .push_index(0)
        .push_field("address")
        .push_field("city");
    assert_eq!(path.to_string(), "users.[0].address.city");
}

#[test]
fn test_prepending_matches_appending() {
    let appended = KeyPath::root().push_index(3).push_index(1).push_field("id");
    let prepended = KeyPath::from_field("id").prepend_index(1).prepend_index(3);

    assert_eq!(appended, prepended);
    assert_eq!(prepended.to_string(), "[3].[1].id");
}

#[test]
fn test_path_segments_preserved() {
    let path = KeyPath::root()
        .push_field("data")
        .push_index(42)
        .push_field("value");

    let segments: Vec<&PathSegment> = path.segments().collect();
    assert_eq!(
        segments,
        vec![
            &PathSegment::field("data"),
            &PathSegment::index(42),
            &PathSegment::field("value")
        ]
    );
}

#[test]
fn test_field_names_are_not_escaped() {
    // Keys are reported verbatim; a dotted field name is still one segment.
    let path = KeyPath::from_field("a.b").prepend_index(0);
    assert_eq!(path.len(), 2);
    assert_eq!(path.to_string(), "[0].a.b");
}

#[test]
fn test_paths_as_hash_keys() {
    use std::collections::HashSet;

    let mut seen = HashSet::new();
    seen.insert(KeyPath::from_index(0));
    seen.insert(KeyPath::root().push_index(0));
    seen.insert(KeyPath::from_field("0"));

    assert_eq!(seen.len(), 2);
}
