use ordered_json::{json, KeyValuePair, OrderedMap, Value};

fn pairs(map: &OrderedMap) -> Vec<(String, Value)> {
    map.iter().map(|p| (p.key, p.value)).collect()
}

#[test]
fn set_update_keeps_first_position_matrix() {
    let map = OrderedMap::new();
    map.set("b", 1);
    map.set("a", 2);
    map.set("b", 3);

    assert_eq!(map.len(), 2);
    assert_eq!(
        pairs(&map),
        vec![
            ("b".to_string(), Value::from(3)),
            ("a".to_string(), Value::from(2)),
        ]
    );
    assert_eq!(json::to_string(&map).unwrap(), r#"{"b":3,"a":2}"#);
}

#[test]
fn distinct_keys_iterate_in_insertion_order_matrix() {
    let keys = ["delta", "alpha", "charlie", "bravo", "echo"];
    let map = OrderedMap::new();
    for (i, key) in keys.iter().enumerate() {
        map.set(*key, i);
    }
    assert_eq!(map.keys(), keys);
    let forward: Vec<String> = map.iter().map(|p| p.key).collect();
    assert_eq!(forward, keys);
    let backward: Vec<String> = map.iter_rev().map(|p| p.key).collect();
    let mut expected = keys.to_vec();
    expected.reverse();
    assert_eq!(backward, expected);
}

#[test]
fn delete_then_lookup_matrix() {
    let map = OrderedMap::from_pairs((0..10).map(|i| (format!("k{i}"), i)));
    for i in (0..10).step_by(3) {
        let key = format!("k{i}");
        assert_eq!(map.delete(&key), Some(Value::from(i)));
        assert!(!map.has(&key));
        assert_eq!(map.get_with_existence(&key), None);
        assert!(map.iter().all(|p| p.key != key));
    }
    assert_eq!(map.keys(), ["k1", "k2", "k4", "k5", "k7", "k8"]);
    assert_eq!(map.len(), 6);
}

#[test]
fn delete_everything_then_reuse_matrix() {
    let map = OrderedMap::from_pairs([("a", 1), ("b", 2), ("c", 3)]);
    for key in ["b", "a", "c"] {
        map.delete(key);
    }
    assert!(map.is_empty());
    assert!(map.iter().next().is_none());
    assert!(map.iter_rev().next().is_none());

    map.set("c", 30);
    map.set("a", 10);
    assert_eq!(map.keys(), ["c", "a"]);
}

#[test]
fn stored_null_versus_absent_matrix() {
    let map = OrderedMap::from_pairs([("nothing", Value::Null)]);
    assert_eq!(map.get("nothing"), map.get("missing"));
    assert_eq!(map.get_with_existence("nothing"), Some(Value::Null));
    assert_eq!(map.get_with_existence("missing"), None);
    assert_eq!(map.delete("nothing"), Some(Value::Null));
    assert_eq!(map.delete("nothing"), None);
}

#[test]
fn equality_matrix() {
    let base = OrderedMap::from_pairs([("x", 1), ("y", 2)]);

    assert!(base.equal(&OrderedMap::from_pairs([("x", 1), ("y", 2)])));
    // Order is part of identity.
    assert!(!base.equal(&OrderedMap::from_pairs([("y", 2), ("x", 1)])));
    assert!(!base.equal(&OrderedMap::from_pairs([("x", 1)])));
    assert!(!base.equal(&OrderedMap::from_pairs([("x", 1), ("y", 3)])));
    assert!(!base.equal(&OrderedMap::from_pairs([("x", 1), ("z", 2)])));
    assert!(OrderedMap::new().equal(&OrderedMap::new()));
    assert!(base.equal(&base));
}

#[test]
fn equality_after_delete_and_reinsert_matrix() {
    let a = OrderedMap::from_pairs([("x", 1), ("y", 2)]);
    let b = OrderedMap::from_pairs([("x", 1), ("y", 2)]);
    b.delete("x");
    b.set("x", 1);
    assert_ne!(a, b);
    assert_eq!(b.keys(), ["y", "x"]);
}

#[test]
fn from_pairs_matrix() {
    let map = OrderedMap::from_pairs(vec![
        KeyValuePair::new("first", "a"),
        KeyValuePair::new("second", vec![1, 2]),
        KeyValuePair::new("first", "b"),
    ]);
    assert_eq!(map.keys(), ["first", "second"]);
    assert_eq!(map.get("first"), Value::from("b"));
    assert_eq!(map.get("second"), Value::from(vec![1, 2]));
}

#[test]
fn nested_map_is_shared_matrix() {
    let outer = json::from_str(r#"{"inner":{"a":1}}"#).unwrap();
    let inner = outer.get("inner");
    inner.as_object().unwrap().set("b", 2);
    assert_eq!(
        json::to_string(&outer).unwrap(),
        r#"{"inner":{"a":1,"b":2}}"#
    );
}
