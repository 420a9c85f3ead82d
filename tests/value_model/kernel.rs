//! Kernel operations over every value kind, including the null handle

use crate::common::DropCounter;
use udfval::{
    array_list, destroy, hash_map, hash_of, kind_of, mem_record, size_of, stringify, Bytes, Pair,
    RecordStore, Value, ValueKind,
};

fn one_of_each() -> Vec<Value> {
    let mut bytes = Bytes::new();
    bytes.append_int16(0x0102);
    let mut map = hash_map();
    map.set("k", 1).unwrap();
    vec![
        Value::Empty,
        Value::from(true),
        Value::from(7),
        Value::from("s"),
        Value::from(bytes),
        Value::from(array_list(vec![Value::from(1)])),
        Value::from(map),
        Value::from(mem_record()),
        Value::from(Pair::new(1, 2)),
    ]
}

#[test]
fn kind_matches_variant() {
    let kinds: Vec<ValueKind> = one_of_each().iter().map(|v| kind_of(Some(v))).collect();
    assert_eq!(
        kinds,
        vec![
            ValueKind::Empty,
            ValueKind::Boolean,
            ValueKind::Integer,
            ValueKind::String,
            ValueKind::Bytes,
            ValueKind::List,
            ValueKind::Map,
            ValueKind::Record,
            ValueKind::Pair,
        ]
    );
    assert_eq!(kind_of(None), ValueKind::Unknown);
}

#[test]
fn size_is_kind_footprint() {
    for v in one_of_each() {
        assert_eq!(size_of(Some(&v)), v.kind().footprint());
    }
    assert_eq!(size_of(None), std::mem::size_of::<Value>());
}

#[test]
fn stringify_each_kind() {
    let rendered: Vec<Option<String>> = one_of_each().iter().map(|v| stringify(Some(v))).collect();
    assert_eq!(
        rendered,
        vec![
            Some("NIL".to_string()),
            Some("true".to_string()),
            Some("7".to_string()),
            Some("s".to_string()),
            Some("0102".to_string()),
            Some("[1]".to_string()),
            Some("{k: 1}".to_string()),
            Some("{}".to_string()),
            Some("(1, 2)".to_string()),
        ]
    );
}

#[test]
fn absent_hooks_give_neutral_results() {
    let store = RecordStore::new();
    let stored = Value::from(store.open("k"));
    assert_eq!(stringify(Some(&stored)), None);
    assert_eq!(hash_of(None), 0);
    assert_eq!(stringify(None), None);
}

#[test]
fn hash_is_stable_across_clones() {
    for v in one_of_each() {
        let copy = v.clone();
        assert_eq!(hash_of(Some(&v)), hash_of(Some(&copy)));
        assert_eq!(v, copy);
    }
}

#[test]
fn destroy_releases_once() {
    let drops = DropCounter::new();
    assert!(destroy(Some(drops.tracked(1))));
    assert_eq!(drops.drops(), 1);
    assert!(!destroy(None));
    assert_eq!(drops.drops(), 1);
}

#[test]
fn destroy_releases_nested_containers() {
    let drops = DropCounter::new();
    let mut record = mem_record();
    record.set("a", drops.tracked(1)).unwrap();
    record.set("b", drops.tracked(2)).unwrap();
    let list = array_list(vec![Value::from(record), drops.tracked(3)]);
    assert!(destroy(Some(Value::from(list))));
    assert_eq!(drops.drops(), 3);
}
