//! Record contract across the in-memory and stored backends

use crate::common::DropCounter;
use udfval::{hash_map, mem_record, Error, Record, RecordMeta, RecordStore, Value};

fn records(store: &RecordStore) -> Vec<Record> {
    vec![mem_record(), store.open("rec")]
}

#[test]
fn set_then_get_round_trips() {
    let store = RecordStore::new();
    for mut r in records(&store) {
        r.set("x", 42).unwrap();
        assert_eq!(r.get("x").as_deref(), Some(&Value::from(42)));
        r.set("x", "replaced").unwrap();
        assert_eq!(r.get("x").unwrap().as_str(), Some("replaced"));
    }
}

#[test]
fn missing_bin_is_absent() {
    let store = RecordStore::new();
    for r in records(&store) {
        assert!(r.get("missing-bin").is_none());
    }
}

#[test]
fn bin_names_are_case_sensitive() {
    let store = RecordStore::new();
    for mut r in records(&store) {
        r.set("Bin", 1).unwrap();
        r.set("bin", 2).unwrap();
        assert_eq!(r.num_bins(), Some(2));
        assert_eq!(r.get("Bin").unwrap().as_int(), Some(1));
    }
}

#[test]
fn invalid_names_rejected_without_change() {
    let store = RecordStore::new();
    for mut r in records(&store) {
        assert!(matches!(r.set("", 1), Err(Error::InvalidBinName { .. })));
        assert!(matches!(
            r.set("this_name_is_too_long", 1),
            Err(Error::InvalidBinName { .. })
        ));
        assert_eq!(r.num_bins(), Some(0));
    }
}

#[test]
fn remove_returns_old_value() {
    let store = RecordStore::new();
    for mut r in records(&store) {
        r.set("gone", true).unwrap();
        assert_eq!(r.remove("gone").unwrap(), Some(Value::from(true)));
        assert!(r.get("gone").is_none());
    }
}

#[test]
fn meta_only_on_stored_records() {
    let store = RecordStore::new();
    assert_eq!(mem_record().meta(), None);
    let mut stored = store.open("k");
    stored.set("a", 1).unwrap();
    assert_eq!(
        stored.meta(),
        Some(RecordMeta {
            generation: 1,
            ttl: 0
        })
    );
}

#[test]
fn records_nest_inside_values() {
    let mut inner = mem_record();
    inner.set("n", 1).unwrap();
    let mut outer = mem_record();
    outer.set("child", inner).unwrap();

    let child = outer.get("child").unwrap();
    let child = child.as_record().unwrap();
    assert_eq!(child.get("n").unwrap().as_int(), Some(1));
    assert_eq!(outer.stringify().as_deref(), Some("{child: {n: 1}}"));
}

#[test]
fn equal_records_are_one_map_key() {
    let store = RecordStore::new();
    let mut a = store.open("a");
    let mut b = store.open("b");
    a.set("x", 1).unwrap();
    b.set("x", 1).unwrap();
    let mut mem = mem_record();
    mem.set("x", 1).unwrap();

    assert_eq!(a, b);
    assert_eq!(a.hash_value(), b.hash_value());
    assert_eq!(mem, a);
    assert_eq!(mem.hash_value(), a.hash_value());

    let mut map = hash_map();
    map.set(a, "first").unwrap();
    map.set(b, "second").unwrap();
    assert_eq!(map.size(), 1);
    let found = map.get(&Value::from(mem)).unwrap();
    assert_eq!(found.as_str(), Some("second"));
}

#[test]
fn set_releases_replaced_bin_once() {
    let store = RecordStore::new();
    for mut r in records(&store) {
        let drops = DropCounter::new();
        r.set("x", drops.tracked(1)).unwrap();
        assert_eq!(drops.drops(), 0);
        r.set("x", 2).unwrap();
        assert_eq!(drops.drops(), 1);
        drop(r);
        assert_eq!(drops.drops(), 1);
    }
}

#[test]
fn map_set_releases_replaced_value_once() {
    let drops = DropCounter::new();
    let mut map = hash_map();
    map.set("k", drops.tracked(1)).unwrap();
    map.set("k", 2).unwrap();
    assert_eq!(drops.drops(), 1);
    assert_eq!(map.size(), 1);
    drop(map);
    assert_eq!(drops.drops(), 1);
}
