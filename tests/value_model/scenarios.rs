//! End-to-end scenarios as a UDF would drive them

use crate::common::{init_tracing, mutable_lists, to_ints, DropCounter};
use udfval::{
    array_list, hash_map, stringify, Limits, RecordStore, Stream, UdfConfig, UdfResult, Value,
    CONFIG_FILE_NAME,
};

#[test]
fn build_list_then_take_tail() {
    init_tracing();
    for mut list in mutable_lists() {
        list.append(Value::Integer(1)).unwrap();
        list.append(Value::Integer(2)).unwrap();
        list.prepend(Value::Integer(0)).unwrap();

        assert_eq!(list.size(), 3);
        assert_eq!(list.get(0).unwrap().as_int(), Some(0));
        assert_eq!(list.get(1).unwrap().as_int(), Some(1));
        assert_eq!(list.get(2).unwrap().as_int(), Some(2));

        let tail = list.tail().unwrap();
        assert_eq!(tail.size(), 2);
        assert_eq!(to_ints(&tail), vec![1, 2]);
        assert_eq!(tail, array_list(vec![Value::from(1), Value::from(2)]));
    }
}

#[test]
fn success_turned_failure() {
    let mut r = UdfResult::success(Value::String("ok".to_string()));
    r.to_failure(Value::String("bad".to_string()));
    assert!(!r.is_success());
    assert_eq!(stringify(r.value()).as_deref(), Some("bad"));
}

#[test]
fn success_turned_failure_releases_original() {
    let drops = DropCounter::new();
    let mut r = UdfResult::success(drops.tracked(0));
    r.to_failure("bad");
    assert_eq!(drops.drops(), 1);
}

#[test]
fn aggregate_bins_across_store() {
    let store = RecordStore::new();
    for (key, amount) in [("a", 10), ("b", 25), ("c", 5)] {
        store.open(key).set("amount", amount).unwrap();
    }

    let mut totals = hash_map();
    let mut sum = 0;
    let mut scan = store.scan().iterator();
    while let Some(v) = scan.next_value() {
        let record = v.as_record().unwrap();
        let amount = record.get("amount").and_then(|a| a.as_int()).unwrap_or(0);
        sum += amount;
        totals.set(amount > 8, Value::from(amount)).unwrap();
    }

    let out = UdfResult::success(sum);
    assert_eq!(out.into_std(), Ok(Some(Value::from(40))));
    assert_eq!(totals.size(), 2);
}

#[test]
fn limits_from_config_file_apply_to_backends() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "[limits]\nmax_list_len = 2\nmax_bins = 1\n").unwrap();
    let config = UdfConfig::from_file(&path).unwrap();

    let mut list = udfval::List::from(udfval::ArrayList::new().with_limits(config.limits.clone()));
    list.append(1).unwrap();
    list.append(2).unwrap();
    assert!(list.append(3).unwrap_err().is_capacity());

    let store = RecordStore::with_limits(config.limits);
    let mut r = store.open("k");
    r.set("a", 1).unwrap();
    assert!(r.set("b", 1).unwrap_err().is_capacity());
    assert_ne!(Limits::default().max_bins, 1);
}
