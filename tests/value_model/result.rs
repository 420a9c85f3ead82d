//! Result wrapper: state conversions and value release

use crate::common::{init_tracing, DropCounter};
use udfval::{stringify, UdfResult, Value};

#[test]
fn to_failure_then_to_success() {
    let mut r = UdfResult::new();
    r.to_failure("v");
    assert!(!r.is_success());
    assert_eq!(r.value(), Some(&Value::from("v")));

    r.to_success("w");
    assert!(r.is_success());
    assert_eq!(r.value(), Some(&Value::from("w")));
}

#[test]
fn conversion_releases_previous_value_once() {
    init_tracing();
    let v_drops = DropCounter::new();
    let w_drops = DropCounter::new();

    let mut r = UdfResult::new();
    r.to_failure(v_drops.tracked(1));
    assert_eq!(v_drops.drops(), 0);

    r.to_success(w_drops.tracked(2));
    assert_eq!(v_drops.drops(), 1);
    assert_eq!(w_drops.drops(), 0);

    drop(r);
    assert_eq!(v_drops.drops(), 1);
    assert_eq!(w_drops.drops(), 1);
}

#[test]
fn converting_to_same_state_still_releases() {
    let drops = DropCounter::new();
    let mut r = UdfResult::success(drops.tracked(1));
    r.to_success(Value::Empty);
    assert_eq!(drops.drops(), 1);
    assert!(r.is_success());
}

#[test]
fn into_value_transfers_ownership() {
    let drops = DropCounter::new();
    let r = UdfResult::failure(drops.tracked(7));
    let v = r.into_value().unwrap();
    assert_eq!(drops.drops(), 0);
    assert_eq!(v.as_list().unwrap().get(0).unwrap().as_int(), Some(7));
    drop(v);
    assert_eq!(drops.drops(), 1);
}

#[test]
fn failure_value_stringifies() {
    let r = UdfResult::failure("bad");
    assert_eq!(stringify(r.value()).as_deref(), Some("bad"));
    assert_eq!(stringify(UdfResult::new().value()), None);
}
