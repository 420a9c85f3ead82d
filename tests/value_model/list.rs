//! List contract, checked against every mutable backend

use crate::common::{init_tracing, ints, mutable_lists, to_ints, DropCounter};
use udfval::{array_list, cons_list, Error, List, Value};

fn filled(values: &[i64]) -> Vec<List> {
    vec![array_list(ints(values)), cons_list(ints(values))]
}

#[test]
fn set_then_get_returns_new_value() {
    init_tracing();
    for mut list in filled(&[1, 2, 3]) {
        list.set(1, "two").unwrap();
        assert_eq!(list.get(1).unwrap().as_str(), Some("two"), "{list:?}");
        assert_eq!(list.size(), 3);
    }
}

#[test]
fn set_releases_replaced_element_once() {
    let builders: [fn(Vec<Value>) -> List; 2] = [array_list, cons_list];
    for build in builders {
        for index in [0, 2] {
            let drops = DropCounter::new();
            let mut values = ints(&[1, 2, 3]);
            values[index] = drops.tracked(9);
            let mut list = build(values);
            list.set(index as i64, 0).unwrap();
            assert_eq!(drops.drops(), 1, "{} at {index}", list.backend_name());
            drop(list);
            assert_eq!(drops.drops(), 1);
        }
    }
}

#[test]
fn append_grows_by_one_at_end() {
    for mut list in mutable_lists() {
        for i in 0..5i64 {
            let before = list.size();
            list.append(i).unwrap();
            assert_eq!(list.size(), before + 1);
            let last = list.get(list.size() as i64 - 1).unwrap();
            assert_eq!(last.as_int(), Some(i));
        }
    }
}

#[test]
fn prepend_grows_by_one_at_front() {
    for mut list in filled(&[5]) {
        list.prepend(4).unwrap();
        assert_eq!(to_ints(&list), vec![4, 5]);
    }
}

#[test]
fn out_of_range_never_panics() {
    for list in filled(&[1, 2]) {
        for index in [-1, 2, 3, i64::MIN, i64::MAX] {
            match list.get(index) {
                Err(Error::IndexOutOfRange { size, .. }) => assert_eq!(size, 2),
                other => panic!("index {index}: {other:?}"),
            }
        }
    }
}

#[test]
fn out_of_range_set_leaves_list_unchanged() {
    for mut list in filled(&[1, 2]) {
        assert!(list.set(2, 0).unwrap_err().is_out_of_range());
        assert!(list.set(-1, 0).unwrap_err().is_out_of_range());
        assert_eq!(to_ints(&list), vec![1, 2]);
    }
}

#[test]
fn head_of_empty_is_absent() {
    for list in mutable_lists() {
        assert!(list.head().is_none());
    }
    for list in filled(&[9, 8]) {
        assert_eq!(list.head().unwrap().as_int(), Some(9));
    }
}

#[test]
fn tail_is_well_formed_for_every_size() {
    for n in 0..4 {
        let values: Vec<i64> = (0..n).collect();
        for list in filled(&values) {
            let tail = list.tail().unwrap();
            assert_eq!(tail.size(), values.len().saturating_sub(1));
            assert_eq!(to_ints(&tail), values.iter().skip(1).copied().collect::<Vec<_>>());
        }
    }
}

#[test]
fn array_tail_is_a_copy() {
    let mut list = array_list(ints(&[1, 2, 3]));
    let tail = list.tail().unwrap();
    list.set(1, 100).unwrap();
    assert_eq!(to_ints(&tail), vec![2, 3]);
    let first = list.get(1).unwrap();
    let viewed = tail.get(0).unwrap();
    assert!(!std::ptr::eq(&*first, &*viewed));
}

#[test]
fn cons_tail_is_a_view() {
    let mut list = cons_list(ints(&[1, 2, 3]));
    let mut tail = list.tail().unwrap();
    {
        let first = list.get(2).unwrap();
        let viewed = tail.get(1).unwrap();
        assert!(std::ptr::eq(&*first, &*viewed));
    }
    list.set(2, 300).unwrap();
    tail.prepend(0).unwrap();
    assert_eq!(to_ints(&list), vec![1, 2, 300]);
    assert_eq!(to_ints(&tail), vec![0, 2, 3]);
}

#[test]
fn backends_agree_on_equality_and_hash() {
    let a = array_list(ints(&[1, 2, 3]));
    let c = cons_list(ints(&[1, 2, 3]));
    assert_eq!(a, c);
    assert_eq!(a.hash_value(), c.hash_value());
    assert_eq!(a.stringify(), c.stringify());
    assert_ne!(a, cons_list(ints(&[3, 2, 1])));
}

#[test]
fn nested_lists_render() {
    let inner = array_list(ints(&[1]));
    let outer = cons_list(vec![Value::from(inner), Value::from("x"), Value::Empty]);
    assert_eq!(outer.stringify().as_deref(), Some("[[1], x, NIL]"));
}
