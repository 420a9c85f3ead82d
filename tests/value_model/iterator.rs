//! Iterator exhaustion and stream restart semantics

use crate::common::{init_tracing, ints, mutable_lists, DropCounter};
use udfval::{
    array_list, cons_list, Cursor, CursorState, CursorStream, FnStream, List, ListStream,
    RecordStore, Stream, Value,
};

fn lists_of(values: &[i64]) -> Vec<List> {
    vec![array_list(ints(values)), cons_list(ints(values))]
}

#[test]
fn yields_exactly_n_in_index_order() {
    for list in lists_of(&[3, 1, 4, 1, 5]) {
        let mut cursor = list.iterator();
        let mut seen = Vec::new();
        while cursor.has_next() {
            seen.push(cursor.next_value().unwrap());
        }
        assert_eq!(seen, ints(&[3, 1, 4, 1, 5]));
        assert!(!cursor.has_next());
        assert_eq!(cursor.next_value(), None);
        assert_eq!(cursor.state(), CursorState::Exhausted);
        assert_eq!(cursor.yielded(), 5);
    }
}

#[test]
fn consumed_cursor_never_re_yields() {
    for list in lists_of(&[1, 2]) {
        let mut cursor = list.iterator();
        assert_eq!(cursor.by_ref().count(), 2);
        assert_eq!(cursor.by_ref().count(), 0);
        assert_eq!(list.iterator().count(), 2);
    }
}

#[test]
fn empty_lists_yield_nothing() {
    for list in mutable_lists() {
        let mut cursor = list.iterator();
        assert!(!cursor.has_next());
        assert_eq!(cursor.next_value(), None);
    }
}

#[test]
fn cursor_survives_list_drop() {
    for list in lists_of(&[1, 2, 3]) {
        let cursor = list.iterator();
        drop(list);
        assert_eq!(cursor.count(), 3);
    }
}

#[test]
fn adapters_compose_lazily() {
    let mut calls = 0;
    let naturals = Cursor::from_fn(move || {
        calls += 1;
        Some(Value::from(calls))
    });
    let evens: Vec<i64> = naturals
        .filter(|v| v.as_int().is_some_and(|i| i % 2 == 0))
        .skip(1)
        .take(3)
        .filter_map(|v| v.as_int())
        .collect();
    assert_eq!(evens, vec![4, 6, 8]);
}

#[test]
fn list_stream_restarts_cursor_stream_does_not() {
    let list = array_list(ints(&[1, 2]));
    let restartable = ListStream::new(list.clone());
    assert_eq!(restartable.iterator().count(), 2);
    assert_eq!(restartable.iterator().count(), 2);

    let once = CursorStream::new(list.iterator());
    assert_eq!(once.iterator().count(), 2);
    assert_eq!(once.iterator().count(), 0);
}

#[test]
fn streams_are_interchangeable() {
    let store = RecordStore::new();
    store.open("a");
    store.open("b");
    let streams: Vec<Box<dyn Stream>> = vec![
        Box::new(ListStream::new(array_list(ints(&[1])))),
        Box::new(FnStream::new(|| Cursor::from_values(ints(&[1, 2])))),
        Box::new(store.scan()),
    ];
    let counts: Vec<usize> = streams.iter().map(|s| s.iterator().count()).collect();
    assert_eq!(counts, vec![1, 2, 2]);
    assert!(streams.iter().all(|s| s.is_restartable()));
}

#[test]
fn cursors_cross_threads() {
    let list = cons_list(ints(&[1, 2, 3]));
    let cursor = list.iterator();
    let total = std::thread::spawn(move || cursor.filter_map(|v| v.as_int()).sum::<i64>())
        .join()
        .unwrap();
    assert_eq!(total, 6);
}

#[test]
fn abandoned_cursor_releases_its_source() {
    init_tracing();
    let drops = DropCounter::new();
    let held = drops.tracked(1);
    let mut cursor = Cursor::from_fn(move || {
        let _ = &held;
        Some(Value::from(1))
    });
    assert_eq!(cursor.next_value(), Some(Value::from(1)));
    assert_eq!(cursor.state(), CursorState::Yielding);
    assert_eq!(drops.drops(), 0);
    drop(cursor);
    assert_eq!(drops.drops(), 1);
}

#[test]
fn cursor_dropped_after_peek_releases_its_source() {
    init_tracing();
    let drops = DropCounter::new();
    let held = drops.tracked(1);
    let mut cursor = Cursor::from_fn(move || {
        let _ = &held;
        Some(Value::from(1))
    });
    assert!(cursor.has_next());
    assert_eq!(cursor.state(), CursorState::Created);
    drop(cursor);
    assert_eq!(drops.drops(), 1);
}
