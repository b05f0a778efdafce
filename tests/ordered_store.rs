use grok_rs::store::{KeyOrder, OrderedStore, StoreError};

fn numeric_key(value: u32) -> [u8; 4] {
    value.to_ne_bytes()
}

fn walk_keys(store: &mut OrderedStore) -> Vec<Vec<u8>> {
    let mut cursor = store.iterate();
    let mut keys = Vec::new();
    while let Some((key, _)) = store.next(&mut cursor) {
        keys.push(key.to_vec());
    }
    keys
}

#[test]
fn ordered_store_when_value_put_then_get_returns_exact_bytes() {
    let mut store = OrderedStore::lexicographic();
    store.put(b"alpha", b"one").expect("put should succeed");
    store
        .put(b"beta", b"")
        .expect("empty value should be stored");

    assert_eq!(store.get(b"alpha"), Some(&b"one"[..]));
    assert_eq!(store.get(b"beta"), Some(&b""[..]));
    assert_eq!(store.get(b"gamma"), None);
    assert_eq!(store.len(), 2);
}

#[test]
fn ordered_store_when_key_overwritten_then_latest_value_wins() {
    let mut store = OrderedStore::lexicographic();
    store.put(b"key", b"first").expect("put should succeed");
    store
        .put(b"key", b"second value")
        .expect("overwrite should succeed");

    assert_eq!(store.get(b"key"), Some(&b"second value"[..]));
    assert_eq!(store.len(), 1);
}

#[test]
fn ordered_store_when_put_if_absent_on_existing_key_then_original_kept() {
    let mut store = OrderedStore::lexicographic();
    let inserted = store
        .put_if_absent(b"key", b"original")
        .expect("first insert");
    let replaced = store
        .put_if_absent(b"key", b"other")
        .expect("second insert");

    assert!(inserted);
    assert!(!replaced);
    assert_eq!(store.get(b"key"), Some(&b"original"[..]));
}

#[test]
fn ordered_store_when_numeric_keys_inserted_then_walk_is_ascending() {
    let mut store = OrderedStore::numeric();
    for value in [5u32, 3, 9, 1] {
        store
            .put(&numeric_key(value), value.to_string().as_bytes())
            .expect("numeric put should succeed");
    }

    let keys: Vec<u32> = walk_keys(&mut store)
        .into_iter()
        .map(|key| u32::from_ne_bytes(key.try_into().expect("keys are four bytes")))
        .collect();

    assert_eq!(keys, vec![1, 3, 5, 9]);
    assert_eq!(store.order(), KeyOrder::Numeric);
}

#[test]
fn ordered_store_when_numeric_keys_cross_byte_boundary_then_order_is_numeric() {
    let mut store = OrderedStore::numeric();
    for value in [256u32, 1, 65_536, 255] {
        store
            .put(&numeric_key(value), b"")
            .expect("numeric put should succeed");
    }

    let keys: Vec<u32> = walk_keys(&mut store)
        .into_iter()
        .map(|key| u32::from_ne_bytes(key.try_into().expect("keys are four bytes")))
        .collect();

    assert_eq!(keys, vec![1, 255, 256, 65_536]);
}

#[test]
fn ordered_store_when_string_keys_inserted_then_walk_is_lexicographic() {
    let mut store = OrderedStore::lexicographic();
    for key in ["b", "a", "c"] {
        store.put(key.as_bytes(), b"").expect("put should succeed");
    }

    assert_eq!(
        walk_keys(&mut store),
        vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]
    );
}

#[test]
fn ordered_store_when_keys_contain_zero_bytes_then_they_stay_distinct() {
    let mut store = OrderedStore::lexicographic();
    store
        .put(b"a\0b", b"with zero")
        .expect("put should succeed");
    store.put(b"a", b"prefix").expect("put should succeed");

    assert_eq!(store.get(b"a\0b"), Some(&b"with zero"[..]));
    assert_eq!(store.get(b"a"), Some(&b"prefix"[..]));
    assert_eq!(walk_keys(&mut store), vec![b"a".to_vec(), b"a\0b".to_vec()]);
}

#[test]
fn ordered_store_when_cleared_or_removed_then_get_misses() {
    let mut store = OrderedStore::lexicographic();
    store.put(b"one", b"1").expect("put should succeed");
    store.put(b"two", b"2").expect("put should succeed");

    assert_eq!(store.remove(b"one").as_deref(), Some(&b"1"[..]));
    assert_eq!(store.get(b"one"), None);
    assert_eq!(store.remove(b"one"), None);

    store.clear();
    assert!(store.is_empty());
    assert_eq!(store.get(b"two"), None);
}

#[test]
fn ordered_store_when_new_walk_started_then_previous_cursor_is_stale() {
    let mut store = OrderedStore::lexicographic();
    store.put(b"a", b"").expect("put should succeed");
    store.put(b"b", b"").expect("put should succeed");

    let mut first = store.iterate();
    assert!(store.next(&mut first).is_some());

    let mut second = store.iterate();
    assert!(store.next(&mut first).is_none());
    assert!(first.is_finished());
    assert_eq!(
        store.next(&mut second).map(|(key, _)| key),
        Some(&b"a"[..])
    );
}

#[test]
fn ordered_store_when_numeric_key_has_wrong_width_then_put_fails_and_get_misses() {
    let mut store = OrderedStore::numeric();
    let err = store
        .put(b"abc", b"")
        .expect_err("three-byte key should be rejected");

    match err {
        StoreError::KeyWidth { expected, found } => {
            assert_eq!(expected, 4);
            assert_eq!(found, 3);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(store.get(b"abc"), None);
}
