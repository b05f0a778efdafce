use grok_rs::capture::{CaptureDescriptor, CaptureError, CaptureRegistry};

fn descriptor(id: u32, name: &str, subname: &str, slot: usize) -> CaptureDescriptor {
    let pattern = name.split(':').next().unwrap_or(name);
    CaptureDescriptor::new(id, name, subname, pattern, slot)
}

#[test]
fn capture_registry_when_id_reused_then_returns_duplicate_id() {
    let mut registry = CaptureRegistry::new();
    registry
        .add(descriptor(1, "WORD:user", "user", 1), false)
        .expect("first capture should register");

    match registry.add(descriptor(1, "INT:id", "id", 2), false) {
        Err(CaptureError::DuplicateId { id }) => assert_eq!(id, 1),
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(registry.len(), 1);
}

#[test]
fn capture_registry_when_slot_reused_then_returns_duplicate_slot() {
    let mut registry = CaptureRegistry::new();
    registry
        .add(descriptor(1, "WORD:user", "user", 3), false)
        .expect("first capture should register");

    match registry.add(descriptor(2, "INT:id", "id", 3), false) {
        Err(CaptureError::DuplicateSlot { slot, existing }) => {
            assert_eq!(slot, 3);
            assert_eq!(existing, 1);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn capture_registry_when_lookups_miss_then_returns_none() {
    let registry = CaptureRegistry::new();

    assert!(registry.get_by_name("missing").is_none());
    assert!(registry.get_by_subname("missing").is_none());
    assert!(registry.get_by_id(7).is_none());
    assert!(registry.get_by_engine_slot(7).is_none());
}

#[test]
fn capture_registry_when_registered_then_every_index_resolves() {
    let mut registry = CaptureRegistry::new();
    registry
        .add(descriptor(4, "WORD:user", "user", 2), false)
        .expect("capture should register");

    for found in [
        registry.get_by_id(4),
        registry.get_by_name("WORD:user"),
        registry.get_by_subname("user"),
        registry.get_by_engine_slot(2),
    ] {
        let found = found.expect("every index should resolve");
        assert_eq!(found.id(), 4);
        assert_eq!(found.pattern(), "WORD");
    }
}

#[test]
fn capture_registry_when_only_renamed_then_plain_captures_are_skipped() {
    let mut registry = CaptureRegistry::new();
    let added_plain = registry
        .add(descriptor(1, "INT", "", 1), true)
        .expect("skip is not an error");
    let added_renamed = registry
        .add(descriptor(2, "INT:id", "id", 2), true)
        .expect("renamed capture should register");

    assert!(!added_plain);
    assert!(added_renamed);
    assert!(registry.get_by_name("INT").is_none());
    assert_eq!(registry.get_by_engine_slot(1).map(|d| d.id()), Some(1));
    assert_eq!(registry.get_by_id(1).map(|d| d.name()), Some("INT"));
    assert_eq!(registry.len(), 2);

    let walked: Vec<u32> = registry.iter().map(|d| d.id()).collect();
    assert_eq!(walked, vec![2]);
}

#[test]
fn capture_registry_when_names_collide_then_last_registration_wins() {
    let mut registry = CaptureRegistry::new();
    registry
        .add(descriptor(1, "WORD", "", 1), false)
        .expect("first WORD should register");
    registry
        .add(descriptor(2, "WORD", "", 2), false)
        .expect("second WORD should register");

    let found = registry.get_by_name("WORD").expect("WORD should resolve");
    assert_eq!(found.id(), 2);
    assert_eq!(registry.get_by_id(1).map(|d| d.slot()), Some(1));
}

#[test]
fn capture_registry_when_walked_then_ids_ascend_regardless_of_insertion() {
    let mut registry = CaptureRegistry::new();
    for (id, slot) in [(9u32, 1usize), (2, 2), (5, 3)] {
        let name = format!("P{id}:n{id}");
        let subname = format!("n{id}");
        registry
            .add(descriptor(id, &name, &subname, slot), false)
            .expect("capture should register");
    }

    let mut walk = registry.walk_init();
    let mut ids = Vec::new();
    while let Some(found) = registry.walk_next(&mut walk) {
        ids.push(found.id());
    }
    registry.walk_end(walk);

    assert_eq!(ids, vec![2, 5, 9]);
    assert_eq!(
        registry.iter().map(|d| d.id()).collect::<Vec<_>>(),
        vec![2, 5, 9]
    );
}

#[test]
fn capture_registry_when_extra_attached_then_identity_is_unchanged() {
    let mut registry = CaptureRegistry::new();
    registry
        .add(descriptor(3, "INT:port", "port", 1), false)
        .expect("capture should register");

    let attached = registry.set_extra(3, b"u16");
    assert!(matches!(attached, Ok(true)));
    let missing = registry.set_extra(99, b"u16");
    assert!(matches!(missing, Ok(false)));

    let found = registry
        .get_by_subname("port")
        .expect("port should resolve");
    assert_eq!(found.extra(), Some(&b"u16"[..]));
    assert_eq!(found.name(), "INT:port");
    assert_eq!(found.slot(), 1);
}

#[test]
fn capture_registry_when_walks_overlap_then_each_keeps_its_own_position() {
    let mut registry = CaptureRegistry::new();
    for id in 1..=3u32 {
        let name = format!("P{id}:n{id}");
        let subname = format!("n{id}");
        registry
            .add(descriptor(id, &name, &subname, id as usize), false)
            .expect("capture should register");
    }

    let mut first = registry.walk_init();
    let first_id = registry.walk_next(&mut first).map(|d| d.id());
    assert_eq!(first_id, Some(1));

    let mut second = registry.walk_init();
    let mut second_ids = Vec::new();
    while let Some(found) = registry.walk_next(&mut second) {
        second_ids.push(found.id());
    }
    registry.walk_end(second);
    assert_eq!(second_ids, vec![1, 2, 3]);

    let resumed = registry.walk_next(&mut first).map(|d| d.id());
    assert_eq!(resumed, Some(2));
    registry.walk_end(first);
}
