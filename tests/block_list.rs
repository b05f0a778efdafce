use grok_rs::store::BlockList;

fn contents(list: &BlockList) -> Vec<Vec<u8>> {
    list.iter().map(|block| block.to_vec()).collect()
}

#[test]
fn block_list_when_blocks_overwritten_and_removed_then_indices_shift() {
    let mut list = BlockList::new();
    for block in [b"A", b"B", b"C"] {
        list.push(block).expect("push should succeed");
    }

    list.overwrite_at(1, b"D")
        .expect("overwrite should succeed");
    let removed = list.remove_at(0);

    assert_eq!(removed.as_deref(), Some(&b"A"[..]));
    assert_eq!(contents(&list), vec![b"D".to_vec(), b"C".to_vec()]);
    assert_eq!(list.at(0), Some(&b"D"[..]));
    assert_eq!(list.at(1), Some(&b"C"[..]));
}

#[test]
fn block_list_when_index_out_of_range_then_operations_are_no_ops() {
    let mut list = BlockList::with_capacity(2);
    list.push(b"only").expect("push should succeed");

    assert_eq!(list.at(5), None);
    assert_eq!(list.remove_at(5), None);
    list.overwrite_at(5, b"ignored")
        .expect("out of range overwrite is not an error");

    assert_eq!(list.len(), 1);
    assert_eq!(contents(&list), vec![b"only".to_vec()]);
}

#[test]
fn block_list_when_blocks_have_different_lengths_then_each_keeps_its_own() {
    let mut list = BlockList::new();
    list.push(b"").expect("empty block should be stored");
    list.push(b"a longer block\0with a zero")
        .expect("push should succeed");

    assert_eq!(list.at(0).map(<[u8]>::len), Some(0));
    assert_eq!(list.at(1), Some(&b"a longer block\0with a zero"[..]));

    list.clear();
    assert!(list.is_empty());
}
