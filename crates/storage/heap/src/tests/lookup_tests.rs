use super::{int_record, test_env};
use crate::errors::HeapError;
use crate::rid::Rid;

#[test]
fn lookup_by_rid_returns_the_payload() {
    let env = test_env();
    let rids = env.create_with_records("t1.tbl", &[int_record(10), int_record(20)]);

    let mut heap = env.open("t1.tbl");
    assert_eq!(heap.get_record(rids[1]).unwrap(), int_record(20));
    assert_eq!(heap.get_record(rids[0]).unwrap(), int_record(10));
}

#[test]
fn a_header_page_rid_is_rejected_without_side_effects() {
    let env = test_env();
    let rids = env.create_with_records("t1.tbl", &[int_record(1)]);

    let mut heap = env.open("t1.tbl");
    let first_page = rids[0].page_no;
    assert_eq!(env.pin_count("t1.tbl", first_page), 1);

    // Page 0 is the header page and never holds records.
    let result = heap.get_record(Rid::new(0, 0));
    assert!(matches!(result, Err(HeapError::BadPageNo { .. })));

    // The current page and its pin are untouched, and lookups still work.
    assert_eq!(env.pin_count("t1.tbl", first_page), 1);
    assert_eq!(heap.get_record(rids[0]).unwrap(), int_record(1));
}

#[test]
fn lookup_moves_the_single_data_page_pin() {
    let env = test_env();
    let payloads: Vec<Vec<u8>> = (1..=3u8).map(|i| vec![i; 1500]).collect();
    let rids = env.create_with_records("t2.tbl", &payloads);

    let (head, tail) = (rids[0].page_no, rids[2].page_no);
    assert_ne!(head, tail);

    // Opening pins the head of the chain as the current page.
    let mut heap = env.open("t2.tbl");
    assert_eq!(env.pin_count("t2.tbl", head), 1);
    assert_eq!(env.pin_count("t2.tbl", tail), 0);

    heap.get_record(rids[2]).unwrap();
    assert_eq!(env.pin_count("t2.tbl", head), 0);
    assert_eq!(env.pin_count("t2.tbl", tail), 1);

    heap.get_record(rids[0]).unwrap();
    assert_eq!(env.pin_count("t2.tbl", head), 1);
    assert_eq!(env.pin_count("t2.tbl", tail), 0);
}

#[test]
fn a_failed_slot_lookup_keeps_the_page_pinned_for_retry() {
    let env = test_env();
    let rids = env.create_with_records("t1.tbl", &[int_record(1)]);
    let data_page = rids[0].page_no;

    let mut heap = env.open("t1.tbl");
    assert!(heap.get_record(Rid::new(data_page, 99)).is_err());

    // The page stayed current and pinned exactly once.
    assert_eq!(env.pin_count("t1.tbl", data_page), 1);
    assert_eq!(heap.get_record(rids[0]).unwrap(), int_record(1));
    assert_eq!(env.pin_count("t1.tbl", data_page), 1);
}

#[test]
fn a_lookup_on_a_page_past_the_chain_fails() {
    let env = test_env();
    env.create_with_records("t1.tbl", &[int_record(1)]);

    let mut heap = env.open("t1.tbl");
    assert!(heap.get_record(Rid::new(99, 0)).is_err());
}
