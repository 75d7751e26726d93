use super::{collect_rids, int_record, test_env};
use crate::errors::HeapError;
use crate::file_header::FileHeaderMut;
use crate::scan::{AttrType, CompOp, HeapFileScan, Predicate};
use file::api::FileManager;
use page::page_id::PageId;
use page::page_type::PageType;

fn int_eq(value: i32) -> Predicate {
    int_filter(CompOp::Eq, value)
}

fn int_filter(op: CompOp, value: i32) -> Predicate {
    Predicate {
        offset: 4,
        length: 4,
        attr_type: AttrType::Int,
        op,
        value: value.to_ne_bytes().to_vec(),
    }
}

#[test]
fn an_unfiltered_scan_yields_exactly_the_inserted_rids() {
    let env = test_env();
    let payloads: Vec<Vec<u8>> = (0..10).map(int_record).collect();
    let rids = env.create_with_records("t1.tbl", &payloads);

    let mut scan = env.scan("t1.tbl");
    assert_eq!(collect_rids(&mut scan), rids);

    // Exhausted scans keep reporting the end.
    assert!(scan.scan_next().unwrap().is_none());
    assert!(scan.scan_next().unwrap().is_none());
}

#[test]
fn an_equality_filter_selects_exactly_one_record() {
    let env = test_env();
    let payloads: Vec<Vec<u8>> = (0..100).map(int_record).collect();
    let rids = env.create_with_records("t3.tbl", &payloads);

    let mut scan = env.scan("t3.tbl");
    scan.start_scan(Some(int_eq(42))).unwrap();

    assert_eq!(scan.scan_next().unwrap(), Some(rids[42]));
    assert_eq!(scan.get_record().unwrap(), int_record(42));
    assert!(scan.scan_next().unwrap().is_none());
}

#[test]
fn a_less_than_filter_selects_the_prefix_in_order() {
    let env = test_env();
    let payloads: Vec<Vec<u8>> = (0..100).map(int_record).collect();
    let rids = env.create_with_records("t3.tbl", &payloads);

    let mut scan = env.scan("t3.tbl");
    scan.start_scan(Some(int_filter(CompOp::Lt, 42))).unwrap();

    assert_eq!(collect_rids(&mut scan), rids[..42].to_vec());
}

#[test]
fn remaining_operators_partition_the_file() {
    let env = test_env();
    let payloads: Vec<Vec<u8>> = (0..100).map(int_record).collect();
    env.create_with_records("t3.tbl", &payloads);

    let count = |op: CompOp, value: i32| {
        let mut scan = env.scan("t3.tbl");
        scan.start_scan(Some(int_filter(op, value))).unwrap();
        collect_rids(&mut scan).len()
    };

    assert_eq!(count(CompOp::Lte, 42), 43);
    assert_eq!(count(CompOp::Gte, 42), 58);
    assert_eq!(count(CompOp::Gt, 42), 57);
    assert_eq!(count(CompOp::Ne, 42), 99);
}

#[test]
fn a_filtered_scan_crosses_page_boundaries() {
    let env = test_env();
    // 1500-byte records, two per page; tag each with its index at offset 4.
    let payloads: Vec<Vec<u8>> = (0..6)
        .map(|i| {
            let mut payload = vec![0u8; 1500];
            payload[4..8].copy_from_slice(&(i as i32).to_ne_bytes());
            payload
        })
        .collect();
    let rids = env.create_with_records("t2.tbl", &payloads);

    let mut scan = env.scan("t2.tbl");
    scan.start_scan(Some(int_filter(CompOp::Gte, 4))).unwrap();

    assert_eq!(collect_rids(&mut scan), rids[4..].to_vec());
}

#[test]
fn a_bytes_filter_compares_the_window_lexicographically() {
    let env = test_env();
    let payloads: Vec<Vec<u8>> = ["aaaa-1", "abcd-2", "zzzz-3"]
        .iter()
        .map(|s| s.as_bytes().to_vec())
        .collect();
    let rids = env.create_with_records("t1.tbl", &payloads);

    let bytes_filter = |op: CompOp, value: &str| Predicate {
        offset: 0,
        length: 4,
        attr_type: AttrType::Bytes,
        op,
        value: value.as_bytes().to_vec(),
    };

    let mut scan = env.scan("t1.tbl");
    scan.start_scan(Some(bytes_filter(CompOp::Eq, "abcd"))).unwrap();
    assert_eq!(collect_rids(&mut scan), vec![rids[1]]);

    let mut scan = env.scan("t1.tbl");
    scan.start_scan(Some(bytes_filter(CompOp::Gt, "abcd"))).unwrap();
    assert_eq!(collect_rids(&mut scan), vec![rids[2]]);
}

#[test]
fn a_float_filter_compares_native_floats() {
    let env = test_env();
    let payloads: Vec<Vec<u8>> = [1.0f32, 2.0, 3.5]
        .iter()
        .map(|f| f.to_ne_bytes().to_vec())
        .collect();
    let rids = env.create_with_records("t1.tbl", &payloads);

    let mut scan = env.scan("t1.tbl");
    scan.start_scan(Some(Predicate {
        offset: 0,
        length: 4,
        attr_type: AttrType::Float,
        op: CompOp::Lt,
        value: 2.5f32.to_ne_bytes().to_vec(),
    }))
    .unwrap();

    assert_eq!(collect_rids(&mut scan), rids[..2].to_vec());
}

#[test]
fn changing_the_filter_takes_effect_on_the_next_advance() {
    let env = test_env();
    let payloads: Vec<Vec<u8>> = (0..10).map(int_record).collect();
    let rids = env.create_with_records("t1.tbl", &payloads);

    let mut scan = env.scan("t1.tbl");
    assert_eq!(scan.scan_next().unwrap(), Some(rids[0]));

    scan.start_scan(Some(int_eq(7))).unwrap();
    assert_eq!(scan.scan_next().unwrap(), Some(rids[7]));

    // Clearing the filter resumes plain iteration from the cursor.
    scan.start_scan(None).unwrap();
    assert_eq!(scan.scan_next().unwrap(), Some(rids[8]));
}

#[test]
fn malformed_filters_are_rejected() {
    let env = test_env();
    env.create_with_records("t1.tbl", &[int_record(1)]);

    let mut scan = env.scan("t1.tbl");
    let result = scan.start_scan(Some(Predicate {
        offset: 0,
        length: 8,
        attr_type: AttrType::Int,
        op: CompOp::Eq,
        value: vec![0; 8],
    }));

    assert!(matches!(result, Err(HeapError::BadScanParam(_))));
}

#[test]
fn mark_and_reset_rewind_within_a_page() {
    let env = test_env();
    let payloads: Vec<Vec<u8>> = (0..10).map(int_record).collect();
    let rids = env.create_with_records("t4.tbl", &payloads);

    let mut scan = env.scan("t4.tbl");
    assert_eq!(scan.scan_next().unwrap(), Some(rids[0]));
    scan.mark_scan();

    for expected in &rids[1..4] {
        assert_eq!(scan.scan_next().unwrap(), Some(*expected));
    }

    scan.reset_scan().unwrap();
    // One step past the mark, as if the detour never happened.
    assert_eq!(scan.scan_next().unwrap(), Some(rids[1]));
}

#[test]
fn mark_and_reset_rewind_across_pages() {
    let env = test_env();
    let payloads: Vec<Vec<u8>> = (1..=5u8).map(|i| vec![i; 1500]).collect();
    let rids = env.create_with_records("t2.tbl", &payloads);

    let mut scan = env.scan("t2.tbl");
    assert_eq!(scan.scan_next().unwrap(), Some(rids[0]));
    scan.mark_scan();

    // Walk onto the second page.
    assert_eq!(scan.scan_next().unwrap(), Some(rids[1]));
    assert_eq!(scan.scan_next().unwrap(), Some(rids[2]));
    assert_ne!(rids[2].page_no, rids[0].page_no);

    scan.reset_scan().unwrap();
    assert_eq!(scan.scan_next().unwrap(), Some(rids[1]));

    // The scan switched its pin back to the marked page.
    assert_eq!(env.pin_count("t2.tbl", rids[2].page_no), 0);
    assert_eq!(env.pin_count("t2.tbl", rids[0].page_no), 1);
}

#[test]
fn an_ended_scan_restarts_from_the_beginning() {
    let env = test_env();
    let payloads: Vec<Vec<u8>> = (0..5).map(int_record).collect();
    let rids = env.create_with_records("t1.tbl", &payloads);

    let mut scan = env.scan("t1.tbl");
    assert_eq!(scan.scan_next().unwrap(), Some(rids[0]));
    assert_eq!(scan.scan_next().unwrap(), Some(rids[1]));

    scan.end_scan().unwrap();
    assert_eq!(env.pin_count("t1.tbl", rids[0].page_no), 0);

    assert_eq!(scan.scan_next().unwrap(), Some(rids[0]));
}

#[test]
fn a_file_without_data_pages_reports_no_records() {
    // Hand-build a header whose chain is empty; `create_heap_file` never
    // produces this shape, so the scan's degenerate branch needs its own
    // fixture.
    let env = test_env();
    let file_id = env.catalog.file_id_for("empty.tbl");
    env.files.create_file(file_id).unwrap();
    env.files.open_file(file_id).unwrap();

    let header_no = env.buffer.alloc_page(file_id).unwrap();
    let header_id = PageId::new(file_id, header_no);
    env.buffer
        .with_page_mut(header_id, |page| -> Result<(), HeapError> {
            page.initialize(header_id, PageType::FileHeader)?;
            FileHeaderMut::new(page.data_mut()).default("empty.tbl")?;
            Ok(())
        })
        .unwrap()
        .unwrap();
    env.buffer.unpin_page(header_id, true).unwrap();
    env.buffer.flush_file(file_id).unwrap();
    env.files.close_file(file_id).unwrap();

    let mut scan: HeapFileScan<_> = env.scan("empty.tbl");
    assert!(matches!(scan.scan_next(), Err(HeapError::NoRecords)));
}
