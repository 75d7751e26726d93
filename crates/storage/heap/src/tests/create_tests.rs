use super::{test_env, TestEnv};
use crate::errors::HeapError;
use crate::heap_file::{HeapFile, create_heap_file, destroy_heap_file};
use file::errors::FileError;

#[test]
fn create_initializes_an_empty_one_page_file() {
    // Arrange
    let env = test_env();

    // Act
    env.create("t1.tbl");

    // Assert
    let heap = env.open("t1.tbl");
    assert_eq!(heap.rec_count().unwrap(), 0);
    assert_eq!(heap.page_count().unwrap(), 1);
    assert_eq!(heap.file_name().unwrap(), "t1.tbl");

    let first = heap.first_page().unwrap();
    assert!(first.is_some());
    assert_eq!(heap.last_page().unwrap(), first);
}

#[test]
fn a_freshly_created_file_scans_as_empty() {
    let env = test_env();
    env.create("t1.tbl");

    let mut scan = env.scan("t1.tbl");
    assert!(scan.scan_next().unwrap().is_none());
}

#[test]
fn create_of_an_existing_file_fails() {
    let env = test_env();
    env.create("t1.tbl");

    let result = create_heap_file(&env.buffer, &*env.files, &env.catalog, "t1.tbl");
    assert!(matches!(result, Err(HeapError::FileExists { .. })));
}

#[test]
fn destroy_removes_the_file() {
    let env = test_env();
    env.create("t1.tbl");

    destroy_heap_file(&*env.files, &env.catalog, "t1.tbl").unwrap();

    let reopened = HeapFile::open(
        env.buffer.clone(),
        env.files.clone(),
        &env.catalog,
        "t1.tbl",
    );
    assert!(matches!(
        reopened,
        Err(HeapError::File(FileError::NotFound { .. }))
    ));
}

#[test]
fn destroy_of_an_open_file_fails() {
    let env = test_env();
    env.create("t1.tbl");

    let heap = env.open("t1.tbl");
    let result = destroy_heap_file(&*env.files, &env.catalog, "t1.tbl");
    assert!(matches!(
        result,
        Err(HeapError::File(FileError::StillOpen { .. }))
    ));
    drop(heap);

    destroy_heap_file(&*env.files, &env.catalog, "t1.tbl").unwrap();
}

#[test]
fn open_of_a_missing_file_fails() {
    let env: TestEnv = test_env();

    let result = HeapFile::open(
        env.buffer.clone(),
        env.files.clone(),
        &env.catalog,
        "missing.tbl",
    );
    assert!(matches!(
        result,
        Err(HeapError::File(FileError::NotFound { .. }))
    ));
}
