use crate::heap_file::{HeapFile, create_heap_file};
use crate::insert::InsertFileScan;
use crate::rid::Rid;
use crate::scan::HeapFileScan;
use buffer::buffer::BufferManager;
use file::api::FileManager;
use file::file_catalog::FileCatalog;
use file::in_memory_file_manager::InMemoryFileManager;
use page::page_id::{FileId, PageId, PageNo};
use std::path::Path;
use std::sync::Arc;

mod create_tests;
mod lookup_tests;
mod scan_tests;

/// The collaborators a heap file needs, backed by the in-memory file
/// manager so the suite runs without touching disk.
pub(crate) struct TestEnv {
    pub(crate) catalog: Arc<FileCatalog>,
    pub(crate) files: Arc<InMemoryFileManager>,
    pub(crate) buffer: Arc<BufferManager<InMemoryFileManager>>,
}

pub(crate) fn test_env() -> TestEnv {
    test_env_with_pool(16)
}

pub(crate) fn test_env_with_pool(pool_size: usize) -> TestEnv {
    let catalog = Arc::new(FileCatalog::new());
    let files = Arc::new(InMemoryFileManager::new(catalog.clone()));
    let buffer = Arc::new(BufferManager::new(files.clone(), pool_size));
    TestEnv {
        catalog,
        files,
        buffer,
    }
}

impl TestEnv {
    pub(crate) fn create(&self, name: &str) {
        create_heap_file(&self.buffer, &*self.files, &self.catalog, name).unwrap();
    }

    pub(crate) fn open(&self, name: &str) -> HeapFile<InMemoryFileManager> {
        HeapFile::open(self.buffer.clone(), self.files.clone(), &self.catalog, name).unwrap()
    }

    pub(crate) fn scan(&self, name: &str) -> HeapFileScan<InMemoryFileManager> {
        HeapFileScan::open(self.buffer.clone(), self.files.clone(), &self.catalog, name).unwrap()
    }

    pub(crate) fn inserter(&self, name: &str) -> InsertFileScan<InMemoryFileManager> {
        InsertFileScan::open(self.buffer.clone(), self.files.clone(), &self.catalog, name).unwrap()
    }

    pub(crate) fn file_id(&self, name: &str) -> FileId {
        self.catalog.lookup(Path::new(name)).unwrap()
    }

    pub(crate) fn pin_count(&self, name: &str, page_no: PageNo) -> u32 {
        self.buffer.pin_count(PageId::new(self.file_id(name), page_no))
    }

    /// Creates a file and fills it with `payloads` through a short-lived
    /// insert cursor. Returns the record ids in insertion order.
    pub(crate) fn create_with_records(&self, name: &str, payloads: &[Vec<u8>]) -> Vec<Rid> {
        self.create(name);
        let mut inserter = self.inserter(name);
        payloads
            .iter()
            .map(|payload| inserter.insert_record(payload).unwrap())
            .collect()
    }
}

/// An 8-byte record carrying `value` as a native-endian integer at offset 4,
/// the shape the filter tests compare against.
pub(crate) fn int_record(value: i32) -> Vec<u8> {
    let mut record = vec![0u8; 8];
    record[4..8].copy_from_slice(&value.to_ne_bytes());
    record
}

/// Drains the scan, returning every remaining record id in order.
pub(crate) fn collect_rids(scan: &mut HeapFileScan<InMemoryFileManager>) -> Vec<Rid> {
    let mut rids = Vec::new();
    while let Some(rid) = scan.scan_next().unwrap() {
        rids.push(rid);
    }
    rids
}
