use crate::config::EngineConfig;
use buffer::buffer::BufferManager;
use file::api::FileManager;
use file::disk_file_manager::DiskFileManager;
use file::file_catalog::FileCatalog;
use std::sync::Arc;

/// Owner of the singleton-like instances that live for the whole process.
/// Collaborators are injected into the heap layer from here rather than
/// reached through globals.
#[derive(Debug)]
pub struct EngineEnvironment {
    pub file_manager: Arc<DiskFileManager>,
    pub buffer: Arc<BufferManager<DiskFileManager>>,
    pub file_catalog: Arc<FileCatalog>,
    pub engine_config: EngineConfig,
}

impl EngineEnvironment {
    pub fn new(config: EngineConfig) -> Self {
        let file_catalog = Arc::new(FileCatalog::new());
        let file_manager = Arc::new(DiskFileManager::new(file_catalog.clone()));
        let buffer = Arc::new(BufferManager::new(
            file_manager.clone(),
            config.storage.buffer_pages.get(),
        ));
        Self {
            file_manager,
            buffer,
            file_catalog,
            engine_config: config,
        }
    }
}
