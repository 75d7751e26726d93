//! # heapdb
//!
//! Demo binary for the heap storage engine.
//!
//! The engine is composed of the internal crates under the `/crates`
//! directory of this workspace:
//!
//! - `/crates/storage`: paged files, buffer management and the heap-file
//!   record layer.
//!
//! This binary wires the collaborators together from a TOML config and runs
//! an end-to-end flow over a demo heap file: create, append, filtered scan,
//! destroy.

use crate::config::EngineConfig;
use crate::engine_environment::EngineEnvironment;
use heap::{AttrType, CompOp, HeapFileScan, InsertFileScan, Predicate};
use std::env;
use std::error::Error;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

mod config;
mod engine_environment;

const DEMO_RECORDS: i32 = 100;
const FILTER_BELOW: i32 = 10;

fn main() -> Result<(), Box<dyn Error>> {
    let config_path = env::args()
        .nth(1)
        .unwrap_or_else(|| "heapdb.toml".to_string());
    let config = EngineConfig::load_from_file(&config_path)?;

    let _logging_guard = init_logging(&config.storage.logs_dir)?;

    let e = EngineEnvironment::new(config);
    let table = e.engine_config.storage.data_dir.join("demo.tbl");

    heap::create_heap_file(&e.buffer, &*e.file_manager, &e.file_catalog, &table)?;
    tracing::info!(file = %table.display(), "created demo heap file");

    // Append fixed-size records tagged with their index at offset 4.
    let mut inserter = InsertFileScan::open(
        e.buffer.clone(),
        e.file_manager.clone(),
        &e.file_catalog,
        &table,
    )?;
    for i in 0..DEMO_RECORDS {
        let mut record = vec![0u8; 64];
        record[4..8].copy_from_slice(&i.to_ne_bytes());
        let rid = inserter.insert_record(&record)?;
        tracing::debug!(%rid, i, "inserted record");
    }
    tracing::info!(records = inserter.rec_count()?, "filled demo heap file");
    drop(inserter);

    // Scan back everything whose tag is below the threshold.
    let mut scan = HeapFileScan::open(
        e.buffer.clone(),
        e.file_manager.clone(),
        &e.file_catalog,
        &table,
    )?;
    scan.start_scan(Some(Predicate {
        offset: 4,
        length: 4,
        attr_type: AttrType::Int,
        op: CompOp::Lt,
        value: FILTER_BELOW.to_ne_bytes().to_vec(),
    }))?;

    let mut matched = 0u32;
    while let Some(rid) = scan.scan_next()? {
        tracing::debug!(%rid, "matched record");
        matched += 1;
    }
    tracing::info!(matched, threshold = FILTER_BELOW, "filtered scan finished");
    drop(scan);

    heap::destroy_heap_file(&*e.file_manager, &e.file_catalog, &table)?;
    tracing::info!(file = %table.display(), "destroyed demo heap file");

    Ok(())
}

/// Sets up the logging for the process: compact console output plus a
/// daily-rolling JSON file.
fn init_logging(log_dir: &Path) -> Result<WorkerGuard, Box<dyn Error>> {
    let file_appender = tracing_appender::rolling::daily(log_dir, "heapdb.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let console_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(false)
        .with_level(true)
        .compact();

    let file_layer = fmt::layer().with_writer(file_writer).json();

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}
