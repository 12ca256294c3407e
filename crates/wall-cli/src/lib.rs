mod error;

pub use error::CliError;

use std::sync::Arc;

use async_trait::async_trait;
use wall_core::{
    composer::Notifier,
    config::WallConfig,
    shell::Shell,
    storage::{ObjectStore, SqliteStorage, SupabaseStorage},
    WallError, WallResult,
};

/// Alerts go to stderr; the process does not continue past an abandoned
/// submission, which is as blocking as a terminal gets.
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn alert(&self, msg: &str) {
        eprintln!("ALERT: {msg}");
    }
}

/// Stands in for the hosted store when the URL or the access key is missing.
/// Every upload fails, so text posts still work.
pub struct UnconfiguredStorage;

#[async_trait]
impl ObjectStore for UnconfiguredStorage {
    async fn upload(&self, _bucket: &str, _key: &str, _bytes: Vec<u8>) -> WallResult<()> {
        Err(WallError::config_error(
            "image uploads need `storage.url` and an access key".into(),
        )
        .into())
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        format!("{bucket}/{key}")
    }
}

/// Picks the object store described by `config`.
pub fn object_store(config: &WallConfig) -> Arc<dyn ObjectStore> {
    if config.storage.url.is_empty() {
        return Arc::new(UnconfiguredStorage);
    }
    match config.storage.resolved_key() {
        Some(key) => Arc::new(SupabaseStorage::new(&config.storage.url, &key)),
        None => {
            tracing::warn!("no storage access key found, image uploads are disabled");
            Arc::new(UnconfiguredStorage)
        }
    }
}

/// Opens local storage and builds the screen.
pub fn setup_shell(config: &WallConfig) -> WallResult<Shell<SqliteStorage>> {
    let storage = SqliteStorage::open(&config.db)?;
    Ok(Shell::new(
        storage,
        config.storage.bucket.clone(),
        object_store(config),
        Arc::new(StderrNotifier),
    ))
}

/// Installs the stderr log subscriber. `RUST_LOG` wins; otherwise only
/// warnings are shown.
pub fn setup_logging() {
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_layer)
        .with_writer(std::io::stderr)
        .try_init();
}
