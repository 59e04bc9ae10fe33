//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `resolve_storage` - Config file plus command-line overrides
//! - `open_store` / `open_history` - Open the configured backend
//! - `cmd_init` - Write the default config

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use fintrack_core::config::{load_config, StorageBackend, StorageConfig, DEFAULT_CONFIG};
use fintrack_core::{Database, FileStore, HistoryStore, KeyValueStore};
use tracing::debug;

/// Load the storage config and apply `--store` / `--backend`
pub fn resolve_storage(
    config_path: Option<&Path>,
    store: Option<&Path>,
    backend: Option<&str>,
) -> Result<StorageConfig> {
    let mut storage = load_config(config_path)
        .context("Failed to load config")?
        .storage;

    if let Some(backend) = backend {
        storage.backend = backend.parse::<StorageBackend>().map_err(|e| anyhow!(e))?;
    }
    if let Some(store) = store {
        storage.path = Some(store.to_path_buf());
    }

    Ok(storage)
}

/// Open the configured backend
///
/// The sqlite backend is encrypted by default, or unencrypted if --no-encrypt.
pub fn open_store(storage: &StorageConfig, no_encrypt: bool) -> Result<Box<dyn KeyValueStore>> {
    let path = storage
        .resolved_path()
        .context("No store path configured and no user data directory found")?;
    debug!(backend = %storage.backend, path = %path.display(), "Opening history store");

    match storage.backend {
        StorageBackend::File => {
            let store = FileStore::new(&path).context("Failed to open file store")?;
            Ok(Box::new(store))
        }
        StorageBackend::Sqlite => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory {}", parent.display())
                })?;
            }
            let path_str = path
                .to_str()
                .context("Database path is not valid UTF-8")?;
            let db = if no_encrypt {
                Database::new_unencrypted(path_str)
                    .context("Failed to open database (unencrypted)")?
            } else {
                Database::new(path_str).context("Failed to open database")?
            };
            Ok(Box::new(db))
        }
    }
}

/// Open the history behind the configured backend and key
pub fn open_history(
    storage: &StorageConfig,
    no_encrypt: bool,
) -> Result<HistoryStore<Box<dyn KeyValueStore>>> {
    let store = open_store(storage, no_encrypt)?;
    Ok(HistoryStore::with_key(store, storage.history_key.clone()))
}

pub fn cmd_init(config_target: &Path, storage: &StorageConfig) -> Result<()> {
    println!("🔧 Initializing fintrack...");

    if config_target.exists() {
        println!("   Config already exists: {}", config_target.display());
    } else {
        if let Some(parent) = config_target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(config_target, DEFAULT_CONFIG)
            .with_context(|| format!("Failed to write {}", config_target.display()))?;
        println!("   Wrote default config: {}", config_target.display());
    }

    match storage.resolved_path() {
        Some(path) => println!("   History store ({}): {}", storage.backend, path.display()),
        None => println!("   History store ({}): (no data directory)", storage.backend),
    }

    println!("✅ Ready!");
    println!();
    println!("Next steps:");
    println!("  1. Record a month: fintrack analyze --income 50000 --housing 20000 --food 5000");
    println!("  2. View history:   fintrack history");

    Ok(())
}
