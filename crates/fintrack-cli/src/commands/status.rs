//! Status command

use std::fs;

use anyhow::Result;
use fintrack_core::config::{StorageBackend, StorageConfig};
use fintrack_core::db::DB_KEY_ENV;
use fintrack_core::summarize;

use super::open_history;

pub fn cmd_status(storage: &StorageConfig, no_encrypt: bool) -> Result<()> {
    println!();
    println!("📊 Fintrack Status");
    println!("   ─────────────────────────────────────────────────────────────");

    println!("   Backend: {}", storage.backend);
    println!("   History key: {}", storage.history_key);

    let Some(path) = storage.resolved_path() else {
        println!("   Location: (no data directory)");
        println!();
        return Ok(());
    };
    println!("   Location: {}", path.display());

    if !path.exists() {
        println!("   Size: (store not initialized)");
        println!();
        return Ok(());
    }

    let has_key = std::env::var(DB_KEY_ENV).is_ok();
    if storage.backend == StorageBackend::Sqlite {
        if let Ok(metadata) = fs::metadata(&path) {
            let size_kb = metadata.len() as f64 / 1024.0;
            if size_kb < 1024.0 {
                println!("   Size: {:.1} KB", size_kb);
            } else {
                println!("   Size: {:.1} MB", size_kb / 1024.0);
            }
        }

        if no_encrypt {
            println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
        } else if has_key {
            println!("   🔒 Encryption: ENABLED ({}=***)", DB_KEY_ENV);
        } else {
            println!("   ❌ Encryption: REQUIRED but {} not set", DB_KEY_ENV);
        }
    }

    match open_history(storage, no_encrypt).and_then(|store| Ok(store.load()?)) {
        Ok(history) => {
            let summary = summarize(&history);
            println!();
            println!("   Entries: {}", summary.entries);
            if let (Some(first), Some(last)) = (&summary.first_date, &summary.last_date) {
                println!("   Dates: {} → {}", first, last);
            }
        }
        Err(e) => {
            println!();
            println!("   ❌ Error opening store: {}", e);
            if storage.backend == StorageBackend::Sqlite {
                if !no_encrypt && !has_key {
                    println!("      Set {} or use --no-encrypt", DB_KEY_ENV);
                } else if has_key {
                    println!("      (Check if {} is correct)", DB_KEY_ENV);
                }
            }
        }
    }

    println!();
    Ok(())
}
