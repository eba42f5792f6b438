//! Test fixtures and data generators

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A room name no other test uses
pub fn unique_room() -> String {
    format!("room-{}", unique_suffix())
}

/// Create a throwaway static directory holding an `index.html`
pub fn static_dir_with_index(body: &str) -> std::io::Result<PathBuf> {
    let dir = std::env::temp_dir().join(format!(
        "chat-relay-static-{}-{}",
        std::process::id(),
        unique_suffix()
    ));
    std::fs::create_dir_all(&dir)?;
    std::fs::write(dir.join("index.html"), body)?;
    Ok(dir)
}
