//! Raw-payload archival.
//!
//! Every inbound webhook body is written verbatim to disk before any
//! parsing, so malformed or unexpected payloads can be replayed later.

use std::path::{Path, PathBuf};

use chrono::Utc;

/// Write `raw` to `<dir>/raw_<timestamp>.txt`, creating directories as
/// needed, and return the path written.
pub async fn save_raw_payload(dir: &Path, raw: &[u8]) -> std::io::Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;

    let timestamp = Utc::now().format("%Y%m%d%H%M%S%f");
    let path = dir.join(format!("raw_{timestamp}.txt"));
    tokio::fs::write(&path, raw).await?;

    Ok(path)
}
