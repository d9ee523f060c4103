//! Durable set of already-dispatched order ids.
//!
//! Backed by a line-oriented append file, one id per line. Deduplication is
//! read-side plus check-before-write; the file itself enforces nothing.
//!
//! The check-then-mark sequence of a dispatch is made atomic here: a single
//! mutex serializes every file access, and ids of dispatches still running
//! are held in an in-flight set, so two concurrent dispatches of the same
//! order cannot both pass the membership test before either marks it.

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Ledger read failed at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Ledger write failed at {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Outcome of [`ProcessedOrders::try_reserve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reservation {
    /// Caller owns the id until `commit` or `abandon`.
    Acquired,
    /// The id is in the durable set, or another dispatch of it is running.
    AlreadyProcessed,
}

/// File-backed processed-orders ledger with atomic check-and-mark.
#[derive(Debug)]
pub struct ProcessedOrders {
    path: PathBuf,
    in_flight: Mutex<HashSet<String>>,
}

impl ProcessedOrders {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Test whether `id` has already been durably marked.
    ///
    /// A missing ledger file is the first-run case and reads as the empty
    /// set; any other read failure propagates, since treating a real order
    /// as unprocessed risks duplicate delivery.
    pub async fn is_processed(&self, id: &str) -> Result<bool, LedgerError> {
        let _guard = self.in_flight.lock().await;
        Ok(read_set(&self.path).await?.contains(id))
    }

    /// Durably append `id` unless it is already a member.
    pub async fn mark_processed(&self, id: &str) -> Result<(), LedgerError> {
        let _guard = self.in_flight.lock().await;
        append_if_absent(&self.path, id).await
    }

    /// Atomically check membership and claim `id` for the calling dispatch.
    ///
    /// On `Acquired` the caller must finish with [`commit`](Self::commit)
    /// (full delivery) or [`abandon`](Self::abandon) (skip or failure).
    pub async fn try_reserve(&self, id: &str) -> Result<Reservation, LedgerError> {
        let mut in_flight = self.in_flight.lock().await;

        if in_flight.contains(id) {
            return Ok(Reservation::AlreadyProcessed);
        }
        if read_set(&self.path).await?.contains(id) {
            return Ok(Reservation::AlreadyProcessed);
        }

        in_flight.insert(id.to_string());
        Ok(Reservation::Acquired)
    }

    /// Durably mark a reserved `id` and release the reservation.
    pub async fn commit(&self, id: &str) -> Result<(), LedgerError> {
        let mut in_flight = self.in_flight.lock().await;
        append_if_absent(&self.path, id).await?;
        in_flight.remove(id);
        Ok(())
    }

    /// Release a reserved `id` without marking it, so a later retry with
    /// corrected data can still run.
    pub async fn abandon(&self, id: &str) {
        self.in_flight.lock().await.remove(id);
    }
}

async fn read_set(path: &Path) -> Result<HashSet<String>, LedgerError> {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => Ok(contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(HashSet::new()),
        Err(source) => Err(LedgerError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

async fn append_if_absent(path: &Path, id: &str) -> Result<(), LedgerError> {
    if read_set(path).await?.contains(id) {
        return Ok(());
    }

    let write = async {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;
        file.write_all(format!("{id}\n").as_bytes()).await?;
        file.flush().await
    };

    write.await.map_err(|source| LedgerError::Write {
        path: path.to_path_buf(),
        source,
    })
}
