//! Process-level exclusive lock for the desk tree.
//!
//! At most one write command holds exclusive access at any time. Lock is
//! released when the guard is dropped (e.g. on process exit or when the
//! command finishes).

use crate::config::Config;
use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::OpenOptions;
use std::io;
use std::thread;
use std::time::{Duration, Instant};

/// Name of the lock file under the desk root.
const LOCK_FILE_NAME: &str = ".deskctl.lock";

/// Backoff between try_lock attempts.
const POLL_INTERVAL_MS: u64 = 100;

/// Guard that holds the exclusive lock; releasing on drop.
pub struct DeskLockGuard {
    _file: std::fs::File,
}

/// Acquires an exclusive lock on the desk root, waiting up to the configured
/// timeout. Returns a guard that releases the lock when dropped.
///
/// Fails with an actionable error if the lock cannot be acquired within the timeout.
pub fn acquire_desk_lock(config: &Config) -> Result<DeskLockGuard> {
    let desk_root = config.paths.desk_root.as_path();
    let lock_path = desk_root.join(LOCK_FILE_NAME);
    let timeout_secs = config.concurrency.lock_timeout_secs;

    // Ensure desk root exists so we can create the lock file
    if !desk_root.exists() {
        anyhow::bail!(
            "Desk root does not exist: {}. Run 'deskctl init' first.",
            desk_root.display()
        );
    }

    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&lock_path)
        .with_context(|| format!("Failed to open lock file: {}", lock_path.display()))?;

    let deadline = Instant::now() + Duration::from_secs(timeout_secs);
    let poll = Duration::from_millis(POLL_INTERVAL_MS);

    loop {
        match file.try_lock_exclusive() {
            Ok(()) => {
                return Ok(DeskLockGuard { _file: file });
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                if Instant::now() >= deadline {
                    anyhow::bail!(
                        "Another deskctl write command is in progress. \
                         Wait for it to finish or retry later. \
                         (Timed out after {} seconds waiting for exclusive access.)",
                        timeout_secs
                    );
                }
                thread::sleep(poll);
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to acquire lock: {}", lock_path.display()));
            }
        }
    }
}
