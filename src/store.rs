//! Durable record of claimed addresses.
//!
//! The file holds one lowercase `0x` address per line and is only ever
//! appended to. Writers hold [`ClaimStore::lock`] across load, claim and
//! append so that two processes cannot record the same address.

use crate::address::Address;
use anyhow::{Context, Result};
use fs2::FileExt;
use log::{debug, warn};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Append-only claim file.
#[derive(Debug)]
pub struct ClaimStore {
    path: PathBuf,
    file: File,
}

/// Exclusive advisory lock on a [`ClaimStore`], released on drop.
#[derive(Debug)]
pub struct StoreLock<'a> {
    store: &'a ClaimStore,
}

impl Drop for StoreLock<'_> {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.store.file) {
            warn!(
                "Failed to unlock claim store {}: {e}",
                self.store.path.display()
            );
        }
    }
}

impl ClaimStore {
    /// Opens (creating if needed) the claim file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create claim store directory: {}", parent.display())
            })?;
        }

        let file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&path)
            .with_context(|| format!("Failed to open claim store: {}", path.display()))?;

        debug!("Opened claim store at {}", path.display());
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Blocks until this handle holds the exclusive lock on the file.
    pub fn lock(&self) -> Result<StoreLock<'_>> {
        FileExt::lock_exclusive(&self.file)
            .with_context(|| format!("Failed to lock claim store: {}", self.path.display()))?;
        debug!("Locked claim store {}", self.path.display());
        Ok(StoreLock { store: self })
    }

    /// Reads every recorded address.
    pub fn load(&self) -> Result<Vec<Address>> {
        (&self.file)
            .seek(SeekFrom::Start(0))
            .context("Failed to seek claim store")?;

        let mut claimed = Vec::new();
        for (i, line) in BufReader::new(&self.file).lines().enumerate() {
            let line = line.context("Failed to read line from claim store")?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let address = line.parse::<Address>().with_context(|| {
                format!(
                    "Corrupt claim store {} at line {}: '{}'",
                    self.path.display(),
                    i + 1,
                    line
                )
            })?;
            claimed.push(address);
        }

        debug!("Loaded {} claims from {}", claimed.len(), self.path.display());
        Ok(claimed)
    }

    /// Appends one address and flushes it to disk.
    pub fn append(&self, address: &Address) -> Result<()> {
        let mut writer = BufWriter::new(&self.file);
        writeln!(writer, "{address}").context("Failed to write claim")?;
        writer.flush().context("Failed to flush claim store")?;
        drop(writer);
        self.file.sync_data().context("Failed to sync claim store")?;
        Ok(())
    }
}
