//! Append-only line writer with size-based rotation.
//!
//! Shared by the OTLP span exporter and the critical-error diagnostics file.
//! When the active file grows past the size limit it is renamed to
//! `<name>.<unix-seconds>` (with a `-<n>` suffix when that name is taken) and
//! a fresh file is started; only the newest backups are kept.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Rotation threshold (10 MB).
const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Rotated files kept next to the active one.
const BACKUPS_TO_KEEP: usize = 3;

pub(crate) struct FileWriter {
    path: PathBuf,
    max_bytes: u64,
    /// Opened lazily on the first write so construction never fails.
    file: Mutex<Option<File>>,
}

impl FileWriter {
    pub(crate) const fn new(path: PathBuf) -> Self {
        Self {
            path,
            max_bytes: DEFAULT_MAX_BYTES,
            file: Mutex::new(None),
        }
    }

    #[cfg(test)]
    const fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Appends `line` plus a newline and flushes.
    ///
    /// Missing parent directories are created on first open.
    pub(crate) fn write_line(&self, line: &str) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("writer lock poisoned: {e}")))?;

        if self.needs_rotation() {
            *guard = None;
            self.rotate()?;
        }

        if guard.is_none() {
            *guard = Some(self.open()?);
        }
        let file = guard
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "no file available"))?;

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn open(&self) -> io::Result<File> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        OpenOptions::new().create(true).append(true).open(&self.path)
    }

    fn needs_rotation(&self) -> bool {
        fs::metadata(&self.path).is_ok_and(|meta| meta.len() > self.max_bytes)
    }

    fn rotate(&self) -> io::Result<()> {
        fs::rename(&self.path, self.backup_path())?;
        self.prune_backups()
    }

    /// First unused `<name>.<secs>` or `<name>.<secs>-<n>`.
    fn backup_path(&self) -> PathBuf {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_secs();

        let mut attempt = 0_u32;
        loop {
            let mut name = self.path.clone().into_os_string();
            if attempt == 0 {
                name.push(format!(".{stamp}"));
            } else {
                name.push(format!(".{stamp}-{attempt}"));
            }
            let candidate = PathBuf::from(name);
            if !candidate.exists() {
                return candidate;
            }
            attempt += 1;
        }
    }

    fn prune_backups(&self) -> io::Result<()> {
        let Some(dir) = self.path.parent() else {
            return Ok(());
        };
        let Some(prefix) = backup_prefix(&self.path) else {
            return Ok(());
        };

        let mut backups: Vec<(PathBuf, Option<SystemTime>)> = fs::read_dir(dir)?
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_str().is_some_and(|n| n.starts_with(&prefix)))
            .map(|entry| {
                let modified = entry.metadata().and_then(|m| m.modified()).ok();
                (entry.path(), modified)
            })
            .collect();

        // Newest first; same-second backups fall back to name order.
        backups.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));

        for (stale, _) in backups.into_iter().skip(BACKUPS_TO_KEEP) {
            let _ = fs::remove_file(stale);
        }
        Ok(())
    }
}

fn backup_prefix(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| format!("{name}."))
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .finish_non_exhaustive()
    }
}
