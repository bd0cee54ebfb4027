//! Append-only trace file with size-based rotation.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// When the trace file rotates and how many rotated copies survive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    pub max_bytes: u64,
    pub max_backups: usize,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_bytes: 5 * 1024 * 1024,
            max_backups: 3,
        }
    }
}

/// Line-oriented writer shared by the span exporter.
///
/// The file is opened lazily on the first write. Before each write, a file
/// larger than the policy limit is renamed to `<name>.<unix-millis>` and the
/// oldest rotated copies beyond `max_backups` are removed.
pub struct RotatingSink {
    path: PathBuf,
    policy: RotationPolicy,
    file: Mutex<Option<File>>,
}

impl RotatingSink {
    #[must_use]
    pub const fn new(path: PathBuf, policy: RotationPolicy) -> Self {
        Self {
            path,
            policy,
            file: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline and flushes.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be rotated, opened or written, or when a
    /// previous writer panicked while holding the lock.
    pub fn append(&self, line: &str) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("trace sink poisoned: {e}")))?;

        if self.needs_rotation() {
            *guard = None;
            self.rotate()?;
        }

        if guard.is_none() {
            *guard = Some(OpenOptions::new().create(true).append(true).open(&self.path)?);
        }
        let file = guard
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "trace file not open"))?;

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn needs_rotation(&self) -> bool {
        fs::metadata(&self.path).is_ok_and(|meta| meta.len() > self.policy.max_bytes)
    }

    fn rotate(&self) -> io::Result<()> {
        let millis = chrono::Utc::now().timestamp_millis();

        let mut rotated = self.path.clone().into_os_string();
        rotated.push(format!(".{millis}"));
        fs::rename(&self.path, PathBuf::from(rotated))?;

        self.prune_backups()
    }

    /// Rotated copies of this sink, newest first.
    fn backups(&self) -> io::Result<Vec<PathBuf>> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let Some(name) = self.path.file_name().and_then(|n| n.to_str()) else {
            return Ok(vec![]);
        };
        let prefix = format!("{name}.");

        let mut backups: Vec<(u128, PathBuf)> = fs::read_dir(dir)?
            .filter_map(std::result::Result::ok)
            .filter_map(|entry| {
                let file_name = entry.file_name();
                let stamp = file_name.to_str()?.strip_prefix(&prefix)?.parse().ok()?;
                Some((stamp, entry.path()))
            })
            .collect();

        backups.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(backups.into_iter().map(|(_, path)| path).collect())
    }

    fn prune_backups(&self) -> io::Result<()> {
        for stale in self.backups()?.iter().skip(self.policy.max_backups) {
            if let Err(e) = fs::remove_file(stale) {
                // Nothing to log to: this is the log.
                eprintln!("failed to remove old trace file {}: {e}", stale.display());
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for RotatingSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingSink")
            .field("path", &self.path)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let sink = RotatingSink::new(path.clone(), RotationPolicy::default());

        sink.append("{\"a\":1}").unwrap();
        sink.append("{\"b\":2}").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "{\"a\":1}\n{\"b\":2}\n");
    }

    #[test]
    fn rotates_and_prunes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let policy = RotationPolicy {
            max_bytes: 4,
            max_backups: 1,
        };
        let sink = RotatingSink::new(path.clone(), policy);

        for line in ["first-line", "second-line", "third-line"] {
            sink.append(line).unwrap();
            std::thread::sleep(std::time::Duration::from_millis(3));
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), "third-line\n");
        let backups = sink.backups().unwrap();
        assert_eq!(backups.len(), 1);
        assert_eq!(fs::read_to_string(&backups[0]).unwrap(), "second-line\n");
    }
}
