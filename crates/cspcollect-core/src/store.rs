use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{CollectError, Result};
use crate::record::LogRecord;

/// Upper bound on candidate names tried for one record before the write is
/// reported as a persistence failure.
const MAX_NAME_ATTEMPTS: usize = 20;

/// Flat directory of stored records, one JSON file per accepted report.
/// The directory is the only resource shared between in-flight requests;
/// create-if-absent file semantics stand in for locks.
#[derive(Debug, Clone)]
pub struct RecordStore {
    root: PathBuf,
}

impl RecordStore {
    /// Open the store, creating the directory and confirming it is
    /// writable. Runs once at startup; an unwritable location is reported
    /// here rather than silently dropping every later report.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)
            .map_err(|err| CollectError::OutputUnwritable(format!("{}: {err}", root.display())))?;

        let probe = root.join(format!(".cspcollect.probe.{}", uuid::Uuid::new_v4().simple()));
        fs::OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(&probe)
            .map_err(|err| CollectError::OutputUnwritable(format!("{}: {err}", root.display())))?;
        let _ = fs::remove_file(&probe);

        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist one record under a collision-free, chronologically sortable
    /// name derived from the record's own collection timestamp. The record
    /// is fully written and fsynced before it becomes visible, and an
    /// existing record is never overwritten.
    pub fn persist(&self, record: &LogRecord) -> Result<PathBuf> {
        let mut payload = record.to_json()?;
        payload.push('\n');
        let stem = record.file_stamp();

        let tmp_path = self.root.join(format!(
            ".{stem}.cspcollect.tmp.{}",
            uuid::Uuid::new_v4().simple()
        ));
        {
            let mut tmp = fs::OpenOptions::new()
                .create_new(true)
                .write(true)
                .open(&tmp_path)?;
            tmp.write_all(payload.as_bytes())?;
            tmp.sync_all()?;
        }

        let published = self.publish(&tmp_path, &stem);
        let _ = fs::remove_file(&tmp_path);
        if published.is_ok() {
            if let Ok(dir) = fs::File::open(&self.root) {
                let _ = dir.sync_all();
            }
        }
        published
    }

    /// Link the finished temp file into place. `hard_link` fails with
    /// `AlreadyExists` when the candidate name is taken, which doubles as
    /// the collision check when concurrent submissions share a microsecond.
    fn publish(&self, tmp_path: &Path, stem: &str) -> Result<PathBuf> {
        for attempt in 0..MAX_NAME_ATTEMPTS {
            let name = if attempt == 0 {
                format!("{stem}.json")
            } else {
                format!("{stem}-{attempt}.json")
            };
            let path = self.root.join(name);
            match fs::hard_link(tmp_path, &path) {
                Ok(()) => return Ok(path),
                Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {}
                Err(err) => return Err(CollectError::Io(err)),
            }
        }
        Err(CollectError::NameExhausted {
            stem: stem.to_string(),
            attempts: MAX_NAME_ATTEMPTS,
        })
    }
}

/// Parse a stored record file back into a JSON value.
pub fn load_record(path: &Path) -> Result<Value> {
    let raw = fs::read(path)?;
    Ok(serde_json::from_slice(&raw)?)
}
