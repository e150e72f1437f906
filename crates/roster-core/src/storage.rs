// Rust guideline compliant 2026-10-18

//! Storage module for the user and session files.
//!
//! Users live in a JSONL file, one [`UserRecord`] per line. Sessions live in
//! a single JSON document holding a [`SessionSnapshot`].

use crate::{Error, MemoryDirectory, Result, SessionSnapshot, SessionTable, UserRecord};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

fn validate_path(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "Path cannot be empty",
        )));
    }
    Ok(())
}

/// Writes `bytes` to a temp file next to `path`, then renames it into place.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let temp_path = path.with_extension("tmp");
    {
        let mut file = File::create(&temp_path)?;
        file.write_all(bytes)?;
        file.sync_all()?;
    }
    std::fs::rename(&temp_path, path)?;
    Ok(())
}

/// JSONL-backed store of user records.
#[derive(Debug, Clone)]
pub struct UserStore {
    path: PathBuf,
}

impl UserStore {
    /// Creates a new store.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is empty.
    pub fn new(path: PathBuf) -> Result<Self> {
        validate_path(&path)?;
        Ok(Self { path })
    }

    /// Returns the JSONL file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads every record, reading the file line by line.
    ///
    /// Blank lines are ignored and malformed lines are skipped with a
    /// warning. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be opened or read
    /// - A well-formed record fails validation
    pub fn load_all(&self) -> Result<Vec<UserRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let mut records = Vec::new();

        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<UserRecord>(&line) {
                Ok(record) => {
                    record.validate()?;
                    records.push(record);
                }
                Err(e) => {
                    warn!(
                        path = %self.path.display(),
                        line = number + 1,
                        error = %e,
                        "skipping malformed user record"
                    );
                }
            }
        }

        Ok(records)
    }

    /// Loads every record into an in-memory directory.
    ///
    /// # Errors
    ///
    /// See [`UserStore::load_all`].
    pub fn load_directory(&self) -> Result<MemoryDirectory> {
        Ok(MemoryDirectory::from_records(self.load_all()?))
    }

    /// Loads a single record by (case-insensitive) username.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the user is not found.
    pub fn load_by_name(&self, name: &str) -> Result<UserRecord> {
        let key = name.to_lowercase();
        self.load_all()?
            .into_iter()
            .find(|record| record.key() == key)
            .ok_or_else(|| Error::UserNotFound(name.to_string()))
    }

    /// Saves a single record, replacing an existing one with the same name.
    ///
    /// # Errors
    ///
    /// Returns an error if the record fails validation or the file cannot be
    /// read or written.
    pub fn save(&self, record: &UserRecord) -> Result<()> {
        record.validate()?;

        let mut records = self.load_all()?;
        let key = record.key();
        match records.iter().position(|r| r.key() == key) {
            Some(pos) => records[pos] = record.clone(),
            None => records.push(record.clone()),
        }

        self.save_all(&records)
    }

    /// Replaces the whole file with `records`, atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if any record fails validation or the file cannot be
    /// written.
    pub fn save_all(&self, records: &[UserRecord]) -> Result<()> {
        let mut buffer = Vec::new();
        for record in records {
            record.validate()?;
            serde_json::to_writer(&mut buffer, record)?;
            buffer.push(b'\n');
        }
        write_atomic(&self.path, &buffer)
    }

    /// Deletes a record by (case-insensitive) username.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be rewritten or the user is not
    /// found.
    pub fn delete(&self, name: &str) -> Result<()> {
        let key = name.to_lowercase();
        let mut records = self.load_all()?;
        let initial_len = records.len();
        records.retain(|r| r.key() != key);

        if records.len() == initial_len {
            return Err(Error::UserNotFound(name.to_string()));
        }

        self.save_all(&records)
    }

    /// Executes a closure with an exclusive lock on the store.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The lock cannot be acquired
    /// - The closure returns an error
    pub fn with_lock<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        with_sibling_lock(&self.path, f)
    }
}

fn with_sibling_lock<F, T>(path: &Path, f: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    use fs2::FileExt;
    use std::fs::OpenOptions;

    let lock_path = path.with_extension("lock");
    let lock_file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&lock_path)?;

    lock_file.try_lock_exclusive().map_err(|e| {
        Error::Io(std::io::Error::new(
            std::io::ErrorKind::WouldBlock,
            format!("Failed to acquire lock: {}", e),
        ))
    })?;

    let result = f();
    let _ = lock_file.unlock();

    result
}

/// JSON-backed store of the session table.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Creates a new store.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is empty.
    pub fn new(path: PathBuf) -> Result<Self> {
        validate_path(&path)?;
        Ok(Self { path })
    }

    /// Returns the JSON file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the session table. A missing file means nobody is online.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn load(&self) -> Result<SessionTable> {
        if !self.path.exists() {
            return Ok(SessionTable::new());
        }
        let reader = BufReader::new(File::open(&self.path)?);
        let snapshot: SessionSnapshot = serde_json::from_reader(reader)?;
        Ok(SessionTable::from_snapshot(snapshot))
    }

    /// Saves the session table atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, sessions: &SessionTable) -> Result<()> {
        let content = serde_json::to_vec_pretty(&sessions.snapshot())?;
        write_atomic(&self.path, &content)
    }

    /// Loads the table, applies `change`, and saves it, all under an
    /// exclusive lock on a sibling `.lock` file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The lock is held by another process
    /// - The file cannot be read or written
    pub fn update<F, T>(&self, change: F) -> Result<T>
    where
        F: FnOnce(&mut SessionTable) -> T,
    {
        self.with_lock(|| {
            let mut sessions = self.load()?;
            let outcome = change(&mut sessions);
            self.save(&sessions)?;
            Ok(outcome)
        })
    }

    /// Executes a closure with an exclusive lock on the store.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The lock cannot be acquired
    /// - The closure returns an error
    pub fn with_lock<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        with_sibling_lock(&self.path, f)
    }
}
