//! Append-only log file repository.
//!
//! [`FileRepository<T>`] stores any serializable type in an append-only log.
//! The action log is its only instantiation today.

use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, ErrorKind, Read, Seek, SeekFrom, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};

use crate::repository::{ActionLogEntry, ActionRepository, RepositoryError, Result};

/// Action log stored as `[u32 length][bincode entry]` records.
pub type FileActionLog = FileRepository<ActionLogEntry>;

/// Generic file-based repository for append-only logs.
///
/// Stores items of type `T` in a file using the format:
/// ```text
/// [u32 length][bincode serialized T]
/// [u32 length][bincode serialized T]
/// ...
/// ```
pub struct FileRepository<T> {
    path: PathBuf,
    writer: BufWriter<File>,
    /// Byte offset of the next write.
    current_offset: u64,
    _phantom: PhantomData<T>,
}

impl<T> FileRepository<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Create a new log file.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::LogAlreadyExists`] if the file is present.
    pub fn create(base_dir: impl AsRef<Path>, filename: impl AsRef<str>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        std::fs::create_dir_all(base_dir)?;

        let path = base_dir.join(filename.as_ref());
        if path.exists() {
            return Err(RepositoryError::LogAlreadyExists(
                path.display().to_string(),
            ));
        }

        let file = OpenOptions::new().create_new(true).write(true).open(&path)?;

        tracing::debug!(target: "runtime::repository", "Created log: {}", path.display());

        Ok(Self::from_file(path, file, 0))
    }

    /// Open an existing log, or create it, and position at its end.
    pub fn open_or_create(base_dir: impl AsRef<Path>, filename: impl AsRef<str>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        std::fs::create_dir_all(base_dir)?;

        let path = base_dir.join(filename.as_ref());
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let current_offset = file.metadata()?.len();

        tracing::debug!(
            target: "runtime::repository",
            "Opened log: {} at offset {}",
            path.display(),
            current_offset
        );

        Ok(Self::from_file(path, file, current_offset))
    }

    fn from_file(path: PathBuf, file: File, current_offset: u64) -> Self {
        Self {
            path,
            writer: BufWriter::new(file),
            current_offset,
            _phantom: PhantomData,
        }
    }

    /// Append an item and return the byte offset it was written at.
    pub fn append(&mut self, item: &T) -> Result<u64> {
        let offset = self.current_offset;

        let bytes =
            bincode::serialize(item).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        let len = u32::try_from(bytes.len()).map_err(|_| {
            RepositoryError::Serialization(format!("entry of {} bytes is too large", bytes.len()))
        })?;

        self.writer.write_all(&len.to_le_bytes())?;
        self.writer.write_all(&bytes)?;

        self.current_offset += 4 + bytes.len() as u64;

        Ok(offset)
    }

    /// Read the item at `byte_offset`.
    ///
    /// Returns `None` past the end of the file, or `Some((item, next_offset))`.
    /// Unflushed writes are not visible.
    pub fn read_at_offset(&self, byte_offset: u64) -> Result<Option<(T, u64)>> {
        let file = File::open(&self.path)?;
        let file_size = file.metadata()?.len();

        if byte_offset >= file_size {
            return Ok(None);
        }

        let mut reader = BufReader::new(file);
        reader.seek(SeekFrom::Start(byte_offset))?;

        let mut len_bytes = [0u8; 4];
        reader.read_exact(&mut len_bytes).map_err(truncated(byte_offset))?;
        let len = u32::from_le_bytes(len_bytes) as usize;

        let mut data = vec![0u8; len];
        reader.read_exact(&mut data).map_err(truncated(byte_offset))?;

        let item = bincode::deserialize(&data).map_err(|e| {
            RepositoryError::CorruptedData(format!("entry at offset {byte_offset}: {e}"))
        })?;

        Ok(Some((item, byte_offset + 4 + len as u64)))
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Cut the log back to `offset`.
    ///
    /// Buffered bytes that were never flushed are dropped rather than written.
    pub fn truncate(&mut self, offset: u64) -> Result<()> {
        let file = OpenOptions::new().append(true).open(&self.path)?;
        let stale = std::mem::replace(&mut self.writer, BufWriter::new(file));
        let (_, _unflushed) = stale.into_parts();

        self.writer.get_ref().set_len(offset)?;
        self.current_offset = offset;

        tracing::debug!(
            target: "runtime::repository",
            "Truncated log: {} to offset {}",
            self.path.display(),
            offset
        );

        Ok(())
    }

    /// Byte offset of the next write.
    pub fn size(&self) -> u64 {
        self.current_offset
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn truncated(offset: u64) -> impl FnOnce(std::io::Error) -> RepositoryError {
    move |e| match e.kind() {
        ErrorKind::UnexpectedEof => {
            RepositoryError::CorruptedData(format!("truncated entry at offset {offset}"))
        }
        _ => RepositoryError::Io(e),
    }
}

impl<T> Drop for FileRepository<T> {
    fn drop(&mut self) {
        if let Err(e) = self.writer.flush() {
            tracing::warn!(
                target: "runtime::repository",
                "Failed to flush log '{}' on drop: {}",
                self.path.display(),
                e
            );
        }
    }
}

impl ActionRepository for FileRepository<ActionLogEntry> {
    fn append(&mut self, entry: &ActionLogEntry) -> Result<u64> {
        FileRepository::append(self, entry)
    }

    fn read_at_offset(&self, offset: u64) -> Result<Option<(ActionLogEntry, u64)>> {
        FileRepository::read_at_offset(self, offset)
    }

    fn flush(&mut self) -> Result<()> {
        FileRepository::flush(self)
    }

    fn truncate(&mut self, offset: u64) -> Result<()> {
        FileRepository::truncate(self, offset)
    }

    fn size(&self) -> Result<u64> {
        Ok(FileRepository::size(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestItem {
        id: u64,
        name: String,
    }

    fn item(id: u64, name: &str) -> TestItem {
        TestItem {
            id,
            name: name.to_string(),
        }
    }

    #[test]
    fn test_read_at_offset() {
        let temp_dir = TempDir::new().unwrap();
        let mut repo = FileRepository::<TestItem>::create(temp_dir.path(), "test.log").unwrap();

        let offset1 = repo.append(&item(1, "first")).unwrap();
        let offset2 = repo.append(&item(2, "second")).unwrap();
        repo.flush().unwrap();

        assert_eq!(offset1, 0);
        let (read1, next1) = repo.read_at_offset(offset1).unwrap().unwrap();
        let (read2, next2) = repo.read_at_offset(offset2).unwrap().unwrap();

        assert_eq!(read1, item(1, "first"));
        assert_eq!(read2, item(2, "second"));
        assert_eq!(next1, offset2);
        assert_eq!(next2, repo.size());
        assert_eq!(repo.read_at_offset(999_999).unwrap(), None);
    }

    #[test]
    fn test_create_refuses_existing_log() {
        let temp_dir = TempDir::new().unwrap();
        drop(FileRepository::<TestItem>::create(temp_dir.path(), "test.log").unwrap());

        let result = FileRepository::<TestItem>::create(temp_dir.path(), "test.log");
        assert!(matches!(result, Err(RepositoryError::LogAlreadyExists(_))));
    }

    #[test]
    fn test_reopen_appends_at_end() {
        let temp_dir = TempDir::new().unwrap();

        let first_size = {
            let mut repo =
                FileRepository::<TestItem>::open_or_create(temp_dir.path(), "test.log").unwrap();
            repo.append(&item(1, "first")).unwrap();
            repo.flush().unwrap();
            repo.size()
        };

        let mut repo =
            FileRepository::<TestItem>::open_or_create(temp_dir.path(), "test.log").unwrap();
        assert_eq!(repo.size(), first_size);

        let offset = repo.append(&item(2, "second")).unwrap();
        repo.flush().unwrap();
        assert_eq!(offset, first_size);
        assert_eq!(repo.read_at_offset(0).unwrap().unwrap().0, item(1, "first"));
    }

    #[test]
    fn test_truncate_drops_flushed_and_buffered_entries() {
        let temp_dir = TempDir::new().unwrap();
        let mut repo = FileRepository::<TestItem>::create(temp_dir.path(), "test.log").unwrap();

        repo.append(&item(1, "kept")).unwrap();
        repo.flush().unwrap();
        let kept = repo.size();

        repo.append(&item(2, "flushed")).unwrap();
        repo.flush().unwrap();
        repo.append(&item(3, "buffered")).unwrap();

        repo.truncate(kept).unwrap();
        assert_eq!(repo.size(), kept);

        let offset = repo.append(&item(4, "after")).unwrap();
        repo.flush().unwrap();
        drop(repo);

        let repo = FileRepository::<TestItem>::open_or_create(temp_dir.path(), "test.log").unwrap();
        assert_eq!(offset, kept);
        assert_eq!(repo.read_at_offset(0).unwrap().unwrap().0, item(1, "kept"));
        let (last, end) = repo.read_at_offset(kept).unwrap().unwrap();
        assert_eq!(last, item(4, "after"));
        assert_eq!(end, repo.size());
    }

    #[test]
    fn test_truncated_entry_is_corrupted() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.log");
        std::fs::write(&path, [10, 0, 0, 0, 1, 2]).unwrap();

        let repo = FileRepository::<TestItem>::open_or_create(temp_dir.path(), "test.log").unwrap();
        assert!(matches!(
            repo.read_at_offset(0),
            Err(RepositoryError::CorruptedData(_))
        ));
    }
}
