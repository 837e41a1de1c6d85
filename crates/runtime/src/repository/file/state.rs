//! File-based StateRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use arena_core::WorldState;

use crate::repository::{RepositoryError, Result, StateRepository};

/// File-based implementation of StateRepository.
///
/// Snapshots are stored as `state_{nonce}.bin` in bincode, the same encoding
/// the state root is computed over. Writes go to a temp file first and are
/// renamed into place.
pub struct FileStateRepository {
    base_dir: PathBuf,
}

impl FileStateRepository {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn state_path(&self, nonce: u64) -> PathBuf {
        self.base_dir.join(format!("state_{}.bin", nonce))
    }
}

impl StateRepository for FileStateRepository {
    fn save(&self, nonce: u64, state: &WorldState) -> Result<()> {
        let path = self.state_path(nonce);
        let temp_path = path.with_extension("bin.tmp");

        let bytes =
            bincode::serialize(state).map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!(
            target: "runtime::repository",
            "Saved state[{}] to {}",
            nonce,
            path.display()
        );

        Ok(())
    }

    fn load(&self, nonce: u64) -> Result<Option<WorldState>> {
        let path = self.state_path(nonce);

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let state: WorldState = bincode::deserialize(&bytes)
            .map_err(|e| RepositoryError::CorruptedData(format!("{}: {e}", path.display())))?;

        tracing::debug!(
            target: "runtime::repository",
            "Loaded state[{}] from {}",
            nonce,
            path.display()
        );

        Ok(Some(state))
    }

    fn exists(&self, nonce: u64) -> bool {
        self.state_path(nonce).exists()
    }

    fn delete(&self, nonce: u64) -> Result<()> {
        let path = self.state_path(nonce);

        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!(target: "runtime::repository", "Deleted state[{}]", nonce);
        }

        Ok(())
    }

    fn list_nonces(&self) -> Result<Vec<u64>> {
        let mut nonces = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(nonce_str) = filename
                    .strip_prefix("state_")
                    .and_then(|s| s.strip_suffix(".bin"))
                && let Ok(nonce) = nonce_str.parse::<u64>()
            {
                nonces.push(nonce);
            }
        }

        nonces.sort_unstable();
        Ok(nonces)
    }
}
