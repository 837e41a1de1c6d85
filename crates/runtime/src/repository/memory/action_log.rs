//! In-memory ActionRepository implementation.

use crate::repository::{ActionLogEntry, ActionRepository, Result};

/// Action log held in a vector.
///
/// Offsets are entry indices rather than byte positions.
#[derive(Debug, Default)]
pub struct InMemoryActionLog {
    entries: Vec<ActionLogEntry>,
}

impl InMemoryActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ActionRepository for InMemoryActionLog {
    fn append(&mut self, entry: &ActionLogEntry) -> Result<u64> {
        let offset = self.entries.len() as u64;
        self.entries.push(entry.clone());
        Ok(offset)
    }

    fn read_at_offset(&self, offset: u64) -> Result<Option<(ActionLogEntry, u64)>> {
        let entry = usize::try_from(offset)
            .ok()
            .and_then(|index| self.entries.get(index));
        Ok(entry.map(|entry| (entry.clone(), offset + 1)))
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn truncate(&mut self, offset: u64) -> Result<()> {
        let len = usize::try_from(offset).unwrap_or(usize::MAX);
        self.entries.truncate(len);
        Ok(())
    }

    fn size(&self) -> Result<u64> {
        Ok(self.entries.len() as u64)
    }

    fn entries(&self) -> Result<Vec<ActionLogEntry>> {
        Ok(self.entries.clone())
    }
}
