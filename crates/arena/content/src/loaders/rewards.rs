//! Reward table loader.

use std::path::Path;

use arena_core::{RewardRow, RewardTable};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Reward table structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardCatalog {
    pub rows: Vec<RewardRow>,
}

/// Loader for the winner's reward table from RON files.
pub struct RewardLoader;

impl RewardLoader {
    /// Load the reward table from a RON file.
    pub fn load(path: &Path) -> LoadResult<RewardTable> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| e.context(format!("in reward file {}", path.display())))
    }

    /// Parse a reward table. Zero-quantity rows are rejected.
    pub fn parse(content: &str) -> LoadResult<RewardTable> {
        let catalog: RewardCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse reward table RON: {}", e))?;

        if let Some(row) = catalog.rows.iter().find(|row| row.quantity == 0) {
            anyhow::bail!("reward row for sheet {} has zero quantity", row.sheet_id);
        }

        Ok(RewardTable::new(catalog.rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::{ItemKind, RewardOracle};

    #[test]
    fn parses_rows_in_order_with_default_grade() {
        let table = RewardLoader::parse(
            r#"(
                rows: [
                    (sheet_id: 303000, kind: Material, quantity: 3),
                    (sheet_id: 10200000, kind: Equipment, grade: 2, quantity: 1),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(
            table.rows(),
            &[
                RewardRow::material(303000, 3),
                RewardRow::new(10200000, ItemKind::Equipment, 2, 1),
            ]
        );
    }

    #[test]
    fn rejects_zero_quantity() {
        let err = RewardLoader::parse("(rows: [(sheet_id: 1, kind: Material, quantity: 0)])")
            .unwrap_err();
        assert!(err.to_string().contains("zero quantity"));
    }
}
