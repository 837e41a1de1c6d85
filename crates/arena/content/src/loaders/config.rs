//! Arena configuration loader.

use std::path::Path;

use arena_core::ArenaConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for arena rules from TOML files.
///
/// Missing keys fall back to [`ArenaConfig::default`]. The score curve is
/// validated while parsing.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<ArenaConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| e.context(format!("in config file {}", path.display())))
    }

    pub fn parse(content: &str) -> LoadResult<ArenaConfig> {
        let config: ArenaConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.max_daily_challenges == 0 {
            anyhow::bail!("max_daily_challenges must be at least 1");
        }
        if config.max_turns == 0 {
            anyhow::bail!("max_turns must be at least 1");
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::ScoreStep;

    #[test]
    fn empty_document_is_the_default_config() {
        assert_eq!(ConfigLoader::parse("").unwrap(), ArenaConfig::default());
    }

    #[test]
    fn parses_rules_and_curve() {
        let config = ConfigLoader::parse(
            r#"
            required_stage = 10
            require_active = true

            [[score_curve]]
            min_gap = -100
            win_gain = 5
            lose_penalty = 10

            [[score_curve]]
            min_gap = 100
            win_gain = 25
            lose_penalty = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.required_stage, 10);
        assert!(config.require_active);
        assert_eq!(config.max_daily_challenges, ArenaConfig::DEFAULT_MAX_DAILY_CHALLENGES);
        assert_eq!(
            config.score_curve.steps(),
            &[ScoreStep::new(-100, 5, 10), ScoreStep::new(100, 25, 2)]
        );
    }

    #[test]
    fn rejects_invalid_curve_and_zero_budget() {
        let unsorted = r#"
            [[score_curve]]
            min_gap = 10
            win_gain = 5
            lose_penalty = 0

            [[score_curve]]
            min_gap = 0
            win_gain = 6
            lose_penalty = 0
        "#;
        assert!(ConfigLoader::parse(unsorted).is_err());
        assert!(ConfigLoader::parse("max_daily_challenges = 0").is_err());
    }
}
