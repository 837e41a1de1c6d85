//! Hashing helpers for logging.

/// Renders the first 8 bytes of a state root as hex for compact log lines.
pub fn short_root(root: &[u8; 32]) -> String {
    hex::encode(&root[..8])
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::WorldState;

    #[test]
    fn test_short_root_consistency() {
        let state = WorldState::new();
        let first = short_root(&state.state_root().unwrap());
        let second = short_root(&state.state_root().unwrap());
        assert_eq!(first, second, "Same state should produce same root");
    }

    #[test]
    fn test_short_root_format() {
        let root = [0xab; 32];
        let short = short_root(&root);
        assert_eq!(short.len(), 16, "Short root should be 16 hex chars (8 bytes)");
        assert_eq!(short, "abababababababab");
    }
}
