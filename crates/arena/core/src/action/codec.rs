//! Canonical byte encoding of actions.
//!
//! Actions travel as bincode over their serde form. Decoding re-checks the
//! loadout uniqueness rule so a peer cannot smuggle a repeated item id past
//! the codec.

use crate::action::Action;
use crate::state::ItemId;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("failed to encode action: {0}")]
    Encode(String),

    #[error("failed to decode action: {0}")]
    Decode(String),

    #[error("item {0} appears more than once in the loadout")]
    DuplicateItem(ItemId),
}

impl Action {
    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        bincode::serialize(self).map_err(|e| CodecError::Encode(e.to_string()))
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let action: Action =
            bincode::deserialize(bytes).map_err(|e| CodecError::Decode(e.to_string()))?;

        if let Action::RankingBattle(battle) = &action
            && let Some(id) = battle.duplicate_item()
        {
            return Err(CodecError::DuplicateItem(id));
        }
        Ok(action)
    }
}
