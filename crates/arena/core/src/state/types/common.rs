use core::fmt;

use sha2::{Digest, Sha256};

/// Fixed-width identity of an agent, avatar, or weekly arena record.
///
/// Equality is byte-exact. Addresses key every record in
/// [`WorldState`](crate::state::WorldState), so their ordering is also the
/// iteration order of a snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Address(pub [u8; Address::LEN]);

impl Address {
    pub const LEN: usize = 20;

    pub const ZERO: Self = Self([0; Self::LEN]);

    /// Reserved identity for administrative actions (daily reset, epoch end).
    ///
    /// System actions are deterministic transitions that maintain arena
    /// invariants but are not initiated by any player.
    pub const SYSTEM: Self = Self([0xff; Self::LEN]);

    pub const fn new(bytes: [u8; Self::LEN]) -> Self {
        Self(bytes)
    }

    /// Builds an address whose trailing bytes hold `value` (big-endian).
    ///
    /// Convenient for fixtures and tooling; production addresses come from
    /// key material.
    pub const fn from_low_u64(value: u64) -> Self {
        let mut bytes = [0u8; Self::LEN];
        let be = value.to_be_bytes();
        let mut i = 0;
        while i < 8 {
            bytes[Self::LEN - 8 + i] = be[i];
            i += 1;
        }
        Self(bytes)
    }

    #[inline]
    pub const fn is_system(&self) -> bool {
        let mut i = 0;
        while i < Self::LEN {
            if self.0[i] != 0xff {
                return false;
            }
            i += 1;
        }
        true
    }

    pub const fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0x")?;
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Unique identifier of a non-fungible inventory item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub [u8; 16]);

impl ItemId {
    pub const fn from_u128(value: u128) -> Self {
        Self(value.to_be_bytes())
    }

    /// Derives the identifier of the `index`-th item minted under `seed`.
    ///
    /// Minting never consults local entropy, so replaying the same action
    /// with the same seed yields the same identifiers.
    pub fn derive(seed: u64, index: u32) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"arena:item");
        hasher.update(seed.to_be_bytes());
        hasher.update(index.to_be_bytes());
        let digest = hasher.finalize();

        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&digest[..16]);
        Self(bytes)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_address_is_reserved() {
        assert!(Address::SYSTEM.is_system());
        assert!(!Address::ZERO.is_system());
        assert!(!Address::from_low_u64(7).is_system());
    }

    #[test]
    fn display_is_prefixed_lowercase_hex() {
        let address = Address::from_low_u64(0xabcd);
        let text = address.to_string();
        assert_eq!(text.len(), 2 + Address::LEN * 2);
        assert!(text.ends_with("abcd"));
        assert_eq!(hex::encode(address.as_bytes()), text[2..]);
    }

    #[test]
    fn minted_item_ids_depend_on_seed_and_index() {
        assert_eq!(ItemId::derive(9, 0), ItemId::derive(9, 0));
        assert_ne!(ItemId::derive(9, 0), ItemId::derive(9, 1));
        assert_ne!(ItemId::derive(9, 0), ItemId::derive(10, 0));
    }
}
