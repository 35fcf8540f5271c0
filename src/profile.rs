//! Profile struct and related types.

use soroban_sdk::{contracttype, String};

/// Display profile keyed by the owning address.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Profile {
    /// Display name, never empty.
    pub name: String,

    /// Avatar reference (IPFS or HTTP URI). May be empty.
    pub avatar_url: String,

    /// Ledger sequence of the first update.
    pub created_at: u64,

    /// Ledger sequence of the latest update.
    pub updated_at: u64,
}

impl Profile {
    /// Create a new profile.
    pub fn new(name: String, avatar_url: String, created_at: u64) -> Self {
        Self {
            name,
            avatar_url,
            created_at,
            updated_at: created_at,
        }
    }

    /// Replace the display fields wholesale.
    pub fn overwrite(&mut self, name: String, avatar_url: String, updated_at: u64) {
        self.name = name;
        self.avatar_url = avatar_url;
        self.updated_at = updated_at;
    }
}
