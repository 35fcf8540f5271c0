//! Contract-wide configuration.

use soroban_sdk::{contracttype, Address};

/// Configuration set once by `init` and adjusted by the admin.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Address allowed to change configuration and upgrade the contract.
    pub admin: Address,

    /// Token contract used for stake escrow.
    pub stake_token: Address,

    /// Stake required per participant for events created from now on.
    pub stake_amount: i128,

    /// Whether event owners escrow the stake when creating an event.
    /// Owners are exempt by default.
    pub owner_stakes: bool,
}

impl Config {
    pub fn new(admin: Address, stake_token: Address, stake_amount: i128) -> Self {
        Self {
            admin,
            stake_token,
            stake_amount,
            owner_stakes: false,
        }
    }
}
