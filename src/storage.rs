//! Storage key definitions and typed accessors for the RSVP contract.

use soroban_sdk::{contracttype, panic_with_error, Address, Env, Vec};

use crate::config::Config;
use crate::event::Event;
use crate::profile::Profile;
use crate::settlement::Settlement;
use crate::validation::MAX_PAGE_SIZE;
use crate::RsvpError;

/// Storage keys for the RSVP contract.
#[contracttype]
#[derive(Clone, Debug)]
pub enum RsvpKey {
    /// Contract configuration (instance storage).
    Config,

    /// Next event id to allocate. Ids start at 0.
    EventCount,

    /// Number of identities that have set a profile.
    ProfileCount,

    /// Maps Address to Profile.
    Profile(Address),

    /// Maps event id to Event, including its participant list.
    Event(u64),

    /// Number of events an Address owns or joined.
    UserEventCount(Address),

    /// Secondary index: the n-th event id an Address owns or joined, in
    /// association order.
    UserEvent(Address, u32),

    /// Final settlement of a closed or cancelled event.
    Settlement(u64),

    /// Set once an Address has withdrawn its payout from an event.
    Claimed(u64, Address),
}

/// Time-to-live for persistent entries, in ledgers.
pub const PERSISTENT_TTL_THRESHOLD: u32 = 518400; // ~30 days
pub const PERSISTENT_TTL_EXTEND: u32 = 2592000; // ~150 days

/// Time-to-live for instance storage, in ledgers.
pub const INSTANCE_TTL_THRESHOLD: u32 = 17280; // ~1 day
pub const INSTANCE_TTL_EXTEND: u32 = 518400; // ~30 days

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

fn bump_persistent(env: &Env, key: &RsvpKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}

// ========== Config ==========

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&RsvpKey::Config)
}

/// Load the configuration, failing with `NotInitialized` before `init`.
pub fn load_config(env: &Env) -> Config {
    env.storage()
        .instance()
        .get(&RsvpKey::Config)
        .unwrap_or_else(|| panic_with_error!(env, RsvpError::NotInitialized))
}

pub fn save_config(env: &Env, config: &Config) {
    env.storage().instance().set(&RsvpKey::Config, config);
}

// ========== Profiles ==========

pub fn load_profile(env: &Env, address: &Address) -> Option<Profile> {
    let key = RsvpKey::Profile(address.clone());
    let profile: Option<Profile> = env.storage().persistent().get(&key);
    if profile.is_some() {
        bump_persistent(env, &key);
    }
    profile
}

pub fn has_profile(env: &Env, address: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&RsvpKey::Profile(address.clone()))
}

pub fn save_profile(env: &Env, address: &Address, profile: &Profile) {
    let key = RsvpKey::Profile(address.clone());
    env.storage().persistent().set(&key, profile);
    bump_persistent(env, &key);
}

pub fn profile_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&RsvpKey::ProfileCount)
        .unwrap_or(0)
}

pub fn increment_profile_count(env: &Env) {
    let count = profile_count(env);
    env.storage()
        .instance()
        .set(&RsvpKey::ProfileCount, &(count + 1));
}

// ========== Events ==========

pub fn event_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&RsvpKey::EventCount)
        .unwrap_or(0)
}

/// Reserve the next event id. Ids are never reused.
pub fn allocate_event_id(env: &Env) -> u64 {
    let id = event_count(env);
    env.storage().instance().set(&RsvpKey::EventCount, &(id + 1));
    id
}

/// Load an event, failing with `NotFound` for unknown ids.
///
/// Reads keep the entry alive as well as writes.
pub fn load_event(env: &Env, event_id: u64) -> Event {
    let key = RsvpKey::Event(event_id);
    let event = env
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or_else(|| panic_with_error!(env, RsvpError::NotFound));
    bump_persistent(env, &key);
    event
}

pub fn save_event(env: &Env, event: &Event) {
    let key = RsvpKey::Event(event.id);
    env.storage().persistent().set(&key, event);
    bump_persistent(env, &key);
}

// ========== Identity -> events index ==========

pub fn user_event_count(env: &Env, address: &Address) -> u32 {
    let key = RsvpKey::UserEventCount(address.clone());
    let count: Option<u32> = env.storage().persistent().get(&key);
    if count.is_some() {
        bump_persistent(env, &key);
    }
    count.unwrap_or(0)
}

/// One page of the event ids associated with `address`.
///
/// `limit` is clamped to `MAX_PAGE_SIZE`.
pub fn user_events(env: &Env, address: &Address, offset: u32, limit: u32) -> Vec<u64> {
    let mut ids = Vec::new(env);
    let count = user_event_count(env, address);
    let end = offset
        .saturating_add(limit.min(MAX_PAGE_SIZE))
        .min(count);

    for position in offset..end {
        let key = RsvpKey::UserEvent(address.clone(), position);
        if let Some(id) = env.storage().persistent().get::<_, u64>(&key) {
            bump_persistent(env, &key);
            ids.push_back(id);
        }
    }
    ids
}

/// Record that `address` is now associated with `event_id`.
///
/// Callers guarantee the association is new, which the participant
/// uniqueness check already enforces. Each association is its own entry so
/// no write grows with the number of events an address has joined.
pub fn index_user_event(env: &Env, address: &Address, event_id: u64) {
    let position = user_event_count(env, address);

    let entry = RsvpKey::UserEvent(address.clone(), position);
    env.storage().persistent().set(&entry, &event_id);
    bump_persistent(env, &entry);

    let count = RsvpKey::UserEventCount(address.clone());
    env.storage().persistent().set(&count, &(position + 1));
    bump_persistent(env, &count);
}

// ========== Settlements ==========

pub fn load_settlement(env: &Env, event_id: u64) -> Option<Settlement> {
    let key = RsvpKey::Settlement(event_id);
    let settlement: Option<Settlement> = env.storage().persistent().get(&key);
    if settlement.is_some() {
        bump_persistent(env, &key);
    }
    settlement
}

pub fn save_settlement(env: &Env, settlement: &Settlement) {
    let key = RsvpKey::Settlement(settlement.event_id);
    env.storage().persistent().set(&key, settlement);
    bump_persistent(env, &key);
}

pub fn is_claimed(env: &Env, event_id: u64, address: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&RsvpKey::Claimed(event_id, address.clone()))
}

pub fn mark_claimed(env: &Env, event_id: u64, address: &Address) {
    let key = RsvpKey::Claimed(event_id, address.clone());
    env.storage().persistent().set(&key, &true);
    bump_persistent(env, &key);
}
