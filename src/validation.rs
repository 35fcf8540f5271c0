//! Input validation for profiles, events and configuration.
//!
//! - Profile names: 1-64 bytes
//! - Avatar URLs: 0-256 bytes
//! - Event names: 1-64 bytes
//! - Seats: 1-200, the owner's seat included
//! - Times: end strictly after start
//! - Stake amounts: non-negative

use soroban_sdk::String;

/// Maximum length of a profile or event name, in bytes.
pub const MAX_NAME_LENGTH: u32 = 64;

/// Maximum length of an avatar URL, in bytes.
pub const MAX_AVATAR_URL_LENGTH: u32 = 256;

/// Maximum seats per event, the owner's seat included. Bounds the size of
/// one event entry and the cost of settling it in a single invocation.
pub const MAX_SEATS: u32 = 200;

/// Maximum number of ids returned by one `get_events` page.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Validate a display or event name.
pub fn validate_name(name: &String) -> bool {
    let len = name.len();
    len > 0 && len <= MAX_NAME_LENGTH
}

pub fn validate_avatar_url(avatar_url: &String) -> bool {
    avatar_url.len() <= MAX_AVATAR_URL_LENGTH
}

/// Validate the shape of a new event.
pub fn validate_event(name: &String, seats: u32, start_time: u64, end_time: u64) -> bool {
    validate_name(name) && validate_seats(seats) && end_time > start_time
}

#[inline]
pub fn validate_seats(seats: u32) -> bool {
    seats > 0 && seats <= MAX_SEATS
}

#[inline]
pub fn validate_stake_amount(amount: i128) -> bool {
    amount >= 0
}
