//! # Soroban Crypto RSVP
//!
//! Staked event RSVPs for the Soroban blockchain.
//!
//! Users publish events with a fixed seat count, others RSVP by escrowing a
//! token stake, the owner checks attendees in, and closing or cancelling the
//! event settles the escrow:
//!
//! - Profiles (display name + avatar) are required before acting
//! - The owner is auto-registered as the first, attended participant
//! - Closing refunds attendees and splits no-show stake among them
//! - Cancelling refunds every participant in full
//! - Each recipient withdraws their own payout with `claim_payout`
//!
//! ## Usage
//!
//! ```rust,ignore
//! client.update_profile(&name, &avatar_url, &alice);
//! let event_id = client.create_event(&name, &10, &start, &end, &alice);
//!
//! client.register_to_event(&event_id, &stake, &bob);
//! client.check_in_participant(&event_id, &bob, &alice);
//! client.close_event(&event_id, &alice);
//! client.claim_payout(&event_id, &bob);
//! ```

#![no_std]

mod config;
mod event;
mod events;
mod profile;
mod settlement;
mod storage;
mod validation;

pub use config::Config;
pub use event::{Event, EventStatus, Participant};
pub use profile::Profile;
pub use settlement::{Payout, Settlement};
pub use storage::RsvpKey;
pub use validation::{MAX_AVATAR_URL_LENGTH, MAX_NAME_LENGTH, MAX_PAGE_SIZE, MAX_SEATS};

use soroban_sdk::{
    contract, contractimpl, log, panic_with_error, token, Address, BytesN, Env, String, Vec,
};

use crate::events::*;

/// Error codes for the RSVP contract.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum RsvpError {
    /// Contract has already been initialized.
    AlreadyInitialized = 1,
    /// Contract has not been initialized.
    NotInitialized = 2,
    /// Malformed argument: empty name, bad seat count, end before start.
    InvalidInput = 3,
    /// Caller has no profile.
    ProfileRequired = 4,
    /// Unknown event id.
    NotFound = 5,
    /// Caller is not allowed to perform this operation.
    Unauthorized = 6,
    /// Event is closed or cancelled.
    EventNotOpen = 7,
    /// Event cannot move to the requested status.
    InvalidTransition = 8,
    /// Caller already participates in the event.
    AlreadyRegistered = 9,
    /// Every seat is taken.
    EventFull = 10,
    /// Tendered stake or token balance is below the required stake.
    InsufficientStake = 11,
    /// Address is not a participant of the event.
    NotRegistered = 12,
    /// Participant is already marked attended.
    AlreadyCheckedIn = 13,
    /// Event has not been closed or cancelled yet.
    NotSettled = 14,
    /// Payout was already withdrawn.
    AlreadyClaimed = 15,
    /// Caller has no payout in this settlement.
    NothingToClaim = 16,
}

impl From<RsvpError> for soroban_sdk::Error {
    fn from(e: RsvpError) -> Self {
        soroban_sdk::Error::from_contract_error(e as u32)
    }
}

#[contract]
pub struct CryptoRsvpContract;

#[contractimpl]
impl CryptoRsvpContract {
    // ========== Initialization ==========

    /// Initialize the contract.
    ///
    /// # Arguments
    /// * `admin` - Address allowed to reconfigure and upgrade the contract
    /// * `stake_token` - Token contract used for stake escrow
    /// * `stake_amount` - Stake each registrant escrows (non-negative)
    pub fn init(env: Env, admin: Address, stake_token: Address, stake_amount: i128) {
        if storage::has_config(&env) {
            panic_with_error!(&env, RsvpError::AlreadyInitialized);
        }

        admin.require_auth();

        if !validation::validate_stake_amount(stake_amount) {
            panic_with_error!(&env, RsvpError::InvalidInput);
        }

        let config = Config::new(admin, stake_token, stake_amount);
        storage::save_config(&env, &config);
        storage::bump_instance(&env);

        log!(&env, "initialized", config.stake_token, stake_amount);
        emit_config_updated(&env, &config);
    }

    /// Get the current configuration.
    pub fn config(env: Env) -> Config {
        storage::load_config(&env)
    }

    /// Get the admin address.
    pub fn admin(env: Env) -> Address {
        storage::load_config(&env).admin
    }

    // ========== Profiles ==========

    /// Create or overwrite the caller's profile.
    ///
    /// # Panics
    /// - If `name` is empty or too long
    /// - If `avatar_url` is too long
    pub fn update_profile(env: Env, name: String, avatar_url: String, caller: Address) {
        caller.require_auth();
        storage::load_config(&env);

        if !validation::validate_name(&name) || !validation::validate_avatar_url(&avatar_url) {
            panic_with_error!(&env, RsvpError::InvalidInput);
        }

        let now = env.ledger().sequence() as u64;
        let profile = match storage::load_profile(&env, &caller) {
            Some(mut existing) => {
                existing.overwrite(name, avatar_url, now);
                existing
            }
            None => {
                storage::increment_profile_count(&env);
                Profile::new(name, avatar_url, now)
            }
        };

        storage::save_profile(&env, &caller, &profile);
        storage::bump_instance(&env);

        log!(&env, "profile updated", caller);
        emit_profile_updated(&env, &caller, &profile);
    }

    /// Get a profile by address.
    pub fn get_profile(env: Env, address: Address) -> Option<Profile> {
        storage::bump_instance(&env);
        storage::load_profile(&env, &address)
    }

    /// Get total profile count.
    pub fn profile_count(env: Env) -> u64 {
        storage::profile_count(&env)
    }

    // ========== Events ==========

    /// Create an event owned by the caller.
    ///
    /// The caller becomes participant #0, already marked attended. When the
    /// configuration requires owners to stake, the event stake is escrowed
    /// from the caller.
    ///
    /// # Returns
    /// The new event id. Ids start at 0 and are never reused.
    ///
    /// # Panics
    /// - If the caller has no profile
    /// - If the name is empty, seats are out of range, or `end_time <= start_time`
    pub fn create_event(
        env: Env,
        name: String,
        seats: u32,
        start_time: u64,
        end_time: u64,
        caller: Address,
    ) -> u64 {
        caller.require_auth();
        let config = storage::load_config(&env);

        if !storage::has_profile(&env, &caller) {
            panic_with_error!(&env, RsvpError::ProfileRequired);
        }

        if !validation::validate_event(&name, seats, start_time, end_time) {
            panic_with_error!(&env, RsvpError::InvalidInput);
        }

        let owner_stake = if config.owner_stakes {
            config.stake_amount
        } else {
            0
        };
        if owner_stake > 0 {
            Self::collect_stake(&env, &config, &caller, owner_stake);
        }

        let event_id = storage::allocate_event_id(&env);
        let event = Event::new(
            &env,
            event_id,
            caller.clone(),
            name,
            seats,
            start_time,
            end_time,
            config.stake_amount,
            owner_stake,
            env.ledger().sequence() as u64,
        );

        storage::save_event(&env, &event);
        storage::index_user_event(&env, &caller, event_id);
        storage::bump_instance(&env);

        log!(&env, "event created", event_id, caller, seats);
        emit_event_created(&env, &event);

        event_id
    }

    /// Join an open event, escrowing its stake.
    ///
    /// # Arguments
    /// * `event_id` - Event to join
    /// * `max_stake` - Amount the caller is willing to escrow. Only the event
    ///   stake is taken.
    /// * `caller` - Registering address
    ///
    /// # Panics
    /// - If the event does not exist
    /// - If the caller has no profile
    /// - If the event is not open
    /// - If the caller already participates
    /// - If every seat is taken
    /// - If `max_stake` or the caller's token balance is below the event stake
    pub fn register_to_event(env: Env, event_id: u64, max_stake: i128, caller: Address) {
        caller.require_auth();
        let config = storage::load_config(&env);
        let mut event = storage::load_event(&env, event_id);

        if !storage::has_profile(&env, &caller) {
            panic_with_error!(&env, RsvpError::ProfileRequired);
        }

        if !event.is_open() {
            panic_with_error!(&env, RsvpError::EventNotOpen);
        }

        if event.is_participant(&caller) {
            panic_with_error!(&env, RsvpError::AlreadyRegistered);
        }

        if event.is_full() {
            panic_with_error!(&env, RsvpError::EventFull);
        }

        if max_stake < event.stake {
            panic_with_error!(&env, RsvpError::InsufficientStake);
        }

        let stake = event.stake;
        if stake > 0 {
            Self::collect_stake(&env, &config, &caller, stake);
        }

        let participant = event.add_participant(caller.clone(), stake);
        storage::save_event(&env, &event);
        storage::index_user_event(&env, &caller, event_id);
        storage::bump_instance(&env);

        log!(&env, "participant registered", event_id, caller, stake);
        emit_participant_registered(&env, event_id, &participant);
    }

    /// Get a page of the ids of every event the address owns or joined, in
    /// the order the associations were made.
    ///
    /// At most `MAX_PAGE_SIZE` ids are returned per call.
    pub fn get_events(env: Env, user: Address, offset: u32, limit: u32) -> Vec<u64> {
        storage::bump_instance(&env);
        storage::user_events(&env, &user, offset, limit)
    }

    /// Get the number of events the address owns or joined.
    pub fn user_event_count(env: Env, user: Address) -> u32 {
        storage::user_event_count(&env, &user)
    }

    /// Get a full event snapshot.
    pub fn get_event(env: Env, event_id: u64) -> Event {
        storage::bump_instance(&env);
        storage::load_event(&env, event_id)
    }

    /// Get the participants of an event in registration order, owner first.
    pub fn get_event_participants(env: Env, event_id: u64) -> Vec<Participant> {
        storage::bump_instance(&env);
        storage::load_event(&env, event_id).participants
    }

    /// Check whether an address participates in an event.
    pub fn is_registered(env: Env, event_id: u64, user: Address) -> bool {
        storage::bump_instance(&env);
        storage::load_event(&env, event_id).is_participant(&user)
    }

    /// Get the number of events ever created.
    pub fn event_count(env: Env) -> u64 {
        storage::event_count(&env)
    }

    // ========== Attendance & Settlement ==========

    /// Mark a registered participant as attended (owner only).
    ///
    /// # Panics
    /// - If the event does not exist
    /// - If the caller is not the owner
    /// - If the event is not open
    /// - If `participant` is not registered
    /// - If `participant` is already checked in
    pub fn check_in_participant(env: Env, event_id: u64, participant: Address, caller: Address) {
        caller.require_auth();
        let mut event = storage::load_event(&env, event_id);

        if event.owner != caller {
            panic_with_error!(&env, RsvpError::Unauthorized);
        }

        if !event.is_open() {
            panic_with_error!(&env, RsvpError::EventNotOpen);
        }

        let index = event
            .participant_index(&participant)
            .unwrap_or_else(|| panic_with_error!(&env, RsvpError::NotRegistered));

        let attended = event
            .participants
            .get(index)
            .map(|p| p.attended)
            .unwrap_or(false);
        if attended {
            panic_with_error!(&env, RsvpError::AlreadyCheckedIn);
        }

        event.mark_attended(index);
        storage::save_event(&env, &event);
        storage::bump_instance(&env);

        log!(&env, "checked in", event_id, participant);
        emit_checked_in(&env, event_id, &participant);
    }

    /// Close an event (owner only) and settle its escrow.
    ///
    /// Attendees are credited their stake plus a share of the no-show stake.
    /// Nothing is transferred here; recipients withdraw with `claim_payout`.
    pub fn close_event(env: Env, event_id: u64, caller: Address) -> Settlement {
        let mut event = Self::require_open_owner(&env, event_id, &caller);

        let settlement = settlement::settle_closed(&env, &event);
        event.status = EventStatus::Closed;
        Self::commit_settlement(&env, &event, &settlement);

        log!(&env, "event closed", event_id, settlement.forfeited, settlement.remainder);
        emit_event_closed(&env, &event, &settlement);

        settlement
    }

    /// Cancel an event (owner only), crediting every participant their full
    /// stake.
    pub fn cancel_event(env: Env, event_id: u64, caller: Address) -> Settlement {
        let mut event = Self::require_open_owner(&env, event_id, &caller);

        let settlement = settlement::settle_cancelled(&env, &event);
        event.status = EventStatus::Cancelled;
        Self::commit_settlement(&env, &event, &settlement);

        log!(&env, "event cancelled", event_id, settlement.total_held);
        emit_event_cancelled(&env, &event, &settlement);

        settlement
    }

    /// Withdraw the caller's payout from a settled event.
    ///
    /// # Returns
    /// The amount transferred.
    ///
    /// # Panics
    /// - If the event does not exist
    /// - If the event is still open
    /// - If the caller already claimed
    /// - If the caller has nothing to receive
    pub fn claim_payout(env: Env, event_id: u64, caller: Address) -> i128 {
        caller.require_auth();
        let config = storage::load_config(&env);
        let mut event = storage::load_event(&env, event_id);

        let settlement = storage::load_settlement(&env, event_id)
            .unwrap_or_else(|| panic_with_error!(&env, RsvpError::NotSettled));

        if storage::is_claimed(&env, event_id, &caller) {
            panic_with_error!(&env, RsvpError::AlreadyClaimed);
        }

        let amount = settlement.amount_for(&caller);
        if amount <= 0 {
            panic_with_error!(&env, RsvpError::NothingToClaim);
        }

        storage::mark_claimed(&env, event_id, &caller);
        event.escrowed -= amount;
        storage::save_event(&env, &event);
        storage::bump_instance(&env);

        token::Client::new(&env, &config.stake_token).transfer(
            &env.current_contract_address(),
            &caller,
            &amount,
        );

        log!(&env, "payout claimed", event_id, caller, amount);
        emit_payout_claimed(&env, event_id, &caller, amount);

        amount
    }

    /// Amount the address can still withdraw from an event. Zero while the
    /// event is open and after the payout was claimed.
    pub fn claimable(env: Env, event_id: u64, user: Address) -> i128 {
        storage::bump_instance(&env);
        if storage::is_claimed(&env, event_id, &user) {
            return 0;
        }
        storage::load_settlement(&env, event_id)
            .map(|s| s.amount_for(&user))
            .unwrap_or(0)
    }

    /// Get the settlement of a closed or cancelled event.
    pub fn get_settlement(env: Env, event_id: u64) -> Option<Settlement> {
        storage::bump_instance(&env);
        storage::load_settlement(&env, event_id)
    }

    // ========== Admin Functions ==========

    /// Set the stake required for events created from now on (admin only).
    pub fn set_stake_amount(env: Env, stake_amount: i128, caller: Address) {
        let mut config = Self::require_admin(&env, &caller);

        if !validation::validate_stake_amount(stake_amount) {
            panic_with_error!(&env, RsvpError::InvalidInput);
        }

        config.stake_amount = stake_amount;
        storage::save_config(&env, &config);
        storage::bump_instance(&env);

        log!(&env, "stake amount set", stake_amount);
        emit_config_updated(&env, &config);
    }

    /// Choose whether owners escrow stake when creating events (admin only).
    pub fn set_owner_stakes(env: Env, owner_stakes: bool, caller: Address) {
        let mut config = Self::require_admin(&env, &caller);

        config.owner_stakes = owner_stakes;
        storage::save_config(&env, &config);
        storage::bump_instance(&env);

        log!(&env, "owner stakes set", owner_stakes);
        emit_config_updated(&env, &config);
    }

    /// Upgrade the contract WASM (admin only).
    pub fn upgrade(env: Env, new_wasm_hash: BytesN<32>) {
        let config = storage::load_config(&env);
        config.admin.require_auth();

        env.deployer().update_current_contract_wasm(new_wasm_hash);
    }

    // ========== Internal Helpers ==========

    fn require_admin(env: &Env, caller: &Address) -> Config {
        let config = storage::load_config(env);

        if *caller != config.admin {
            panic_with_error!(env, RsvpError::Unauthorized);
        }

        caller.require_auth();
        config
    }

    /// Shared preconditions of the terminal transitions.
    fn require_open_owner(env: &Env, event_id: u64, caller: &Address) -> Event {
        caller.require_auth();
        storage::load_config(env);
        let event = storage::load_event(env, event_id);

        if event.owner != *caller {
            panic_with_error!(env, RsvpError::Unauthorized);
        }

        if !event.is_open() {
            panic_with_error!(env, RsvpError::InvalidTransition);
        }

        event
    }

    /// Move stake from `from` into the contract's escrow.
    fn collect_stake(env: &Env, config: &Config, from: &Address, amount: i128) {
        let token = token::Client::new(env, &config.stake_token);

        if token.balance(from) < amount {
            panic_with_error!(env, RsvpError::InsufficientStake);
        }

        token.transfer(from, &env.current_contract_address(), &amount);
    }

    /// Persist the terminal event together with its settlement.
    ///
    /// Payouts stay in escrow until each recipient claims them.
    fn commit_settlement(env: &Env, event: &Event, settlement: &Settlement) {
        debug_assert_eq!(settlement.total_paid(), event.escrowed);

        storage::save_event(env, event);
        storage::save_settlement(env, settlement);
        storage::bump_instance(env);
    }
}
