//! Event emission helpers for the RSVP contract.
//!
//! Every record carries enough data for observers to rebuild state without
//! querying the contract.

use soroban_sdk::{Address, Env, Symbol};

use crate::config::Config;
use crate::event::{Event, Participant};
use crate::profile::Profile;
use crate::settlement::Settlement;

/// Emit an event when the contract is initialized or reconfigured.
pub fn emit_config_updated(env: &Env, config: &Config) {
    let topics = (Symbol::new(env, "config_updated"),);
    env.events().publish(topics, config.clone());
}

/// Emit an event when a profile is created or overwritten.
pub fn emit_profile_updated(env: &Env, address: &Address, profile: &Profile) {
    let topics = (Symbol::new(env, "profile_updated"), address.clone());
    env.events().publish(topics, profile.clone());
}

/// Emit the full snapshot of a newly created event.
pub fn emit_event_created(env: &Env, event: &Event) {
    let topics = (Symbol::new(env, "event_created"), event.id);
    env.events().publish(topics, event.clone());
}

/// Emit an event when an identity joins an event.
pub fn emit_participant_registered(env: &Env, event_id: u64, participant: &Participant) {
    let topics = (Symbol::new(env, "participant_registered"), event_id);
    env.events().publish(topics, participant.clone());
}

/// Emit an event when the owner checks a participant in.
pub fn emit_checked_in(env: &Env, event_id: u64, participant: &Address) {
    let topics = (Symbol::new(env, "checked_in"), event_id);
    env.events().publish(topics, participant.clone());
}

/// Emit the final attendance snapshot and payouts of a closed event.
pub fn emit_event_closed(env: &Env, event: &Event, settlement: &Settlement) {
    let topics = (Symbol::new(env, "event_closed"), event.id);
    env.events()
        .publish(topics, (event.clone(), settlement.clone()));
}

/// Emit the refunds of a cancelled event.
pub fn emit_event_cancelled(env: &Env, event: &Event, settlement: &Settlement) {
    let topics = (Symbol::new(env, "event_cancelled"), event.id);
    env.events()
        .publish(topics, (event.clone(), settlement.clone()));
}

/// Emit an event when a recipient withdraws a payout.
pub fn emit_payout_claimed(env: &Env, event_id: u64, recipient: &Address, amount: i128) {
    let topics = (Symbol::new(env, "payout_claimed"), event_id);
    env.events().publish(topics, (recipient.clone(), amount));
}
