//! Stake distribution for closed and cancelled events.
//!
//! Settlement is a pure computation over the event's participant list. The
//! contract executes the resulting payouts as token transfers in the same
//! invocation that moves the event into its terminal status.
//!
//! # Policy
//!
//! - **Cancel**: every participant gets exactly their stake back.
//! - **Close**: attended participants get their own stake back. Stake of
//!   participants who did not attend is forfeited and split equally among
//!   attended participants that escrowed a non-zero stake. The division
//!   remainder goes to the owner, as does the whole forfeited pool when no
//!   attended participant escrowed anything.
//!
//! In both cases the payouts sum to exactly the stake held for the event.

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::event::{Event, EventStatus};

/// One transfer out of escrow.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Payout {
    pub recipient: Address,
    pub amount: i128,
}

/// Final stake distribution of one event.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Settlement {
    pub event_id: u64,
    /// Terminal status that triggered the settlement.
    pub outcome: EventStatus,
    /// Stake held for the event when it was settled.
    pub total_held: i128,
    /// Stake taken from participants who did not attend.
    pub forfeited: i128,
    /// Undividable part of the forfeited pool credited to the owner.
    pub remainder: i128,
    /// One entry per participant, in registration order.
    pub payouts: Vec<Payout>,
}

impl Settlement {
    pub fn total_paid(&self) -> i128 {
        self.payouts.iter().map(|p| p.amount).sum()
    }

    pub fn amount_for(&self, recipient: &Address) -> i128 {
        self.payouts
            .iter()
            .filter(|p| p.recipient == *recipient)
            .map(|p| p.amount)
            .sum()
    }
}

/// Refund every participant in full.
pub fn settle_cancelled(env: &Env, event: &Event) -> Settlement {
    let mut payouts = Vec::new(env);
    let mut total_held = 0i128;

    for participant in event.participants.iter() {
        total_held += participant.stake;
        payouts.push_back(Payout {
            recipient: participant.user_address,
            amount: participant.stake,
        });
    }

    Settlement {
        event_id: event.id,
        outcome: EventStatus::Cancelled,
        total_held,
        forfeited: 0,
        remainder: 0,
        payouts,
    }
}

/// Refund attendees and redistribute forfeited stake among them.
pub fn settle_closed(env: &Env, event: &Event) -> Settlement {
    let mut total_held = 0i128;
    let mut forfeited = 0i128;
    let mut recipients = 0i128;

    for participant in event.participants.iter() {
        total_held += participant.stake;
        if !participant.attended {
            forfeited += participant.stake;
        } else if participant.stake > 0 {
            recipients += 1;
        }
    }

    let (share, remainder) = if recipients > 0 {
        (forfeited / recipients, forfeited % recipients)
    } else {
        (0, forfeited)
    };

    let mut payouts = Vec::new(env);
    for participant in event.participants.iter() {
        let mut amount = if !participant.attended {
            0
        } else if participant.stake > 0 {
            participant.stake + share
        } else {
            0
        };
        if participant.user_address == event.owner {
            amount += remainder;
        }
        payouts.push_back(Payout {
            recipient: participant.user_address,
            amount,
        });
    }

    Settlement {
        event_id: event.id,
        outcome: EventStatus::Closed,
        total_held,
        forfeited,
        remainder,
        payouts,
    }
}
