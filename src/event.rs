//! Event and participant records.

use soroban_sdk::{contracttype, Address, Env, String, Vec};

/// Lifecycle status of an event.
///
/// `Open` is the only non-terminal state. `Closed` and `Cancelled` are
/// reached once and never left.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum EventStatus {
    Open = 0,
    Closed = 1,
    Cancelled = 2,
}

/// One identity's registration in one event.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Participant {
    pub user_address: Address,
    pub attended: bool,
    /// Amount escrowed at registration.
    pub stake: i128,
}

/// An event with its append-only participant list.
///
/// The owner is always `participants[0]` and is pre-marked attended.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Event {
    pub id: u64,
    pub owner: Address,
    pub name: String,
    pub seats: u32,
    pub start_time: u64,
    pub end_time: u64,
    /// Stake each registrant escrows, fixed at creation.
    pub stake: i128,
    /// Total stake currently held for this event. Reaches zero once every
    /// payout has been claimed.
    pub escrowed: i128,
    pub status: EventStatus,
    pub participants: Vec<Participant>,
    /// Ledger sequence at creation.
    pub created_at: u64,
}

impl Event {
    /// Build a fresh open event with the owner registered as participant #0.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        env: &Env,
        id: u64,
        owner: Address,
        name: String,
        seats: u32,
        start_time: u64,
        end_time: u64,
        stake: i128,
        owner_stake: i128,
        created_at: u64,
    ) -> Self {
        let mut participants = Vec::new(env);
        participants.push_back(Participant {
            user_address: owner.clone(),
            attended: true,
            stake: owner_stake,
        });

        Self {
            id,
            owner,
            name,
            seats,
            start_time,
            end_time,
            stake,
            escrowed: owner_stake,
            status: EventStatus::Open,
            participants,
            created_at,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == EventStatus::Open
    }

    /// Seats count the owner, so `participants.len() <= seats` always holds.
    pub fn is_full(&self) -> bool {
        self.participants.len() >= self.seats
    }

    /// Position of `address` in the participant list.
    pub fn participant_index(&self, address: &Address) -> Option<u32> {
        self.participants
            .iter()
            .position(|p| p.user_address == *address)
            .map(|i| i as u32)
    }

    pub fn is_participant(&self, address: &Address) -> bool {
        self.participant_index(address).is_some()
    }

    /// Append a registrant and account for the stake they escrowed.
    pub fn add_participant(&mut self, address: Address, stake: i128) -> Participant {
        let participant = Participant {
            user_address: address,
            attended: false,
            stake,
        };
        self.participants.push_back(participant.clone());
        self.escrowed += stake;
        participant
    }

    /// Mark the participant at `index` as attended.
    pub fn mark_attended(&mut self, index: u32) {
        if let Some(mut participant) = self.participants.get(index) {
            participant.attended = true;
            self.participants.set(index, participant);
        }
    }

    pub fn attended_count(&self) -> u32 {
        self.participants.iter().filter(|p| p.attended).count() as u32
    }
}
