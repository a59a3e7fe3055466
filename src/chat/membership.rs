//! Membership table: who is connected and where to push to.

use std::collections::HashMap;

use super::event::ParticipantId;

/// A registered participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    /// Unique participant id.
    pub id: ParticipantId,
    /// Network endpoint the coordinator dials to deliver events.
    pub callback: String,
}

impl Participant {
    pub fn new(id: impl Into<String>, callback: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            callback: callback.into(),
        }
    }
}

/// Participants indexed by id.
#[derive(Debug, Default)]
pub struct MembershipTable {
    members: HashMap<ParticipantId, Participant>,
}

impl MembershipTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a participant, replacing any entry with the same id.
    ///
    /// Returns the replaced entry.
    pub fn insert(&mut self, participant: Participant) -> Option<Participant> {
        self.members.insert(participant.id.clone(), participant)
    }

    /// Remove a participant by id.
    pub fn remove(&mut self, id: &str) -> Option<Participant> {
        self.members.remove(id)
    }

    /// Remove `participant` only if its entry still points at the same callback.
    ///
    /// A participant that rejoined with a new address after a snapshot was
    /// taken keeps its new registration.
    pub fn evict(&mut self, participant: &Participant) -> bool {
        match self.members.get(&participant.id) {
            Some(current) if current.callback == participant.callback => {
                self.members.remove(&participant.id);
                true
            }
            _ => false,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.members.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Shallow copy of every current entry.
    pub fn snapshot(&self) -> Vec<Participant> {
        self.members.values().cloned().collect()
    }
}
