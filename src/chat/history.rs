//! Append-only message log.

use super::event::ChatEvent;

/// Ordered sequence of accepted chat events.
///
/// Only appends are possible; readers get owned copies.
#[derive(Debug, Default)]
pub struct MessageLog {
    events: Vec<ChatEvent>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event at the end of the log.
    pub fn append(&mut self, event: ChatEvent) {
        self.events.push(event);
    }

    /// Point-in-time copy of the whole log.
    pub fn snapshot(&self) -> Vec<ChatEvent> {
        self.events.clone()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let mut log = MessageLog::new();
        assert!(log.is_empty());

        log.append(ChatEvent::new("alice", "one"));
        log.append(ChatEvent::new("bob", "two"));
        log.append(ChatEvent::joined("carol"));

        let bodies: Vec<_> = log.snapshot().into_iter().map(|e| e.body).collect();
        assert_eq!(bodies, vec!["one", "two", "User carol joined"]);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut log = MessageLog::new();
        log.append(ChatEvent::new("alice", "before"));

        let snapshot = log.snapshot();
        log.append(ChatEvent::new("alice", "after"));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(log.len(), 2);
    }
}
