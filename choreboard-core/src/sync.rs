//! Feed sync bookkeeping.
//!
//! Syncs are cancellable by replacement: every fetch takes a generation
//! ticket, and only the response carrying the latest ticket may replace
//! the cached event set. There is no cancellation primitive; a superseded
//! response is simply discarded when it tries to commit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Monotonic sync generation counter plus last-success metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncState {
    generation: u64,
    pub last_synced: Option<DateTime<Utc>>,
}

impl SyncState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start a new sync attempt, superseding any in-flight one.
    /// Returns the ticket the eventual response must present.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Whether a response holding this ticket is still the latest.
    pub fn is_current(&self, ticket: u64) -> bool {
        ticket == self.generation
    }

    /// Record a successful sync. Returns false (and changes nothing) when
    /// the ticket has been superseded by a newer `begin`.
    pub fn commit(&mut self, ticket: u64, when: DateTime<Utc>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.last_synced = Some(when);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn latest_ticket_commits() {
        let mut state = SyncState::new();
        let ticket = state.begin();
        let when = Utc.with_ymd_and_hms(2024, 1, 7, 12, 0, 0).unwrap();

        assert!(state.commit(ticket, when));
        assert_eq!(state.last_synced, Some(when));
    }

    #[test]
    fn superseded_ticket_is_discarded() {
        let mut state = SyncState::new();
        let stale = state.begin();
        let fresh = state.begin();
        let when = Utc.with_ymd_and_hms(2024, 1, 7, 12, 0, 0).unwrap();

        assert!(!state.commit(stale, when));
        assert_eq!(state.last_synced, None);

        assert!(state.commit(fresh, when));
        assert_eq!(state.last_synced, Some(when));
    }

    #[test]
    fn generations_are_monotonic() {
        let mut state = SyncState::new();
        let a = state.begin();
        let b = state.begin();
        let c = state.begin();
        assert!(a < b && b < c);
        assert_eq!(state.generation(), c);
    }
}
