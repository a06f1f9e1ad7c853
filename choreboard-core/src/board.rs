//! Board: the root controller owning the storage boundary.
//!
//! All mutation goes through here so read-modify-write sequences stay
//! atomic within one call, and so front ends never reach for ambient
//! globals. Chore and family operations cross-maintain each other's
//! invariants: deleting a chore cascades its ledger records, deleting a
//! person unassigns their chores but never deletes them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::chore::Chore;
use crate::error::{ChoreBoardError, ChoreBoardResult};
use crate::event::NormalizedEvent;
use crate::ledger::CompletionLedger;
use crate::person::Person;
use crate::store::KeyValueStore;
use crate::sync::SyncState;

const CHORES_KEY: &str = "chores";
const FAMILY_KEY: &str = "family";
const LEDGER_KEY: &str = "ledger";
const EVENTS_KEY: &str = "events";
const SYNC_KEY: &str = "sync";

/// Root application state over a key-value store.
pub struct Board<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Board<S> {
    pub fn open(store: S) -> Self {
        Board { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    fn read<T: DeserializeOwned + Default>(&self, key: &str) -> ChoreBoardResult<T> {
        match self.store.get(key)? {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| ChoreBoardError::Serialization(format!("Bad record '{}': {}", key, e))),
            None => Ok(T::default()),
        }
    }

    fn write<T: Serialize>(&mut self, key: &str, value: &T) -> ChoreBoardResult<()> {
        let value: Value = serde_json::to_value(value)
            .map_err(|e| ChoreBoardError::Serialization(e.to_string()))?;
        self.store.set(key, value)
    }

    // CHORES:

    pub fn chores(&self) -> ChoreBoardResult<Vec<Chore>> {
        self.read(CHORES_KEY)
    }

    pub fn chore(&self, id: &str) -> ChoreBoardResult<Option<Chore>> {
        Ok(self.chores()?.into_iter().find(|c| c.id == id))
    }

    pub fn add_chore(&mut self, chore: Chore) -> ChoreBoardResult<()> {
        chore.schedule.validate()?;
        let mut chores = self.chores()?;
        chores.push(chore);
        self.write(CHORES_KEY, &chores)
    }

    /// Replace a chore by id. Returns false if the id is unknown.
    pub fn update_chore(&mut self, chore: Chore) -> ChoreBoardResult<bool> {
        chore.schedule.validate()?;
        let mut chores = self.chores()?;
        let Some(slot) = chores.iter_mut().find(|c| c.id == chore.id) else {
            return Ok(false);
        };
        *slot = chore;
        self.write(CHORES_KEY, &chores)?;
        Ok(true)
    }

    /// Delete a chore and cascade-delete its ledger records.
    /// Returns false if the id is unknown.
    pub fn remove_chore(&mut self, id: &str) -> ChoreBoardResult<bool> {
        let mut chores = self.chores()?;
        let before = chores.len();
        chores.retain(|c| c.id != id);
        if chores.len() == before {
            return Ok(false);
        }
        self.write(CHORES_KEY, &chores)?;

        let mut ledger = self.ledger()?;
        ledger.remove_chore(id);
        self.write(LEDGER_KEY, &ledger)?;
        Ok(true)
    }

    // FAMILY:

    pub fn family(&self) -> ChoreBoardResult<Vec<Person>> {
        self.read(FAMILY_KEY)
    }

    pub fn person(&self, id: &str) -> ChoreBoardResult<Option<Person>> {
        Ok(self.family()?.into_iter().find(|p| p.id == id))
    }

    pub fn add_person(&mut self, person: Person) -> ChoreBoardResult<()> {
        let mut family = self.family()?;
        family.push(person);
        self.write(FAMILY_KEY, &family)
    }

    /// Delete a person and unassign their chores (chores are kept).
    /// Returns false if the id is unknown.
    pub fn remove_person(&mut self, id: &str) -> ChoreBoardResult<bool> {
        let mut family = self.family()?;
        let before = family.len();
        family.retain(|p| p.id != id);
        if family.len() == before {
            return Ok(false);
        }
        self.write(FAMILY_KEY, &family)?;

        let mut chores = self.chores()?;
        let mut changed = false;
        for chore in chores.iter_mut() {
            if chore.assigned_to.as_deref() == Some(id) {
                chore.assigned_to = None;
                changed = true;
            }
        }
        if changed {
            self.write(CHORES_KEY, &chores)?;
        }
        Ok(true)
    }

    // COMPLETION:

    pub fn ledger(&self) -> ChoreBoardResult<CompletionLedger> {
        self.read(LEDGER_KEY)
    }

    /// Toggle completion for a chore on a date, atomically within this
    /// call. Returns the new completion state, or None if the chore id is
    /// unknown.
    pub fn toggle_completion(
        &mut self,
        chore_id: &str,
        person: Option<&str>,
        date: NaiveDate,
    ) -> ChoreBoardResult<Option<bool>> {
        if self.chore(chore_id)?.is_none() {
            return Ok(None);
        }
        let mut ledger = self.ledger()?;
        let state = ledger.toggle(chore_id, person, date);
        self.write(LEDGER_KEY, &ledger)?;
        Ok(Some(state))
    }

    // EVENT CACHE:

    /// Last successfully synced normalized events. Recomputable from the
    /// feed at any time; this is a cache, not a source of truth.
    pub fn cached_events(&self) -> ChoreBoardResult<Vec<NormalizedEvent>> {
        self.read(EVENTS_KEY)
    }

    pub fn sync_state(&self) -> ChoreBoardResult<SyncState> {
        self.read(SYNC_KEY)
    }

    /// Begin a sync attempt, persisting the bumped generation so stale
    /// responses from superseded attempts can be recognized.
    pub fn begin_sync(&mut self) -> ChoreBoardResult<u64> {
        let mut state = self.sync_state()?;
        let ticket = state.begin();
        self.write(SYNC_KEY, &state)?;
        Ok(ticket)
    }

    /// Replace the cached events if the ticket is still current. A stale
    /// ticket leaves the existing cache untouched and returns false.
    pub fn commit_sync(
        &mut self,
        ticket: u64,
        events: &[NormalizedEvent],
        when: DateTime<Utc>,
    ) -> ChoreBoardResult<bool> {
        let mut state = self.sync_state()?;
        if !state.commit(ticket, when) {
            return Ok(false);
        }
        self.write(EVENTS_KEY, &events)?;
        self.write(SYNC_KEY, &state)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chore::{RecurrencePolicy, Schedule};
    use crate::store::MemoryStore;
    use chrono::TimeZone;

    fn board() -> Board<MemoryStore> {
        Board::open(MemoryStore::new())
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn daily(title: &str) -> Chore {
        Chore::new(title, Schedule::Recurring(RecurrencePolicy::Daily)).unwrap()
    }

    #[test]
    fn chore_crud_roundtrip() {
        let mut board = board();
        let chore = daily("Sweep");
        let id = chore.id.clone();

        board.add_chore(chore).unwrap();
        assert_eq!(board.chores().unwrap().len(), 1);

        let mut edited = board.chore(&id).unwrap().unwrap();
        edited.points = 5;
        assert!(board.update_chore(edited).unwrap());
        assert_eq!(board.chore(&id).unwrap().unwrap().points, 5);

        assert!(board.remove_chore(&id).unwrap());
        assert!(!board.remove_chore(&id).unwrap());
        assert!(board.chores().unwrap().is_empty());
    }

    #[test]
    fn unknown_ids_are_noops_not_errors() {
        let mut board = board();
        assert!(!board.update_chore(daily("Ghost")).unwrap());
        assert!(!board.remove_chore("nope").unwrap());
        assert!(!board.remove_person("nope").unwrap());
        assert_eq!(board.toggle_completion("nope", None, date(2024, 1, 8)).unwrap(), None);
    }

    #[test]
    fn removing_chore_cascades_ledger() {
        let mut board = board();
        let chore = daily("Sweep");
        let id = chore.id.clone();
        board.add_chore(chore).unwrap();

        board.toggle_completion(&id, Some("eva"), date(2024, 1, 8)).unwrap();
        assert_eq!(board.ledger().unwrap().len(), 1);

        board.remove_chore(&id).unwrap();
        assert!(board.ledger().unwrap().is_empty());
    }

    #[test]
    fn removing_person_unassigns_chores() {
        let mut board = board();
        let eva = Person::new("Eva", "#cc99ff").unwrap();
        let eva_id = eva.id.clone();
        board.add_person(eva).unwrap();

        for title in ["Sweep", "Mop", "Dust"] {
            let mut chore = daily(title);
            chore.assigned_to = Some(eva_id.clone());
            board.add_chore(chore).unwrap();
        }

        assert!(board.remove_person(&eva_id).unwrap());

        let chores = board.chores().unwrap();
        assert_eq!(chores.len(), 3);
        assert!(chores.iter().all(|c| c.assigned_to.is_none()));
    }

    #[test]
    fn toggle_roundtrips_through_storage() {
        let mut board = board();
        let chore = daily("Sweep");
        let id = chore.id.clone();
        board.add_chore(chore).unwrap();

        let day = date(2024, 1, 8);
        assert_eq!(board.toggle_completion(&id, Some("eva"), day).unwrap(), Some(true));
        assert!(board.ledger().unwrap().is_completed_on(&id, Some("eva"), day));
        assert_eq!(board.toggle_completion(&id, Some("eva"), day).unwrap(), Some(false));
        assert!(board.ledger().unwrap().is_empty());
    }

    #[test]
    fn stale_sync_never_clobbers_cache() {
        let mut board = board();
        let when = Utc.with_ymd_and_hms(2024, 1, 7, 12, 0, 0).unwrap();

        let good = vec![];
        let first = board.begin_sync().unwrap();
        assert!(board.commit_sync(first, &good, when).unwrap());

        // A newer attempt supersedes the in-flight one
        let stale = board.begin_sync().unwrap();
        let fresh = board.begin_sync().unwrap();
        assert!(!board.commit_sync(stale, &good, when).unwrap());
        assert!(board.commit_sync(fresh, &good, when).unwrap());
    }
}
