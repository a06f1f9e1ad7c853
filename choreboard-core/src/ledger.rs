//! Completion ledger: append/retract log of (chore, person, date) facts.
//!
//! The ledger is the single source of truth for completion state. Chores
//! carry no completed flag; "is chore X done on day Y" is always answered
//! by a ledger lookup, and undoing a completion removes the record instead
//! of flagging it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One completion fact: a chore was completed by a person on a date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub id: String,
    pub chore_id: String,
    /// Person id, or None when completed without an assignee.
    pub person: Option<String>,
    pub completed_on: NaiveDate,
}

/// Append/retract log of completion records.
///
/// At most one record exists per (chore, person, date) tuple; recording a
/// duplicate is a no-op and toggling twice nets out to no record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionLedger {
    records: Vec<CompletionRecord>,
}

impl CompletionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, chore_id: &str, person: Option<&str>, date: NaiveDate) -> Option<usize> {
        self.records.iter().position(|r| {
            r.chore_id == chore_id && r.person.as_deref() == person && r.completed_on == date
        })
    }

    /// Append a completion record. Idempotent: returns false if an
    /// identical record already exists.
    pub fn record(&mut self, chore_id: &str, person: Option<&str>, date: NaiveDate) -> bool {
        if self.position(chore_id, person, date).is_some() {
            return false;
        }
        self.records.push(CompletionRecord {
            id: Uuid::new_v4().to_string(),
            chore_id: chore_id.to_string(),
            person: person.map(String::from),
            completed_on: date,
        });
        true
    }

    /// Remove the matching record. Returns false if none existed.
    pub fn retract(&mut self, chore_id: &str, person: Option<&str>, date: NaiveDate) -> bool {
        match self.position(chore_id, person, date) {
            Some(idx) => {
                self.records.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn is_completed_on(&self, chore_id: &str, person: Option<&str>, date: NaiveDate) -> bool {
        self.position(chore_id, person, date).is_some()
    }

    /// Flip completion state and return the new state. This is the entry
    /// point front ends should use; record/retract are its primitives.
    pub fn toggle(&mut self, chore_id: &str, person: Option<&str>, date: NaiveDate) -> bool {
        if self.retract(chore_id, person, date) {
            false
        } else {
            self.record(chore_id, person, date);
            true
        }
    }

    /// Drop all records for a chore (cascade on chore deletion).
    /// Returns how many records were removed.
    pub fn remove_chore(&mut self, chore_id: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.chore_id != chore_id);
        before - self.records.len()
    }

    pub fn records(&self) -> &[CompletionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
