//! Calendar event normalization.
//!
//! Converts raw feed events into `NormalizedEvent`s, inferring an assignee
//! from the family roster and a category from keyword rules. Both inference
//! steps are data-driven so the rules can evolve without touching the
//! aggregator.

use chrono::{DateTime, Utc};
use tracing::warn;
use uuid::Uuid;

use crate::event::{Category, NormalizedEvent, RawFeedEvent};
use crate::ics;
use crate::person::Person;

/// Title substituted when the source event has no usable summary.
pub const UNTITLED_EVENT: &str = "Untitled Event";

/// Keyword rules mapping free text to a category.
///
/// Rules are evaluated in order and the first category with a matching
/// keyword wins, so earlier entries take priority over later ones
/// regardless of keyword specificity.
#[derive(Debug, Clone)]
pub struct CategoryRules {
    rules: Vec<(Category, Vec<String>)>,
}

impl CategoryRules {
    pub fn new(rules: Vec<(Category, Vec<String>)>) -> Self {
        CategoryRules { rules }
    }

    /// Infer a category via case-insensitive substring match.
    pub fn category_for(&self, text: &str) -> Category {
        let haystack = text.to_lowercase();
        for (category, keywords) in &self.rules {
            if keywords.iter().any(|k| haystack.contains(k.as_str())) {
                return *category;
            }
        }
        Category::Other
    }
}

impl Default for CategoryRules {
    /// Built-in keyword sets, in School → Sports → Appointments →
    /// Celebrations → Travel priority order.
    fn default() -> Self {
        let rules = [
            (
                Category::School,
                &["school", "homework", "class", "teacher", "pta", "field trip", "tutoring"][..],
            ),
            (
                Category::Sports,
                &["soccer", "practice", "game", "basketball", "baseball", "swim", "dance", "gym"],
            ),
            (
                Category::Appointments,
                &["appointment", "doctor", "dentist", "checkup", "orthodontist", "vet"],
            ),
            (
                Category::Celebrations,
                &["birthday", "party", "anniversary", "celebration", "wedding"],
            ),
            (
                Category::Travel,
                &["trip", "vacation", "flight", "travel", "hotel", "camping"],
            ),
        ];

        CategoryRules::new(
            rules
                .into_iter()
                .map(|(cat, words)| (cat, words.iter().map(|w| w.to_string()).collect()))
                .collect(),
        )
    }
}

/// Turns raw feed events into normalized ones for a given family roster.
pub struct Normalizer {
    /// (lowercased first name, canonical configured name) pairs.
    roster: Vec<(String, String)>,
    categories: CategoryRules,
}

impl Normalizer {
    pub fn new(roster: &[Person]) -> Self {
        Self::with_rules(roster, CategoryRules::default())
    }

    pub fn with_rules(roster: &[Person], categories: CategoryRules) -> Self {
        let roster = roster
            .iter()
            .filter_map(|p| {
                let first = p.name.split_whitespace().next()?;
                Some((first.to_lowercase(), p.name.clone()))
            })
            .collect();

        Normalizer { roster, categories }
    }

    /// Normalize a batch, dropping events whose start date can't be parsed.
    pub fn normalize_batch(
        &self,
        raws: &[RawFeedEvent],
        now: DateTime<Utc>,
    ) -> Vec<NormalizedEvent> {
        raws.iter().filter_map(|raw| self.normalize(raw, now)).collect()
    }

    /// Normalize one raw event.
    ///
    /// Returns None (with a logged warning) when the start value is present
    /// but unparseable. A missing start value substitutes the processing
    /// time `now` instead, matching the upstream feed contract.
    pub fn normalize(&self, raw: &RawFeedEvent, now: DateTime<Utc>) -> Option<NormalizedEvent> {
        let title = match raw.summary.as_deref() {
            Some(s) if !s.trim().is_empty() => s.to_string(),
            _ => UNTITLED_EVENT.to_string(),
        };

        let (start, all_day) = match &raw.start {
            Some(value) => match ics::parse_feed_datetime(value) {
                Ok(dt) => (dt, raw.all_day),
                Err(e) => {
                    warn!(uid = %raw.uid, %e, "dropping event with unparseable start");
                    return None;
                }
            },
            None => {
                warn!(uid = %raw.uid, "event has no start value, substituting sync time");
                (now, false)
            }
        };

        let end = raw.end.as_deref().and_then(|value| {
            ics::parse_feed_datetime(value)
                .map_err(|e| warn!(uid = %raw.uid, %e, "ignoring unparseable end value"))
                .ok()
        });

        let description = raw.description.clone().unwrap_or_default();
        let assignee = self
            .find_name(&title)
            .or_else(|| self.find_name(&description))
            .map(String::from);

        let category = self
            .categories
            .category_for(&format!("{} {}", title, description));

        let id = if raw.uid.is_empty() {
            Uuid::new_v4().to_string()
        } else {
            raw.uid.clone()
        };

        Some(NormalizedEvent {
            id,
            title,
            start,
            end,
            all_day,
            location: raw.location.clone().unwrap_or_default(),
            description,
            assignee,
            category,
        })
    }

    /// Scan text for the first word matching a roster first name.
    fn find_name(&self, text: &str) -> Option<&str> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .find_map(|word| {
                self.roster
                    .iter()
                    .find(|(first, _)| first.eq_ignore_ascii_case(word))
                    .map(|(_, canonical)| canonical.as_str())
            })
    }
}
