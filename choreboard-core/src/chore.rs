//! Chore types and recurrence expansion.
//!
//! A chore is either recurring (with a `RecurrencePolicy`) or due once on a
//! fixed date. The two cases are separate `Schedule` variants so a chore can
//! never carry both a recurrence and a due date at the same time.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ChoreBoardError, ChoreBoardResult};

/// A task assigned to a family member, recurring or due once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chore {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub schedule: Schedule,
    /// Person id, or None for unassigned/shared chores.
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub priority: Priority,
}

impl Chore {
    /// Create a chore with a fresh id, validating the schedule.
    pub fn new(title: impl Into<String>, schedule: Schedule) -> ChoreBoardResult<Self> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ChoreBoardError::Validation(
                "Chore title must not be empty".into(),
            ));
        }
        schedule.validate()?;

        Ok(Chore {
            id: Uuid::new_v4().to_string(),
            title,
            description: String::new(),
            schedule,
            assigned_to: None,
            points: 0,
            priority: Priority::default(),
        })
    }

    /// Whether this chore occurs on the given calendar date.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        match &self.schedule {
            Schedule::Recurring(policy) => policy.is_active_on(date),
            Schedule::Once(due) => *due == date,
        }
    }
}

/// When a chore occurs: on a recurrence rule, or once on a due date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Schedule {
    Recurring(RecurrencePolicy),
    Once(NaiveDate),
}

impl Schedule {
    pub fn validate(&self) -> ChoreBoardResult<()> {
        match self {
            Schedule::Recurring(policy) => policy.validate(),
            Schedule::Once(_) => Ok(()),
        }
    }

    /// Short label for list views and aggregate counts.
    pub fn kind_label(&self) -> &'static str {
        match self {
            Schedule::Recurring(RecurrencePolicy::Daily) => "daily",
            Schedule::Recurring(RecurrencePolicy::WeeklyOnDays(_)) => "weekly",
            Schedule::Recurring(RecurrencePolicy::MonthlyOnDay(_)) => "monthly",
            Schedule::Once(_) => "once",
        }
    }
}

/// Rule determining which calendar dates a recurring chore is active on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RecurrencePolicy {
    /// Every day.
    Daily,
    /// On the listed weekdays (kept sorted Sunday-first, deduplicated).
    WeeklyOnDays(Vec<Weekday>),
    /// On a fixed day of the month (1..=31). Months without that day are
    /// skipped entirely rather than clamped to the last day.
    MonthlyOnDay(u8),
}

impl RecurrencePolicy {
    /// Build a weekly policy with normalized day order.
    pub fn weekly(days: impl IntoIterator<Item = Weekday>) -> Self {
        let mut days: Vec<Weekday> = days.into_iter().collect();
        days.sort_by_key(|d| d.num_days_from_sunday());
        days.dedup();
        RecurrencePolicy::WeeklyOnDays(days)
    }

    /// Validate at creation time. Expansion assumes pre-validated input.
    pub fn validate(&self) -> ChoreBoardResult<()> {
        match self {
            RecurrencePolicy::Daily => Ok(()),
            RecurrencePolicy::WeeklyOnDays(days) => {
                if days.is_empty() {
                    Err(ChoreBoardError::Validation(
                        "Weekly recurrence needs at least one day".into(),
                    ))
                } else {
                    Ok(())
                }
            }
            RecurrencePolicy::MonthlyOnDay(day) => {
                if (1..=31).contains(day) {
                    Ok(())
                } else {
                    Err(ChoreBoardError::Validation(format!(
                        "Day of month must be 1-31, got {}",
                        day
                    )))
                }
            }
        }
    }

    /// Whether the policy makes a chore active on the given date.
    ///
    /// An empty weekly set (which validation rejects) is treated as
    /// "never active" rather than a panic.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        match self {
            RecurrencePolicy::Daily => true,
            RecurrencePolicy::WeeklyOnDays(days) => days.contains(&date.weekday()),
            RecurrencePolicy::MonthlyOnDay(day) => date.day() == u32::from(*day),
        }
    }
}

/// Chore priority, used for agenda ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Sort rank: high before medium before low.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = ChoreBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(ChoreBoardError::Validation(format!(
                "Unknown priority '{}'. Expected high, medium or low",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // --- daily ---

    #[test]
    fn daily_is_active_every_day() {
        let policy = RecurrencePolicy::Daily;
        let mut day = date(2024, 1, 1);
        for _ in 0..30 {
            assert!(policy.is_active_on(day));
            day = day.succ_opt().unwrap();
        }
    }

    // --- weekly ---

    #[test]
    fn weekly_matches_only_listed_days_over_a_year() {
        let policy = RecurrencePolicy::weekly([Weekday::Mon, Weekday::Thu]);

        let mut day = date(2024, 1, 1);
        for _ in 0..364 {
            let expected = matches!(day.weekday(), Weekday::Mon | Weekday::Thu);
            assert_eq!(policy.is_active_on(day), expected, "mismatch on {}", day);
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn weekly_normalizes_day_order_and_dupes() {
        let policy = RecurrencePolicy::weekly([Weekday::Thu, Weekday::Mon, Weekday::Thu]);
        assert_eq!(
            policy,
            RecurrencePolicy::WeeklyOnDays(vec![Weekday::Mon, Weekday::Thu])
        );
    }

    #[test]
    fn weekly_empty_set_rejected_but_never_active() {
        let policy = RecurrencePolicy::WeeklyOnDays(vec![]);
        assert!(policy.validate().is_err());
        assert!(!policy.is_active_on(date(2024, 1, 8)));
    }

    // --- monthly ---

    #[test]
    fn monthly_31_skips_short_months() {
        let policy = RecurrencePolicy::MonthlyOnDay(31);

        // 2024: Jan, Mar, May, Jul, Aug, Oct, Dec have a 31st
        assert!(policy.is_active_on(date(2024, 1, 31)));
        assert!(policy.is_active_on(date(2024, 3, 31)));
        assert!(policy.is_active_on(date(2024, 12, 31)));

        // No 31st in Feb/Apr/Jun/Sep/Nov: never active those months
        for month in [2u32, 4, 6, 9, 11] {
            let mut day = date(2024, month, 1);
            while day.month() == month {
                assert!(!policy.is_active_on(day), "unexpected hit on {}", day);
                day = day.succ_opt().unwrap();
            }
        }
    }

    #[test]
    fn monthly_no_clamp_to_end_of_february() {
        let policy = RecurrencePolicy::MonthlyOnDay(30);
        assert!(!policy.is_active_on(date(2024, 2, 29)));
        assert!(!policy.is_active_on(date(2023, 2, 28)));
        assert!(policy.is_active_on(date(2024, 4, 30)));
    }

    #[test]
    fn monthly_out_of_range_rejected() {
        assert!(RecurrencePolicy::MonthlyOnDay(0).validate().is_err());
        assert!(RecurrencePolicy::MonthlyOnDay(32).validate().is_err());
        assert!(RecurrencePolicy::MonthlyOnDay(31).validate().is_ok());
    }

    // --- one-time ---

    #[test]
    fn once_active_only_on_due_date() {
        let chore = Chore::new("Return library books", Schedule::Once(date(2024, 1, 10))).unwrap();
        assert!(chore.is_active_on(date(2024, 1, 10)));
        assert!(!chore.is_active_on(date(2024, 1, 9)));
        assert!(!chore.is_active_on(date(2024, 1, 11)));
    }

    #[test]
    fn empty_title_rejected() {
        assert!(Chore::new("  ", Schedule::Recurring(RecurrencePolicy::Daily)).is_err());
    }
}
