use crate::calendar::DAYS_IN_WINDOW;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const SCHEMA_VERSION: u32 = 1;

/// One commit as seen by the aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub author_email: String,
    /// Author time in the offset the author recorded.
    pub timestamp: DateTime<FixedOffset>,
}

impl CommitRecord {
    pub fn new(author_email: impl Into<String>, timestamp: DateTime<FixedOffset>) -> Self {
        Self {
            author_email: author_email.into(),
            timestamp,
        }
    }
}

/// Commit totals keyed by days before today (0 = today).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitCounts {
    days: BTreeMap<u32, u32>,
}

impl CommitCounts {
    /// Zero-filled for every day `1..=DAYS_IN_WINDOW`; today is added on demand.
    pub fn new() -> Self {
        Self {
            days: (1..=DAYS_IN_WINDOW).map(|d| (d, 0)).collect(),
        }
    }

    pub fn record(&mut self, days_ago: u32) {
        *self.days.entry(days_ago).or_insert(0) += 1;
    }

    pub fn get(&self, days_ago: u32) -> u32 {
        self.days.get(&days_ago).copied().unwrap_or(0)
    }

    pub fn contains(&self, days_ago: u32) -> bool {
        self.days.contains_key(&days_ago)
    }

    pub fn total(&self) -> u64 {
        self.days.values().map(|&c| u64::from(c)).sum()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Buckets ordered from today into the past.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (u32, u32)> + '_ {
        self.days.iter().map(|(&k, &v)| (k, v))
    }
}

impl Default for CommitCounts {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayCount {
    pub date: NaiveDate,
    pub days_ago: u32,
    pub commits: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repositories: Vec<String>,
    pub email: Option<String>,
    pub today: NaiveDate,
    pub window_start: NaiveDate,
    pub days: Vec<DayCount>,
}
