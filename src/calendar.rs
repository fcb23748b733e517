//! Date arithmetic shared by aggregation and layout.
//!
//! Every computation works on calendar dates in the timestamp's own recorded
//! offset; nothing is normalised to UTC.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveTime, TimeZone};

/// Commits older than this many days are discarded.
pub const DAYS_IN_WINDOW: u32 = 183;
/// Number of whole weeks the graph is anchored to.
pub const WEEKS_IN_WINDOW: u32 = 26;
/// Calendar months shown by the graph.
pub const MONTHS_IN_WINDOW: u32 = 6;
pub const DAYS_IN_WEEK: u32 = 7;

/// Strips the time of day, keeping the date and the time zone of `t`.
pub fn beginning_of_day<Tz: TimeZone>(t: &DateTime<Tz>) -> DateTime<Tz> {
    let midnight = t.date_naive().and_time(NaiveTime::MIN);
    let tz = t.timezone();
    tz.from_local_datetime(&midnight)
        .earliest()
        .unwrap_or_else(|| tz.from_utc_datetime(&midnight))
}

/// Whole days between the start of `date`'s day and the start of `now`'s day.
///
/// Returns `None` when `date` lies beyond the retention window. Dates after
/// `now` clamp to `Some(0)`.
pub fn days_since<Tz1: TimeZone, Tz2: TimeZone>(date: &DateTime<Tz1>, now: &DateTime<Tz2>) -> Option<u32> {
    days_between(date.date_naive(), now.date_naive())
}

/// Same as [`days_since`] for dates that are already calendar days.
pub fn days_between(date: NaiveDate, today: NaiveDate) -> Option<u32> {
    let days = (today - date).num_days().max(0);
    u32::try_from(days).ok().filter(|d| *d <= DAYS_IN_WINDOW)
}

/// Index of `date`'s weekday with Sunday as 0.
pub fn weekday_offset(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

/// The Sunday starting the week that contains `date`.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - chrono::Duration::days(i64::from(weekday_offset(date)))
}

/// The single "now" captured for one invocation.
///
/// Layout and rendering both read from the same instance, so they agree on
/// which day is today even if the run straddles midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Today {
    date: NaiveDate,
}

impl Today {
    pub fn capture() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self { date }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Weekday index of today, Sunday = 0.
    pub fn weekday_offset(&self) -> u32 {
        weekday_offset(self.date)
    }

    /// Day bucket key for a commit timestamp, or `None` when out of range.
    pub fn days_ago<Tz: TimeZone>(&self, timestamp: &DateTime<Tz>) -> Option<u32> {
        days_between(timestamp.date_naive(), self.date)
    }
}
