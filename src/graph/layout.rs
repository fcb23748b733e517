use crate::calendar::{start_of_week, weekday_offset, Today, DAYS_IN_WEEK, MONTHS_IN_WINDOW, WEEKS_IN_WINDOW};
use crate::model::CommitCounts;
use chrono::{Duration, Months, NaiveDate};
use std::collections::BTreeMap;

/// Commit counts for one week, indexed by weekday (Sunday = 0).
pub type Column = [u32; DAYS_IN_WEEK as usize];

/// Where the grid sits on the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridBounds {
    /// The Sunday on or before the window start.
    pub start_of_first_week: NaiveDate,
    /// Week index holding today. Always 0.
    pub today_week: u32,
    /// Oldest week index to draw, never less than `WEEKS_IN_WINDOW`.
    pub max_week: u32,
}

/// Sparse week-by-weekday table of commit counts.
///
/// Week 0 is the calendar week containing today; higher indices go back in
/// time. Absent weeks read as zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    today: Today,
    window_start: NaiveDate,
    weeks: BTreeMap<u32, Column>,
}

impl Grid {
    pub fn empty(today: Today) -> Self {
        Self {
            today,
            window_start: window_start(today.date()),
            weeks: BTreeMap::new(),
        }
    }

    /// Lay `counts` out on the calendar ending at `today`.
    ///
    /// Days older than six calendar months are left out even when they are
    /// still inside the retention window.
    pub fn build(counts: &CommitCounts, today: Today) -> Self {
        let mut grid = Self::empty(today);
        for (days_ago, commits) in counts.iter() {
            let date = today.date() - Duration::days(i64::from(days_ago));
            if date < grid.window_start {
                continue;
            }
            let (week, day) = grid.cell_of(date);
            grid.add(week, day, commits);
        }
        grid
    }

    pub fn add(&mut self, week: u32, day: u32, commits: u32) {
        let column = self.weeks.entry(week).or_insert([0; DAYS_IN_WEEK as usize]);
        if let Some(slot) = column.get_mut(day as usize) {
            *slot += commits;
        }
    }

    pub fn get(&self, week: u32, day: u32) -> u32 {
        self.weeks
            .get(&week)
            .and_then(|column| column.get(day as usize))
            .copied()
            .unwrap_or(0)
    }

    pub fn column(&self, week: u32) -> Column {
        self.weeks.get(&week).copied().unwrap_or([0; DAYS_IN_WEEK as usize])
    }

    pub fn today(&self) -> Today {
        self.today
    }

    pub fn window_start(&self) -> NaiveDate {
        self.window_start
    }

    /// Week index and weekday of a date on or before today.
    pub fn cell_of(&self, date: NaiveDate) -> (u32, u32) {
        let weeks_back = (start_of_week(self.today.date()) - start_of_week(date)).num_days() / 7;
        (u32::try_from(weeks_back).unwrap_or(0), weekday_offset(date))
    }

    /// Calendar date drawn at `(week, day)`.
    pub fn date_of(&self, week: u32, day: u32) -> NaiveDate {
        start_of_week(self.today.date()) - Duration::weeks(i64::from(week)) + Duration::days(i64::from(day))
    }

    /// Whether `(week, day)` is today.
    pub fn is_today(&self, week: u32, day: u32) -> bool {
        week == self.bounds().today_week && day == self.today.weekday_offset()
    }

    /// Whether `(week, day)` falls between the window start and today.
    pub fn in_window(&self, week: u32, day: u32) -> bool {
        let date = self.date_of(week, day);
        date >= self.window_start && date <= self.today.date()
    }

    pub fn bounds(&self) -> GridBounds {
        let start_of_first_week = start_of_week(self.window_start);
        let (today_week, _) = self.cell_of(self.today.date());
        let oldest = self.weeks.keys().next_back().copied().unwrap_or(0);
        GridBounds {
            start_of_first_week,
            today_week,
            max_week: oldest.max(WEEKS_IN_WINDOW),
        }
    }
}

/// Six calendar months before `today`.
pub fn window_start(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_months(Months::new(MONTHS_IN_WINDOW))
        .unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> Today {
        // A Wednesday.
        Today::from_date(ymd(2024, 3, 13))
    }

    fn counts_with(days: &[(u32, u32)]) -> CommitCounts {
        let mut counts = CommitCounts::new();
        for &(days_ago, n) in days {
            for _ in 0..n {
                counts.record(days_ago);
            }
        }
        counts
    }

    #[test]
    fn today_is_week_zero_on_its_weekday() {
        let grid = Grid::build(&counts_with(&[(0, 3)]), today());
        assert_eq!(grid.cell_of(today().date()), (0, 3));
        assert_eq!(grid.get(0, 3), 3);
        assert!(grid.is_today(0, 3));
        assert_eq!(grid.bounds().today_week, 0);
    }

    #[test]
    fn today_is_week_zero_for_every_weekday() {
        for offset in 0..7 {
            let day = Today::from_date(ymd(2024, 3, 10) + Duration::days(offset));
            let grid = Grid::build(&counts_with(&[(0, 1)]), day);
            assert_eq!(grid.get(0, day.weekday_offset()), 1, "weekday {offset}");
            assert_eq!(grid.bounds().today_week, 0);
        }
    }

    #[test]
    fn weeks_follow_the_calendar_not_division() {
        // Three days back from Wednesday is Sunday of the same week,
        // four days back is Saturday of the previous one.
        let grid = Grid::build(&counts_with(&[(3, 1), (4, 2)]), today());
        assert_eq!(grid.get(0, 0), 1);
        assert_eq!(grid.get(1, 6), 2);
        assert_eq!(grid.column(1), [0, 0, 0, 0, 0, 0, 2]);
    }

    #[test]
    fn days_before_the_month_window_are_dropped() {
        // 2023-09-13 is the window start; 183 days back is 2023-09-12.
        assert_eq!(grid_window(), ymd(2023, 9, 13));
        let grid = Grid::build(&counts_with(&[(182, 4), (183, 5)]), today());
        let (week, day) = grid.cell_of(ymd(2023, 9, 13));
        assert_eq!(grid.get(week, day), 4);
        let (week, day) = grid.cell_of(ymd(2023, 9, 12));
        assert_eq!(grid.get(week, day), 0);
    }

    fn grid_window() -> NaiveDate {
        Grid::empty(today()).window_start()
    }

    #[test]
    fn cells_accumulate() {
        let mut grid = Grid::empty(today());
        grid.add(2, 4, 3);
        grid.add(2, 4, 2);
        assert_eq!(grid.get(2, 4), 5);
        assert_eq!(grid.get(9, 4), 0);
        assert_eq!(grid.get(2, 9), 0);
    }

    #[test]
    fn bounds_always_cover_the_full_window() {
        let grid = Grid::empty(today());
        let bounds = grid.bounds();
        assert_eq!(bounds.start_of_first_week, ymd(2023, 9, 10));
        assert_eq!(bounds.max_week, WEEKS_IN_WINDOW);

        let full = Grid::build(&CommitCounts::new(), today());
        assert_eq!(full.bounds().max_week, 26);
    }

    #[test]
    fn bounds_grow_past_26_weeks_when_the_window_needs_it() {
        // Sunday 2024-09-01; the window starts Friday 2024-03-01.
        let today = Today::from_date(ymd(2024, 9, 1));
        let grid = Grid::build(&counts_with(&[(0, 1), (183, 1)]), today);
        assert_eq!(
            grid.bounds(),
            GridBounds {
                start_of_first_week: ymd(2024, 2, 25),
                today_week: 0,
                max_week: 27,
            }
        );
        assert_eq!(grid.cell_of(ymd(2024, 3, 2)), (27, 6));
        assert_eq!(grid.get(27, 6), 1);
        assert_eq!(grid.get(0, 0), 1);
    }

    #[test]
    fn date_of_inverts_cell_of() {
        let grid = Grid::empty(today());
        for back in [0, 1, 6, 45, 120, 180] {
            let date = today().date() - Duration::days(back);
            let (week, day) = grid.cell_of(date);
            assert_eq!(grid.date_of(week, day), date);
        }
    }

    #[test]
    fn window_covers_only_past_days() {
        let grid = Grid::empty(today());
        assert!(grid.in_window(0, 3));
        assert!(!grid.in_window(0, 4));
        let (week, day) = grid.cell_of(ymd(2023, 9, 12));
        assert!(!grid.in_window(week, day));
    }

    #[test]
    fn month_subtraction_clamps_to_month_end() {
        assert_eq!(window_start(ymd(2024, 8, 31)), ymd(2024, 2, 29));
    }
}
