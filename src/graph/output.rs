use super::layout::Grid;
use crate::calendar::DAYS_IN_WEEK;
use crate::error::{GitcalError, Result};
use crate::model::{CommitCounts, DayCount, GraphOutput, SCHEMA_VERSION};
use chrono::{Datelike, Duration, Utc};
use console::Style;
use std::io::{self, Write};

const GUTTER_WIDTH: usize = 5;
const CELL_WIDTH: usize = 3;
const SEPARATOR: &str = " ";
/// Largest count that fits in a cell; anything above prints as `OVERFLOW_LABEL`.
const MAX_SHOWN_COUNT: u32 = 999;
const OVERFLOW_LABEL: &str = "1k+";

/// What is printed inside each cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellContent {
    #[default]
    Blank,
    Count,
    DayOfMonth,
}

impl CellContent {
    /// Resolve the `--count` / `--days` toggles, which cannot be combined.
    pub fn from_flags(show_count: bool, show_days: bool) -> Result<Self> {
        match (show_count, show_days) {
            (true, true) => Err(GitcalError::Config(
                "--count and --days are mutually exclusive".to_string(),
            )),
            (true, false) => Ok(Self::Count),
            (false, true) => Ok(Self::DayOfMonth),
            (false, false) => Ok(Self::Blank),
        }
    }
}

/// Labels in the left-hand gutter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeekdayLabels {
    /// Mon, Wed and Fri only.
    #[default]
    Compact,
    /// S M T W T F S.
    Full,
}

impl WeekdayLabels {
    fn label(self, day: u32) -> &'static str {
        match self {
            WeekdayLabels::Compact => match day {
                1 => "Mon",
                3 => "Wed",
                5 => "Fri",
                _ => "",
            },
            WeekdayLabels::Full => ["S", "M", "T", "W", "T", "F", "S"]
                .get(day as usize)
                .copied()
                .unwrap_or(""),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    pub content: CellContent,
    pub labels: WeekdayLabels,
    pub colors: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Activity {
    Empty,
    Light,
    Medium,
    High,
}

impl Activity {
    fn of(commits: u32) -> Self {
        match commits {
            0 => Activity::Empty,
            1..=4 => Activity::Light,
            5..=9 => Activity::Medium,
            _ => Activity::High,
        }
    }

    fn style(self) -> Style {
        match self {
            Activity::Empty => Style::new().black(),
            Activity::Light => Style::new().black().on_white().bold(),
            Activity::Medium => Style::new().black().on_yellow().bold(),
            Activity::High => Style::new().black().on_green().bold(),
        }
    }
}

fn today_style() -> Style {
    Style::new().white().on_magenta().bold()
}

/// Print the contribution graph to stdout.
pub fn output_graph(grid: &Grid, options: &RenderOptions) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render(grid, options, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Draw the month header followed by one row per weekday.
///
/// Header and rows both span `max_week..=0`, so each month label sits over
/// the column holding its first day.
pub fn render<W: Write>(grid: &Grid, options: &RenderOptions, out: &mut W) -> io::Result<()> {
    let bounds = grid.bounds();

    write!(out, "{:width$}", "", width = GUTTER_WIDTH)?;
    for week in (0..=bounds.max_week).rev() {
        write!(out, "{}", month_label(grid, week))?;
    }
    writeln!(out)?;

    for day in 0..DAYS_IN_WEEK {
        write!(out, " {:<width$}", options.labels.label(day), width = GUTTER_WIDTH - 1)?;
        for week in (0..=bounds.max_week).rev() {
            write!(out, "{}", cell(grid, week, day, options))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Three-letter month name when `week` holds the first of a month.
fn month_label(grid: &Grid, week: u32) -> String {
    (0..DAYS_IN_WEEK)
        .map(|day| grid.date_of(week, day))
        .find(|date| date.day() == 1)
        .map(|date| format!("{:<width$}", date.format("%b").to_string(), width = CELL_WIDTH + SEPARATOR.len()))
        .unwrap_or_else(|| " ".repeat(CELL_WIDTH + SEPARATOR.len()))
}

fn cell(grid: &Grid, week: u32, day: u32, options: &RenderOptions) -> String {
    if !grid.in_window(week, day) {
        return " ".repeat(CELL_WIDTH + SEPARATOR.len());
    }

    let commits = grid.get(week, day);
    let text = match options.content {
        CellContent::DayOfMonth => format!("{:>width$}", grid.date_of(week, day).day(), width = CELL_WIDTH),
        CellContent::Count if commits > MAX_SHOWN_COUNT => format!("{OVERFLOW_LABEL:>width$}", width = CELL_WIDTH),
        CellContent::Count if commits > 0 => format!("{commits:>width$}", width = CELL_WIDTH),
        _ => " ".repeat(CELL_WIDTH),
    };

    let style = if grid.is_today(week, day) {
        today_style()
    } else {
        Activity::of(commits).style()
    };

    format!("{}{SEPARATOR}", style.force_styling(options.colors).apply_to(text))
}

/// Print the per-day counts as pretty JSON.
pub fn output_json(
    counts: &CommitCounts,
    grid: &Grid,
    repositories: &[String],
    email: Option<&str>,
) -> anyhow::Result<()> {
    let output = json_document(counts, grid, repositories, email);
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn json_document(counts: &CommitCounts, grid: &Grid, repositories: &[String], email: Option<&str>) -> GraphOutput {
    let today = grid.today().date();
    GraphOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repositories: repositories.to_vec(),
        email: email.map(str::to_string),
        today,
        window_start: grid.window_start(),
        days: counts
            .iter()
            .rev()
            .map(|(days_ago, commits)| DayCount {
                date: today - Duration::days(i64::from(days_ago)),
                days_ago,
                commits,
            })
            .collect(),
    }
}
