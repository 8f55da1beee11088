//! Calendar month grid and schedule entries.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Days of the month that carry a pet event marker.
pub const EVENT_DAYS: [u32; 3] = [15, 20, 28];

/// Day of the month that additionally carries a medication check.
pub const MEDICATION_CHECK_DAY: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid calendar month: {year}-{month}")]
pub struct InvalidMonth {
    pub year: i32,
    pub month: u32,
}

/// Category of a schedule entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    Health,
    Community,
}

/// One entry in the pet's daily schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub time: String,
    pub title: String,
    pub location: String,
    pub kind: EventKind,
}

/// One cell of the month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub day: u32,
    pub has_event: bool,
    pub medication_check: bool,
}

/// A month laid out for a Sunday-first grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    /// Empty cells before day 1 (0 = the month starts on Sunday).
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
}

impl CalendarMonth {
    /// Lay out `year`-`month` (1-based month).
    pub fn new(year: i32, month: u32) -> Result<Self, InvalidMonth> {
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(InvalidMonth { year, month })?;
        let total = days_in_month(first);
        let leading_blanks = first.weekday().num_days_from_sunday();
        let days = (1..=total)
            .map(|day| CalendarDay {
                day,
                has_event: EVENT_DAYS.contains(&day),
                medication_check: day == MEDICATION_CHECK_DAY,
            })
            .collect();
        Ok(Self {
            year,
            month,
            leading_blanks,
            days,
        })
    }

    /// The month before this one.
    pub const fn previous(&self) -> MonthKey {
        if self.month == 1 {
            MonthKey::new(self.year - 1, 12)
        } else {
            MonthKey::new(self.year, self.month - 1)
        }
    }

    /// The month after this one.
    pub const fn next(&self) -> MonthKey {
        if self.month == 12 {
            MonthKey::new(self.year + 1, 1)
        } else {
            MonthKey::new(self.year, self.month + 1)
        }
    }
}

/// A year and 1-based month, as used by the calendar's navigation arrows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub const fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }
}

fn days_in_month(first: NaiveDate) -> u32 {
    let next_first = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    next_first.map_or(31, |next| {
        u32::try_from((next - first).num_days()).unwrap_or(31)
    })
}
