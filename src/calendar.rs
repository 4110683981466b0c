use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::date_range::DateRange;

/// Weekdays treated as Sabbath. Friday is included as the travel-cautious eve.
pub const SABBATH_WEEKDAYS: [Weekday; 2] = [Weekday::Fri, Weekday::Sat];

/// Dates in `range` that fall on a Sabbath weekday.
pub fn shabbat_dates(range: &DateRange) -> BTreeSet<NaiveDate> {
    range
        .days()
        .filter(|day| SABBATH_WEEKDAYS.contains(&day.weekday()))
        .collect()
}

/// A single dated holiday. Multi-day holidays expand into one entry per date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayEntry {
    pub date: NaiveDate,
    pub title: String,
}

impl HolidayEntry {
    pub fn new(date: NaiveDate, title: impl Into<String>) -> Self {
        Self {
            date,
            title: title.into(),
        }
    }
}

/// Which resolution path produced a holiday list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolidayOrigin {
    Remote,
    Fallback,
    Empty,
}

/// Sabbath and holiday dates for one trip range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestDays {
    range: DateRange,
    shabbat: BTreeSet<NaiveDate>,
    holidays: Vec<HolidayEntry>,
    origin: HolidayOrigin,
}

impl RestDays {
    pub fn new(range: DateRange, holidays: Vec<HolidayEntry>, origin: HolidayOrigin) -> Self {
        Self {
            range,
            shabbat: shabbat_dates(&range),
            holidays,
            origin,
        }
    }

    /// Rest days with only the weekly Sabbath and no resolved holidays.
    pub fn sabbath_only(range: DateRange) -> Self {
        Self::new(range, Vec::new(), HolidayOrigin::Empty)
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn shabbat(&self) -> &BTreeSet<NaiveDate> {
        &self.shabbat
    }

    pub fn holidays(&self) -> &[HolidayEntry] {
        &self.holidays
    }

    pub fn origin(&self) -> HolidayOrigin {
        self.origin
    }

    pub fn is_shabbat(&self, date: NaiveDate) -> bool {
        self.shabbat.contains(&date)
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.iter().any(|holiday| holiday.date == date)
    }

    pub fn is_rest_day(&self, date: NaiveDate) -> bool {
        self.is_shabbat(date) || self.is_holiday(date)
    }

    /// Title of the first holiday resolved for `date`.
    pub fn holiday_title(&self, date: NaiveDate) -> Option<&str> {
        self.holidays
            .iter()
            .find(|holiday| holiday.date == date)
            .map(|holiday| holiday.title.as_str())
    }

    /// Dates in the range that are neither Sabbath nor holiday.
    pub fn available_days(&self) -> Vec<NaiveDate> {
        self.range
            .days()
            .filter(|day| !self.is_rest_day(*day))
            .collect()
    }
}
