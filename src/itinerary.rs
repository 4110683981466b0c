use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::activity::Activity;
use crate::calendar::RestDays;
use crate::date_range::{DateRange, date_key};

/// Activities placed on each available day before overflow handling.
pub const DAILY_CAPACITY: usize = 2;

pub const REST_DAY_NOTE: &str = "Rest and synagogue attendance day";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryDay {
    pub date: NaiveDate,
    pub activities: Vec<Activity>,
    pub is_shabbat: bool,
    pub is_holiday: bool,
}

impl ItineraryDay {
    pub fn new(date: NaiveDate, is_shabbat: bool, is_holiday: bool) -> Self {
        Self {
            date,
            activities: Vec::new(),
            is_shabbat,
            is_holiday,
        }
    }

    pub fn is_rest_day(&self) -> bool {
        self.is_shabbat || self.is_holiday
    }

    /// Day heading, e.g. `2025-04-13 – Pesach I (No travel)`.
    pub fn title(&self, rest_days: &RestDays) -> String {
        let key = date_key(self.date);
        if self.is_holiday {
            let name = rest_days.holiday_title(self.date).unwrap_or("Holiday");
            format!("{key} – {name} (No travel)")
        } else if self.is_shabbat {
            format!("{key} – Shabbat (No travel)")
        } else {
            key
        }
    }
}

/// Which way to move an activity: up/down within a day, or to the
/// previous/next day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Earlier,
    Later,
}

impl Direction {
    pub fn offset(self) -> isize {
        match self {
            Direction::Earlier => -1,
            Direction::Later => 1,
        }
    }

    /// `index` shifted one step, if it stays within `0..len`.
    pub fn step(self, index: usize, len: usize) -> Option<usize> {
        index
            .checked_add_signed(self.offset())
            .filter(|next| *next < len)
    }
}

/// Day-by-day plan covering the whole trip range, one entry per date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Itinerary {
    days: Vec<ItineraryDay>,
}

impl Itinerary {
    pub fn days(&self) -> &[ItineraryDay] {
        &self.days
    }

    pub fn day(&self, index: usize) -> Option<&ItineraryDay> {
        self.days.get(index)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn activity_count(&self) -> usize {
        self.days.iter().map(|day| day.activities.len()).sum()
    }

    /// Swap the activity at `activity_index` with its neighbour in `direction`.
    /// Returns `false` and leaves the itinerary untouched when either index is out of range.
    pub fn move_within_day(
        &mut self,
        day_index: usize,
        activity_index: usize,
        direction: Direction,
    ) -> bool {
        let Some(day) = self.days.get_mut(day_index) else {
            return false;
        };
        if activity_index >= day.activities.len() {
            return false;
        }
        match direction.step(activity_index, day.activities.len()) {
            Some(neighbour) => {
                day.activities.swap(activity_index, neighbour);
                true
            }
            None => false,
        }
    }

    /// Remove an activity from one day and append it to another. Rest days are
    /// valid targets. Out-of-range indices are a no-op.
    pub fn move_to_day(&mut self, from_day: usize, activity_index: usize, to_day: usize) -> bool {
        if to_day >= self.days.len() || from_day >= self.days.len() {
            return false;
        }
        if activity_index >= self.days[from_day].activities.len() {
            return false;
        }
        let activity = self.days[from_day].activities.remove(activity_index);
        self.days[to_day].activities.push(activity);
        true
    }

    /// Move an activity to the previous or next day. Nothing happens at the
    /// first or last day of the trip.
    pub fn move_to_adjacent_day(
        &mut self,
        from_day: usize,
        activity_index: usize,
        direction: Direction,
    ) -> bool {
        match direction.step(from_day, self.days.len()) {
            Some(to_day) => self.move_to_day(from_day, activity_index, to_day),
            None => false,
        }
    }
}

/// Spread `selected` over `range`, at most [`DAILY_CAPACITY`] per available
/// day, skipping Sabbath and holidays.
///
/// Activities left over after every day has been visited go to the last
/// available day regardless of how full it is. If the range has no available
/// day at all, leftovers are dropped.
pub fn allocate(selected: &[Activity], range: DateRange, rest_days: &RestDays) -> Itinerary {
    let mut days: Vec<ItineraryDay> = range
        .days()
        .map(|date| ItineraryDay::new(date, rest_days.is_shabbat(date), rest_days.is_holiday(date)))
        .collect();

    let mut pending = selected.iter();
    for day in days.iter_mut().filter(|day| !day.is_rest_day()) {
        day.activities
            .extend(pending.by_ref().take(DAILY_CAPACITY).cloned());
    }

    let leftovers: Vec<Activity> = pending.cloned().collect();
    if !leftovers.is_empty() {
        match days.iter_mut().rev().find(|day| !day.is_rest_day()) {
            Some(last) => {
                debug!(
                    count = leftovers.len(),
                    date = %last.date,
                    "over capacity, appending remaining activities to last available day"
                );
                last.activities.extend(leftovers);
            }
            None => debug!(
                count = leftovers.len(),
                "no available day in range, dropping selected activities"
            ),
        }
    }

    Itinerary { days }
}
