use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::{HolidaySource, HolidaySourceError};
use crate::calendar::HolidayEntry;
use crate::datasets::parse_holiday_ranges;
use crate::date_range::DateRange;

/// A named holiday spanning `start..=end`, as stored in the bundled table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRange {
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl HolidayRange {
    pub fn new(name: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            name: name.into(),
            start,
            end,
        }
    }

    /// One entry per covered date.
    pub fn expand(&self) -> Vec<HolidayEntry> {
        DateRange::new(self.start, self.end)
            .days()
            .map(|date| HolidayEntry::new(date, self.name.clone()))
            .collect()
    }
}

enum TableSource {
    File(PathBuf),
    Ranges(Vec<HolidayRange>),
}

/// Local fallback holiday table. File-backed tables are re-read on every fetch.
pub struct LocalHolidayTable {
    source: TableSource,
}

impl LocalHolidayTable {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            source: TableSource::File(path.into()),
        }
    }

    pub fn from_ranges(ranges: Vec<HolidayRange>) -> Self {
        Self {
            source: TableSource::Ranges(ranges),
        }
    }

    /// Expand every range that starts inside `range`. A holiday that starts
    /// before the trip is ignored; one that runs past the trip end is kept whole.
    pub fn entries_for(ranges: &[HolidayRange], range: DateRange) -> Vec<HolidayEntry> {
        ranges
            .iter()
            .filter(|holiday| range.contains(holiday.start))
            .flat_map(|holiday| holiday.expand())
            .collect()
    }
}

#[async_trait]
impl HolidaySource for LocalHolidayTable {
    async fn fetch(&self, range: DateRange) -> Result<Vec<HolidayEntry>, HolidaySourceError> {
        match &self.source {
            TableSource::Ranges(ranges) => Ok(Self::entries_for(ranges, range)),
            TableSource::File(path) => {
                let bytes = tokio::fs::read(path).await?;
                let ranges = parse_holiday_ranges(&bytes)?;
                Ok(Self::entries_for(&ranges, range))
            }
        }
    }
}
