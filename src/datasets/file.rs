use super::{DatasetError, DatasetResult};
use crate::{
    activity::{Activity, ActivityCatalog},
    directory::{ContactDirectory, CountryContacts},
    holidays::HolidayRange,
};
use serde::Deserialize;
use std::fs::File;
use std::path::Path;

const CATEGORY_SEPARATOR: char = ';';

pub fn load_catalog_from_json<P: AsRef<Path>>(path: P) -> DatasetResult<ActivityCatalog> {
    let file = File::open(path)?;
    let activities: Vec<Activity> = serde_json::from_reader(file)?;
    super::validate_activities(&activities)?;
    Ok(ActivityCatalog::new(activities))
}

#[derive(Deserialize)]
struct ActivityCsvRecord {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    categories: String,
}

impl From<ActivityCsvRecord> for Activity {
    fn from(record: ActivityCsvRecord) -> Self {
        let categories = record
            .categories
            .split(CATEGORY_SEPARATOR)
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(ToOwned::to_owned)
            .collect();
        Activity {
            id: record.id.trim().to_string(),
            name: record.name,
            description: record.description,
            categories,
        }
    }
}

/// Columns `id,name,description,categories`; categories are `;`-separated.
pub fn load_catalog_from_csv<P: AsRef<Path>>(path: P) -> DatasetResult<ActivityCatalog> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut activities = Vec::new();
    for record in reader.deserialize::<ActivityCsvRecord>() {
        activities.push(Activity::from(record?));
    }
    super::validate_activities(&activities)?;
    Ok(ActivityCatalog::new(activities))
}

pub fn load_directory_from_json<P: AsRef<Path>>(path: P) -> DatasetResult<ContactDirectory> {
    let file = File::open(path)?;
    let countries: Vec<CountryContacts> = serde_json::from_reader(file)?;
    Ok(ContactDirectory::new(countries))
}

/// Parse a holiday table and reject ranges that end before they start.
pub fn parse_holiday_ranges(bytes: &[u8]) -> DatasetResult<Vec<HolidayRange>> {
    let ranges: Vec<HolidayRange> = serde_json::from_slice(bytes)?;
    if let Some(bad) = ranges.iter().find(|range| range.end < range.start) {
        return Err(DatasetError::InvalidData(format!(
            "holiday '{}' ends ({}) before it starts ({})",
            bad.name, bad.end, bad.start
        )));
    }
    Ok(ranges)
}

pub fn load_holiday_ranges_from_json<P: AsRef<Path>>(path: P) -> DatasetResult<Vec<HolidayRange>> {
    let bytes = std::fs::read(path)?;
    parse_holiday_ranges(&bytes)
}
