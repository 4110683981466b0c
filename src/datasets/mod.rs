use std::collections::HashSet;
use thiserror::Error;

use crate::activity::Activity;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type DatasetResult<T> = Result<T, DatasetError>;

/// Activity ids must be non-empty and unique within a catalog.
pub fn validate_activities(activities: &[Activity]) -> DatasetResult<()> {
    let mut seen_ids = HashSet::with_capacity(activities.len());
    for (idx, activity) in activities.iter().enumerate() {
        if activity.id.trim().is_empty() {
            return Err(DatasetError::InvalidData(format!(
                "activity #{idx} ('{}') has an empty id",
                activity.name
            )));
        }
        if !seen_ids.insert(activity.id.as_str()) {
            return Err(DatasetError::InvalidData(format!(
                "duplicate activity id {}",
                activity.id
            )));
        }
    }
    Ok(())
}

pub mod file;

pub use file::{
    load_catalog_from_csv, load_catalog_from_json, load_directory_from_json,
    load_holiday_ranges_from_json, parse_holiday_ranges,
};
