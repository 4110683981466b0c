use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, warn};

use crate::calendar::{HolidayEntry, HolidayOrigin, RestDays};
use crate::datasets::DatasetError;
use crate::date_range::DateRange;

pub mod hebcal;
pub mod local;

pub use hebcal::{HebcalClient, HebcalFeed, HebcalItem};
pub use local::{HolidayRange, LocalHolidayTable};

#[derive(Debug, Error)]
pub enum HolidaySourceError {
    #[error("holiday request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("holiday service returned status {0}")]
    Status(u16),
    #[error("holiday data could not be read: {0}")]
    Io(#[from] std::io::Error),
    #[error("holiday data is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("holiday table rejected: {0}")]
    Table(#[from] DatasetError),
}

/// Anything that can list holidays for a date range.
#[async_trait]
pub trait HolidaySource: Send + Sync {
    async fn fetch(&self, range: DateRange) -> Result<Vec<HolidayEntry>, HolidaySourceError>;
}

/// Computes Sabbath dates locally and resolves holidays from a primary source,
/// falling back to a secondary one when the primary fails or finds nothing.
///
/// Resolution never fails; the worst case is an empty holiday list tagged
/// [`HolidayOrigin::Empty`].
pub struct RestDayResolver {
    primary: Box<dyn HolidaySource>,
    fallback: Box<dyn HolidaySource>,
}

impl RestDayResolver {
    pub fn new(primary: Box<dyn HolidaySource>, fallback: Box<dyn HolidaySource>) -> Self {
        Self { primary, fallback }
    }

    pub async fn resolve(&self, start: NaiveDate, end: NaiveDate) -> RestDays {
        let range = DateRange::new(start, end);
        let (holidays, origin) = self.resolve_holidays(range).await;
        RestDays::new(range, holidays, origin)
    }

    async fn resolve_holidays(&self, range: DateRange) -> (Vec<HolidayEntry>, HolidayOrigin) {
        match self.primary.fetch(range).await {
            Ok(entries) if !entries.is_empty() => return (entries, HolidayOrigin::Remote),
            Ok(_) => debug!(
                start = %range.start,
                end = %range.end,
                "remote holiday lookup returned no holidays, using local table"
            ),
            Err(err) => warn!(error = %err, "remote holiday lookup failed, using local table"),
        }

        match self.fallback.fetch(range).await {
            Ok(entries) if !entries.is_empty() => (entries, HolidayOrigin::Fallback),
            Ok(_) => {
                debug!(start = %range.start, end = %range.end, "no local holidays in range");
                (Vec::new(), HolidayOrigin::Empty)
            }
            Err(err) => {
                warn!(error = %err, "failed to load local holidays");
                (Vec::new(), HolidayOrigin::Empty)
            }
        }
    }
}
