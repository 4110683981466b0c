use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use super::{HolidaySource, HolidaySourceError};
use crate::calendar::HolidayEntry;
use crate::date_range::{DateRange, date_key, parse_date_key};

pub const DEFAULT_HEBCAL_URL: &str = "https://www.hebcal.com/hebcal/";

const HOLIDAY_CATEGORY: &str = "holiday";

/// One event from a Hebcal JSON feed.
#[derive(Debug, Clone, Deserialize)]
pub struct HebcalItem {
    pub title: String,
    pub date: String,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HebcalFeed {
    #[serde(default)]
    pub items: Vec<HebcalItem>,
}

impl HebcalFeed {
    /// Holiday-category items as dated entries. Items with an unreadable date are skipped.
    pub fn holiday_entries(&self) -> Vec<HolidayEntry> {
        self.items
            .iter()
            .filter(|item| item.category.as_deref() == Some(HOLIDAY_CATEGORY))
            .filter_map(|item| {
                // Timed events carry `YYYY-MM-DDTHH:MM:SS±HH:MM`; only the day matters.
                let day = item.date.get(..10)?;
                parse_date_key(day).map(|date| HolidayEntry::new(date, item.title.clone()))
            })
            .collect()
    }
}

/// Remote holiday source backed by the Hebcal calendar API.
pub struct HebcalClient {
    client: reqwest::Client,
    base_url: String,
}

impl HebcalClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, HolidaySourceError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn query(range: DateRange) -> [(&'static str, String); 8] {
        [
            ("v", "1".to_string()),
            ("cfg", "json".to_string()),
            ("maj", "on".to_string()),
            ("min", "on".to_string()),
            ("mod", "on".to_string()),
            ("start", date_key(range.start)),
            ("end", date_key(range.end)),
            ("geo", "none".to_string()),
        ]
    }
}

#[async_trait]
impl HolidaySource for HebcalClient {
    async fn fetch(&self, range: DateRange) -> Result<Vec<HolidayEntry>, HolidaySourceError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&Self::query(range))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(HolidaySourceError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let feed: HebcalFeed = serde_json::from_slice(&body)?;
        Ok(feed.holiday_entries())
    }
}
