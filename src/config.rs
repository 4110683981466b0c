use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::holidays::{
    HebcalClient, HolidaySourceError, LocalHolidayTable, RestDayResolver, hebcal::DEFAULT_HEBCAL_URL,
};

pub const DATA_DIR_VAR: &str = "TRIP_PLANNER_DATA_DIR";
pub const HEBCAL_URL_VAR: &str = "TRIP_PLANNER_HEBCAL_URL";
pub const TIMEOUT_VAR: &str = "TRIP_PLANNER_TIMEOUT_SECS";
pub const HTTP_ADDR_VAR: &str = "TRIP_PLANNER_HTTP_ADDR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Directory holding `activities.json`, `chabad.json` and `holidays.json`.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_hebcal_url")]
    pub hebcal_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_http_addr")]
    pub http_addr: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_hebcal_url() -> String {
    DEFAULT_HEBCAL_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_http_addr() -> String {
    "0.0.0.0:3000".to_string()
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            hebcal_url: default_hebcal_url(),
            request_timeout_secs: default_request_timeout_secs(),
            http_addr: default_http_addr(),
        }
    }
}

impl PlannerConfig {
    /// Defaults overridden by any `TRIP_PLANNER_*` variables that are set.
    /// An unparsable timeout keeps the default.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(dir) = std::env::var(DATA_DIR_VAR) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(url) = std::env::var(HEBCAL_URL_VAR) {
            config.hebcal_url = url;
        }
        if let Some(secs) = std::env::var(TIMEOUT_VAR)
            .ok()
            .and_then(|value| value.trim().parse().ok())
        {
            config.request_timeout_secs = secs;
        }
        if let Ok(addr) = std::env::var(HTTP_ADDR_VAR) {
            config.http_addr = addr;
        }
        config
    }

    pub fn activities_path(&self) -> PathBuf {
        self.data_dir.join("activities.json")
    }

    pub fn directory_path(&self) -> PathBuf {
        self.data_dir.join("chabad.json")
    }

    pub fn holidays_path(&self) -> PathBuf {
        self.data_dir.join("holidays.json")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Hebcal as the primary holiday source, the bundled table as fallback.
    pub fn build_resolver(&self) -> Result<RestDayResolver, HolidaySourceError> {
        let remote = HebcalClient::new(self.hebcal_url.clone(), self.request_timeout())?;
        let local = LocalHolidayTable::from_path(self.holidays_path());
        Ok(RestDayResolver::new(Box::new(remote), Box::new(local)))
    }
}
