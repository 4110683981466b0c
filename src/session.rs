use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info};

use crate::activity::{Activity, ActivityCatalog};
use crate::calendar::{HolidayEntry, RestDays};
use crate::date_range::DateRange;
use crate::directory::{ContactCenter, ContactDirectory};
use crate::holidays::RestDayResolver;
use crate::itinerary::{Direction, Itinerary, allocate};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlannerError {
    #[error("please fill in the {0}")]
    MissingField(&'static str),
    #[error("start date {start} must be on or before end date {end}")]
    StartAfterEnd { start: NaiveDate, end: NaiveDate },
    #[error("trips are limited to {max} days, this one spans {days}")]
    TripTooLong { days: i64, max: i64 },
    #[error("please select at least one activity")]
    NoActivitiesSelected,
    #[error("activity '{0}' is not among the offered activities")]
    UnknownActivity(String),
    #[error("trip details must be submitted first")]
    NotReady,
}

/// Longest trip, in days, that a request may span.
pub const MAX_TRIP_DAYS: i64 = 366;

/// Raw trip details as entered in the first wizard step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TripRequest {
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub preferences: Vec<String>,
    #[serde(default)]
    pub kosher: bool,
    #[serde(default)]
    pub travelers: Option<u32>,
    #[serde(default)]
    pub occasion: Option<String>,
}

/// Trip details that passed validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripDetails {
    pub range: DateRange,
    pub destination: String,
    pub preferences: Vec<String>,
    pub kosher: bool,
    pub travelers: Option<u32>,
    pub occasion: Option<String>,
}

impl TripRequest {
    pub fn validate(&self) -> Result<TripDetails, PlannerError> {
        let start = self.start_date.ok_or(PlannerError::MissingField("start date"))?;
        let end = self.end_date.ok_or(PlannerError::MissingField("end date"))?;
        let destination = self.destination.trim();
        if destination.is_empty() {
            return Err(PlannerError::MissingField("destination"));
        }
        if start > end {
            return Err(PlannerError::StartAfterEnd { start, end });
        }
        let days = (end - start).num_days() + 1;
        if days > MAX_TRIP_DAYS {
            return Err(PlannerError::TripTooLong {
                days,
                max: MAX_TRIP_DAYS,
            });
        }

        Ok(TripDetails {
            range: DateRange::new(start, end),
            destination: destination.to_string(),
            preferences: self.preferences.clone(),
            kosher: self.kosher,
            travelers: self.travelers,
            occasion: self.occasion.clone(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    TripDetails,
    ActivitySelection,
    Itinerary,
}

/// Contacts and holidays shown next to the itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripInfo {
    pub destination: String,
    pub contacts: Vec<ContactCenter>,
    pub holidays: Vec<HolidayEntry>,
}

/// State of one planning session, threaded through every wizard step.
#[derive(Debug, Clone)]
pub struct TripSession {
    catalog: ActivityCatalog,
    step: WizardStep,
    details: Option<TripDetails>,
    rest_days: Option<RestDays>,
    offered: Vec<Activity>,
    itinerary: Option<Itinerary>,
}

impl TripSession {
    pub fn new(catalog: ActivityCatalog) -> Self {
        Self {
            catalog,
            step: WizardStep::TripDetails,
            details: None,
            rest_days: None,
            offered: Vec::new(),
            itinerary: None,
        }
    }

    pub fn catalog(&self) -> &ActivityCatalog {
        &self.catalog
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn details(&self) -> Option<&TripDetails> {
        self.details.as_ref()
    }

    pub fn rest_days(&self) -> Option<&RestDays> {
        self.rest_days.as_ref()
    }

    pub fn offered(&self) -> &[Activity] {
        &self.offered
    }

    pub fn itinerary(&self) -> Option<&Itinerary> {
        self.itinerary.as_ref()
    }

    /// Validate, resolve rest days and move to activity selection.
    pub async fn submit_trip(
        &mut self,
        request: &TripRequest,
        resolver: &RestDayResolver,
    ) -> Result<&[Activity], PlannerError> {
        let details = request.validate()?;
        let rest_days = resolver.resolve(details.range.start, details.range.end).await;
        Ok(self.begin_trip(details, rest_days))
    }

    /// Store resolved rest days and offer the filtered catalog. Any previous
    /// itinerary is discarded.
    pub fn begin_trip(&mut self, details: TripDetails, rest_days: RestDays) -> &[Activity] {
        self.offered = self
            .catalog
            .filter(&details.destination, &details.preferences);
        info!(
            destination = %details.destination,
            start = %details.range.start,
            end = %details.range.end,
            offered = self.offered.len(),
            holidays = rest_days.holidays().len(),
            origin = ?rest_days.origin(),
            "trip submitted"
        );
        self.details = Some(details);
        self.rest_days = Some(rest_days);
        self.itinerary = None;
        self.step = WizardStep::ActivitySelection;
        &self.offered
    }

    /// Build the itinerary from the checked activity ids. The selection keeps
    /// the order in which activities were offered.
    pub fn select_activities<S: AsRef<str>>(
        &mut self,
        ids: &[S],
    ) -> Result<&Itinerary, PlannerError> {
        let (Some(details), Some(rest_days)) = (&self.details, &self.rest_days) else {
            return Err(PlannerError::NotReady);
        };
        if ids.is_empty() {
            return Err(PlannerError::NoActivitiesSelected);
        }

        let wanted: HashSet<&str> = ids.iter().map(|id| id.as_ref()).collect();
        if let Some(unknown) = ids
            .iter()
            .map(|id| id.as_ref())
            .find(|id: &&str| !self.offered.iter().any(|activity| activity.id == *id))
        {
            return Err(PlannerError::UnknownActivity(unknown.to_string()));
        }

        let selected: Vec<Activity> = self
            .offered
            .iter()
            .filter(|activity| wanted.contains(activity.id.as_str()))
            .cloned()
            .collect();

        let itinerary = allocate(&selected, details.range, rest_days);
        debug!(
            selected = selected.len(),
            days = itinerary.len(),
            "itinerary allocated"
        );
        self.step = WizardStep::Itinerary;
        Ok(self.itinerary.insert(itinerary))
    }

    pub fn move_within_day(
        &mut self,
        day_index: usize,
        activity_index: usize,
        direction: Direction,
    ) -> bool {
        self.itinerary
            .as_mut()
            .is_some_and(|itinerary| itinerary.move_within_day(day_index, activity_index, direction))
    }

    pub fn move_to_day(&mut self, from_day: usize, activity_index: usize, to_day: usize) -> bool {
        self.itinerary
            .as_mut()
            .is_some_and(|itinerary| itinerary.move_to_day(from_day, activity_index, to_day))
    }

    pub fn move_to_adjacent_day(
        &mut self,
        from_day: usize,
        activity_index: usize,
        direction: Direction,
    ) -> bool {
        self.itinerary.as_mut().is_some_and(|itinerary| {
            itinerary.move_to_adjacent_day(from_day, activity_index, direction)
        })
    }

    pub fn trip_info(&self, directory: &ContactDirectory) -> Option<TripInfo> {
        let details = self.details.as_ref()?;
        let contacts = directory
            .find_country(&details.destination)
            .map(|entry| entry.centers.clone())
            .unwrap_or_default();
        let holidays = self
            .rest_days
            .as_ref()
            .map(|rest_days| rest_days.holidays().to_vec())
            .unwrap_or_default();
        Some(TripInfo {
            destination: details.destination.clone(),
            contacts,
            holidays,
        })
    }
}
