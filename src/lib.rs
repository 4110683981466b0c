pub mod activity;
pub mod calendar;
pub mod config;
pub mod datasets;
pub mod date_range;
pub mod directory;
pub mod holidays;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod itinerary;
pub mod session;

pub use activity::{Activity, ActivityCatalog, filter_activities};
pub use calendar::{HolidayEntry, HolidayOrigin, RestDays, SABBATH_WEEKDAYS, shabbat_dates};
pub use config::PlannerConfig;
pub use datasets::{
    DatasetError, load_catalog_from_csv, load_catalog_from_json, load_directory_from_json,
    load_holiday_ranges_from_json, parse_holiday_ranges, validate_activities,
};
pub use date_range::{DateRange, date_key, parse_date_key};
pub use directory::{ContactCenter, ContactDirectory, CountryContacts};
pub use holidays::{
    HebcalClient, HolidayRange, HolidaySource, HolidaySourceError, LocalHolidayTable,
    RestDayResolver,
};
pub use itinerary::{DAILY_CAPACITY, Direction, Itinerary, ItineraryDay, allocate};
pub use session::{
    MAX_TRIP_DAYS, PlannerError, TripDetails, TripInfo, TripRequest, TripSession, WizardStep,
};
