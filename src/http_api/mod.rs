use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::{
    Activity, ContactDirectory, Direction, Itinerary, PlannerError, RestDayResolver, RestDays,
    TripInfo, TripRequest, TripSession,
};

#[derive(Clone)]
pub struct AppState {
    session: Arc<RwLock<TripSession>>,
    resolver: Arc<RestDayResolver>,
    directory: Arc<ContactDirectory>,
}

impl AppState {
    pub fn new(session: TripSession, resolver: RestDayResolver, directory: ContactDirectory) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
            resolver: Arc::new(resolver),
            directory: Arc::new(directory),
        }
    }

    fn session(&self) -> Arc<RwLock<TripSession>> {
        self.session.clone()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    Invalid(String),
    Conflict(String),
}

impl From<PlannerError> for ApiError {
    fn from(value: PlannerError) -> Self {
        match value {
            PlannerError::NotReady => ApiError::Conflict(value.to_string()),
            other => ApiError::Invalid(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Invalid(message) => {
                let body = Json(ErrorBody {
                    error: "invalid_request",
                    message,
                });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            ApiError::Conflict(message) => {
                let body = Json(ErrorBody {
                    error: "conflict",
                    message,
                });
                (StatusCode::CONFLICT, body).into_response()
            }
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TripResponse {
    pub rest_days: RestDays,
    pub activities: Vec<Activity>,
}

#[derive(Debug, Deserialize)]
struct SelectionPayload {
    #[serde(default)]
    activity_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ReorderPayload {
    day_index: i64,
    activity_index: i64,
    direction: Direction,
}

#[derive(Debug, Deserialize)]
struct MovePayload {
    from_day: i64,
    activity_index: i64,
    to_day: i64,
}

/// Indices arrive signed so that a negative one is an out-of-range no-op
/// rather than a rejected body.
fn index(value: i64) -> Option<usize> {
    usize::try_from(value).ok()
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/activities", get(list_activities))
        .route("/trip", post(submit_trip))
        .route("/trip/selection", post(select_activities))
        .route("/trip/info", get(trip_info))
        .route("/itinerary", get(get_itinerary))
        .route("/itinerary/reorder", post(reorder_activity))
        .route("/itinerary/move", post(move_activity))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "trip planner HTTP API listening");
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn list_activities(State(state): State<AppState>) -> Json<Vec<Activity>> {
    let session = state.session();
    let activities = {
        let guard = session.read();
        guard.catalog().activities().to_vec()
    };
    Json(activities)
}

async fn submit_trip(
    State(state): State<AppState>,
    Json(request): Json<TripRequest>,
) -> Result<Json<TripResponse>, ApiError> {
    let details = request.validate()?;
    // Resolve before locking; the session lock is never held across an await.
    let rest_days = state
        .resolver
        .resolve(details.range.start, details.range.end)
        .await;
    let session = state.session();
    let activities = {
        let mut guard = session.write();
        guard.begin_trip(details, rest_days.clone()).to_vec()
    };
    Ok(Json(TripResponse {
        rest_days,
        activities,
    }))
}

async fn select_activities(
    State(state): State<AppState>,
    Json(payload): Json<SelectionPayload>,
) -> Result<Json<Itinerary>, ApiError> {
    let session = state.session();
    let itinerary = {
        let mut guard = session.write();
        guard.select_activities(payload.activity_ids.as_slice())?.clone()
    };
    Ok(Json(itinerary))
}

async fn get_itinerary(State(state): State<AppState>) -> Result<Json<Itinerary>, ApiError> {
    let session = state.session();
    let guard = session.read();
    current_itinerary(&guard)
}

async fn reorder_activity(
    State(state): State<AppState>,
    Json(payload): Json<ReorderPayload>,
) -> Result<Json<Itinerary>, ApiError> {
    let session = state.session();
    let mut guard = session.write();
    if let (Some(day), Some(activity)) = (index(payload.day_index), index(payload.activity_index)) {
        guard.move_within_day(day, activity, payload.direction);
    }
    current_itinerary(&guard)
}

async fn move_activity(
    State(state): State<AppState>,
    Json(payload): Json<MovePayload>,
) -> Result<Json<Itinerary>, ApiError> {
    let session = state.session();
    let mut guard = session.write();
    if let (Some(from_day), Some(activity), Some(to_day)) = (
        index(payload.from_day),
        index(payload.activity_index),
        index(payload.to_day),
    ) {
        guard.move_to_day(from_day, activity, to_day);
    }
    current_itinerary(&guard)
}

async fn trip_info(State(state): State<AppState>) -> Result<Json<TripInfo>, ApiError> {
    let session = state.session();
    let guard = session.read();
    guard
        .trip_info(&state.directory)
        .map(Json)
        .ok_or_else(|| ApiError::from(PlannerError::NotReady))
}

fn current_itinerary(session: &TripSession) -> Result<Json<Itinerary>, ApiError> {
    session
        .itinerary()
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::Conflict("no itinerary has been built yet".to_string()))
}
