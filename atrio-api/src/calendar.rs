use crate::state::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use atrio_calendar::{group_by_day, CalendarDay, CalendarFilter, StatusFilter};
use atrio_lifecycle::{Booking, Event};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Query accepted by both calendar endpoints.
#[derive(Debug, Deserialize)]
pub struct CalendarParams {
    pub month: u32,
    pub year: i32,
    pub search: Option<String>,
    pub status: Option<String>,
}

impl CalendarParams {
    fn filter(&self) -> CalendarFilter {
        CalendarFilter {
            search_query: self.search.clone(),
            status: match self.status.as_deref() {
                None | Some("all") => StatusFilter::All,
                Some(status) => StatusFilter::Only(status.to_string()),
            },
        }
    }

    fn in_month(&self, date: NaiveDate) -> bool {
        date.month() == self.month && date.year() == self.year
    }
}

#[derive(Debug, Serialize)]
pub struct CalendarBookingsResponse {
    pub success: bool,
    pub bookings: BTreeMap<NaiveDate, Vec<Booking>>,
}

#[derive(Debug, Serialize)]
pub struct CalendarEventsResponse {
    pub success: bool,
    pub events: BTreeMap<NaiveDate, Vec<Event>>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/calendar-bookings", get(calendar_bookings))
        .route("/api/calendar-events", get(calendar_events))
}

/// GET /api/calendar-bookings
/// Month's bookings pre-grouped by check-in day. Kept for consumers that
/// want the grouped shape; the desk pages bucket the flat list locally.
async fn calendar_bookings(
    State(state): State<AppState>,
    Query(params): Query<CalendarParams>,
) -> Json<CalendarBookingsResponse> {
    let filter = params.filter();
    let rows: Vec<Booking> = state
        .directory
        .list_bookings()
        .await
        .into_iter()
        .filter(|b| params.in_month(b.calendar_date()))
        .collect();
    let bookings = group_by_day(&rows, &filter)
        .into_iter()
        .map(|(date, items)| (date, items.into_iter().cloned().collect()))
        .collect();
    Json(CalendarBookingsResponse {
        success: true,
        bookings,
    })
}

/// GET /api/calendar-events
async fn calendar_events(
    State(state): State<AppState>,
    Query(params): Query<CalendarParams>,
) -> Json<CalendarEventsResponse> {
    let filter = params.filter();
    let rows: Vec<Event> = state
        .directory
        .list_events()
        .await
        .into_iter()
        .filter(|e| params.in_month(e.calendar_date()))
        .collect();
    let events = group_by_day(&rows, &filter)
        .into_iter()
        .map(|(date, items)| (date, items.into_iter().cloned().collect()))
        .collect();
    Json(CalendarEventsResponse {
        success: true,
        events,
    })
}
