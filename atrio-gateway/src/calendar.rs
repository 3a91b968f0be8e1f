use crate::client::RestClient;
use atrio_core::{GatewayError, GatewayResult};
use atrio_lifecycle::{Booking, Event};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Wire shape of `GET /api/calendar-bookings`.
#[derive(Debug, Deserialize)]
struct CalendarBookingsPayload {
    success: bool,
    #[serde(default)]
    bookings: BTreeMap<NaiveDate, Vec<Booking>>,
}

/// Wire shape of `GET /api/calendar-events`.
#[derive(Debug, Deserialize)]
struct CalendarEventsPayload {
    success: bool,
    #[serde(default)]
    events: BTreeMap<NaiveDate, Vec<Event>>,
}

/// Filter parameters accepted by both calendar endpoints.
#[derive(Debug, Default, Clone)]
pub struct CalendarQuery {
    pub year: i32,
    pub month: u32,
    pub search: Option<String>,
    pub status: Option<String>,
}

impl CalendarQuery {
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            ..Self::default()
        }
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("month", self.month.to_string()),
            ("year", self.year.to_string()),
        ];
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(status) = &self.status {
            pairs.push(("status", status.clone()));
        }
        pairs
    }
}

impl RestClient {
    /// Server-grouped booking calendar for a month. Most pages fetch the
    /// flat list once and bucket locally instead; this endpoint stays for
    /// consumers that want the pre-grouped map.
    pub async fn calendar_bookings(
        &self,
        query: &CalendarQuery,
    ) -> GatewayResult<BTreeMap<NaiveDate, Vec<Booking>>> {
        let payload: CalendarBookingsPayload =
            self.fetch_calendar("calendar-bookings", query).await?;
        if !payload.success {
            return Err(calendar_failure());
        }
        Ok(payload.bookings)
    }

    pub async fn calendar_events(
        &self,
        query: &CalendarQuery,
    ) -> GatewayResult<BTreeMap<NaiveDate, Vec<Event>>> {
        let payload: CalendarEventsPayload = self.fetch_calendar("calendar-events", query).await?;
        if !payload.success {
            return Err(calendar_failure());
        }
        Ok(payload.events)
    }

    async fn fetch_calendar<P: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &CalendarQuery,
    ) -> GatewayResult<P> {
        self.get_with_query(endpoint, &query.query_pairs()).await
    }
}

fn calendar_failure() -> GatewayError {
    GatewayError::Status {
        code: 200,
        message: "calendar endpoint reported failure".to_string(),
    }
}

/// Collapse a server-grouped map back into a flat list, preserving day
/// order.
pub fn flatten_groups<T>(groups: BTreeMap<NaiveDate, Vec<T>>) -> Vec<T> {
    groups.into_values().flatten().collect()
}
