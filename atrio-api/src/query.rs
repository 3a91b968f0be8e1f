use atrio_calendar::{CalendarFilter, StatusFilter};
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

/// Query string accepted by the list endpoints. The legacy clients also
/// send a `_t` cache-bust parameter; unknown keys are simply ignored.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

impl ListQuery {
    /// Search/status as a calendar filter; a `status` of `all` filters
    /// nothing, matching the status-tab semantics.
    pub fn calendar_filter(&self) -> CalendarFilter {
        CalendarFilter {
            search_query: self.search.clone(),
            status: match self.status.as_deref() {
                None | Some("all") => StatusFilter::All,
                Some(status) => StatusFilter::Only(status.to_string()),
            },
        }
    }

    /// True when the date falls in the requested month, or when no month
    /// was requested.
    pub fn matches_month(&self, date: NaiveDate) -> bool {
        match (self.month, self.year) {
            (Some(month), Some(year)) => date.month() == month && date.year() == year,
            (Some(month), None) => date.month() == month,
            (None, Some(year)) => date.year() == year,
            (None, None) => true,
        }
    }

    /// Case-insensitive substring search for the catalog entities.
    pub fn search_matches(&self, haystack: &[&str]) -> bool {
        match &self.search {
            None => true,
            Some(query) if query.is_empty() => true,
            Some(query) => {
                let needle = query.to_lowercase();
                haystack
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            }
        }
    }

    pub fn status_matches(&self, key: &str) -> bool {
        match self.status.as_deref() {
            None | Some("all") => true,
            Some(wanted) => wanted == key,
        }
    }
}
