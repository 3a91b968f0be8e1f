use atrio_calendar::{CalendarFilter, StatusFilter};
use atrio_core::ListParams;

/// Search box, status tab and month picker for one list page. Each page
/// controller owns its own instance; nothing here is shared globally.
#[derive(Debug, Clone)]
pub struct FilterState {
    pub search_query: String,
    pub status: StatusFilter,
    pub selected_month: (i32, u32),
}

impl FilterState {
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            search_query: String::new(),
            status: StatusFilter::All,
            selected_month: (year, month),
        }
    }

    pub fn year(&self) -> i32 {
        self.selected_month.0
    }

    pub fn month(&self) -> u32 {
        self.selected_month.1
    }

    /// Query parameters for the list fetch; the service applies the same
    /// filter semantics server-side.
    pub fn to_params(&self) -> ListParams {
        let mut params = ListParams::default().with_month(self.year(), self.month());
        if !self.search_query.is_empty() {
            params = params.with_search(self.search_query.clone());
        }
        if let StatusFilter::Only(status) = &self.status {
            params = params.with_status(status.clone());
        }
        params
    }

    /// The same filter, for local re-bucketing by the calendar grid.
    pub fn calendar_filter(&self) -> CalendarFilter {
        CalendarFilter {
            search_query: if self.search_query.is_empty() {
                None
            } else {
                Some(self.search_query.clone())
            },
            status: self.status.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_params_skips_empty_search() {
        let state = FilterState::new(2025, 3);
        let params = state.to_params();
        assert_eq!(params.search, None);
        assert_eq!(params.status, None);
        assert_eq!(params.month, Some(3));
        assert_eq!(params.year, Some(2025));
    }

    #[test]
    fn test_to_params_carries_filters() {
        let mut state = FilterState::new(2025, 3);
        state.search_query = "smith".to_string();
        state.status = StatusFilter::Only("confirmed".to_string());
        let params = state.to_params();
        assert_eq!(params.search.as_deref(), Some("smith"));
        assert_eq!(params.status.as_deref(), Some("confirmed"));
    }
}
