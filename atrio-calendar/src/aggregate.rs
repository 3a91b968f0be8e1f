use atrio_lifecycle::{Booking, Event};
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeMap;

/// Number of cells in the month grid: six rows of seven days, so the
/// layout is rectangular regardless of which weekday the month starts on.
pub const GRID_SIZE: usize = 42;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CalendarError {
    #[error("invalid calendar month {month}/{year}")]
    InvalidMonth { year: i32, month: u32 },
}

/// Status tab selection. `All` filters nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(String),
}

impl StatusFilter {
    pub fn matches(&self, status_key: &str) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status_key,
        }
    }
}

/// Search box + status tab state applied while bucketing.
#[derive(Debug, Clone, Default)]
pub struct CalendarFilter {
    pub search_query: Option<String>,
    pub status: StatusFilter,
}

impl CalendarFilter {
    pub fn matches<T: CalendarDay>(&self, item: &T) -> bool {
        if !self.status.matches(item.status_key()) {
            return false;
        }
        match &self.search_query {
            None => true,
            Some(query) if query.is_empty() => true,
            Some(query) => {
                let needle = query.to_lowercase();
                item.search_haystack()
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            }
        }
    }
}

/// Anything that can be placed on the month grid: bookings land on their
/// check-in day, events on their event day.
pub trait CalendarDay {
    fn calendar_date(&self) -> NaiveDate;

    /// Fields the search box matches against (case-insensitive substring).
    fn search_haystack(&self) -> Vec<&str>;

    fn status_key(&self) -> &'static str;
}

impl CalendarDay for Booking {
    fn calendar_date(&self) -> NaiveDate {
        self.check_in.date_naive()
    }

    fn search_haystack(&self) -> Vec<&str> {
        vec![&self.guest_name, &self.reference_code, &self.room_number]
    }

    fn status_key(&self) -> &'static str {
        self.status.as_str()
    }
}

impl CalendarDay for Event {
    fn calendar_date(&self) -> NaiveDate {
        self.date
    }

    fn search_haystack(&self) -> Vec<&str> {
        vec![&self.client_name, &self.reference_code, &self.venue]
    }

    fn status_key(&self) -> &'static str {
        self.status.as_str()
    }
}

/// One cell of the month grid.
#[derive(Debug, Clone)]
pub struct CalendarBucket<'a, T> {
    pub date: NaiveDate,
    pub is_current_month: bool,
    pub items: Vec<&'a T>,
    pub total: usize,
}

/// Bucket `items` into the 42-cell grid for (year, month), applying the
/// filter. Pure and recomputed on every call; leading and trailing cells
/// belong to the neighboring months and are flagged via
/// `is_current_month`.
pub fn aggregate<'a, T: CalendarDay>(
    items: &'a [T],
    year: i32,
    month: u32,
    filter: &CalendarFilter,
) -> Result<Vec<CalendarBucket<'a, T>>, CalendarError> {
    let first_of_month = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(CalendarError::InvalidMonth { year, month })?;

    // Back up to the Sunday on or before the 1st
    let lead = first_of_month.weekday().num_days_from_sunday() as i64;
    let grid_start = first_of_month - Duration::days(lead);

    let mut buckets = Vec::with_capacity(GRID_SIZE);
    for offset in 0..GRID_SIZE as i64 {
        let date = grid_start + Duration::days(offset);
        let day_items: Vec<&T> = items
            .iter()
            .filter(|item| item.calendar_date() == date && filter.matches(*item))
            .collect();
        let total = day_items.len();
        buckets.push(CalendarBucket {
            date,
            is_current_month: date.year() == year && date.month() == month,
            items: day_items,
            total,
        });
    }
    Ok(buckets)
}

/// Group matching items by calendar day, the shape served by the
/// pre-grouped calendar endpoints. Only days with at least one item
/// appear.
pub fn group_by_day<'a, T: CalendarDay>(
    items: &'a [T],
    filter: &CalendarFilter,
) -> BTreeMap<NaiveDate, Vec<&'a T>> {
    let mut grouped: BTreeMap<NaiveDate, Vec<&T>> = BTreeMap::new();
    for item in items.iter().filter(|item| filter.matches(*item)) {
        grouped.entry(item.calendar_date()).or_default().push(item);
    }
    grouped
}
