pub mod aggregate;
pub mod dates;

pub use aggregate::{
    aggregate, group_by_day, CalendarBucket, CalendarDay, CalendarError, CalendarFilter,
    StatusFilter,
};
pub use dates::{
    days_from, days_from_now, format_date, format_time, nights_between, DateRangeError,
};
