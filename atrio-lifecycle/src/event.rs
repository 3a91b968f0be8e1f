use crate::transition::{StatusAction, TransitionError};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Venue event lifecycle status. Mirrors the booking table with
/// `completed` in place of the check-in/check-out pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl EventStatus {
    pub const ALL: [EventStatus; 4] = [
        EventStatus::Pending,
        EventStatus::Confirmed,
        EventStatus::Completed,
        EventStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Pending => "pending",
            EventStatus::Confirmed => "confirmed",
            EventStatus::Completed => "completed",
            EventStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EventStatus::Pending => "Pending",
            EventStatus::Confirmed => "Confirmed",
            EventStatus::Completed => "Completed",
            EventStatus::Cancelled => "Cancelled",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            EventStatus::Pending => "yellow",
            EventStatus::Confirmed => "green",
            EventStatus::Completed => "gray",
            EventStatus::Cancelled => "red",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            EventStatus::Pending => "clock",
            EventStatus::Confirmed => "check-circle",
            EventStatus::Completed => "flag",
            EventStatus::Cancelled => "x-circle",
        }
    }

    pub fn actions(&self) -> &'static [StatusAction<EventStatus>] {
        match self {
            EventStatus::Pending => &[
                StatusAction {
                    to: EventStatus::Confirmed,
                    label: "Confirm Event",
                },
                StatusAction {
                    to: EventStatus::Cancelled,
                    label: "Cancel Event",
                },
            ],
            EventStatus::Confirmed => &[StatusAction {
                to: EventStatus::Completed,
                label: "Mark Completed",
            }],
            EventStatus::Completed | EventStatus::Cancelled => &[],
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.actions().is_empty()
    }

    pub fn validate_transition(self, to: EventStatus) -> Result<(), TransitionError> {
        if self.actions().iter().any(|action| action.to == to) {
            Ok(())
        } else {
            Err(TransitionError::InvalidTransition {
                from: self.as_str(),
                to: to.as_str(),
            })
        }
    }

    pub fn can_delete(&self) -> bool {
        matches!(self, EventStatus::Pending | EventStatus::Confirmed)
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = TransitionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        EventStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| TransitionError::UnknownStatus(value.to_string()))
    }
}

/// A venue reservation (banquet, conference, private dining).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub id: Uuid,
    pub reference_code: String,
    pub client_name: String,
    pub venue: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub guest_count: u32,
    pub status: EventStatus,
    pub total_amount: f64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    pub fn update_status(&mut self, status: EventStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    pub fn apply_update(&mut self, update: &UpdateEvent) {
        if let Some(client_name) = &update.client_name {
            self.client_name = client_name.clone();
        }
        if let Some(venue) = &update.venue {
            self.venue = venue.clone();
        }
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(start_time) = update.start_time {
            self.start_time = start_time;
        }
        if let Some(end_time) = update.end_time {
            self.end_time = end_time;
        }
        if let Some(guest_count) = update.guest_count {
            self.guest_count = guest_count;
        }
        if let Some(total_amount) = update.total_amount {
            self.total_amount = total_amount;
        }
        if let Some(notes) = &update.notes {
            self.notes = Some(notes.clone());
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateEvent {
    #[validate(length(min = 1, message = "client name is required"))]
    pub client_name: String,
    #[validate(length(min = 1, message = "venue is required"))]
    pub venue: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[validate(range(min = 1, message = "guest count must be positive"))]
    pub guest_count: u32,
    #[validate(range(min = 0.0, message = "total amount cannot be negative"))]
    pub total_amount: f64,
    pub notes: Option<String>,
}

impl CreateEvent {
    /// The event end must fall strictly after its start.
    pub fn times_ordered(&self) -> bool {
        self.end_time > self.start_time
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateEvent {
    #[validate(length(min = 1, message = "client name is required"))]
    pub client_name: Option<String>,
    #[validate(length(min = 1, message = "venue is required"))]
    pub venue: Option<String>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    #[validate(range(min = 1, message = "guest count must be positive"))]
    pub guest_count: Option<u32>,
    #[validate(range(min = 0.0, message = "total amount cannot be negative"))]
    pub total_amount: Option<f64>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_transition_table_is_total() {
        for status in EventStatus::ALL {
            match status {
                EventStatus::Completed | EventStatus::Cancelled => {
                    assert!(status.is_terminal())
                }
                _ => assert!(!status.actions().is_empty()),
            }
        }
    }

    #[test]
    fn test_confirmed_event_completes() {
        EventStatus::Pending
            .validate_transition(EventStatus::Confirmed)
            .unwrap();
        EventStatus::Confirmed
            .validate_transition(EventStatus::Completed)
            .unwrap();
        assert!(EventStatus::Pending
            .validate_transition(EventStatus::Completed)
            .is_err());
    }

    #[test]
    fn test_times_ordered() {
        let event = CreateEvent {
            client_name: "Garcia Wedding".to_string(),
            venue: "Terrace Hall".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 6, 14).unwrap(),
            start_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(23, 0, 0).unwrap(),
            guest_count: 120,
            total_amount: 8400.0,
            notes: None,
        };
        assert!(event.times_ordered());

        let inverted = CreateEvent {
            end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            ..event
        };
        assert!(!inverted.times_ordered());
    }
}
