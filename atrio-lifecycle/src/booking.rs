use crate::payment::PaymentStatus;
use crate::transition::{StatusAction, TransitionError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Booking lifecycle status.
///
/// The wire form is snake_case (`checked_in`); `checked_out` and
/// `cancelled` are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 5] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::CheckedIn,
        BookingStatus::CheckedOut,
        BookingStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::CheckedIn => "checked_in",
            BookingStatus::CheckedOut => "checked_out",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::CheckedIn => "Checked In",
            BookingStatus::CheckedOut => "Checked Out",
            BookingStatus::Cancelled => "Cancelled",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "yellow",
            BookingStatus::Confirmed => "green",
            BookingStatus::CheckedIn => "blue",
            BookingStatus::CheckedOut => "gray",
            BookingStatus::Cancelled => "red",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "clock",
            BookingStatus::Confirmed => "check-circle",
            BookingStatus::CheckedIn => "log-in",
            BookingStatus::CheckedOut => "log-out",
            BookingStatus::Cancelled => "x-circle",
        }
    }

    /// Statuses reachable by a single user action, with button labels.
    /// Terminal statuses return the empty slice.
    pub fn actions(&self) -> &'static [StatusAction<BookingStatus>] {
        match self {
            BookingStatus::Pending => &[
                StatusAction {
                    to: BookingStatus::Confirmed,
                    label: "Confirm Booking",
                },
                StatusAction {
                    to: BookingStatus::Cancelled,
                    label: "Cancel Booking",
                },
            ],
            BookingStatus::Confirmed => &[StatusAction {
                to: BookingStatus::CheckedIn,
                label: "Check-In",
            }],
            BookingStatus::CheckedIn => &[StatusAction {
                to: BookingStatus::CheckedOut,
                label: "Check-Out",
            }],
            BookingStatus::CheckedOut | BookingStatus::Cancelled => &[],
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.actions().is_empty()
    }

    /// Single-step reachability check. The desk hides illegal buttons, the
    /// service enforces the same table at the boundary.
    pub fn validate_transition(self, to: BookingStatus) -> Result<(), TransitionError> {
        if self.actions().iter().any(|action| action.to == to) {
            Ok(())
        } else {
            Err(TransitionError::InvalidTransition {
                from: self.as_str(),
                to: to.as_str(),
            })
        }
    }

    /// Delete is irreversible and only permitted before arrival.
    pub fn can_delete(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = TransitionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        BookingStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| TransitionError::UnknownStatus(value.to_string()))
    }
}

/// A room reservation as stored and served by the back office.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    pub id: Uuid,
    pub reference_code: String,
    pub guest_name: String,
    pub guest_email: String,
    pub room_number: String,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub adults: u32,
    pub children: u32,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub total_amount: f64,
    pub special_requests: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn guest_count(&self) -> u32 {
        self.adults + self.children
    }

    pub fn update_status(&mut self, status: BookingStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}

/// Create payload submitted by the booking modal. Bookings always start
/// out `pending`/`unpaid`; date ordering is checked separately so the
/// error lands on the `check_out` field.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBooking {
    #[validate(length(min = 1, message = "guest name is required"))]
    pub guest_name: String,
    #[validate(email(message = "guest email is invalid"))]
    pub guest_email: String,
    #[validate(length(min = 1, message = "room number is required"))]
    pub room_number: String,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    #[validate(range(min = 1, message = "at least one adult is required"))]
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    #[validate(range(min = 0.0, message = "total amount cannot be negative"))]
    pub total_amount: f64,
    pub special_requests: Option<String>,
}

/// Partial update from the edit modal; unset fields are left untouched.
/// Status is deliberately absent, it only moves through the status
/// endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateBooking {
    #[validate(length(min = 1, message = "guest name is required"))]
    pub guest_name: Option<String>,
    #[validate(email(message = "guest email is invalid"))]
    pub guest_email: Option<String>,
    #[validate(length(min = 1, message = "room number is required"))]
    pub room_number: Option<String>,
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
    #[validate(range(min = 1, message = "at least one adult is required"))]
    pub adults: Option<u32>,
    pub children: Option<u32>,
    pub payment_status: Option<PaymentStatus>,
    #[validate(range(min = 0.0, message = "total amount cannot be negative"))]
    pub total_amount: Option<f64>,
    pub special_requests: Option<String>,
}

impl Booking {
    /// Apply a partial update, bumping `updated_at`.
    pub fn apply_update(&mut self, update: &UpdateBooking) {
        if let Some(guest_name) = &update.guest_name {
            self.guest_name = guest_name.clone();
        }
        if let Some(guest_email) = &update.guest_email {
            self.guest_email = guest_email.clone();
        }
        if let Some(room_number) = &update.room_number {
            self.room_number = room_number.clone();
        }
        if let Some(check_in) = update.check_in {
            self.check_in = check_in;
        }
        if let Some(check_out) = update.check_out {
            self.check_out = check_out;
        }
        if let Some(adults) = update.adults {
            self.adults = adults;
        }
        if let Some(children) = update.children {
            self.children = children;
        }
        if let Some(payment_status) = update.payment_status {
            self.payment_status = payment_status;
        }
        if let Some(total_amount) = update.total_amount {
            self.total_amount = total_amount;
        }
        if let Some(special_requests) = &update.special_requests {
            self.special_requests = Some(special_requests.clone());
        }
        self.updated_at = Utc::now();
    }
}
