use atrio_lifecycle::TransitionError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Room availability. Unlike bookings there is no lifecycle here: the
/// front desk toggles freely between the two values.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    Available,
    Maintenance,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Available => "available",
            RoomStatus::Maintenance => "maintenance",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RoomStatus::Available => "Available",
            RoomStatus::Maintenance => "Under Maintenance",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            RoomStatus::Available => "green",
            RoomStatus::Maintenance => "orange",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            RoomStatus::Available => "check-circle",
            RoomStatus::Maintenance => "wrench",
        }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomStatus {
    type Err = TransitionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "available" => Ok(RoomStatus::Available),
            "maintenance" => Ok(RoomStatus::Maintenance),
            other => Err(TransitionError::UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Room {
    pub id: Uuid,
    pub number: String,
    pub room_type: String,
    pub capacity: u32,
    pub nightly_rate: f64,
    pub status: RoomStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Room {
    pub fn update_status(&mut self, status: RoomStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    pub fn apply_update(&mut self, update: &UpdateRoom) {
        if let Some(number) = &update.number {
            self.number = number.clone();
        }
        if let Some(room_type) = &update.room_type {
            self.room_type = room_type.clone();
        }
        if let Some(capacity) = update.capacity {
            self.capacity = capacity;
        }
        if let Some(nightly_rate) = update.nightly_rate {
            self.nightly_rate = nightly_rate;
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRoom {
    #[validate(length(min = 1, message = "room number is required"))]
    pub number: String,
    #[validate(length(min = 1, message = "room type is required"))]
    pub room_type: String,
    #[validate(range(min = 1, message = "capacity must be positive"))]
    pub capacity: u32,
    #[validate(range(min = 0.0, message = "nightly rate cannot be negative"))]
    pub nightly_rate: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateRoom {
    #[validate(length(min = 1, message = "room number is required"))]
    pub number: Option<String>,
    #[validate(length(min = 1, message = "room type is required"))]
    pub room_type: Option<String>,
    #[validate(range(min = 1, message = "capacity must be positive"))]
    pub capacity: Option<u32>,
    #[validate(range(min = 0.0, message = "nightly rate cannot be negative"))]
    pub nightly_rate: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!("maintenance".parse::<RoomStatus>().unwrap(), RoomStatus::Maintenance);
        assert!("occupied".parse::<RoomStatus>().is_err());
    }
}
