use atrio_lifecycle::TransitionError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MenuStatus {
    Available,
    SoldOut,
}

impl MenuStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuStatus::Available => "available",
            MenuStatus::SoldOut => "sold_out",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuStatus::Available => "Available",
            MenuStatus::SoldOut => "Sold Out",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            MenuStatus::Available => "green",
            MenuStatus::SoldOut => "red",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            MenuStatus::Available => "check-circle",
            MenuStatus::SoldOut => "slash",
        }
    }
}

impl fmt::Display for MenuStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MenuStatus {
    type Err = TransitionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "available" => Ok(MenuStatus::Available),
            "sold_out" => Ok(MenuStatus::SoldOut),
            other => Err(TransitionError::UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItem {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub status: MenuStatus,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MenuItem {
    pub fn update_status(&mut self, status: MenuStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    pub fn apply_update(&mut self, update: &UpdateMenuItem) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(category) = &update.category {
            self.category = category.clone();
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(description) = &update.description {
            self.description = Some(description.clone());
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateMenuItem {
    #[validate(length(min = 1, message = "dish name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "category is required"))]
    pub category: String,
    #[validate(range(min = 0.0, message = "price cannot be negative"))]
    pub price: f64,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateMenuItem {
    #[validate(length(min = 1, message = "dish name is required"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "category is required"))]
    pub category: Option<String>,
    #[validate(range(min = 0.0, message = "price cannot be negative"))]
    pub price: Option<f64>,
    pub description: Option<String>,
}
