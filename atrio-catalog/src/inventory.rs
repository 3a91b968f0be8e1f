use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Derived stock indicator. Never stored: recomputed from the current
/// quantity against the item's reorder threshold on every read.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockLevel::InStock => "in_stock",
            StockLevel::LowStock => "low_stock",
            StockLevel::OutOfStock => "out_of_stock",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StockLevel::InStock => "In Stock",
            StockLevel::LowStock => "Low Stock",
            StockLevel::OutOfStock => "Out of Stock",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            StockLevel::InStock => "green",
            StockLevel::LowStock => "orange",
            StockLevel::OutOfStock => "red",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            StockLevel::InStock => "check-circle",
            StockLevel::LowStock => "alert-triangle",
            StockLevel::OutOfStock => "x-circle",
        }
    }

    /// `out_of_stock` if nothing remains, `low_stock` strictly under the
    /// reorder threshold, `in_stock` otherwise.
    pub fn derive(quantity: i32, min_stock_level: i32) -> StockLevel {
        if quantity <= 0 {
            StockLevel::OutOfStock
        } else if quantity < min_stock_level {
            StockLevel::LowStock
        } else {
            StockLevel::InStock
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryItem {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub quantity: i32,
    pub min_stock_level: i32,
    pub unit: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    pub fn stock_level(&self) -> StockLevel {
        StockLevel::derive(self.quantity, self.min_stock_level)
    }

    pub fn apply_update(&mut self, update: &UpdateInventoryItem) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(category) = &update.category {
            self.category = category.clone();
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        if let Some(min_stock_level) = update.min_stock_level {
            self.min_stock_level = min_stock_level;
        }
        if let Some(unit) = &update.unit {
            self.unit = unit.clone();
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateInventoryItem {
    #[validate(length(min = 1, message = "item name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "category is required"))]
    pub category: String,
    #[validate(range(min = 0, message = "quantity cannot be negative"))]
    pub quantity: i32,
    #[validate(range(min = 0, message = "minimum stock level cannot be negative"))]
    pub min_stock_level: i32,
    #[validate(length(min = 1, message = "unit is required"))]
    pub unit: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateInventoryItem {
    #[validate(length(min = 1, message = "item name is required"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "category is required"))]
    pub category: Option<String>,
    pub quantity: Option<i32>,
    #[validate(range(min = 0, message = "minimum stock level cannot be negative"))]
    pub min_stock_level: Option<i32>,
    #[validate(length(min = 1, message = "unit is required"))]
    pub unit: Option<String>,
}
