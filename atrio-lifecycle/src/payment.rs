use serde::{Deserialize, Serialize};

/// Payment state of a booking. Display-only in the back office; the
/// payment processor itself lives behind the external billing service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Unpaid,
    PartiallyPaid,
    Paid,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::PartiallyPaid => "partially_paid",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Refunded => "refunded",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "Unpaid",
            PaymentStatus::PartiallyPaid => "Partially Paid",
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Refunded => "Refunded",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "red",
            PaymentStatus::PartiallyPaid => "orange",
            PaymentStatus::Paid => "green",
            PaymentStatus::Refunded => "gray",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "alert-circle",
            PaymentStatus::PartiallyPaid => "minus-circle",
            PaymentStatus::Paid => "check-circle",
            PaymentStatus::Refunded => "rotate-ccw",
        }
    }
}
