use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Quantity at or below this value counts as low stock.
pub const LOW_STOCK_THRESHOLD: i32 = 5;

/// Upper bound of the "Medium Stock" band.
pub const MEDIUM_STOCK_THRESHOLD: i32 = 15;

/// Stock level classification derived from a product's on-hand quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum StockStatus {
    #[serde(rename = "Out of Stock")]
    OutOfStock,
    #[serde(rename = "Low Stock")]
    LowStock,
    #[serde(rename = "Medium Stock")]
    MediumStock,
    #[serde(rename = "High Stock")]
    HighStock,
}

impl StockStatus {
    /// Classifies a quantity into a stock band.
    ///
    /// Negative quantities never reach this point (the entity rejects them)
    /// but classify as out of stock if they do.
    pub fn from_quantity(quantity: i32) -> Self {
        if quantity <= 0 {
            StockStatus::OutOfStock
        } else if quantity <= LOW_STOCK_THRESHOLD {
            StockStatus::LowStock
        } else if quantity <= MEDIUM_STOCK_THRESHOLD {
            StockStatus::MediumStock
        } else {
            StockStatus::HighStock
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::OutOfStock => "Out of Stock",
            StockStatus::LowStock => "Low Stock",
            StockStatus::MediumStock => "Medium Stock",
            StockStatus::HighStock => "High Stock",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0, StockStatus::OutOfStock; "zero is out of stock")]
    #[test_case(1, StockStatus::LowStock; "one is low")]
    #[test_case(5, StockStatus::LowStock; "threshold is still low")]
    #[test_case(6, StockStatus::MediumStock; "six is medium")]
    #[test_case(15, StockStatus::MediumStock; "fifteen is still medium")]
    #[test_case(16, StockStatus::HighStock; "sixteen is high")]
    #[test_case(1000, StockStatus::HighStock; "large quantities are high")]
    fn classifies_quantity(quantity: i32, expected: StockStatus) {
        assert_eq!(StockStatus::from_quantity(quantity), expected);
    }

    #[test]
    fn serializes_with_display_labels() {
        let json = serde_json::to_string(&StockStatus::OutOfStock).unwrap();
        assert_eq!(json, "\"Out of Stock\"");
        assert_eq!(StockStatus::HighStock.to_string(), "High Stock");
    }
}
