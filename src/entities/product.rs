use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, ActiveValue::Set, ConnectionTrait};
use serde::{Deserialize, Serialize};

use crate::stock::StockStatus;

/// Product entity
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Primary key, assigned by the database
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Product name
    pub name: String,

    /// Category label (open set: Electronics, Furniture, ...)
    pub category: String,

    /// Units on hand, never negative
    pub quantity: i32,

    /// Unit price, never negative
    pub price: Decimal,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: Option<DateTime<Utc>>,
}

impl Model {
    /// Stock band for this product's current quantity.
    pub fn stock_status(&self) -> StockStatus {
        StockStatus::from_quantity(self.quantity)
    }

    /// Total value of the on-hand units.
    pub fn stock_value(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut active_model = self;

        if insert {
            active_model.created_at = Set(Utc::now());
        }
        active_model.updated_at = Set(Some(Utc::now()));

        // Last line of defense for the row invariants; the request DTOs
        // validate the same constraints before anything reaches this point.
        if let ActiveValue::Set(quantity) = &active_model.quantity {
            if *quantity < 0 {
                return Err(DbErr::Custom("Quantity cannot be negative".to_string()));
            }
        }
        if let ActiveValue::Set(price) = &active_model.price {
            if price < &Decimal::ZERO {
                return Err(DbErr::Custom("Price cannot be negative".to_string()));
            }
        }
        if let ActiveValue::Set(name) = &active_model.name {
            if name.trim().is_empty() {
                return Err(DbErr::Custom("Product name cannot be empty".to_string()));
            }
        }
        if let ActiveValue::Set(category) = &active_model.category {
            if category.trim().is_empty() {
                return Err(DbErr::Custom("Category cannot be empty".to_string()));
            }
        }

        Ok(active_model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample(quantity: i32, price: Decimal) -> Model {
        Model {
            id: 1,
            name: "Laptop Computer".to_string(),
            category: "Electronics".to_string(),
            quantity,
            price,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn stock_value_is_quantity_times_price() {
        let product = sample(15, dec!(899.99));
        assert_eq!(product.stock_value(), dec!(13499.85));
    }

    #[test]
    fn stock_status_tracks_quantity() {
        assert_eq!(sample(0, dec!(1)).stock_status(), StockStatus::OutOfStock);
        assert_eq!(sample(4, dec!(1)).stock_status(), StockStatus::LowStock);
        assert_eq!(sample(20, dec!(1)).stock_status(), StockStatus::HighStock);
    }
}
