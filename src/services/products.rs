use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
};
use tracing::{info, instrument, warn};

use crate::{
    db::DbPool,
    entities::product::{self, Column as ProductColumn, Entity as Product},
    errors::ServiceError,
    events::{Event, EventSender},
};

/// Fields supplied by the client when creating or fully replacing a product.
#[derive(Debug, Clone)]
pub struct ProductInput {
    pub name: String,
    pub category: String,
    pub quantity: i32,
    pub price: Decimal,
}

/// Service for managing product rows
pub struct ProductService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl ProductService {
    /// Creates a new product service instance
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// All products, newest first.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<product::Model>, ServiceError> {
        let db = &*self.db_pool;

        Product::find()
            .order_by_desc(ProductColumn::Id)
            .all(db)
            .await
            .map_err(ServiceError::DatabaseError)
    }

    /// Products at or below the given quantity threshold, emptiest first.
    #[instrument(skip(self))]
    pub async fn low_stock_products(
        &self,
        threshold: i32,
    ) -> Result<Vec<product::Model>, ServiceError> {
        let db = &*self.db_pool;

        Product::find()
            .filter(ProductColumn::Quantity.lte(threshold))
            .order_by_asc(ProductColumn::Quantity)
            .all(db)
            .await
            .map_err(ServiceError::DatabaseError)
    }

    /// Inserts a new product and returns the stored row with its assigned id.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_product(&self, input: ProductInput) -> Result<product::Model, ServiceError> {
        let db = &*self.db_pool;

        let product = product::ActiveModel {
            name: Set(input.name),
            category: Set(input.category),
            quantity: Set(input.quantity),
            price: Set(input.price),
            ..Default::default()
        };

        let created = product.insert(db).await.map_err(ServiceError::DatabaseError)?;

        self.publish(Event::ProductCreated(created.id)).await;
        info!(product_id = created.id, "Product created successfully");

        Ok(created)
    }

    /// Full replace of the mutable fields of an existing product.
    #[instrument(skip(self, input))]
    pub async fn update_product(
        &self,
        id: i64,
        input: ProductInput,
    ) -> Result<product::Model, ServiceError> {
        let db = &*self.db_pool;

        let existing = Product::find_by_id(id)
            .one(db)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound(format!("Product with ID {} not found", id)))?;

        let mut product: product::ActiveModel = existing.into();
        product.name = Set(input.name);
        product.category = Set(input.category);
        product.quantity = Set(input.quantity);
        product.price = Set(input.price);

        let updated = product.update(db).await.map_err(ServiceError::DatabaseError)?;

        self.publish(Event::ProductUpdated(updated.id)).await;
        info!(product_id = updated.id, "Product updated successfully");

        Ok(updated)
    }

    /// Removes a product row.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i64) -> Result<(), ServiceError> {
        let db = &*self.db_pool;

        let existing = Product::find_by_id(id)
            .one(db)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound(format!("Product with ID {} not found", id)))?;

        existing.delete(db).await.map_err(ServiceError::DatabaseError)?;

        self.publish(Event::ProductDeleted(id)).await;
        info!(product_id = id, "Product deleted successfully");

        Ok(())
    }

    // The row is already committed when events go out; delivery is best
    // effort and a full channel must not fail the request.
    async fn publish(&self, event: Event) {
        if let Err(err) = self.event_sender.send(event).await {
            warn!("Failed to publish product event: {}", err);
        }
    }
}
