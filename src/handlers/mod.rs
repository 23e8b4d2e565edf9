use std::sync::Arc;

use crate::{
    db::DbPool,
    events::EventSender,
    services::{products::ProductService, reports::ReportService},
};

pub mod common;
pub mod health;
pub mod products;
pub mod reports;

pub use crate::AppState;

/// Aggregate of the services used by the HTTP handlers.
#[derive(Clone)]
pub struct AppServices {
    pub products: Arc<ProductService>,
    pub reports: Arc<ReportService>,
}

impl AppServices {
    pub fn new(db: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            products: Arc::new(ProductService::new(db.clone(), event_sender)),
            reports: Arc::new(ReportService::new(db)),
        }
    }
}
