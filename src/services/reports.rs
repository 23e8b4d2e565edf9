use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::EntityTrait;
use tracing::{info, instrument};

use crate::{
    db::DbPool,
    entities::product,
    errors::ServiceError,
    stock::LOW_STOCK_THRESHOLD,
};

/// Per-category slice of the daily inventory report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRollup {
    /// Number of distinct products in the category
    pub count: usize,
    /// Units on hand across the category
    pub items: i64,
    /// Value of those units, rounded to cents
    pub value: Decimal,
}

/// Aggregates for the daily inventory report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyInventorySummary {
    pub total_products: usize,
    pub total_items: i64,
    pub total_value: Decimal,
    pub low_stock_count: usize,
    pub categories: BTreeMap<String, CategoryRollup>,
}

/// Daily inventory report: the aggregates plus the rows they were computed
/// from.
#[derive(Debug, Clone)]
pub struct DailyInventoryReport {
    /// UTC calendar date the report was generated, YYYY-MM-DD
    pub date: String,
    pub summary: DailyInventorySummary,
    pub products: Vec<product::Model>,
}

/// Computes the report aggregates over an already-loaded product set.
///
/// Value sums are carried at full precision and rounded to cents once, at
/// the end.
pub fn summarize(products: &[product::Model]) -> DailyInventorySummary {
    let mut total_items: i64 = 0;
    let mut total_value = Decimal::ZERO;
    let mut low_stock_count = 0usize;
    let mut categories: BTreeMap<String, (usize, i64, Decimal)> = BTreeMap::new();

    for p in products {
        let value = p.stock_value();
        total_items += i64::from(p.quantity);
        total_value += value;
        if p.quantity <= LOW_STOCK_THRESHOLD {
            low_stock_count += 1;
        }

        let entry = categories
            .entry(p.category.clone())
            .or_insert((0, 0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 += i64::from(p.quantity);
        entry.2 += value;
    }

    DailyInventorySummary {
        total_products: products.len(),
        total_items,
        total_value: round_cents(total_value),
        low_stock_count,
        categories: categories
            .into_iter()
            .map(|(category, (count, items, value))| {
                (
                    category,
                    CategoryRollup {
                        count,
                        items,
                        value: round_cents(value),
                    },
                )
            })
            .collect(),
    }
}

fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Service for generating inventory reports
pub struct ReportService {
    db_pool: Arc<DbPool>,
}

impl ReportService {
    /// Creates a new report service instance
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Generates the daily inventory report. Recomputed from the full table
    /// on every call; nothing is cached.
    #[instrument(skip(self))]
    pub async fn daily_inventory(&self) -> Result<DailyInventoryReport, ServiceError> {
        let db = &*self.db_pool;

        let products = product::Entity::find()
            .all(db)
            .await
            .map_err(ServiceError::DatabaseError)?;

        let summary = summarize(&products);

        info!(
            total_products = summary.total_products,
            total_items = summary.total_items,
            low_stock_count = summary.low_stock_count,
            "Generated daily inventory report"
        );

        Ok(DailyInventoryReport {
            date: Utc::now().format("%Y-%m-%d").to_string(),
            summary,
            products,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn product(id: i64, category: &str, quantity: i32, price: Decimal) -> product::Model {
        product::Model {
            id,
            name: format!("product-{id}"),
            category: category.to_string(),
            quantity,
            price,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn empty_table_yields_zeroed_summary() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_products, 0);
        assert_eq!(summary.total_items, 0);
        assert_eq!(summary.total_value, Decimal::ZERO);
        assert_eq!(summary.low_stock_count, 0);
        assert!(summary.categories.is_empty());
    }

    #[test]
    fn totals_sum_quantity_and_value() {
        let products = vec![
            product(1, "Electronics", 15, dec!(899.99)),
            product(2, "Electronics", 5, dec!(29.99)),
        ];

        let summary = summarize(&products);

        assert_eq!(summary.total_products, 2);
        assert_eq!(summary.total_items, 20);
        assert_eq!(summary.total_value, dec!(13649.80));
        assert_eq!(summary.low_stock_count, 1);
    }

    #[test]
    fn rollup_groups_by_category() {
        let products = vec![
            product(1, "Electronics", 15, dec!(899.99)),
            product(2, "Furniture", 3, dec!(249.99)),
            product(3, "Electronics", 5, dec!(29.99)),
        ];

        let summary = summarize(&products);

        assert_eq!(summary.categories.len(), 2);

        let electronics = &summary.categories["Electronics"];
        assert_eq!(electronics.count, 2);
        assert_eq!(electronics.items, 20);
        assert_eq!(electronics.value, dec!(13649.80));

        let furniture = &summary.categories["Furniture"];
        assert_eq!(furniture.count, 1);
        assert_eq!(furniture.items, 3);
        assert_eq!(furniture.value, dec!(749.97));

        // BTreeMap keys come out sorted
        let keys: Vec<_> = summary.categories.keys().collect();
        assert_eq!(keys, vec!["Electronics", "Furniture"]);
    }

    #[test]
    fn zero_quantity_counts_as_low_stock() {
        let products = vec![product(1, "Stationery", 0, dec!(12.99))];
        let summary = summarize(&products);
        assert_eq!(summary.low_stock_count, 1);
        assert_eq!(summary.total_value, Decimal::ZERO);
    }

    #[test]
    fn values_are_rounded_to_cents() {
        // 3 * 0.333 = 0.999; 7 * 0.111 = 0.777; sum = 1.776 -> 1.78
        let products = vec![
            product(1, "Misc", 3, dec!(0.333)),
            product(2, "Misc", 7, dec!(0.111)),
        ];
        let summary = summarize(&products);
        assert_eq!(summary.total_value, dec!(1.78));
        assert_eq!(summary.categories["Misc"].value, dec!(1.78));
    }
}
