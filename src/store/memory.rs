use chrono::Utc;
use parking_lot::RwLock;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeMap;

use crate::model::{
    Branch, BranchPayload, Category, CategoryPayload, Id, Product, ProductListing, ProductPayload,
};
use crate::store::error::{StoreError, StoreResult};
use crate::store::traits::{BranchStore, CategoryStore, ProductStore};

/// A table keyed by id, with a serial sequence that never hands out an id twice
#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<Id, T>,
    next_id: Id,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> Id {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn replace(&mut self, id: Id, row: T) -> u64 {
        match self.rows.get_mut(&id) {
            Some(existing) => {
                *existing = row;
                1
            }
            None => 0,
        }
    }

    fn remove(&mut self, id: Id) -> u64 {
        self.rows.remove(&id).map_or(0, |_| 1)
    }
}

#[derive(Debug, Default)]
struct Tables {
    branches: Table<Branch>,
    categories: Table<Category>,
    products: Table<Product>,
}

/// In-process store with the same observable behavior as the Postgres
/// schema: generated ids, id-ordered listings, inner-join product listing,
/// foreign-key rejection and NUMERIC(10,2) coercion of amounts.
#[derive(Debug)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    foreign_keys: bool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            foreign_keys: true,
        }
    }

    /// A store that accepts dangling product references, for exercising
    /// listings over inconsistent data.
    pub fn without_foreign_keys() -> Self {
        Self {
            foreign_keys: false,
            ..Self::new()
        }
    }

    fn check_references(&self, tables: &Tables, product: &ProductPayload) -> StoreResult<()> {
        if !self.foreign_keys {
            return Ok(());
        }
        if !tables.categories.rows.contains_key(&product.category_id) {
            return Err(fk_violation("products", "products_category_id_fkey"));
        }
        if !tables.branches.rows.contains_key(&product.branch_id) {
            return Err(fk_violation("products", "products_branch_id_fkey"));
        }
        Ok(())
    }

    fn check_unreferenced(
        &self,
        referenced: bool,
        table: &str,
        constraint: &str,
    ) -> StoreResult<()> {
        if self.foreign_keys && referenced {
            return Err(StoreError::Statement(format!(
                "update or delete on table \"{}\" violates foreign key constraint \"{}\" on table \"products\"",
                table, constraint
            )));
        }
        Ok(())
    }
}

/// Coerce an amount into a NUMERIC(10,2) column: round half away from zero
/// to two places, then reject anything with more than eight integer digits.
fn numeric_10_2(value: Decimal) -> StoreResult<Decimal> {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.abs() >= Decimal::new(100_000_000, 0) {
        return Err(StoreError::Statement("numeric field overflow".to_string()));
    }
    rounded.rescale(2);
    Ok(rounded)
}

fn coerce_amounts(mut product: ProductPayload) -> StoreResult<ProductPayload> {
    product.cost = numeric_10_2(product.cost)?;
    product.price = numeric_10_2(product.price)?;
    Ok(product)
}

fn fk_violation(table: &str, constraint: &str) -> StoreError {
    StoreError::Statement(format!(
        "insert or update on table \"{}\" violates foreign key constraint \"{}\"",
        table, constraint
    ))
}

#[async_trait::async_trait]
impl BranchStore for MemoryStore {
    async fn list_branches(&self) -> StoreResult<Vec<Branch>> {
        Ok(self.tables.read().branches.rows.values().cloned().collect())
    }

    async fn create_branch(&self, branch: BranchPayload) -> StoreResult<Id> {
        let mut tables = self.tables.write();
        let id = tables.branches.next_id();
        tables.branches.rows.insert(id, Branch::from_payload(id, branch));
        Ok(id)
    }

    async fn update_branch(&self, id: Id, branch: BranchPayload) -> StoreResult<u64> {
        Ok(self.tables.write().branches.replace(id, Branch::from_payload(id, branch)))
    }

    async fn delete_branch(&self, id: Id) -> StoreResult<u64> {
        let mut tables = self.tables.write();
        let referenced = tables.products.rows.values().any(|p| p.branch_id == id);
        self.check_unreferenced(referenced, "branches", "products_branch_id_fkey")?;
        Ok(tables.branches.remove(id))
    }
}

#[async_trait::async_trait]
impl CategoryStore for MemoryStore {
    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        Ok(self.tables.read().categories.rows.values().cloned().collect())
    }

    async fn get_category(&self, id: Id) -> StoreResult<Option<Category>> {
        Ok(self.tables.read().categories.rows.get(&id).cloned())
    }

    async fn create_category(&self, category: CategoryPayload) -> StoreResult<Category> {
        let mut tables = self.tables.write();
        let id = tables.categories.next_id();
        let row = Category {
            id,
            name: category.name,
            created_at: Utc::now(),
        };
        tables.categories.rows.insert(id, row.clone());
        Ok(row)
    }

    async fn update_category(&self, id: Id, category: CategoryPayload) -> StoreResult<u64> {
        let mut tables = self.tables.write();
        match tables.categories.rows.get_mut(&id) {
            Some(existing) => {
                existing.name = category.name;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_category(&self, id: Id) -> StoreResult<u64> {
        let mut tables = self.tables.write();
        let referenced = tables.products.rows.values().any(|p| p.category_id == id);
        self.check_unreferenced(referenced, "categories", "products_category_id_fkey")?;
        Ok(tables.categories.remove(id))
    }
}

#[async_trait::async_trait]
impl ProductStore for MemoryStore {
    async fn list_products(&self) -> StoreResult<Vec<ProductListing>> {
        let tables = self.tables.read();
        let listings = tables
            .products
            .rows
            .values()
            .filter_map(|product| {
                let category = tables.categories.rows.get(&product.category_id)?;
                let branch = tables.branches.rows.get(&product.branch_id)?;
                Some(ProductListing {
                    id: product.id,
                    name: product.name.clone(),
                    cost: product.cost,
                    price: product.price,
                    category_name: category.name.clone(),
                    branch_name: branch.name.clone(),
                })
            })
            .collect();

        Ok(listings)
    }

    async fn create_product(&self, product: ProductPayload) -> StoreResult<Id> {
        let product = coerce_amounts(product)?;
        let mut tables = self.tables.write();
        self.check_references(&tables, &product)?;
        let id = tables.products.next_id();
        tables.products.rows.insert(id, Product::from_payload(id, product));
        Ok(id)
    }

    async fn update_product(&self, id: Id, product: ProductPayload) -> StoreResult<u64> {
        let mut tables = self.tables.write();
        if !tables.products.rows.contains_key(&id) {
            return Ok(0);
        }
        let product = coerce_amounts(product)?;
        self.check_references(&tables, &product)?;
        Ok(tables.products.replace(id, Product::from_payload(id, product)))
    }

    async fn delete_product(&self, id: Id) -> StoreResult<u64> {
        Ok(self.tables.write().products.remove(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn branch(name: &str) -> BranchPayload {
        BranchPayload {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "555-0100".to_string(),
            logo: "https://example.com/logo.png".to_string(),
        }
    }

    fn product(category_id: Id, branch_id: Id) -> ProductPayload {
        ProductPayload {
            name: "Espresso".to_string(),
            cost: dec!(0.8),
            price: dec!(2.5),
            category_id,
            branch_id,
        }
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = MemoryStore::new();
        let first = store.create_branch(branch("North")).await.unwrap();
        assert_eq!(store.delete_branch(first).await.unwrap(), 1);

        let second = store.create_branch(branch("South")).await.unwrap();
        assert!(second > first);
    }

    #[tokio::test]
    async fn product_with_unknown_category_is_rejected() {
        let store = MemoryStore::new();
        let branch_id = store.create_branch(branch("North")).await.unwrap();

        let err = store.create_product(product(42, branch_id)).await.unwrap_err();
        assert!(matches!(err, StoreError::Statement(msg) if msg.contains("foreign key")));
    }

    #[tokio::test]
    async fn referenced_category_cannot_be_deleted() {
        let store = MemoryStore::new();
        let branch_id = store.create_branch(branch("North")).await.unwrap();
        let category = store
            .create_category(CategoryPayload { name: "Coffee".to_string() })
            .await
            .unwrap();
        store.create_product(product(category.id, branch_id)).await.unwrap();

        assert!(store.delete_category(category.id).await.is_err());
        assert!(store.get_category(category.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn update_of_missing_row_touches_nothing() {
        let store = MemoryStore::new();
        assert_eq!(store.update_branch(7, branch("Ghost")).await.unwrap(), 0);
        assert!(store.list_branches().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn listing_skips_dangling_references() {
        let store = MemoryStore::without_foreign_keys();
        let branch_id = store.create_branch(branch("North")).await.unwrap();
        let category = store
            .create_category(CategoryPayload { name: "Coffee".to_string() })
            .await
            .unwrap();
        let kept = store.create_product(product(category.id, branch_id)).await.unwrap();
        store.create_product(product(category.id, 99)).await.unwrap();

        let listings = store.list_products().await.unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].id, kept);
        assert_eq!(listings[0].branch_name, "North");
    }

    #[tokio::test]
    async fn amounts_are_rounded_to_cents() {
        let store = MemoryStore::new();
        let branch_id = store.create_branch(branch("North")).await.unwrap();
        let category = store
            .create_category(CategoryPayload { name: "Coffee".to_string() })
            .await
            .unwrap();
        let mut payload = product(category.id, branch_id);
        payload.cost = dec!(1.005);
        payload.price = dec!(-2.344);
        store.create_product(payload).await.unwrap();

        let listings = store.list_products().await.unwrap();
        assert_eq!(listings[0].cost.to_string(), "1.01");
        assert_eq!(listings[0].price.to_string(), "-2.34");
        assert_eq!(listings[0].price.scale(), 2);
    }

    #[tokio::test]
    async fn amounts_beyond_eight_integer_digits_overflow() {
        let store = MemoryStore::new();
        let branch_id = store.create_branch(branch("North")).await.unwrap();
        let category = store
            .create_category(CategoryPayload { name: "Coffee".to_string() })
            .await
            .unwrap();
        let id = store.create_product(product(category.id, branch_id)).await.unwrap();

        let mut payload = product(category.id, branch_id);
        payload.price = dec!(99999999.995);
        let err = store.create_product(payload.clone()).await.unwrap_err();
        assert_eq!(err, StoreError::Statement("numeric field overflow".to_string()));

        let err = store.update_product(id, payload).await.unwrap_err();
        assert_eq!(err, StoreError::Statement("numeric field overflow".to_string()));
        assert_eq!(store.list_products().await.unwrap()[0].price, dec!(2.50));
    }
}
