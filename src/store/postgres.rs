use log::info;

use crate::config::AppConfig;
use crate::model::{
    Branch, BranchPayload, Category, CategoryPayload, Id, ProductListing, ProductPayload,
};
use crate::store::connector::Connector;
use crate::store::error::{StoreError, StoreResult};
use crate::store::traits::{BranchStore, CategoryStore, ProductStore};

const LIST_PRODUCTS: &str = r#"
    SELECT p.id, p.name, p.cost, p.price,
           c.name AS category_name, b.name AS branch_name
    FROM products p
    JOIN categories c ON p.category_id = c.id
    JOIN branches b ON p.branch_id = b.id
    ORDER BY p.id
"#;

#[derive(Debug, Clone)]
pub struct PostgresStore {
    connector: Connector,
}

impl PostgresStore {
    pub fn new(connector: Connector) -> Self {
        Self { connector }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(Connector::from_config(config))
    }

    /// Apply the bundled schema under `migrations/`
    pub async fn migrate(&self) -> StoreResult<()> {
        let mut conn = self.connector.acquire().await?;
        let result = sqlx::migrate!("./migrations").run(&mut conn).await;
        self.connector.release(conn).await;

        result.map_err(|e| StoreError::Statement(e.to_string()))?;
        info!("Database schema is up to date");
        Ok(())
    }
}

#[async_trait::async_trait]
impl BranchStore for PostgresStore {
    async fn list_branches(&self) -> StoreResult<Vec<Branch>> {
        let mut conn = self.connector.acquire().await?;
        let result = sqlx::query_as::<_, Branch>(
            "SELECT id, name, email, phone, logo FROM branches ORDER BY id",
        )
        .fetch_all(&mut conn)
        .await;
        self.connector.release(conn).await;

        result.map_err(StoreError::statement)
    }

    async fn create_branch(&self, branch: BranchPayload) -> StoreResult<Id> {
        let mut conn = self.connector.acquire().await?;
        let result = sqlx::query_scalar::<_, Id>(
            "INSERT INTO branches (name, email, phone, logo) VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(branch.name)
        .bind(branch.email)
        .bind(branch.phone)
        .bind(branch.logo)
        .fetch_one(&mut conn)
        .await;
        self.connector.release(conn).await;

        result.map_err(StoreError::statement)
    }

    async fn update_branch(&self, id: Id, branch: BranchPayload) -> StoreResult<u64> {
        let mut conn = self.connector.acquire().await?;
        let result = sqlx::query(
            "UPDATE branches SET name = $1, email = $2, phone = $3, logo = $4 WHERE id = $5",
        )
        .bind(branch.name)
        .bind(branch.email)
        .bind(branch.phone)
        .bind(branch.logo)
        .bind(id)
        .execute(&mut conn)
        .await;
        self.connector.release(conn).await;

        Ok(result.map_err(StoreError::statement)?.rows_affected())
    }

    async fn delete_branch(&self, id: Id) -> StoreResult<u64> {
        let mut conn = self.connector.acquire().await?;
        let result = sqlx::query("DELETE FROM branches WHERE id = $1")
            .bind(id)
            .execute(&mut conn)
            .await;
        self.connector.release(conn).await;

        Ok(result.map_err(StoreError::statement)?.rows_affected())
    }
}

#[async_trait::async_trait]
impl CategoryStore for PostgresStore {
    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let mut conn = self.connector.acquire().await?;
        let result = sqlx::query_as::<_, Category>(
            "SELECT id, name, created_at FROM categories ORDER BY id",
        )
        .fetch_all(&mut conn)
        .await;
        self.connector.release(conn).await;

        result.map_err(StoreError::statement)
    }

    async fn get_category(&self, id: Id) -> StoreResult<Option<Category>> {
        let mut conn = self.connector.acquire().await?;
        let result = sqlx::query_as::<_, Category>(
            "SELECT id, name, created_at FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut conn)
        .await;
        self.connector.release(conn).await;

        result.map_err(StoreError::statement)
    }

    async fn create_category(&self, category: CategoryPayload) -> StoreResult<Category> {
        let mut conn = self.connector.acquire().await?;
        let result = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name) VALUES ($1) RETURNING id, name, created_at",
        )
        .bind(category.name)
        .fetch_one(&mut conn)
        .await;
        self.connector.release(conn).await;

        result.map_err(StoreError::statement)
    }

    async fn update_category(&self, id: Id, category: CategoryPayload) -> StoreResult<u64> {
        let mut conn = self.connector.acquire().await?;
        let result = sqlx::query("UPDATE categories SET name = $1 WHERE id = $2")
            .bind(category.name)
            .bind(id)
            .execute(&mut conn)
            .await;
        self.connector.release(conn).await;

        Ok(result.map_err(StoreError::statement)?.rows_affected())
    }

    async fn delete_category(&self, id: Id) -> StoreResult<u64> {
        let mut conn = self.connector.acquire().await?;
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&mut conn)
            .await;
        self.connector.release(conn).await;

        Ok(result.map_err(StoreError::statement)?.rows_affected())
    }
}

#[async_trait::async_trait]
impl ProductStore for PostgresStore {
    async fn list_products(&self) -> StoreResult<Vec<ProductListing>> {
        let mut conn = self.connector.acquire().await?;
        let result = sqlx::query_as::<_, ProductListing>(LIST_PRODUCTS)
            .fetch_all(&mut conn)
            .await;
        self.connector.release(conn).await;

        result.map_err(StoreError::statement)
    }

    async fn create_product(&self, product: ProductPayload) -> StoreResult<Id> {
        let mut conn = self.connector.acquire().await?;
        let result = sqlx::query_scalar::<_, Id>(
            r#"
            INSERT INTO products (name, cost, price, category_id, branch_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(product.name)
        .bind(product.cost)
        .bind(product.price)
        .bind(product.category_id)
        .bind(product.branch_id)
        .fetch_one(&mut conn)
        .await;
        self.connector.release(conn).await;

        result.map_err(StoreError::statement)
    }

    async fn update_product(&self, id: Id, product: ProductPayload) -> StoreResult<u64> {
        let mut conn = self.connector.acquire().await?;
        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = $1, cost = $2, price = $3, category_id = $4, branch_id = $5
            WHERE id = $6
            "#,
        )
        .bind(product.name)
        .bind(product.cost)
        .bind(product.price)
        .bind(product.category_id)
        .bind(product.branch_id)
        .bind(id)
        .execute(&mut conn)
        .await;
        self.connector.release(conn).await;

        Ok(result.map_err(StoreError::statement)?.rows_affected())
    }

    async fn delete_product(&self, id: Id) -> StoreResult<u64> {
        let mut conn = self.connector.acquire().await?;
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&mut conn)
            .await;
        self.connector.release(conn).await;

        Ok(result.map_err(StoreError::statement)?.rows_affected())
    }
}
