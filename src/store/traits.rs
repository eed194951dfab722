use crate::model::{
    Branch, BranchPayload, Category, CategoryPayload, Id, ProductListing, ProductPayload,
};
use crate::store::error::StoreResult;

// Every method runs exactly one statement. Update and delete report the
// number of rows they touched; zero is not an error.

#[async_trait::async_trait]
pub trait BranchStore: Send + Sync {
    async fn list_branches(&self) -> StoreResult<Vec<Branch>>;
    async fn create_branch(&self, branch: BranchPayload) -> StoreResult<Id>;
    async fn update_branch(&self, id: Id, branch: BranchPayload) -> StoreResult<u64>;
    async fn delete_branch(&self, id: Id) -> StoreResult<u64>;
}

#[async_trait::async_trait]
pub trait CategoryStore: Send + Sync {
    async fn list_categories(&self) -> StoreResult<Vec<Category>>;
    async fn get_category(&self, id: Id) -> StoreResult<Option<Category>>;
    /// Insert and return the stored row, including its generated fields
    async fn create_category(&self, category: CategoryPayload) -> StoreResult<Category>;
    async fn update_category(&self, id: Id, category: CategoryPayload) -> StoreResult<u64>;
    async fn delete_category(&self, id: Id) -> StoreResult<u64>;
}

#[async_trait::async_trait]
pub trait ProductStore: Send + Sync {
    /// Products joined with their category and branch. Products whose
    /// references do not resolve are left out.
    async fn list_products(&self) -> StoreResult<Vec<ProductListing>>;
    async fn create_product(&self, product: ProductPayload) -> StoreResult<Id>;
    async fn update_product(&self, id: Id, product: ProductPayload) -> StoreResult<u64>;
    async fn delete_product(&self, id: Id) -> StoreResult<u64>;
}

pub trait Store: BranchStore + CategoryStore + ProductStore + Send + Sync {}
impl<T: BranchStore + CategoryStore + ProductStore> Store for T {}
