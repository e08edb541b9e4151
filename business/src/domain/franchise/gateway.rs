use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::domain::errors::RepositoryError;

use super::model::{Branch, BranchProductResult, Franchise, Product};

/// Storage contract the use cases depend on, addressed by opaque ids.
///
/// Every mutation must be applied by the store as one conditional update against the
/// franchise it targets, never as a read-modify-write driven from the caller. The returned
/// `Franchise` is the state right after the mutation.
///
/// Failures: `NotFound` when the addressed franchise/branch/product does not resolve,
/// `Duplicated` when a unique name rule rejects the write, anything else for infrastructure faults.
#[async_trait]
pub trait FranchiseGateway: Send + Sync {
    /// Assigns identity, persists and returns the stored franchise.
    async fn save_new(&self, franchise: &Franchise) -> Result<Franchise, RepositoryError>;

    /// Exact, case-sensitive name match.
    async fn find_by_name(&self, name: &str) -> Result<Option<Franchise>, RepositoryError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Franchise>, RepositoryError>;

    async fn append_branch(
        &self,
        franchise_id: &str,
        branch: &Branch,
    ) -> Result<Franchise, RepositoryError>;

    async fn append_product(
        &self,
        franchise_id: &str,
        branch_id: &str,
        product: &Product,
    ) -> Result<Franchise, RepositoryError>;

    /// Fails `NotFound` when the product does not exist in the addressed branch.
    async fn remove_product(
        &self,
        franchise_id: &str,
        branch_id: &str,
        product_id: &str,
    ) -> Result<Franchise, RepositoryError>;

    async fn set_product_stock(
        &self,
        franchise_id: &str,
        branch_id: &str,
        product_id: &str,
        stock: i32,
    ) -> Result<Franchise, RepositoryError>;

    async fn rename_franchise(
        &self,
        franchise_id: &str,
        new_name: &str,
    ) -> Result<Franchise, RepositoryError>;

    async fn rename_branch(
        &self,
        franchise_id: &str,
        branch_id: &str,
        new_name: &str,
    ) -> Result<Franchise, RepositoryError>;

    async fn rename_product(
        &self,
        franchise_id: &str,
        branch_id: &str,
        product_id: &str,
        new_name: &str,
    ) -> Result<Franchise, RepositoryError>;

    /// Lazily yields one result per non-empty branch, in branch order. An unknown franchise
    /// yields an empty stream rather than an error.
    async fn stream_max_stock_per_branch(
        &self,
        franchise_id: &str,
    ) -> Result<BoxStream<'static, BranchProductResult>, RepositoryError>;
}
