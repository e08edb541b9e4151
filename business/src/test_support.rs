use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::BoxStream;
use mockall::mock;

use crate::domain::errors::RepositoryError;
use crate::domain::franchise::gateway::FranchiseGateway;
use crate::domain::franchise::model::{Branch, BranchProductResult, Franchise, Product};
use crate::domain::logger::Logger;

mock! {
    pub Gateway {}

    #[async_trait]
    impl FranchiseGateway for Gateway {
        async fn save_new(&self, franchise: &Franchise) -> Result<Franchise, RepositoryError>;
        async fn find_by_name(&self, name: &str) -> Result<Option<Franchise>, RepositoryError>;
        async fn find_by_id(&self, id: &str) -> Result<Option<Franchise>, RepositoryError>;
        async fn append_branch(&self, franchise_id: &str, branch: &Branch) -> Result<Franchise, RepositoryError>;
        async fn append_product(&self, franchise_id: &str, branch_id: &str, product: &Product) -> Result<Franchise, RepositoryError>;
        async fn remove_product(&self, franchise_id: &str, branch_id: &str, product_id: &str) -> Result<Franchise, RepositoryError>;
        async fn set_product_stock(&self, franchise_id: &str, branch_id: &str, product_id: &str, stock: i32) -> Result<Franchise, RepositoryError>;
        async fn rename_franchise(&self, franchise_id: &str, new_name: &str) -> Result<Franchise, RepositoryError>;
        async fn rename_branch(&self, franchise_id: &str, branch_id: &str, new_name: &str) -> Result<Franchise, RepositoryError>;
        async fn rename_product(&self, franchise_id: &str, branch_id: &str, product_id: &str, new_name: &str) -> Result<Franchise, RepositoryError>;
        async fn stream_max_stock_per_branch(&self, franchise_id: &str) -> Result<BoxStream<'static, BranchProductResult>, RepositoryError>;
    }
}

mock! {
    pub Log {}

    impl Logger for Log {
        fn info(&self, message: &str);
        fn warn(&self, message: &str);
        fn error(&self, message: &str);
        fn debug(&self, message: &str);
    }
}

pub fn mock_logger() -> Arc<dyn Logger> {
    let mut logger = MockLog::new();
    logger.expect_info().returning(|_| ());
    logger.expect_warn().returning(|_| ());
    logger.expect_error().returning(|_| ());
    logger.expect_debug().returning(|_| ());
    Arc::new(logger)
}

pub fn franchise(id: &str, name: &str, branches: Vec<Branch>) -> Franchise {
    Franchise::from_repository(id.to_string(), name.to_string(), branches)
}

pub fn branch(id: &str, name: &str, products: Vec<Product>) -> Branch {
    Branch::from_repository(id.to_string(), name.to_string(), products)
}

pub fn product(id: &str, name: &str, stock: i32) -> Product {
    Product::from_repository(id.to_string(), name.to_string(), stock)
}
