use async_trait::async_trait;

use crate::domain::franchise::errors::FranchiseError;
use crate::domain::franchise::model::Franchise;

pub struct UpdateStockParams {
    pub franchise_id: String,
    pub branch_id: String,
    pub product_id: String,
    pub stock: Option<i32>,
}

#[async_trait]
pub trait UpdateStockUseCase: Send + Sync {
    async fn execute(&self, params: UpdateStockParams) -> Result<Franchise, FranchiseError>;
}
