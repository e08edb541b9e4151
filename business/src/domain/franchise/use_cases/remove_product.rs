use async_trait::async_trait;

use crate::domain::franchise::errors::FranchiseError;
use crate::domain::franchise::model::Franchise;

pub struct RemoveProductParams {
    pub franchise_id: String,
    pub branch_id: String,
    pub product_id: String,
}

#[async_trait]
pub trait RemoveProductUseCase: Send + Sync {
    async fn execute(&self, params: RemoveProductParams) -> Result<Franchise, FranchiseError>;
}
