use async_trait::async_trait;

use crate::domain::franchise::errors::FranchiseError;
use crate::domain::franchise::model::Franchise;

pub struct GetFranchiseByIdParams {
    pub id: String,
}

#[async_trait]
pub trait GetFranchiseByIdUseCase: Send + Sync {
    async fn execute(&self, params: GetFranchiseByIdParams) -> Result<Franchise, FranchiseError>;
}
