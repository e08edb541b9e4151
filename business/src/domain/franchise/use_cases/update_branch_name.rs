use async_trait::async_trait;

use crate::domain::franchise::errors::FranchiseError;
use crate::domain::franchise::model::Franchise;

pub struct UpdateBranchNameParams {
    pub franchise_id: String,
    pub branch_id: String,
    pub new_name: Option<String>,
}

#[async_trait]
pub trait UpdateBranchNameUseCase: Send + Sync {
    async fn execute(&self, params: UpdateBranchNameParams) -> Result<Franchise, FranchiseError>;
}
