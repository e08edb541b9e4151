use async_trait::async_trait;

use crate::domain::franchise::errors::FranchiseError;
use crate::domain::franchise::model::Franchise;

pub struct UpdateFranchiseNameParams {
    pub franchise_id: String,
    pub new_name: Option<String>,
}

#[async_trait]
pub trait UpdateFranchiseNameUseCase: Send + Sync {
    async fn execute(&self, params: UpdateFranchiseNameParams) -> Result<Franchise, FranchiseError>;
}
