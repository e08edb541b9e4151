use async_trait::async_trait;

use crate::domain::franchise::errors::FranchiseError;
use crate::domain::franchise::model::Franchise;

pub struct AddBranchParams {
    pub franchise_id: String,
    pub name: Option<String>,
}

#[async_trait]
pub trait AddBranchUseCase: Send + Sync {
    async fn execute(&self, params: AddBranchParams) -> Result<Franchise, FranchiseError>;
}
