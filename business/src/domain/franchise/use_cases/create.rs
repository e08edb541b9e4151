use async_trait::async_trait;

use crate::domain::franchise::errors::FranchiseError;
use crate::domain::franchise::model::Franchise;

pub struct CreateFranchiseParams {
    /// Desired name; trimmed before use.
    pub name: Option<String>,
}

#[async_trait]
pub trait CreateFranchiseUseCase: Send + Sync {
    async fn execute(&self, params: CreateFranchiseParams) -> Result<Franchise, FranchiseError>;
}
