use async_trait::async_trait;

use crate::domain::franchise::errors::FranchiseError;
use crate::domain::franchise::model::Franchise;

pub struct AddProductParams {
    pub franchise_id: String,
    pub branch_id: String,
    /// Generated when absent or empty.
    pub product_id: Option<String>,
    pub name: Option<String>,
    /// Defaults to zero when absent.
    pub stock: Option<i32>,
}

#[async_trait]
pub trait AddProductUseCase: Send + Sync {
    async fn execute(&self, params: AddProductParams) -> Result<Franchise, FranchiseError>;
}
