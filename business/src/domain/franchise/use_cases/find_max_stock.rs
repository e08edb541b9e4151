use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::domain::franchise::errors::FranchiseError;
use crate::domain::franchise::model::BranchProductResult;

pub struct FindMaxStockParams {
    pub franchise_id: String,
}

#[async_trait]
pub trait FindMaxStockUseCase: Send + Sync {
    async fn execute(
        &self,
        params: FindMaxStockParams,
    ) -> Result<BoxStream<'static, BranchProductResult>, FranchiseError>;
}
