use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use futures::stream::BoxStream;

use crate::domain::franchise::errors::FranchiseError;
use crate::domain::franchise::gateway::FranchiseGateway;
use crate::domain::franchise::model::BranchProductResult;
use crate::domain::franchise::use_cases::find_max_stock::{
    FindMaxStockParams, FindMaxStockUseCase,
};
use crate::domain::logger::Logger;

pub struct FindMaxStockUseCaseImpl {
    pub gateway: Arc<dyn FranchiseGateway>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl FindMaxStockUseCase for FindMaxStockUseCaseImpl {
    /// An unknown franchise or one whose branches are all empty yields an empty stream.
    async fn execute(
        &self,
        params: FindMaxStockParams,
    ) -> Result<BoxStream<'static, BranchProductResult>, FranchiseError> {
        self.logger.info(&format!(
            "Finding max stock product per branch for franchise {}",
            params.franchise_id
        ));

        let results = self
            .gateway
            .stream_max_stock_per_branch(&params.franchise_id)
            .await
            .map_err(|e| {
                self.logger.error(&format!(
                    "Failed to find max stock for franchise {}: {}",
                    params.franchise_id, e
                ));
                FranchiseError::from_repository(
                    e,
                    FranchiseError::FranchiseNotFound(params.franchise_id.clone()),
                )
            })?;

        let logger = self.logger.clone();
        Ok(results
            .inspect(move |result| match &result.product {
                Some(product) => logger.debug(&format!(
                    "Branch {}: {} with stock {}",
                    result.branch_name, product.name, product.stock
                )),
                None => logger.debug(&format!("Branch {}: no products", result.branch_name)),
            })
            .boxed())
    }
}
