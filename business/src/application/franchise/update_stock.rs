use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::franchise::errors::FranchiseError;
use crate::domain::franchise::gateway::FranchiseGateway;
use crate::domain::franchise::model::Franchise;
use crate::domain::franchise::use_cases::update_stock::{UpdateStockParams, UpdateStockUseCase};
use crate::domain::logger::Logger;

pub struct UpdateStockUseCaseImpl {
    pub gateway: Arc<dyn FranchiseGateway>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl UpdateStockUseCase for UpdateStockUseCaseImpl {
    async fn execute(&self, params: UpdateStockParams) -> Result<Franchise, FranchiseError> {
        let stock = params.stock.ok_or(FranchiseError::StockRequired)?;
        if stock < 0 {
            return Err(FranchiseError::NegativeStock);
        }
        self.logger.info(&format!(
            "Updating stock of product {} in branch {} of franchise {} to {}",
            params.product_id, params.branch_id, params.franchise_id, stock
        ));

        let updated = self
            .gateway
            .set_product_stock(
                &params.franchise_id,
                &params.branch_id,
                &params.product_id,
                stock,
            )
            .await
            .map_err(|e| {
                self.logger.error(&format!(
                    "Failed to update stock of product {}: {}",
                    params.product_id, e
                ));
                FranchiseError::from_repository(e, FranchiseError::ProductNotFound)
            })?;

        self.logger.info(&format!(
            "Stock of product {} set to {}",
            params.product_id, stock
        ));
        Ok(updated)
    }
}
