use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::franchise::errors::FranchiseError;
use crate::domain::franchise::gateway::FranchiseGateway;
use crate::domain::franchise::model::Franchise;
use crate::domain::franchise::use_cases::update_branch_name::{
    UpdateBranchNameParams, UpdateBranchNameUseCase,
};
use crate::domain::logger::Logger;
use crate::domain::shared::value_objects::non_blank;

pub struct UpdateBranchNameUseCaseImpl {
    pub gateway: Arc<dyn FranchiseGateway>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl UpdateBranchNameUseCase for UpdateBranchNameUseCaseImpl {
    async fn execute(&self, params: UpdateBranchNameParams) -> Result<Franchise, FranchiseError> {
        let new_name =
            non_blank(params.new_name.as_deref()).ok_or(FranchiseError::NewNameEmpty)?;
        self.logger.info(&format!(
            "Renaming branch {} of franchise {} to {}",
            params.branch_id, params.franchise_id, new_name
        ));

        let updated = self
            .gateway
            .rename_branch(&params.franchise_id, &params.branch_id, new_name)
            .await
            .map_err(|e| {
                self.logger.error(&format!(
                    "Failed to rename branch {}: {}",
                    params.branch_id, e
                ));
                FranchiseError::from_repository(e, FranchiseError::BranchNotFound)
            })?;

        self.logger
            .info(&format!("Branch {} renamed", params.branch_id));
        Ok(updated)
    }
}
