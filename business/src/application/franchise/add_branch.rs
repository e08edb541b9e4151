use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::franchise::errors::FranchiseError;
use crate::domain::franchise::gateway::FranchiseGateway;
use crate::domain::franchise::model::{Branch, Franchise};
use crate::domain::franchise::use_cases::add_branch::{AddBranchParams, AddBranchUseCase};
use crate::domain::logger::Logger;

pub struct AddBranchUseCaseImpl {
    pub gateway: Arc<dyn FranchiseGateway>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl AddBranchUseCase for AddBranchUseCaseImpl {
    async fn execute(&self, params: AddBranchParams) -> Result<Franchise, FranchiseError> {
        let branch = Branch::new(params.name.as_deref())?;
        self.logger.info(&format!(
            "Adding branch {} to franchise {}",
            branch.name, params.franchise_id
        ));

        let not_found = || FranchiseError::FranchiseNotFound(params.franchise_id.clone());
        let franchise = self
            .gateway
            .find_by_id(&params.franchise_id)
            .await
            .map_err(|e| FranchiseError::from_repository(e, not_found()))?
            .ok_or_else(not_found)?;

        if franchise.has_branch_named(&branch.name) {
            self.logger.warn(&format!(
                "Branch {} already exists in franchise {}",
                branch.name, params.franchise_id
            ));
            return Err(FranchiseError::BranchAlreadyExists(branch.name));
        }

        let updated = self
            .gateway
            .append_branch(&params.franchise_id, &branch)
            .await
            .map_err(|e| {
                self.logger.error(&format!(
                    "Failed to add branch {} to franchise {}: {}",
                    branch.name, params.franchise_id, e
                ));
                FranchiseError::from_repository(e, not_found())
            })?;

        self.logger.info(&format!(
            "Branch {} added to franchise {}, total branches: {}",
            branch.branch_id,
            params.franchise_id,
            updated.branches.len()
        ));
        Ok(updated)
    }
}
