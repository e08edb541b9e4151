use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::franchise::errors::FranchiseError;
use crate::domain::franchise::gateway::FranchiseGateway;
use crate::domain::franchise::model::Franchise;
use crate::domain::franchise::use_cases::create::{CreateFranchiseParams, CreateFranchiseUseCase};
use crate::domain::logger::Logger;

pub struct CreateFranchiseUseCaseImpl {
    pub gateway: Arc<dyn FranchiseGateway>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl CreateFranchiseUseCase for CreateFranchiseUseCaseImpl {
    async fn execute(&self, params: CreateFranchiseParams) -> Result<Franchise, FranchiseError> {
        let franchise = Franchise::new(params.name.as_deref())?;
        self.logger
            .info(&format!("Creating franchise: {}", franchise.name));

        // Check-then-act: the unique index on the store closes the race.
        let existing = self
            .gateway
            .find_by_name(&franchise.name)
            .await
            .map_err(|e| FranchiseError::from_repository(e, FranchiseError::NameConflict))?;
        if existing.is_some() {
            self.logger
                .warn(&format!("Franchise name already taken: {}", franchise.name));
            return Err(FranchiseError::FranchiseAlreadyExists(franchise.name));
        }

        let saved = self.gateway.save_new(&franchise).await.map_err(|e| {
            self.logger
                .error(&format!("Failed to save franchise {}: {}", franchise.name, e));
            FranchiseError::from_repository(e, FranchiseError::NameConflict)
        })?;

        self.logger.info(&format!("Franchise created: {}", saved.id));
        Ok(saved)
    }
}
