use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::franchise::errors::FranchiseError;
use crate::domain::franchise::gateway::FranchiseGateway;
use crate::domain::franchise::model::Franchise;
use crate::domain::franchise::use_cases::get_by_id::{
    GetFranchiseByIdParams, GetFranchiseByIdUseCase,
};
use crate::domain::logger::Logger;

pub struct GetFranchiseByIdUseCaseImpl {
    pub gateway: Arc<dyn FranchiseGateway>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetFranchiseByIdUseCase for GetFranchiseByIdUseCaseImpl {
    async fn execute(&self, params: GetFranchiseByIdParams) -> Result<Franchise, FranchiseError> {
        self.logger
            .debug(&format!("Getting franchise by id: {}", params.id));

        self.gateway
            .find_by_id(&params.id)
            .await
            .map_err(|e| {
                FranchiseError::from_repository(e, FranchiseError::FranchiseNotFound(params.id.clone()))
            })?
            .ok_or(FranchiseError::FranchiseNotFound(params.id))
    }
}
