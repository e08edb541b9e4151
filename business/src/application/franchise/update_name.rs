use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::franchise::errors::FranchiseError;
use crate::domain::franchise::gateway::FranchiseGateway;
use crate::domain::franchise::model::Franchise;
use crate::domain::franchise::use_cases::update_name::{
    UpdateFranchiseNameParams, UpdateFranchiseNameUseCase,
};
use crate::domain::logger::Logger;
use crate::domain::shared::value_objects::non_blank;

pub struct UpdateFranchiseNameUseCaseImpl {
    pub gateway: Arc<dyn FranchiseGateway>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl UpdateFranchiseNameUseCase for UpdateFranchiseNameUseCaseImpl {
    async fn execute(&self, params: UpdateFranchiseNameParams) -> Result<Franchise, FranchiseError> {
        let new_name =
            non_blank(params.new_name.as_deref()).ok_or(FranchiseError::NewNameEmpty)?;
        self.logger.info(&format!(
            "Renaming franchise {} to {}",
            params.franchise_id, new_name
        ));

        // Sibling uniqueness is left to the store's unique index.
        let updated = self
            .gateway
            .rename_franchise(&params.franchise_id, new_name)
            .await
            .map_err(|e| {
                self.logger.error(&format!(
                    "Failed to rename franchise {}: {}",
                    params.franchise_id, e
                ));
                FranchiseError::from_repository(
                    e,
                    FranchiseError::FranchiseNotFound(params.franchise_id.clone()),
                )
            })?;

        self.logger
            .info(&format!("Franchise {} renamed", params.franchise_id));
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::RepositoryError;
    use crate::domain::franchise::errors::ErrorKind;
    use crate::test_support::{MockGateway, franchise, mock_logger};

    fn use_case(gateway: MockGateway) -> UpdateFranchiseNameUseCaseImpl {
        UpdateFranchiseNameUseCaseImpl {
            gateway: Arc::new(gateway),
            logger: mock_logger(),
        }
    }

    fn params(new_name: Option<&str>) -> UpdateFranchiseNameParams {
        UpdateFranchiseNameParams {
            franchise_id: "f-1".to_string(),
            new_name: new_name.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn should_rename_franchise() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_rename_franchise()
            .withf(|id, name| id == "f-1" && name == "Acme Global")
            .times(1)
            .returning(|id, name| Ok(franchise(id, name, vec![])));

        let result = use_case(gateway).execute(params(Some("Acme Global"))).await;

        assert_eq!(result.unwrap().name, "Acme Global");
    }

    #[tokio::test]
    async fn should_reject_blank_name_without_touching_the_store() {
        let mut gateway = MockGateway::new();
        gateway.expect_rename_franchise().times(0);

        let missing = use_case(gateway).execute(params(None)).await;

        assert!(matches!(missing.unwrap_err(), FranchiseError::NewNameEmpty));
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_franchise() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_rename_franchise()
            .returning(|_, _| Err(RepositoryError::NotFound));

        let result = use_case(gateway).execute(params(Some("Other"))).await;

        assert!(matches!(
            result.unwrap_err(),
            FranchiseError::FranchiseNotFound(id) if id == "f-1"
        ));
    }

    #[tokio::test]
    async fn should_surface_name_taken_by_another_franchise_as_business_error() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_rename_franchise()
            .returning(|_, _| Err(RepositoryError::Duplicated));

        let result = use_case(gateway).execute(params(Some("Taken"))).await;

        assert_eq!(result.unwrap_err().kind(), ErrorKind::Business);
    }
}
