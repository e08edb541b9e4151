use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::franchise::errors::FranchiseError;
use crate::domain::franchise::gateway::FranchiseGateway;
use crate::domain::franchise::model::Franchise;
use crate::domain::franchise::use_cases::remove_product::{
    RemoveProductParams, RemoveProductUseCase,
};
use crate::domain::logger::Logger;

pub struct RemoveProductUseCaseImpl {
    pub gateway: Arc<dyn FranchiseGateway>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl RemoveProductUseCase for RemoveProductUseCaseImpl {
    async fn execute(&self, params: RemoveProductParams) -> Result<Franchise, FranchiseError> {
        self.logger.info(&format!(
            "Removing product {} from branch {} of franchise {}",
            params.product_id, params.branch_id, params.franchise_id
        ));

        let updated = self
            .gateway
            .remove_product(&params.franchise_id, &params.branch_id, &params.product_id)
            .await
            .map_err(|e| {
                self.logger.error(&format!(
                    "Failed to remove product {}: {}",
                    params.product_id, e
                ));
                FranchiseError::from_repository(e, FranchiseError::ProductNotFound)
            })?;

        self.logger
            .info(&format!("Product {} removed", params.product_id));
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::RepositoryError;
    use crate::domain::franchise::errors::ErrorKind;
    use crate::test_support::{MockGateway, branch, franchise, mock_logger};

    fn use_case(gateway: MockGateway) -> RemoveProductUseCaseImpl {
        RemoveProductUseCaseImpl {
            gateway: Arc::new(gateway),
            logger: mock_logger(),
        }
    }

    fn params(franchise_id: &str) -> RemoveProductParams {
        RemoveProductParams {
            franchise_id: franchise_id.to_string(),
            branch_id: "b-1".to_string(),
            product_id: "p-1".to_string(),
        }
    }

    #[tokio::test]
    async fn should_remove_product_by_id() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_remove_product()
            .withf(|f, b, p| f == "f-1" && b == "b-1" && p == "p-1")
            .times(1)
            .returning(|f, b, _| Ok(franchise(f, "Acme", vec![branch(b, "Centro", vec![])])));

        let result = use_case(gateway).execute(params("f-1")).await;

        assert!(result.unwrap().branches[0].products.is_empty());
    }

    #[tokio::test]
    async fn should_return_not_found_when_franchise_does_not_exist() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_remove_product()
            .returning(|_, _, _| Err(RepositoryError::NotFound));

        let result = use_case(gateway).execute(params("missing")).await;

        let error = result.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NotFound);
        assert_eq!(error.code(), "RESOURCE_NOT_FOUND");
    }

    #[tokio::test]
    async fn should_propagate_store_faults_as_generic_error() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_remove_product()
            .returning(|_, _, _| Err(RepositoryError::Unavailable));

        let result = use_case(gateway).execute(params("f-1")).await;

        assert!(matches!(
            result.unwrap_err(),
            FranchiseError::Repository(RepositoryError::Unavailable)
        ));
    }
}
