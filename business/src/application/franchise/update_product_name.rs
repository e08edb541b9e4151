use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::franchise::errors::FranchiseError;
use crate::domain::franchise::gateway::FranchiseGateway;
use crate::domain::franchise::model::Franchise;
use crate::domain::franchise::use_cases::update_product_name::{
    UpdateProductNameParams, UpdateProductNameUseCase,
};
use crate::domain::logger::Logger;
use crate::domain::shared::value_objects::non_blank;

pub struct UpdateProductNameUseCaseImpl {
    pub gateway: Arc<dyn FranchiseGateway>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl UpdateProductNameUseCase for UpdateProductNameUseCaseImpl {
    async fn execute(&self, params: UpdateProductNameParams) -> Result<Franchise, FranchiseError> {
        let new_name =
            non_blank(params.new_name.as_deref()).ok_or(FranchiseError::NewNameEmpty)?;
        self.logger.info(&format!(
            "Renaming product {} in branch {} of franchise {} to {}",
            params.product_id, params.branch_id, params.franchise_id, new_name
        ));

        let updated = self
            .gateway
            .rename_product(
                &params.franchise_id,
                &params.branch_id,
                &params.product_id,
                new_name,
            )
            .await
            .map_err(|e| {
                self.logger.error(&format!(
                    "Failed to rename product {}: {}",
                    params.product_id, e
                ));
                FranchiseError::from_repository(e, FranchiseError::ProductNotFound)
            })?;

        self.logger
            .info(&format!("Product {} renamed", params.product_id));
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::RepositoryError;
    use crate::domain::franchise::errors::ErrorKind;
    use crate::test_support::{MockGateway, branch, franchise, mock_logger, product};

    fn use_case(gateway: MockGateway) -> UpdateProductNameUseCaseImpl {
        UpdateProductNameUseCaseImpl {
            gateway: Arc::new(gateway),
            logger: mock_logger(),
        }
    }

    fn params(new_name: Option<&str>) -> UpdateProductNameParams {
        UpdateProductNameParams {
            franchise_id: "f-1".to_string(),
            branch_id: "b-1".to_string(),
            product_id: "p-1".to_string(),
            new_name: new_name.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn should_rename_product_by_id() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_rename_product()
            .withf(|f, b, p, name| f == "f-1" && b == "b-1" && p == "p-1" && name == "Gizmo")
            .times(1)
            .returning(|f, b, p, name| {
                Ok(franchise(
                    f,
                    "Acme",
                    vec![branch(b, "Centro", vec![product(p, name, 4)])],
                ))
            });

        let result = use_case(gateway).execute(params(Some(" Gizmo "))).await;

        let renamed = &result.unwrap().branches[0].products[0];
        assert_eq!(renamed.product_id, "p-1");
        assert_eq!(renamed.name, "Gizmo");
        assert_eq!(renamed.stock, 4);
    }

    #[tokio::test]
    async fn should_reject_empty_name() {
        let mut gateway = MockGateway::new();
        gateway.expect_rename_product().times(0);

        let result = use_case(gateway).execute(params(Some(""))).await;

        assert_eq!(result.unwrap_err().kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn should_return_not_found_when_product_does_not_resolve() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_rename_product()
            .returning(|_, _, _, _| Err(RepositoryError::NotFound));

        let result = use_case(gateway).execute(params(Some("Gizmo"))).await;

        assert!(matches!(result.unwrap_err(), FranchiseError::ProductNotFound));
    }
}
