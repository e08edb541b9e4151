use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::franchise::errors::FranchiseError;
use crate::domain::franchise::gateway::FranchiseGateway;
use crate::domain::franchise::model::{Franchise, Product};
use crate::domain::franchise::use_cases::add_product::{AddProductParams, AddProductUseCase};
use crate::domain::logger::Logger;

pub struct AddProductUseCaseImpl {
    pub gateway: Arc<dyn FranchiseGateway>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl AddProductUseCase for AddProductUseCaseImpl {
    async fn execute(&self, params: AddProductParams) -> Result<Franchise, FranchiseError> {
        let product = Product::new(params.product_id, params.name.as_deref(), params.stock)?;
        self.logger.info(&format!(
            "Adding product {} (stock {}) to branch {} of franchise {}",
            product.name, product.stock, params.branch_id, params.franchise_id
        ));

        let updated = self
            .gateway
            .append_product(&params.franchise_id, &params.branch_id, &product)
            .await
            .map_err(|e| {
                self.logger.error(&format!(
                    "Failed to add product {} to branch {}: {}",
                    product.name, params.branch_id, e
                ));
                FranchiseError::from_repository(e, FranchiseError::BranchNotFound)
            })?;

        self.logger.info(&format!(
            "Product {} added to branch {}",
            product.product_id, params.branch_id
        ));
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::RepositoryError;
    use crate::domain::franchise::errors::ErrorKind;
    use crate::test_support::{MockGateway, branch, franchise, mock_logger};
    use proptest::prelude::*;

    fn use_case(gateway: MockGateway) -> AddProductUseCaseImpl {
        AddProductUseCaseImpl {
            gateway: Arc::new(gateway),
            logger: mock_logger(),
        }
    }

    fn params(product_id: Option<&str>, name: &str, stock: Option<i32>) -> AddProductParams {
        AddProductParams {
            franchise_id: "f-1".to_string(),
            branch_id: "b-1".to_string(),
            product_id: product_id.map(str::to_string),
            name: Some(name.to_string()),
            stock,
        }
    }

    fn echo_append(gateway: &mut MockGateway) {
        gateway.expect_append_product().returning(|f, b, p| {
            Ok(franchise(f, "Acme", vec![branch(b, "Centro", vec![p.clone()])]))
        });
    }

    #[tokio::test]
    async fn should_generate_product_id_when_absent() {
        let mut gateway = MockGateway::new();
        echo_append(&mut gateway);

        let result = use_case(gateway)
            .execute(params(None, "Widget", Some(10)))
            .await;

        let added = &result.unwrap().branches[0].products[0];
        assert_eq!(added.name, "Widget");
        assert_eq!(added.stock, 10);
        assert_eq!(added.product_id.len(), 32);
    }

    #[tokio::test]
    async fn should_keep_caller_supplied_product_id() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_append_product()
            .withf(|f, b, p| f == "f-1" && b == "b-1" && p.product_id == "p-given")
            .times(1)
            .returning(|f, b, p| {
                Ok(franchise(f, "Acme", vec![branch(b, "Centro", vec![p.clone()])]))
            });

        let result = use_case(gateway)
            .execute(params(Some("p-given"), "Widget", Some(1)))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn should_default_missing_stock_to_zero() {
        let mut gateway = MockGateway::new();
        echo_append(&mut gateway);

        let result = use_case(gateway).execute(params(None, "Widget", None)).await;

        assert_eq!(result.unwrap().branches[0].products[0].stock, 0);
    }

    #[tokio::test]
    async fn should_return_not_found_when_branch_does_not_resolve() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_append_product()
            .returning(|_, _, _| Err(RepositoryError::NotFound));

        let result = use_case(gateway)
            .execute(params(None, "Widget", Some(1)))
            .await;

        assert!(matches!(result.unwrap_err(), FranchiseError::BranchNotFound));
    }

    #[tokio::test]
    async fn should_not_check_product_name_uniqueness_itself() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_append_product()
            .times(2)
            .returning(|f, b, p| {
                Ok(franchise(f, "Acme", vec![branch(b, "Centro", vec![p.clone()])]))
            });
        let use_case = use_case(gateway);

        let first = use_case.execute(params(None, "Widget", Some(1))).await;
        let second = use_case.execute(params(None, "Widget", Some(2))).await;

        assert!(first.is_ok());
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn should_surface_store_rejection_of_duplicate_name_as_business_error() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_append_product()
            .returning(|_, _, _| Err(RepositoryError::Duplicated));

        let result = use_case(gateway)
            .execute(params(None, "Widget", Some(1)))
            .await;

        assert_eq!(result.unwrap_err().kind(), ErrorKind::Business);
    }

    #[tokio::test]
    async fn should_reject_blank_product_name() {
        let mut gateway = MockGateway::new();
        gateway.expect_append_product().times(0);

        let result = use_case(gateway).execute(params(None, " ", Some(1))).await;

        assert!(matches!(result.unwrap_err(), FranchiseError::ProductNameEmpty));
    }

    proptest! {
        #[test]
        fn negative_stock_is_rejected_before_the_store(stock in i32::MIN..0) {
            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let mut gateway = MockGateway::new();
            gateway.expect_append_product().times(0);

            let result = runtime.block_on(
                use_case(gateway).execute(params(None, "Widget", Some(stock))),
            );

            prop_assert!(matches!(result, Err(FranchiseError::NegativeStock)));
        }
    }
}
