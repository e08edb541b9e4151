//! In-memory gateway for development and end-to-end tests.

use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use futures::stream::{self, BoxStream};
use parking_lot::RwLock;

use business::domain::errors::RepositoryError;
use business::domain::franchise::gateway::FranchiseGateway;
use business::domain::franchise::model::{Branch, BranchProductResult, Franchise, Product};
use business::domain::shared::value_objects::generate_id;

/// Applies every mutation under a single write lock, so each one is atomic per franchise
/// and enforces the same unique-name rules as the PostgreSQL indexes.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFranchiseGateway {
    franchises: Arc<RwLock<Vec<Franchise>>>,
}

impl InMemoryFranchiseGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored franchises
    pub fn franchise_count(&self) -> usize {
        self.franchises.read().len()
    }

    fn modify<F>(&self, franchise_id: &str, patch: F) -> Result<Franchise, RepositoryError>
    where
        F: FnOnce(&mut Vec<Franchise>, usize) -> Result<(), RepositoryError>,
    {
        let mut franchises = self.franchises.write();
        let index = franchises
            .iter()
            .position(|f| f.id == franchise_id)
            .ok_or(RepositoryError::NotFound)?;

        patch(&mut franchises, index)?;
        Ok(franchises[index].clone())
    }
}

fn branch_mut<'a>(
    franchise: &'a mut Franchise,
    branch_id: &str,
) -> Result<&'a mut Branch, RepositoryError> {
    franchise
        .branches
        .iter_mut()
        .find(|b| b.branch_id == branch_id)
        .ok_or(RepositoryError::NotFound)
}

fn product_index(branch: &Branch, product_id: &str) -> Result<usize, RepositoryError> {
    branch
        .products
        .iter()
        .position(|p| p.product_id == product_id)
        .ok_or(RepositoryError::NotFound)
}

fn branch_name_taken(franchise: &Franchise, name: &str, except: Option<&str>) -> bool {
    franchise.branches.iter().any(|b| {
        Some(b.branch_id.as_str()) != except && b.name.to_lowercase() == name.to_lowercase()
    })
}

/// Product ids are unique across the whole store, like the `products` primary key.
fn product_id_taken(franchises: &[Franchise], product_id: &str) -> bool {
    franchises
        .iter()
        .flat_map(|f| &f.branches)
        .flat_map(|b| &b.products)
        .any(|p| p.product_id == product_id)
}

fn product_name_taken(branch: &Branch, name: &str, except: Option<&str>) -> bool {
    branch
        .products
        .iter()
        .any(|p| Some(p.product_id.as_str()) != except && p.name == name)
}

#[async_trait]
impl FranchiseGateway for InMemoryFranchiseGateway {
    async fn save_new(&self, franchise: &Franchise) -> Result<Franchise, RepositoryError> {
        let mut franchises = self.franchises.write();
        if franchises.iter().any(|f| f.name == franchise.name) {
            return Err(RepositoryError::Duplicated);
        }

        let stored = Franchise::from_repository(
            generate_id(),
            franchise.name.clone(),
            franchise.branches.clone(),
        );
        franchises.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Franchise>, RepositoryError> {
        Ok(self
            .franchises
            .read()
            .iter()
            .find(|f| f.name == name)
            .cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Franchise>, RepositoryError> {
        Ok(self.franchises.read().iter().find(|f| f.id == id).cloned())
    }

    async fn append_branch(
        &self,
        franchise_id: &str,
        branch: &Branch,
    ) -> Result<Franchise, RepositoryError> {
        self.modify(franchise_id, |franchises, index| {
            let franchise = &mut franchises[index];
            if branch_name_taken(franchise, &branch.name, None) {
                return Err(RepositoryError::Duplicated);
            }
            franchise.branches.push(branch.clone());
            Ok(())
        })
    }

    async fn append_product(
        &self,
        franchise_id: &str,
        branch_id: &str,
        product: &Product,
    ) -> Result<Franchise, RepositoryError> {
        self.modify(franchise_id, |franchises, index| {
            let id_taken = product_id_taken(franchises, &product.product_id);
            let branch = branch_mut(&mut franchises[index], branch_id)?;
            if id_taken {
                return Err(RepositoryError::DuplicatedId);
            }
            if product_name_taken(branch, &product.name, None) {
                return Err(RepositoryError::Duplicated);
            }
            branch.products.push(product.clone());
            Ok(())
        })
    }

    async fn remove_product(
        &self,
        franchise_id: &str,
        branch_id: &str,
        product_id: &str,
    ) -> Result<Franchise, RepositoryError> {
        self.modify(franchise_id, |franchises, index| {
            let branch = branch_mut(&mut franchises[index], branch_id)?;
            let position = product_index(branch, product_id)?;
            branch.products.remove(position);
            Ok(())
        })
    }

    async fn set_product_stock(
        &self,
        franchise_id: &str,
        branch_id: &str,
        product_id: &str,
        stock: i32,
    ) -> Result<Franchise, RepositoryError> {
        self.modify(franchise_id, |franchises, index| {
            let branch = branch_mut(&mut franchises[index], branch_id)?;
            let position = product_index(branch, product_id)?;
            branch.products[position].stock = stock;
            Ok(())
        })
    }

    async fn rename_franchise(
        &self,
        franchise_id: &str,
        new_name: &str,
    ) -> Result<Franchise, RepositoryError> {
        self.modify(franchise_id, |franchises, index| {
            let taken = franchises
                .iter()
                .enumerate()
                .any(|(i, f)| i != index && f.name == new_name);
            if taken {
                return Err(RepositoryError::Duplicated);
            }
            franchises[index].name = new_name.to_string();
            Ok(())
        })
    }

    async fn rename_branch(
        &self,
        franchise_id: &str,
        branch_id: &str,
        new_name: &str,
    ) -> Result<Franchise, RepositoryError> {
        self.modify(franchise_id, |franchises, index| {
            let franchise = &mut franchises[index];
            if branch_name_taken(franchise, new_name, Some(branch_id)) {
                // A missing branch must still read as not found.
                branch_mut(franchise, branch_id)?;
                return Err(RepositoryError::Duplicated);
            }
            branch_mut(franchise, branch_id)?.name = new_name.to_string();
            Ok(())
        })
    }

    async fn rename_product(
        &self,
        franchise_id: &str,
        branch_id: &str,
        product_id: &str,
        new_name: &str,
    ) -> Result<Franchise, RepositoryError> {
        self.modify(franchise_id, |franchises, index| {
            let branch = branch_mut(&mut franchises[index], branch_id)?;
            let position = product_index(branch, product_id)?;
            if product_name_taken(branch, new_name, Some(product_id)) {
                return Err(RepositoryError::Duplicated);
            }
            branch.products[position].name = new_name.to_string();
            Ok(())
        })
    }

    async fn stream_max_stock_per_branch(
        &self,
        franchise_id: &str,
    ) -> Result<BoxStream<'static, BranchProductResult>, RepositoryError> {
        let results = self
            .franchises
            .read()
            .iter()
            .find(|f| f.id == franchise_id)
            .map(Franchise::max_stock_per_branch)
            .unwrap_or_default();

        Ok(stream::iter(results).boxed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use business::application::franchise::add_branch::AddBranchUseCaseImpl;
    use business::application::franchise::add_product::AddProductUseCaseImpl;
    use business::application::franchise::create::CreateFranchiseUseCaseImpl;
    use business::application::franchise::find_max_stock::FindMaxStockUseCaseImpl;
    use business::application::franchise::remove_product::RemoveProductUseCaseImpl;
    use business::application::franchise::update_branch_name::UpdateBranchNameUseCaseImpl;
    use business::application::franchise::update_stock::UpdateStockUseCaseImpl;
    use business::domain::franchise::errors::{ErrorKind, FranchiseError};
    use business::domain::franchise::use_cases::add_branch::{AddBranchParams, AddBranchUseCase};
    use business::domain::franchise::use_cases::add_product::{
        AddProductParams, AddProductUseCase,
    };
    use business::domain::franchise::use_cases::create::{
        CreateFranchiseParams, CreateFranchiseUseCase,
    };
    use business::domain::franchise::use_cases::find_max_stock::{
        FindMaxStockParams, FindMaxStockUseCase,
    };
    use business::domain::franchise::use_cases::remove_product::{
        RemoveProductParams, RemoveProductUseCase,
    };
    use business::domain::franchise::use_cases::update_branch_name::{
        UpdateBranchNameParams, UpdateBranchNameUseCase,
    };
    use business::domain::franchise::use_cases::update_stock::{
        UpdateStockParams, UpdateStockUseCase,
    };
    use business::domain::logger::Logger;
    use logger::TracingLogger;

    struct Harness {
        gateway: Arc<InMemoryFranchiseGateway>,
        logger: Arc<dyn Logger>,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                gateway: Arc::new(InMemoryFranchiseGateway::new()),
                logger: Arc::new(TracingLogger::new("test")),
            }
        }

        async fn create(&self, name: &str) -> Result<Franchise, FranchiseError> {
            CreateFranchiseUseCaseImpl {
                gateway: self.gateway.clone(),
                logger: self.logger.clone(),
            }
            .execute(CreateFranchiseParams {
                name: Some(name.to_string()),
            })
            .await
        }

        async fn add_branch(&self, franchise_id: &str, name: &str) -> Result<Franchise, FranchiseError> {
            AddBranchUseCaseImpl {
                gateway: self.gateway.clone(),
                logger: self.logger.clone(),
            }
            .execute(AddBranchParams {
                franchise_id: franchise_id.to_string(),
                name: Some(name.to_string()),
            })
            .await
        }

        async fn add_product(
            &self,
            franchise_id: &str,
            branch_id: &str,
            name: &str,
            stock: i32,
        ) -> Result<Franchise, FranchiseError> {
            self.add_product_with_id(franchise_id, branch_id, None, name, stock)
                .await
        }

        async fn add_product_with_id(
            &self,
            franchise_id: &str,
            branch_id: &str,
            product_id: Option<&str>,
            name: &str,
            stock: i32,
        ) -> Result<Franchise, FranchiseError> {
            AddProductUseCaseImpl {
                gateway: self.gateway.clone(),
                logger: self.logger.clone(),
            }
            .execute(AddProductParams {
                franchise_id: franchise_id.to_string(),
                branch_id: branch_id.to_string(),
                product_id: product_id.map(str::to_string),
                name: Some(name.to_string()),
                stock: Some(stock),
            })
            .await
        }

        async fn update_stock(
            &self,
            franchise_id: &str,
            branch_id: &str,
            product_id: &str,
            stock: i32,
        ) -> Result<Franchise, FranchiseError> {
            UpdateStockUseCaseImpl {
                gateway: self.gateway.clone(),
                logger: self.logger.clone(),
            }
            .execute(UpdateStockParams {
                franchise_id: franchise_id.to_string(),
                branch_id: branch_id.to_string(),
                product_id: product_id.to_string(),
                stock: Some(stock),
            })
            .await
        }

        async fn remove_product(
            &self,
            franchise_id: &str,
            branch_id: &str,
            product_id: &str,
        ) -> Result<Franchise, FranchiseError> {
            RemoveProductUseCaseImpl {
                gateway: self.gateway.clone(),
                logger: self.logger.clone(),
            }
            .execute(RemoveProductParams {
                franchise_id: franchise_id.to_string(),
                branch_id: branch_id.to_string(),
                product_id: product_id.to_string(),
            })
            .await
        }

        async fn max_stock(&self, franchise_id: &str) -> Vec<BranchProductResult> {
            FindMaxStockUseCaseImpl {
                gateway: self.gateway.clone(),
                logger: self.logger.clone(),
            }
            .execute(FindMaxStockParams {
                franchise_id: franchise_id.to_string(),
            })
            .await
            .unwrap()
            .collect()
            .await
        }
    }

    #[tokio::test]
    async fn should_find_created_franchise_by_returned_id() {
        let harness = Harness::new();

        let created = harness.create("X").await.unwrap();
        let found = harness.gateway.find_by_id(&created.id).await.unwrap().unwrap();

        assert_eq!(found.name, "X");
        assert!(found.branches.is_empty());
    }

    #[tokio::test]
    async fn should_report_updated_stock_as_branch_maximum() {
        let harness = Harness::new();
        let acme = harness.create("Acme").await.unwrap();
        let with_branch = harness.add_branch(&acme.id, "Centro").await.unwrap();
        let centro_id = with_branch.branches[0].branch_id.clone();
        let with_product = harness
            .add_product(&acme.id, &centro_id, "Widget", 10)
            .await
            .unwrap();
        let widget_id = with_product.branches[0].products[0].product_id.clone();

        harness
            .update_stock(&acme.id, &centro_id, &widget_id, 25)
            .await
            .unwrap();
        let results = harness.max_stock(&acme.id).await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].branch_name, "Centro");
        let product = results[0].product.as_ref().unwrap();
        assert_eq!(product.name, "Widget");
        assert_eq!(product.stock, 25);
    }

    #[tokio::test]
    async fn should_return_identical_max_stock_on_repeated_queries() {
        let harness = Harness::new();
        let acme = harness.create("Acme").await.unwrap();
        let franchise = harness.add_branch(&acme.id, "Centro").await.unwrap();
        let centro_id = franchise.branches[0].branch_id.clone();
        harness.add_product(&acme.id, &centro_id, "A", 5).await.unwrap();
        harness.add_product(&acme.id, &centro_id, "B", 5).await.unwrap();

        let first = harness.max_stock(&acme.id).await;
        let second = harness.max_stock(&acme.id).await;

        assert_eq!(first, second);
        assert_eq!(first[0].product.as_ref().unwrap().name, "A");
    }

    #[tokio::test]
    async fn should_reject_duplicate_franchise_name() {
        let harness = Harness::new();
        harness.create("Acme").await.unwrap();

        let result = harness.create("Acme").await;

        assert!(matches!(result, Err(FranchiseError::FranchiseAlreadyExists(_))));
        assert_eq!(harness.gateway.franchise_count(), 1);
    }

    #[tokio::test]
    async fn should_reject_branch_name_differing_only_in_case() {
        let harness = Harness::new();
        let acme = harness.create("Acme").await.unwrap();
        harness.add_branch(&acme.id, "A").await.unwrap();
        harness.add_branch(&acme.id, "B").await.unwrap();

        let result = harness.add_branch(&acme.id, "a").await;

        assert_eq!(result.unwrap_err().kind(), ErrorKind::Business);
    }

    #[tokio::test]
    async fn should_let_store_reject_second_product_with_same_name() {
        let harness = Harness::new();
        let acme = harness.create("Acme").await.unwrap();
        let franchise = harness.add_branch(&acme.id, "Centro").await.unwrap();
        let centro_id = franchise.branches[0].branch_id.clone();
        harness
            .add_product(&acme.id, &centro_id, "Widget", 1)
            .await
            .unwrap();

        let result = harness.add_product(&acme.id, &centro_id, "Widget", 2).await;

        assert!(matches!(result, Err(FranchiseError::NameConflict)));
    }

    #[tokio::test]
    async fn should_reject_product_id_already_used_in_branch() {
        let harness = Harness::new();
        let acme = harness.create("Acme").await.unwrap();
        let franchise = harness.add_branch(&acme.id, "Centro").await.unwrap();
        let centro_id = franchise.branches[0].branch_id.clone();
        harness
            .add_product_with_id(&acme.id, &centro_id, Some("p-1"), "Widget", 1)
            .await
            .unwrap();

        let result = harness
            .add_product_with_id(&acme.id, &centro_id, Some("p-1"), "Gadget", 2)
            .await;
        assert!(matches!(result, Err(FranchiseError::IdConflict)));

        harness
            .update_stock(&acme.id, &centro_id, "p-1", 99)
            .await
            .unwrap();
        let stored = harness.gateway.find_by_id(&acme.id).await.unwrap().unwrap();
        let products = &stored.branches[0].products;
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Widget");
        assert_eq!(products[0].stock, 99);
    }

    #[tokio::test]
    async fn should_reject_product_id_used_in_another_franchise() {
        let harness = Harness::new();
        let acme = harness.create("Acme").await.unwrap();
        let globex = harness.create("Globex").await.unwrap();
        let acme_branch = harness.add_branch(&acme.id, "Centro").await.unwrap().branches[0]
            .branch_id
            .clone();
        let globex_branch = harness.add_branch(&globex.id, "Norte").await.unwrap().branches[0]
            .branch_id
            .clone();
        harness
            .add_product_with_id(&acme.id, &acme_branch, Some("p-1"), "Widget", 1)
            .await
            .unwrap();

        let result = harness
            .add_product_with_id(&globex.id, &globex_branch, Some("p-1"), "Widget", 1)
            .await;

        assert!(matches!(result, Err(FranchiseError::IdConflict)));
    }

    #[tokio::test]
    async fn should_fail_not_found_when_removing_from_unknown_franchise() {
        let harness = Harness::new();

        let result = harness.remove_product("missing", "b", "p").await;

        assert_eq!(result.unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn should_fail_not_found_for_unknown_product_in_existing_branch() {
        let harness = Harness::new();
        let acme = harness.create("Acme").await.unwrap();
        let franchise = harness.add_branch(&acme.id, "Centro").await.unwrap();
        let centro_id = franchise.branches[0].branch_id.clone();

        let removed = harness.remove_product(&acme.id, &centro_id, "ghost").await;
        let updated = harness.update_stock(&acme.id, &centro_id, "ghost", 3).await;

        assert!(matches!(removed, Err(FranchiseError::ProductNotFound)));
        assert!(matches!(updated, Err(FranchiseError::ProductNotFound)));
    }

    #[tokio::test]
    async fn should_keep_branch_id_stable_across_renames() {
        let harness = Harness::new();
        let acme = harness.create("Acme").await.unwrap();
        let franchise = harness.add_branch(&acme.id, "Centro").await.unwrap();
        let centro_id = franchise.branches[0].branch_id.clone();

        let renamed = UpdateBranchNameUseCaseImpl {
            gateway: harness.gateway.clone(),
            logger: harness.logger.clone(),
        }
        .execute(UpdateBranchNameParams {
            franchise_id: acme.id.clone(),
            branch_id: centro_id.clone(),
            new_name: Some("Downtown".to_string()),
        })
        .await
        .unwrap();

        assert_eq!(renamed.branches[0].branch_id, centro_id);
        assert_eq!(renamed.branches[0].name, "Downtown");
        harness
            .add_product(&acme.id, &centro_id, "Widget", 1)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn should_keep_concurrent_appends_to_different_branches() {
        let harness = Harness::new();
        let acme = harness.create("Acme").await.unwrap();
        harness.add_branch(&acme.id, "Centro").await.unwrap();
        let franchise = harness.add_branch(&acme.id, "Norte").await.unwrap();
        let ids: Vec<String> = franchise
            .branches
            .iter()
            .map(|b| b.branch_id.clone())
            .collect();

        let mut handles = Vec::new();
        for i in 0..20 {
            let gateway = harness.gateway.clone();
            let franchise_id = acme.id.clone();
            let branch_id = ids[i % 2].clone();
            handles.push(tokio::spawn(async move {
                let product = Product::from_repository(generate_id(), format!("p{i}"), i as i32);
                gateway
                    .append_product(&franchise_id, &branch_id, &product)
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let stored = harness.gateway.find_by_id(&acme.id).await.unwrap().unwrap();
        assert_eq!(stored.branches[0].products.len(), 10);
        assert_eq!(stored.branches[1].products.len(), 10);
    }

    #[tokio::test]
    async fn should_reject_rename_onto_sibling_branch_name() {
        let gateway = InMemoryFranchiseGateway::new();
        let stored = gateway
            .save_new(&Franchise::from_repository(
                String::new(),
                "Acme".to_string(),
                vec![
                    Branch::from_repository("b-1".to_string(), "Centro".to_string(), vec![]),
                    Branch::from_repository("b-2".to_string(), "Norte".to_string(), vec![]),
                ],
            ))
            .await
            .unwrap();

        let clash = gateway.rename_branch(&stored.id, "b-2", "CENTRO").await;
        let same = gateway.rename_branch(&stored.id, "b-1", "centro").await;
        let missing = gateway.rename_branch(&stored.id, "b-9", "Centro").await;

        assert_eq!(clash.unwrap_err(), RepositoryError::Duplicated);
        assert_eq!(same.unwrap().branches[0].name, "centro");
        assert_eq!(missing.unwrap_err(), RepositoryError::NotFound);
    }

    #[tokio::test]
    async fn should_stream_nothing_for_unknown_franchise() {
        let gateway = InMemoryFranchiseGateway::new();

        let results: Vec<_> = gateway
            .stream_max_stock_per_branch("missing")
            .await
            .unwrap()
            .collect()
            .await;

        assert!(results.is_empty());
    }
}
