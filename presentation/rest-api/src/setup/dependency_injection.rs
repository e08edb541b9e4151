use std::path::Path;
use std::sync::Arc;

use logger::TracingLogger;
use persistence::db::run_migrations;
use persistence::franchise::repository::FranchiseGatewayPostgres;
use persistence::memory::InMemoryFranchiseGateway;
use persistence::resilience::{ResilienceConfig, ResilientFranchiseGateway};

use business::application::franchise::add_branch::AddBranchUseCaseImpl;
use business::application::franchise::add_product::AddProductUseCaseImpl;
use business::application::franchise::create::CreateFranchiseUseCaseImpl;
use business::application::franchise::find_max_stock::FindMaxStockUseCaseImpl;
use business::application::franchise::get_by_id::GetFranchiseByIdUseCaseImpl;
use business::application::franchise::remove_product::RemoveProductUseCaseImpl;
use business::application::franchise::update_branch_name::UpdateBranchNameUseCaseImpl;
use business::application::franchise::update_name::UpdateFranchiseNameUseCaseImpl;
use business::application::franchise::update_product_name::UpdateProductNameUseCaseImpl;
use business::application::franchise::update_stock::UpdateStockUseCaseImpl;
use business::domain::franchise::gateway::FranchiseGateway;
use business::domain::logger::Logger;

use crate::config::app_config::AppConfig;
use crate::config::database_config::{StorageBackend, init_database};

pub struct DependencyContainer {
    pub health_api: crate::api::health::routes::Api,
    pub franchise_api: crate::api::franchise::routes::FranchiseApi,
    pub resilience_api: crate::api::resilience::routes::ResilienceApi,
}

impl DependencyContainer {
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        match config.storage.backend {
            StorageBackend::Postgres => {
                let pool = init_database(&config.storage).await?;
                if Path::new(&config.storage.migrations_path).exists() {
                    run_migrations(&pool, &config.storage.migrations_path).await?;
                } else {
                    tracing::warn!(
                        path = %config.storage.migrations_path,
                        "migrations directory not found, skipping"
                    );
                }
                let store = Arc::new(FranchiseGatewayPostgres::new(pool));
                Ok(Self::wire(store, config.resilience.clone()))
            }
            StorageBackend::Memory => {
                tracing::warn!("using in-memory storage, data is lost on shutdown");
                Ok(Self::in_memory(config.resilience.clone()))
            }
        }
    }

    /// Container over a fresh in-memory store.
    pub fn in_memory(resilience: ResilienceConfig) -> Self {
        Self::wire(Arc::new(InMemoryFranchiseGateway::new()), resilience)
    }

    fn wire(store: Arc<dyn FranchiseGateway>, resilience: ResilienceConfig) -> Self {
        let logger: Arc<dyn Logger> = Arc::new(TracingLogger::new("franchise"));
        let resilient = Arc::new(ResilientFranchiseGateway::new(store, resilience));
        let gateway: Arc<dyn FranchiseGateway> = resilient.clone();

        let create_use_case = Arc::new(CreateFranchiseUseCaseImpl {
            gateway: gateway.clone(),
            logger: logger.clone(),
        });
        let get_by_id_use_case = Arc::new(GetFranchiseByIdUseCaseImpl {
            gateway: gateway.clone(),
            logger: logger.clone(),
        });
        let add_branch_use_case = Arc::new(AddBranchUseCaseImpl {
            gateway: gateway.clone(),
            logger: logger.clone(),
        });
        let add_product_use_case = Arc::new(AddProductUseCaseImpl {
            gateway: gateway.clone(),
            logger: logger.clone(),
        });
        let remove_product_use_case = Arc::new(RemoveProductUseCaseImpl {
            gateway: gateway.clone(),
            logger: logger.clone(),
        });
        let update_stock_use_case = Arc::new(UpdateStockUseCaseImpl {
            gateway: gateway.clone(),
            logger: logger.clone(),
        });
        let find_max_stock_use_case = Arc::new(FindMaxStockUseCaseImpl {
            gateway: gateway.clone(),
            logger: logger.clone(),
        });
        let update_name_use_case = Arc::new(UpdateFranchiseNameUseCaseImpl {
            gateway: gateway.clone(),
            logger: logger.clone(),
        });
        let update_branch_name_use_case = Arc::new(UpdateBranchNameUseCaseImpl {
            gateway: gateway.clone(),
            logger: logger.clone(),
        });
        let update_product_name_use_case = Arc::new(UpdateProductNameUseCaseImpl {
            gateway,
            logger,
        });

        let franchise_api = crate::api::franchise::routes::FranchiseApi::new(
            create_use_case,
            get_by_id_use_case,
            add_branch_use_case,
            add_product_use_case,
            remove_product_use_case,
            update_stock_use_case,
            find_max_stock_use_case,
            update_name_use_case,
            update_branch_name_use_case,
            update_product_name_use_case,
        );

        Self {
            health_api: crate::api::health::routes::Api::new(),
            franchise_api,
            resilience_api: crate::api::resilience::routes::ResilienceApi::new(resilient),
        }
    }
}
