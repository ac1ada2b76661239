//! Module declaration and lifecycle

use crate::api::native::NativeClient;
use crate::config::Config;
use crate::contract::BudgetApprovalApi;
use crate::domain::{EventPublisher, Service};
use crate::infra::storage::{migrations::Migrator, SeaOrmLevelRepository, SeaOrmPlanRepository};
use anyhow::Result;
use parking_lot::RwLock;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;

/// Budget approval module
pub struct BudgetApprovalModule {
    config: RwLock<Config>,
    service: RwLock<Option<Arc<Service>>>,
}

impl Default for BudgetApprovalModule {
    fn default() -> Self {
        Self {
            config: RwLock::new(Config::default()),
            service: RwLock::new(None),
        }
    }
}

impl BudgetApprovalModule {
    /// Build repositories and the domain service on top of `db`
    pub fn init(
        &self,
        cfg: Config,
        db: Arc<DatabaseConnection>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Result<()> {
        if cfg.max_levels == 0 {
            anyhow::bail!("budget_approval.max_levels must be at least 1");
        }

        let plan_repo = Arc::new(SeaOrmPlanRepository::new(db.clone()));
        let level_repo = Arc::new(SeaOrmLevelRepository::new(db));

        let service = Arc::new(Service::new(
            plan_repo,
            level_repo,
            event_publisher,
            cfg.clone(),
        ));

        *self.config.write() = cfg;
        *self.service.write() = Some(service);

        tracing::info!("Budget approval module initialized");
        Ok(())
    }

    /// Apply pending schema migrations
    pub async fn migrate(&self, db: &DatabaseConnection) -> Result<()> {
        Migrator::up(db, None).await?;
        tracing::info!("Budget approval migrations completed");
        Ok(())
    }

    pub fn config(&self) -> Config {
        self.config.read().clone()
    }

    pub fn service(&self) -> Result<Arc<Service>> {
        self.service
            .read()
            .as_ref()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Budget approval service not initialized"))
    }

    /// In-process client for other modules
    pub fn client(&self) -> Result<Arc<dyn BudgetApprovalApi>> {
        Ok(Arc::new(NativeClient::new(self.service()?)))
    }

    /// Mount the REST routes on `router`
    pub fn register_rest(&self, router: axum::Router) -> Result<axum::Router> {
        let service = self.service()?;
        tracing::info!("Registering budget approval REST routes");
        crate::api::rest::routes::register_routes(router, service)
    }
}
