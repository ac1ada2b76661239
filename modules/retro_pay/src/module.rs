//! Module declaration and lifecycle

use crate::api::native::NativeClient;
use crate::config::Config;
use crate::contract::RetroPayApi;
use crate::domain::{EventPublisher, Service};
use crate::infra::storage::{
    migrations::Migrator, SeaOrmCalculationRepository, SeaOrmConfigRepository,
    SeaOrmPayHistoryRepository,
};
use anyhow::Result;
use parking_lot::RwLock;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;

/// Retroactive pay module
pub struct RetroPayModule {
    config: RwLock<Config>,
    service: RwLock<Option<Arc<Service>>>,
}

impl Default for RetroPayModule {
    fn default() -> Self {
        Self {
            config: RwLock::new(Config::default()),
            service: RwLock::new(None),
        }
    }
}

impl RetroPayModule {
    /// Build repositories and the domain service on top of `db`
    pub fn init(
        &self,
        cfg: Config,
        db: Arc<DatabaseConnection>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Result<()> {
        cfg.validate()?;

        let config_repo = Arc::new(SeaOrmConfigRepository::new(db.clone()));
        let history_repo = Arc::new(SeaOrmPayHistoryRepository::new(db.clone()));
        let calculation_repo = Arc::new(SeaOrmCalculationRepository::new(db));

        let service = Arc::new(Service::new(
            config_repo,
            history_repo,
            calculation_repo,
            event_publisher,
            cfg.clone(),
        ));

        *self.config.write() = cfg;
        *self.service.write() = Some(service);

        tracing::info!("Retro pay module initialized");
        Ok(())
    }

    /// Apply pending schema migrations
    pub async fn migrate(&self, db: &DatabaseConnection) -> Result<()> {
        Migrator::up(db, None).await?;
        tracing::info!("Retro pay migrations completed");
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
            .ok_or_else(|| anyhow::anyhow!("Retro pay service not initialized"))
    }

    /// In-process client for other modules
    pub fn client(&self) -> Result<Arc<dyn RetroPayApi>> {
        Ok(Arc::new(NativeClient::new(self.service()?)))
    }

    /// Mount the REST routes on `router`
    pub fn register_rest(&self, router: axum::Router) -> Result<axum::Router> {
        let service = self.service()?;
        tracing::info!("Registering retro pay REST routes");
        crate::api::rest::routes::register_routes(router, service)
    }
}
