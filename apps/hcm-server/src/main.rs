use anyhow::{Context, Result};
use axum::{routing::get, Router};
use budget_approval::BudgetApprovalModule;
use clap::Parser;
use retro_pay::RetroPayModule;
use sea_orm::Database;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod config;

use config::{AppConfig, LogFormat, LoggingConfig};

/// HCM compensation workflows server
#[derive(Parser, Debug)]
#[command(name = "hcm-server", version, about)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "config/hcm.yaml")]
    config: PathBuf,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    print_config: bool,
}

fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&logging.level)
            .with_context(|| format!("invalid log filter '{}'", logging.level))?,
    };

    let registry = tracing_subscriber::registry().with(filter);
    match logging.format {
        LogFormat::Json => registry.with(fmt::layer().json()).try_init()?,
        LogFormat::Text => registry.with(fmt::layer()).try_init()?,
    }
    Ok(())
}

fn build_router(retro_pay: &RetroPayModule, budget_approval: &BudgetApprovalModule) -> Result<Router> {
    let retro_pay_routes = retro_pay.register_rest(Router::new())?;
    let budget_routes = budget_approval.register_rest(Router::new())?;

    Ok(Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest("/retro-pay", retro_pay_routes)
        .nest("/budget-approval", budget_routes)
        .layer(TraceLayer::new_for_http()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let app_config = AppConfig::load(&cli.config)?;

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&app_config)?);
        return Ok(());
    }

    init_tracing(&app_config.logging)?;
    info!(config = %cli.config.display(), "starting hcm-server");

    let db = Arc::new(
        Database::connect(&app_config.database.url)
            .await
            .context("failed to connect to database")?,
    );

    let retro_pay = RetroPayModule::default();
    let budget_approval = BudgetApprovalModule::default();

    if app_config.database.run_migrations {
        retro_pay.migrate(&db).await?;
        budget_approval.migrate(&db).await?;
        info!("migrations applied");
    }

    retro_pay.init(
        app_config.modules.retro_pay.clone(),
        db.clone(),
        Arc::new(retro_pay::domain::TracingEventPublisher),
    )?;
    budget_approval.init(
        app_config.modules.budget_approval.clone(),
        db.clone(),
        Arc::new(budget_approval::domain::TracingEventPublisher),
    )?;

    let app = build_router(&retro_pay, &budget_approval)?;

    let listener = TcpListener::bind(&app_config.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", app_config.server.bind_addr))?;
    info!(addr = %app_config.server.bind_addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}
