//! SeaORM storage tests against a file-backed SQLite database

mod common;

use common::{date, dec, print_test_header, TestEmployee};
use hcm_core::SecurityContext;
use retro_pay::contract::*;
use chrono::Utc;
use retro_pay::domain::repository::{CalculationRepository, ConfigRepository};
use retro_pay::domain::NoOpEventPublisher;
use retro_pay::infra::storage::entity::pay_entry;
use retro_pay::infra::storage::{SeaOrmCalculationRepository, SeaOrmConfigRepository};
use retro_pay::{Config, RetroPayModule};
use sea_orm::{ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, Set, Statement};
use std::sync::Arc;
use uuid::Uuid;

struct StorageEnv {
    _dir: tempfile::TempDir,
    db: Arc<DatabaseConnection>,
    module: RetroPayModule,
    ctx: SecurityContext,
    pay_group_id: Uuid,
}

async fn setup() -> StorageEnv {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("retro_pay.db").display());
    let db = Arc::new(Database::connect(&url).await.unwrap());

    let module = RetroPayModule::default();
    module.migrate(&db).await.unwrap();
    // Second run finds nothing to apply
    module.migrate(&db).await.unwrap();
    module
        .init(Config::default(), db.clone(), Arc::new(NoOpEventPublisher))
        .unwrap();

    StorageEnv {
        _dir: dir,
        db,
        module,
        ctx: SecurityContext::new(Uuid::new_v4(), Uuid::new_v4()),
        pay_group_id: Uuid::new_v4(),
    }
}

async fn insert_entry(env: &StorageEnv, employee: &TestEmployee, cycle: i32, amount: &str) {
    let period_start = date(2024, 1, 1) + chrono::Duration::days(14 * i64::from(cycle - 1));
    pay_entry::ActiveModel {
        id: Set(Uuid::new_v4()),
        tenant_id: Set(env.ctx.tenant_id),
        pay_group_id: Set(env.pay_group_id),
        employee_id: Set(employee.id),
        employee_first_name: Set(employee.first_name.clone()),
        employee_last_name: Set(employee.last_name.clone()),
        employee_status: Set(employee.status.as_str().to_string()),
        pay_year: Set(2024),
        pay_cycle_number: Set(cycle),
        period_start: Set(period_start),
        period_end: Set(period_start + chrono::Duration::days(13)),
        pay_element: Set("BASE_SALARY".to_string()),
        amount: Set(dec(amount)),
    }
    .insert(&*env.db)
    .await
    .unwrap();
}

fn new_config(env: &StorageEnv) -> NewRetroPayConfig {
    NewRetroPayConfig {
        name: "Storage roundtrip".to_string(),
        pay_group_id: env.pay_group_id,
        effective_start_date: date(2024, 1, 1),
        effective_end_date: date(2024, 2, 29),
        increase: IncreaseSpec {
            increase_type: IncreaseType::Percentage,
            increase_value: dec("10"),
        },
    }
}

#[tokio::test]
async fn test_generate_and_approve_against_sqlite() {
    print_test_header(
        "test_generate_and_approve_against_sqlite",
        &["Migrations, repositories and the service work end to end on SQLite"],
    );

    let env = setup().await;
    let service = env.module.service().unwrap();
    let ada = TestEmployee::new("Ada", "Lovelace");
    let alan = TestEmployee::new("Alan", "Turing").with_status(EmployeeStatus::OnLeave);

    insert_entry(&env, &ada, 1, "1000").await;
    insert_entry(&env, &ada, 2, "1000").await;
    insert_entry(&env, &alan, 1, "2000").await;
    // Outside the effective range
    insert_entry(&env, &ada, 10, "1000").await;

    let config = service.create_config(&env.ctx, new_config(&env)).await.unwrap();
    let fetched = service.get_config(&env.ctx, config.id).await.unwrap();
    assert_eq!(fetched.name, config.name);
    assert_eq!(fetched.status, ConfigStatus::Draft);

    let summary = service.generate(&env.ctx, config.id).await.unwrap();
    assert_eq!(summary.rows_generated, 3);
    assert_eq!(summary.total_adjustment, dec("400"));

    // Regenerating does not duplicate rows
    service.generate(&env.ctx, config.id).await.unwrap();
    let rows = service.list_calculations(&env.ctx, config.id).await.unwrap();
    assert_eq!(rows.len(), 3);

    let grouped = service
        .grouped_calculations(
            &env.ctx,
            config.id,
            CalculationFilter {
                year: Some(2024),
                employee_status: Some(EmployeeStatus::OnLeave),
            },
        )
        .await
        .unwrap();
    assert_eq!(grouped.employees.len(), 1);
    assert_eq!(grouped.employees[0].display_name, "Alan Turing");
    assert_eq!(grouped.total_adjustment, dec("200"));

    let approved = service.approve_config(&env.ctx, config.id).await.unwrap();
    assert_eq!(approved.status, ConfigStatus::Approved);
    assert_eq!(approved.approved_by, Some(env.ctx.user_id));

    let err = service.generate(&env.ctx, config.id).await.unwrap_err();
    assert!(matches!(err, RetroPayError::Conflict { .. }));
}

#[tokio::test]
async fn test_sqlite_queries_are_tenant_scoped() {
    let env = setup().await;
    let service = env.module.service().unwrap();

    let config = service.create_config(&env.ctx, new_config(&env)).await.unwrap();
    let stranger = SecurityContext::new(Uuid::new_v4(), Uuid::new_v4());

    let err = service.get_config(&stranger, config.id).await.unwrap_err();
    assert!(matches!(err, RetroPayError::NotFound { .. }));
    assert!(service.list_configs(&stranger).await.unwrap().is_empty());
    assert_eq!(service.list_configs(&env.ctx).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_native_client_delegates_to_service() {
    let env = setup().await;
    let client = env.module.client().unwrap();
    let ada = TestEmployee::new("Ada", "Lovelace");
    insert_entry(&env, &ada, 1, "500").await;

    let config = client.create_config(&env.ctx, new_config(&env)).await.unwrap();
    let summary = client.generate(&env.ctx, config.id).await.unwrap();
    assert_eq!(summary.total_adjustment, dec("50"));
    assert_eq!(client.list_configs(&env.ctx).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_migrations_are_recorded_once() {
    print_test_header(
        "test_migrations_are_recorded_once",
        &["Repeated migrate calls on one database leave one history row per migration"],
    );

    let env = setup().await;
    env.module.migrate(&env.db).await.unwrap();

    let row = env
        .db
        .query_one(Statement::from_string(
            env.db.get_database_backend(),
            "SELECT COUNT(*) AS applied FROM retro_pay_migrations",
        ))
        .await
        .unwrap()
        .unwrap();
    let applied: i64 = row.try_get("", "applied").unwrap();
    assert_eq!(applied, 3);
}

#[tokio::test]
async fn test_conditional_writes_respect_approval() {
    print_test_header(
        "test_conditional_writes_respect_approval",
        &[
            "A draft-only replace on an approved config writes nothing",
            "A config without calculations cannot be marked approved",
        ],
    );

    let env = setup().await;
    let service = env.module.service().unwrap();
    let configs = SeaOrmConfigRepository::new(env.db.clone());
    let calculations = SeaOrmCalculationRepository::new(env.db.clone());
    let ada = TestEmployee::new("Ada", "Lovelace");
    insert_entry(&env, &ada, 1, "1000").await;

    let empty = service.create_config(&env.ctx, new_config(&env)).await.unwrap();
    let marked = configs
        .mark_approved(env.ctx.tenant_id, empty.id, env.ctx.user_id, Utc::now())
        .await
        .unwrap();
    assert!(marked.is_none());

    let config = service.create_config(&env.ctx, new_config(&env)).await.unwrap();
    service.generate(&env.ctx, config.id).await.unwrap();
    service.approve_config(&env.ctx, config.id).await.unwrap();

    let written = calculations
        .replace_for_config(env.ctx.tenant_id, config.id, &[], true, Utc::now())
        .await
        .unwrap();
    assert!(!written);
    assert_eq!(
        calculations
            .count_by_config(env.ctx.tenant_id, config.id)
            .await
            .unwrap(),
        1
    );
}

#[tokio::test]
async fn test_init_rejects_precision_finer_than_storage() {
    let env = setup().await;
    let module = RetroPayModule::default();
    let cfg = Config {
        currency_precision: 6,
        ..Config::default()
    };

    let result = module.init(cfg, env.db.clone(), Arc::new(NoOpEventPublisher));
    assert!(result.is_err());
    assert!(module.service().is_err());
}
