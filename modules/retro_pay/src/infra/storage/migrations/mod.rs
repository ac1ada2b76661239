//! Database migrations for the retroactive pay engine

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DatabaseBackend;

/// Money column: NUMERIC(19,4), or NUMERIC(16,4) on SQLite which caps precision at 16
fn money<T: IntoIden>(manager: &SchemaManager, column: T) -> ColumnDef {
    let mut def = ColumnDef::new(column);
    match manager.get_database_backend() {
        DatabaseBackend::Sqlite => def.decimal_len(16, 4),
        _ => def.decimal_len(19, 4),
    };
    def
}

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_retro_pay_configs::Migration),
            Box::new(m20250301_000002_create_pay_period_entries::Migration),
            Box::new(m20250301_000003_create_retro_pay_calculations::Migration),
        ]
    }

    // Each module keeps its own history table so migrators do not see each other's rows.
    fn migration_table_name() -> DynIden {
        Alias::new("retro_pay_migrations").into_iden()
    }
}

mod m20250301_000001_create_retro_pay_configs {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000001_create_retro_pay_configs"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(RetroPayConfigs::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(RetroPayConfigs::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(RetroPayConfigs::TenantId).uuid().not_null())
                        .col(ColumnDef::new(RetroPayConfigs::Name).string().not_null())
                        .col(ColumnDef::new(RetroPayConfigs::PayGroupId).uuid().not_null())
                        .col(ColumnDef::new(RetroPayConfigs::EffectiveStartDate).date().not_null())
                        .col(ColumnDef::new(RetroPayConfigs::EffectiveEndDate).date().not_null())
                        .col(ColumnDef::new(RetroPayConfigs::IncreaseType).string_len(20).not_null())
                        .col(
                            money(manager, RetroPayConfigs::IncreaseValue)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(RetroPayConfigs::Status)
                                .string_len(20)
                                .not_null()
                                .default("draft"),
                        )
                        .col(ColumnDef::new(RetroPayConfigs::CreatedBy).uuid().not_null())
                        .col(ColumnDef::new(RetroPayConfigs::ApprovedBy).uuid())
                        .col(ColumnDef::new(RetroPayConfigs::ApprovedAt).timestamp_with_time_zone())
                        .col(
                            ColumnDef::new(RetroPayConfigs::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(RetroPayConfigs::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_retro_pay_configs_tenant_id")
                        .table(RetroPayConfigs::Table)
                        .col(RetroPayConfigs::TenantId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(RetroPayConfigs::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum RetroPayConfigs {
        Table,
        Id,
        TenantId,
        Name,
        PayGroupId,
        EffectiveStartDate,
        EffectiveEndDate,
        IncreaseType,
        IncreaseValue,
        Status,
        CreatedBy,
        ApprovedBy,
        ApprovedAt,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250301_000002_create_pay_period_entries {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000002_create_pay_period_entries"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(PayPeriodEntries::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(PayPeriodEntries::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(PayPeriodEntries::TenantId).uuid().not_null())
                        .col(ColumnDef::new(PayPeriodEntries::PayGroupId).uuid().not_null())
                        .col(ColumnDef::new(PayPeriodEntries::EmployeeId).uuid().not_null())
                        .col(ColumnDef::new(PayPeriodEntries::EmployeeFirstName).string())
                        .col(ColumnDef::new(PayPeriodEntries::EmployeeLastName).string())
                        .col(
                            ColumnDef::new(PayPeriodEntries::EmployeeStatus)
                                .string_len(20)
                                .not_null(),
                        )
                        .col(ColumnDef::new(PayPeriodEntries::PayYear).integer().not_null())
                        .col(ColumnDef::new(PayPeriodEntries::PayCycleNumber).integer().not_null())
                        .col(ColumnDef::new(PayPeriodEntries::PeriodStart).date().not_null())
                        .col(ColumnDef::new(PayPeriodEntries::PeriodEnd).date().not_null())
                        .col(ColumnDef::new(PayPeriodEntries::PayElement).string().not_null())
                        .col(
                            money(manager, PayPeriodEntries::Amount)
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_pay_period_entries_group_period")
                        .table(PayPeriodEntries::Table)
                        .col(PayPeriodEntries::TenantId)
                        .col(PayPeriodEntries::PayGroupId)
                        .col(PayPeriodEntries::PeriodStart)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(PayPeriodEntries::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum PayPeriodEntries {
        Table,
        Id,
        TenantId,
        PayGroupId,
        EmployeeId,
        EmployeeFirstName,
        EmployeeLastName,
        EmployeeStatus,
        PayYear,
        PayCycleNumber,
        PeriodStart,
        PeriodEnd,
        PayElement,
        Amount,
    }
}

mod m20250301_000003_create_retro_pay_calculations {
    use super::m20250301_000001_create_retro_pay_configs::RetroPayConfigs;
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000003_create_retro_pay_calculations"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(RetroPayCalculations::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(RetroPayCalculations::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(RetroPayCalculations::TenantId).uuid().not_null())
                        .col(ColumnDef::new(RetroPayCalculations::ConfigId).uuid().not_null())
                        .col(ColumnDef::new(RetroPayCalculations::EmployeeId).uuid().not_null())
                        .col(ColumnDef::new(RetroPayCalculations::EmployeeFirstName).string())
                        .col(ColumnDef::new(RetroPayCalculations::EmployeeLastName).string())
                        .col(
                            ColumnDef::new(RetroPayCalculations::EmployeeStatus)
                                .string_len(20)
                                .not_null(),
                        )
                        .col(ColumnDef::new(RetroPayCalculations::PayYear).integer().not_null())
                        .col(
                            ColumnDef::new(RetroPayCalculations::PayCycleNumber)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(RetroPayCalculations::PayElement).string().not_null())
                        .col(
                            money(manager, RetroPayCalculations::OriginalAmount)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(RetroPayCalculations::IncreaseType)
                                .string_len(20)
                                .not_null(),
                        )
                        .col(
                            money(manager, RetroPayCalculations::IncreaseValue)
                                .not_null(),
                        )
                        .col(
                            money(manager, RetroPayCalculations::AdjustmentAmount)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(RetroPayCalculations::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_retro_pay_calculations_config")
                                .from(RetroPayCalculations::Table, RetroPayCalculations::ConfigId)
                                .to(RetroPayConfigs::Table, RetroPayConfigs::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_retro_pay_calculations_config_id")
                        .table(RetroPayCalculations::Table)
                        .col(RetroPayCalculations::ConfigId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_retro_pay_calculations_employee_id")
                        .table(RetroPayCalculations::Table)
                        .col(RetroPayCalculations::EmployeeId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(RetroPayCalculations::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum RetroPayCalculations {
        Table,
        Id,
        TenantId,
        ConfigId,
        EmployeeId,
        EmployeeFirstName,
        EmployeeLastName,
        EmployeeStatus,
        PayYear,
        PayCycleNumber,
        PayElement,
        OriginalAmount,
        IncreaseType,
        IncreaseValue,
        AdjustmentAmount,
        CreatedAt,
    }
}
