//! Database migrations for budget approval

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
            Box::new(m20250301_000001_create_position_budget_plans::Migration),
            Box::new(m20250301_000002_create_position_budget_approvals::Migration),
        ]
    }

    fn migration_table_name() -> DynIden {
        Alias::new("budget_approval_migrations").into_iden()
    }
}

mod m20250301_000001_create_position_budget_plans {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000001_create_position_budget_plans"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(PositionBudgetPlans::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(PositionBudgetPlans::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(PositionBudgetPlans::TenantId).uuid().not_null())
                        .col(ColumnDef::new(PositionBudgetPlans::Name).string().not_null())
                        .col(ColumnDef::new(PositionBudgetPlans::FiscalYear).integer().not_null())
                        .col(
                            money(manager, PositionBudgetPlans::TotalAmount)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PositionBudgetPlans::Status)
                                .string_len(20)
                                .not_null()
                                .default("draft"),
                        )
                        .col(ColumnDef::new(PositionBudgetPlans::CreatedBy).uuid().not_null())
                        .col(
                            ColumnDef::new(PositionBudgetPlans::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(PositionBudgetPlans::UpdatedAt)
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
                        .name("idx_position_budget_plans_tenant_id")
                        .table(PositionBudgetPlans::Table)
                        .col(PositionBudgetPlans::TenantId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(PositionBudgetPlans::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum PositionBudgetPlans {
        Table,
        Id,
        TenantId,
        Name,
        FiscalYear,
        TotalAmount,
        Status,
        CreatedBy,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250301_000002_create_position_budget_approvals {
    use super::m20250301_000001_create_position_budget_plans::PositionBudgetPlans;
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000002_create_position_budget_approvals"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(PositionBudgetApprovals::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PositionBudgetApprovals::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(PositionBudgetApprovals::TenantId).uuid().not_null())
                        .col(ColumnDef::new(PositionBudgetApprovals::PlanId).uuid().not_null())
                        .col(
                            ColumnDef::new(PositionBudgetApprovals::LevelOrder)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PositionBudgetApprovals::LevelName)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PositionBudgetApprovals::Status)
                                .string_len(20)
                                .not_null()
                                .default("pending"),
                        )
                        .col(ColumnDef::new(PositionBudgetApprovals::ApproverId).uuid())
                        .col(ColumnDef::new(PositionBudgetApprovals::SubmittedAt).timestamp_with_time_zone())
                        .col(ColumnDef::new(PositionBudgetApprovals::DecidedAt).timestamp_with_time_zone())
                        .col(ColumnDef::new(PositionBudgetApprovals::Comments).text())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_position_budget_approvals_plan")
                                .from(PositionBudgetApprovals::Table, PositionBudgetApprovals::PlanId)
                                .to(PositionBudgetPlans::Table, PositionBudgetPlans::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            // One row per position in a plan's chain
            manager
                .create_index(
                    Index::create()
                        .name("uq_position_budget_approvals_plan_order")
                        .table(PositionBudgetApprovals::Table)
                        .col(PositionBudgetApprovals::PlanId)
                        .col(PositionBudgetApprovals::LevelOrder)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_position_budget_approvals_approver")
                        .table(PositionBudgetApprovals::Table)
                        .col(PositionBudgetApprovals::TenantId)
                        .col(PositionBudgetApprovals::ApproverId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(PositionBudgetApprovals::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum PositionBudgetApprovals {
        Table,
        Id,
        TenantId,
        PlanId,
        LevelOrder,
        LevelName,
        Status,
        ApproverId,
        SubmittedAt,
        DecidedAt,
        Comments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_names_are_unique() {
        let names: Vec<String> = Migrator::migrations()
            .iter()
            .map(|m| m.name().to_string())
            .collect();

        let mut unique = names.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), names.len());
        assert!(names.iter().all(|n| n.starts_with("m2025")));
    }
}
