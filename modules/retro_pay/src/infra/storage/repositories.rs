//! SeaORM repository implementations

use crate::contract::{ConfigStatus, PayPeriodEntry, RetroPayCalculation, RetroPayConfig};
use crate::domain::repository::{CalculationRepository, ConfigRepository, PayHistoryRepository};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    prelude::Expr, sea_query::Query, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use super::entity::{calculation, config, pay_entry};

/// Rows per INSERT statement when writing a calculation set
const INSERT_BATCH_SIZE: usize = 500;

// ===== Config Repository =====

pub struct SeaOrmConfigRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmConfigRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ConfigRepository for SeaOrmConfigRepository {
    async fn create(&self, retro_config: &RetroPayConfig) -> Result<RetroPayConfig> {
        let active: config::ActiveModel = retro_config.into();

        let result = config::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;

        result.try_into()
    }

    async fn find_by_id(&self, tenant_id: Uuid, config_id: Uuid) -> Result<Option<RetroPayConfig>> {
        let result = config::Entity::find_by_id(config_id)
            .filter(config::Column::TenantId.eq(tenant_id))
            .one(&*self.db)
            .await?;

        result.map(TryInto::try_into).transpose()
    }

    async fn list_by_tenant(&self, tenant_id: Uuid) -> Result<Vec<RetroPayConfig>> {
        let results = config::Entity::find()
            .filter(config::Column::TenantId.eq(tenant_id))
            .order_by_desc(config::Column::CreatedAt)
            .order_by_asc(config::Column::Id)
            .all(&*self.db)
            .await?;

        results
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<_>>>()
    }

    async fn mark_approved(
        &self,
        tenant_id: Uuid,
        config_id: Uuid,
        approved_by: Uuid,
        approved_at: DateTime<Utc>,
    ) -> Result<Option<RetroPayConfig>> {
        let has_calculations = Query::select()
            .column(calculation::Column::ConfigId)
            .from(calculation::Entity)
            .and_where(calculation::Column::TenantId.eq(tenant_id))
            .and_where(calculation::Column::ConfigId.eq(config_id))
            .to_owned();

        // Conditional on still being a draft with a calculation set, so two
        // approvers cannot both win and an emptied set is never approved.
        let result = config::Entity::update_many()
            .col_expr(config::Column::Status, Expr::value(ConfigStatus::Approved.as_str()))
            .col_expr(config::Column::ApprovedBy, Expr::value(approved_by))
            .col_expr(config::Column::ApprovedAt, Expr::value(approved_at))
            .col_expr(config::Column::UpdatedAt, Expr::value(approved_at))
            .filter(config::Column::Id.eq(config_id))
            .filter(config::Column::TenantId.eq(tenant_id))
            .filter(config::Column::Status.eq(ConfigStatus::Draft.as_str()))
            .filter(config::Column::Id.in_subquery(has_calculations))
            .exec(&*self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.find_by_id(tenant_id, config_id).await
    }
}

// ===== Pay History Repository =====

pub struct SeaOrmPayHistoryRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmPayHistoryRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PayHistoryRepository for SeaOrmPayHistoryRepository {
    async fn find_overlapping(
        &self,
        tenant_id: Uuid,
        pay_group_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PayPeriodEntry>> {
        let results = pay_entry::Entity::find()
            .filter(pay_entry::Column::TenantId.eq(tenant_id))
            .filter(pay_entry::Column::PayGroupId.eq(pay_group_id))
            .filter(pay_entry::Column::PeriodStart.lte(end))
            .filter(pay_entry::Column::PeriodEnd.gte(start))
            .order_by_asc(pay_entry::Column::EmployeeId)
            .order_by_asc(pay_entry::Column::PayYear)
            .order_by_asc(pay_entry::Column::PayCycleNumber)
            .order_by_asc(pay_entry::Column::PayElement)
            .all(&*self.db)
            .await?;

        results
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<_>>>()
    }
}

// ===== Calculation Repository =====

pub struct SeaOrmCalculationRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmCalculationRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CalculationRepository for SeaOrmCalculationRepository {
    async fn replace_for_config(
        &self,
        tenant_id: Uuid,
        config_id: Uuid,
        rows: &[RetroPayCalculation],
        draft_only: bool,
        generated_at: DateTime<Utc>,
    ) -> Result<bool> {
        let txn = self.db.begin().await?;

        // Touching the config row first serializes against a concurrent approval.
        let mut touch = config::Entity::update_many()
            .col_expr(config::Column::UpdatedAt, Expr::value(generated_at))
            .filter(config::Column::Id.eq(config_id))
            .filter(config::Column::TenantId.eq(tenant_id));
        if draft_only {
            touch = touch.filter(config::Column::Status.eq(ConfigStatus::Draft.as_str()));
        }
        if touch.exec(&txn).await?.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(false);
        }

        calculation::Entity::delete_many()
            .filter(calculation::Column::TenantId.eq(tenant_id))
            .filter(calculation::Column::ConfigId.eq(config_id))
            .exec(&txn)
            .await?;

        for batch in rows.chunks(INSERT_BATCH_SIZE) {
            let models: Vec<calculation::ActiveModel> = batch.iter().map(Into::into).collect();
            calculation::Entity::insert_many(models).exec(&txn).await?;
        }

        txn.commit().await?;
        Ok(true)
    }

    async fn find_by_config(
        &self,
        tenant_id: Uuid,
        config_id: Uuid,
    ) -> Result<Vec<RetroPayCalculation>> {
        let results = calculation::Entity::find()
            .filter(calculation::Column::TenantId.eq(tenant_id))
            .filter(calculation::Column::ConfigId.eq(config_id))
            .order_by_asc(calculation::Column::EmployeeId)
            .order_by_asc(calculation::Column::PayYear)
            .order_by_asc(calculation::Column::PayCycleNumber)
            .order_by_asc(calculation::Column::PayElement)
            .all(&*self.db)
            .await?;

        results
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<_>>>()
    }

    async fn count_by_config(&self, tenant_id: Uuid, config_id: Uuid) -> Result<u64> {
        let count = calculation::Entity::find()
            .filter(calculation::Column::TenantId.eq(tenant_id))
            .filter(calculation::Column::ConfigId.eq(config_id))
            .count(&*self.db)
            .await?;

        Ok(count)
    }
}
