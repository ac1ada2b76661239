//! SeaORM repository implementations

use crate::contract::{ApprovalLevel, BudgetPlan, LevelStatus, PlanStatus, Transition};
use crate::domain::repository::{LevelRepository, PlanRepository};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    prelude::Expr, sea_query::Query, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use super::entity::{level, plan};

// ===== Plan Repository =====

pub struct SeaOrmPlanRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmPlanRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PlanRepository for SeaOrmPlanRepository {
    async fn create_with_levels(&self, budget_plan: &BudgetPlan, levels: &[ApprovalLevel]) -> Result<()> {
        let txn = self.db.begin().await?;

        let active: plan::ActiveModel = budget_plan.into();
        plan::Entity::insert(active).exec(&txn).await?;

        if !levels.is_empty() {
            let models: Vec<level::ActiveModel> = levels.iter().map(Into::into).collect();
            level::Entity::insert_many(models).exec(&txn).await?;
        }

        txn.commit().await?;
        Ok(())
    }

    async fn find_by_id(&self, tenant_id: Uuid, plan_id: Uuid) -> Result<Option<BudgetPlan>> {
        let result = plan::Entity::find_by_id(plan_id)
            .filter(plan::Column::TenantId.eq(tenant_id))
            .one(&*self.db)
            .await?;

        result.map(TryInto::try_into).transpose()
    }

    async fn list_by_tenant(&self, tenant_id: Uuid) -> Result<Vec<BudgetPlan>> {
        let results = plan::Entity::find()
            .filter(plan::Column::TenantId.eq(tenant_id))
            .order_by_desc(plan::Column::CreatedAt)
            .order_by_asc(plan::Column::Id)
            .all(&*self.db)
            .await?;

        results
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<_>>>()
    }

    async fn submit(
        &self,
        tenant_id: Uuid,
        plan_id: Uuid,
        first_level_id: Uuid,
        submitted_at: DateTime<Utc>,
    ) -> Result<bool> {
        let txn = self.db.begin().await?;

        let moved = plan::Entity::update_many()
            .col_expr(plan::Column::Status, Expr::value(PlanStatus::Pending.as_str()))
            .col_expr(plan::Column::UpdatedAt, Expr::value(submitted_at))
            .filter(plan::Column::Id.eq(plan_id))
            .filter(plan::Column::TenantId.eq(tenant_id))
            .filter(plan::Column::Status.eq(PlanStatus::Draft.as_str()))
            .exec(&txn)
            .await?;
        if moved.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(false);
        }

        let stamped = level::Entity::update_many()
            .col_expr(level::Column::SubmittedAt, Expr::value(submitted_at))
            .filter(level::Column::Id.eq(first_level_id))
            .filter(level::Column::TenantId.eq(tenant_id))
            .filter(level::Column::PlanId.eq(plan_id))
            .filter(level::Column::SubmittedAt.is_null())
            .exec(&txn)
            .await?;
        if stamped.rows_affected == 0 {
            txn.rollback().await?;
            anyhow::bail!("first approval level {} of plan {} is missing", first_level_id, plan_id);
        }

        txn.commit().await?;
        Ok(true)
    }
}

// ===== Level Repository =====

pub struct SeaOrmLevelRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmLevelRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LevelRepository for SeaOrmLevelRepository {
    async fn find_by_id(&self, tenant_id: Uuid, level_id: Uuid) -> Result<Option<ApprovalLevel>> {
        let result = level::Entity::find_by_id(level_id)
            .filter(level::Column::TenantId.eq(tenant_id))
            .one(&*self.db)
            .await?;

        result.map(TryInto::try_into).transpose()
    }

    async fn list_by_plan(&self, tenant_id: Uuid, plan_id: Uuid) -> Result<Vec<ApprovalLevel>> {
        let results = level::Entity::find()
            .filter(level::Column::TenantId.eq(tenant_id))
            .filter(level::Column::PlanId.eq(plan_id))
            .order_by_asc(level::Column::LevelOrder)
            .all(&*self.db)
            .await?;

        results
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<_>>>()
    }

    async fn find_pending_for(
        &self,
        tenant_id: Uuid,
        approver_id: Uuid,
        include_unassigned: bool,
    ) -> Result<Vec<ApprovalLevel>> {
        let pending_plans = Query::select()
            .column(plan::Column::Id)
            .from(plan::Entity)
            .and_where(plan::Column::TenantId.eq(tenant_id))
            .and_where(plan::Column::Status.eq(PlanStatus::Pending.as_str()))
            .to_owned();

        let mut assigned = Condition::any().add(level::Column::ApproverId.eq(approver_id));
        if include_unassigned {
            assigned = assigned.add(level::Column::ApproverId.is_null());
        }

        let results = level::Entity::find()
            .filter(level::Column::TenantId.eq(tenant_id))
            .filter(level::Column::Status.eq(LevelStatus::Pending.as_str()))
            .filter(level::Column::SubmittedAt.is_not_null())
            .filter(level::Column::DecidedAt.is_null())
            .filter(assigned)
            .filter(level::Column::PlanId.in_subquery(pending_plans))
            .order_by_asc(level::Column::SubmittedAt)
            .order_by_asc(level::Column::Id)
            .all(&*self.db)
            .await?;

        results
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<_>>>()
    }

    async fn commit_transition(&self, tenant_id: Uuid, transition: &Transition) -> Result<bool> {
        let decision = &transition.level_update;
        let txn = self.db.begin().await?;

        // Only the undecided active level may be written; losing a race affects zero rows.
        let decided = level::Entity::update_many()
            .col_expr(level::Column::Status, Expr::value(decision.status.as_str()))
            .col_expr(level::Column::DecidedAt, Expr::value(decision.decided_at))
            .col_expr(level::Column::Comments, Expr::value(decision.comments.clone()))
            .filter(level::Column::Id.eq(decision.level_id))
            .filter(level::Column::TenantId.eq(tenant_id))
            .filter(level::Column::PlanId.eq(transition.plan_id))
            .filter(level::Column::Status.eq(LevelStatus::Pending.as_str()))
            .filter(level::Column::SubmittedAt.is_not_null())
            .filter(level::Column::DecidedAt.is_null())
            .exec(&txn)
            .await?;
        if decided.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(false);
        }

        if let Some(next) = &transition.next_level {
            let activated = level::Entity::update_many()
                .col_expr(level::Column::SubmittedAt, Expr::value(next.submitted_at))
                .filter(level::Column::Id.eq(next.level_id))
                .filter(level::Column::TenantId.eq(tenant_id))
                .filter(level::Column::PlanId.eq(transition.plan_id))
                .filter(level::Column::SubmittedAt.is_null())
                .exec(&txn)
                .await?;
            if activated.rows_affected == 0 {
                txn.rollback().await?;
                anyhow::bail!(
                    "level {} of plan {} could not be activated",
                    next.level_id,
                    transition.plan_id
                );
            }
        }

        let mut plan_update = plan::Entity::update_many()
            .col_expr(plan::Column::UpdatedAt, Expr::value(decision.decided_at));
        if let Some(status) = transition.plan_status {
            plan_update = plan_update.col_expr(plan::Column::Status, Expr::value(status.as_str()));
        }
        let touched = plan_update
            .filter(plan::Column::Id.eq(transition.plan_id))
            .filter(plan::Column::TenantId.eq(tenant_id))
            .filter(plan::Column::Status.eq(PlanStatus::Pending.as_str()))
            .exec(&txn)
            .await?;
        if touched.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(false);
        }

        txn.commit().await?;
        Ok(true)
    }
}
