//! Shared fixtures and in-memory repositories for budget approval tests

#![allow(dead_code)]

use async_trait::async_trait;
use budget_approval::contract::*;
use budget_approval::domain::repository::{LevelRepository, PlanRepository};
use budget_approval::domain::workflow::apply_transition;
use budget_approval::domain::{BudgetApprovalEvent, EventPublisher, Service};
use budget_approval::Config;
use chrono::{DateTime, Utc};
use hcm_core::SecurityContext;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use uuid::Uuid;

pub fn print_test_header(test_name: &str, purpose: &[&str]) {
    println!("\n🧪 TEST: {}", test_name);
    if let Some(first) = purpose.first() {
        println!("📋 PURPOSE: {}", first);
    }
    for line in purpose.iter().skip(1) {
        println!("   {}", line);
    }
}

/// One-line view of a chain, e.g. `1:approved* 2:pending* 3:pending`
pub fn print_chain(label: &str, levels: &[ApprovalLevel]) {
    let chain: Vec<String> = levels
        .iter()
        .map(|l| {
            format!(
                "{}:{}{}",
                l.level_order,
                l.status.as_str(),
                if l.submitted_at.is_some() { "*" } else { "" }
            )
        })
        .collect();
    println!("   {}: {}", label, chain.join(" "));
}

// ===== Mock store =====

/// Plans and levels behind one lock pair so a transition commits as a unit
#[derive(Default)]
pub struct MockStore {
    plans: RwLock<HashMap<Uuid, BudgetPlan>>,
    levels: RwLock<HashMap<Uuid, ApprovalLevel>>,
    fail_commits: AtomicBool,
}

impl MockStore {
    pub fn plan(&self, plan_id: Uuid) -> Option<BudgetPlan> {
        self.plans.read().get(&plan_id).cloned()
    }

    pub fn chain(&self, plan_id: Uuid) -> Vec<ApprovalLevel> {
        let mut levels: Vec<ApprovalLevel> = self
            .levels
            .read()
            .values()
            .filter(|l| l.plan_id == plan_id)
            .cloned()
            .collect();
        levels.sort_by_key(|l| l.level_order);
        levels
    }

    pub fn fail_commits(&self, fail: bool) {
        self.fail_commits.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl PlanRepository for MockStore {
    async fn create_with_levels(&self, plan: &BudgetPlan, levels: &[ApprovalLevel]) -> anyhow::Result<()> {
        self.plans.write().insert(plan.id, plan.clone());
        let mut stored = self.levels.write();
        for level in levels {
            stored.insert(level.id, level.clone());
        }
        Ok(())
    }

    async fn find_by_id(&self, tenant_id: Uuid, plan_id: Uuid) -> anyhow::Result<Option<BudgetPlan>> {
        Ok(self
            .plans
            .read()
            .get(&plan_id)
            .filter(|p| p.tenant_id == tenant_id)
            .cloned())
    }

    async fn list_by_tenant(&self, tenant_id: Uuid) -> anyhow::Result<Vec<BudgetPlan>> {
        let mut plans: Vec<BudgetPlan> = self
            .plans
            .read()
            .values()
            .filter(|p| p.tenant_id == tenant_id)
            .cloned()
            .collect();
        plans.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(plans)
    }

    async fn submit(
        &self,
        tenant_id: Uuid,
        plan_id: Uuid,
        first_level_id: Uuid,
        submitted_at: DateTime<Utc>,
    ) -> anyhow::Result<bool> {
        let mut plans = self.plans.write();
        let mut levels = self.levels.write();
        match plans.get_mut(&plan_id) {
            Some(p) if p.tenant_id == tenant_id && p.status == PlanStatus::Draft => {
                let first = levels
                    .get_mut(&first_level_id)
                    .ok_or_else(|| anyhow::anyhow!("first level missing"))?;
                first.submitted_at = Some(submitted_at);
                p.status = PlanStatus::Pending;
                p.updated_at = submitted_at;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl LevelRepository for MockStore {
    async fn find_by_id(&self, tenant_id: Uuid, level_id: Uuid) -> anyhow::Result<Option<ApprovalLevel>> {
        Ok(self
            .levels
            .read()
            .get(&level_id)
            .filter(|l| l.tenant_id == tenant_id)
            .cloned())
    }

    async fn list_by_plan(&self, tenant_id: Uuid, plan_id: Uuid) -> anyhow::Result<Vec<ApprovalLevel>> {
        Ok(self
            .chain(plan_id)
            .into_iter()
            .filter(|l| l.tenant_id == tenant_id)
            .collect())
    }

    async fn find_pending_for(
        &self,
        tenant_id: Uuid,
        approver_id: Uuid,
        include_unassigned: bool,
    ) -> anyhow::Result<Vec<ApprovalLevel>> {
        let plans = self.plans.read();
        let mut levels: Vec<ApprovalLevel> = self
            .levels
            .read()
            .values()
            .filter(|l| l.tenant_id == tenant_id && l.is_active())
            .filter(|l| match l.approver_id {
                Some(id) => id == approver_id,
                None => include_unassigned,
            })
            .filter(|l| {
                plans
                    .get(&l.plan_id)
                    .is_some_and(|p| p.status == PlanStatus::Pending)
            })
            .cloned()
            .collect();
        levels.sort_by_key(|l| (l.submitted_at, l.id));
        Ok(levels)
    }

    async fn commit_transition(&self, tenant_id: Uuid, transition: &Transition) -> anyhow::Result<bool> {
        if self.fail_commits.load(Ordering::SeqCst) {
            anyhow::bail!("simulated storage outage");
        }

        let mut plans = self.plans.write();
        let mut levels = self.levels.write();

        let still_active = levels
            .get(&transition.level_update.level_id)
            .is_some_and(|l| l.tenant_id == tenant_id && l.is_active());
        let plan_pending = plans
            .get(&transition.plan_id)
            .is_some_and(|p| p.status == PlanStatus::Pending);
        if !still_active || !plan_pending {
            return Ok(false);
        }

        let mut chain: Vec<ApprovalLevel> = levels
            .values()
            .filter(|l| l.plan_id == transition.plan_id)
            .cloned()
            .collect();
        apply_transition(&mut chain, transition);
        for level in chain {
            levels.insert(level.id, level);
        }

        if let Some(plan) = plans.get_mut(&transition.plan_id) {
            plan.updated_at = transition.level_update.decided_at;
            if let Some(status) = transition.plan_status {
                plan.status = status;
            }
        }
        Ok(true)
    }
}

#[derive(Default)]
pub struct RecordingPublisher {
    events: RwLock<Vec<BudgetApprovalEvent>>,
}

impl RecordingPublisher {
    pub fn events(&self) -> Vec<BudgetApprovalEvent> {
        self.events.read().clone()
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, event: BudgetApprovalEvent) -> anyhow::Result<()> {
        self.events.write().push(event);
        Ok(())
    }
}

// ===== Test environment =====

pub struct TestEnv {
    pub service: Arc<Service>,
    pub store: Arc<MockStore>,
    pub events: Arc<RecordingPublisher>,
    /// Plan creator
    pub creator: SecurityContext,
    pub tenant_id: Uuid,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(settings: Config) -> Self {
        let store = Arc::new(MockStore::default());
        let events = Arc::new(RecordingPublisher::default());
        let service = Arc::new(Service::new(
            store.clone(),
            store.clone(),
            events.clone(),
            settings,
        ));
        let tenant_id = Uuid::new_v4();

        Self {
            service,
            store,
            events,
            creator: SecurityContext::new(Uuid::new_v4(), tenant_id),
            tenant_id,
        }
    }

    /// Fresh user in the same tenant
    pub fn user(&self) -> SecurityContext {
        SecurityContext::new(Uuid::new_v4(), self.tenant_id)
    }

    pub fn new_plan(&self, approvers: &[Option<Uuid>]) -> NewBudgetPlan {
        NewBudgetPlan {
            name: "FY2025 engineering headcount".to_string(),
            fiscal_year: 2025,
            total_amount: Decimal::new(1_250_000, 0),
            levels: approvers
                .iter()
                .enumerate()
                .map(|(i, approver_id)| NewApprovalLevel {
                    level_name: format!("Level {}", i + 1),
                    approver_id: *approver_id,
                })
                .collect(),
        }
    }

    /// Submitted plan whose levels are assigned to the given approvers
    pub async fn submitted_plan(&self, approvers: &[&SecurityContext]) -> PlanWithLevels {
        let assigned: Vec<Option<Uuid>> = approvers.iter().map(|a| Some(a.user_id)).collect();
        let created = self
            .service
            .create_plan(&self.creator, self.new_plan(&assigned))
            .await
            .expect("Failed to create plan");
        self.service
            .submit_plan(&self.creator, created.plan.id)
            .await
            .expect("Failed to submit plan")
    }
}
