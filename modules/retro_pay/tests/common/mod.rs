//! Shared fixtures and in-memory repositories for retro pay tests

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use hcm_core::SecurityContext;
use parking_lot::RwLock;
use retro_pay::contract::*;
use retro_pay::domain::calculation::period_overlaps;
use retro_pay::domain::repository::{CalculationRepository, ConfigRepository, PayHistoryRepository};
use retro_pay::domain::{EventPublisher, RetroPayEvent, Service};
use retro_pay::Config;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;
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

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ===== Mock repositories =====

#[derive(Default)]
pub struct MockConfigRepo {
    data: RwLock<HashMap<Uuid, RetroPayConfig>>,
}

impl MockConfigRepo {
    pub fn get(&self, id: Uuid) -> Option<RetroPayConfig> {
        self.data.read().get(&id).cloned()
    }

    pub fn count(&self) -> usize {
        self.data.read().len()
    }

    /// Approve every draft directly, bypassing the service
    pub fn approve_all_drafts(&self, approved_by: Uuid) -> usize {
        let now = Utc::now();
        let mut approved = 0;
        for config in self.data.write().values_mut() {
            if config.status == ConfigStatus::Draft {
                config.status = ConfigStatus::Approved;
                config.approved_by = Some(approved_by);
                config.approved_at = Some(now);
                approved += 1;
            }
        }
        approved
    }

    fn touch(&self, tenant_id: Uuid, config_id: Uuid, draft_only: bool, at: DateTime<Utc>) -> bool {
        match self.data.write().get_mut(&config_id) {
            Some(c) if c.tenant_id == tenant_id && (!draft_only || c.status == ConfigStatus::Draft) => {
                c.updated_at = at;
                true
            }
            _ => false,
        }
    }
}

#[async_trait]
impl ConfigRepository for MockConfigRepo {
    async fn create(&self, config: &RetroPayConfig) -> anyhow::Result<RetroPayConfig> {
        self.data.write().insert(config.id, config.clone());
        Ok(config.clone())
    }

    async fn find_by_id(
        &self,
        tenant_id: Uuid,
        config_id: Uuid,
    ) -> anyhow::Result<Option<RetroPayConfig>> {
        Ok(self
            .data
            .read()
            .get(&config_id)
            .filter(|c| c.tenant_id == tenant_id)
            .cloned())
    }

    async fn list_by_tenant(&self, tenant_id: Uuid) -> anyhow::Result<Vec<RetroPayConfig>> {
        let mut configs: Vec<RetroPayConfig> = self
            .data
            .read()
            .values()
            .filter(|c| c.tenant_id == tenant_id)
            .cloned()
            .collect();
        configs.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(configs)
    }

    async fn mark_approved(
        &self,
        tenant_id: Uuid,
        config_id: Uuid,
        approved_by: Uuid,
        approved_at: DateTime<Utc>,
    ) -> anyhow::Result<Option<RetroPayConfig>> {
        let mut data = self.data.write();
        match data.get_mut(&config_id) {
            Some(c) if c.tenant_id == tenant_id && c.status == ConfigStatus::Draft => {
                c.status = ConfigStatus::Approved;
                c.approved_by = Some(approved_by);
                c.approved_at = Some(approved_at);
                c.updated_at = approved_at;
                Ok(Some(c.clone()))
            }
            _ => Ok(None),
        }
    }
}

#[derive(Default)]
pub struct MockPayHistoryRepo {
    entries: RwLock<Vec<PayPeriodEntry>>,
}

impl MockPayHistoryRepo {
    pub fn add(&self, entry: PayPeriodEntry) {
        self.entries.write().push(entry);
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

#[async_trait]
impl PayHistoryRepository for MockPayHistoryRepo {
    async fn find_overlapping(
        &self,
        tenant_id: Uuid,
        pay_group_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> anyhow::Result<Vec<PayPeriodEntry>> {
        Ok(self
            .entries
            .read()
            .iter()
            .filter(|e| e.tenant_id == tenant_id && e.pay_group_id == pay_group_id)
            .filter(|e| period_overlaps(e.period_start, e.period_end, start, end))
            .cloned()
            .collect())
    }
}

/// Calculation sets keyed by config; writes consult the config mock for its status
pub struct MockCalculationRepo {
    configs: Arc<MockConfigRepo>,
    data: RwLock<HashMap<Uuid, Vec<RetroPayCalculation>>>,
    fail_writes: AtomicBool,
}

impl MockCalculationRepo {
    pub fn new(configs: Arc<MockConfigRepo>) -> Self {
        Self {
            configs,
            data: RwLock::new(HashMap::new()),
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn rows(&self, config_id: Uuid) -> Vec<RetroPayCalculation> {
        self.data.read().get(&config_id).cloned().unwrap_or_default()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl CalculationRepository for MockCalculationRepo {
    async fn replace_for_config(
        &self,
        tenant_id: Uuid,
        config_id: Uuid,
        rows: &[RetroPayCalculation],
        draft_only: bool,
        generated_at: DateTime<Utc>,
    ) -> anyhow::Result<bool> {
        if self.fail_writes.load(Ordering::SeqCst) {
            anyhow::bail!("simulated storage outage");
        }
        if !self.configs.touch(tenant_id, config_id, draft_only, generated_at) {
            return Ok(false);
        }
        self.data.write().insert(config_id, rows.to_vec());
        Ok(true)
    }

    async fn find_by_config(
        &self,
        tenant_id: Uuid,
        config_id: Uuid,
    ) -> anyhow::Result<Vec<RetroPayCalculation>> {
        Ok(self
            .rows(config_id)
            .into_iter()
            .filter(|r| r.tenant_id == tenant_id)
            .collect())
    }

    async fn count_by_config(&self, tenant_id: Uuid, config_id: Uuid) -> anyhow::Result<u64> {
        Ok(self.find_by_config(tenant_id, config_id).await?.len() as u64)
    }
}

#[derive(Default)]
pub struct RecordingPublisher {
    events: RwLock<Vec<RetroPayEvent>>,
    fail: AtomicBool,
}

impl RecordingPublisher {
    pub fn events(&self) -> Vec<RetroPayEvent> {
        self.events.read().clone()
    }

    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, event: RetroPayEvent) -> anyhow::Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("event bus unavailable");
        }
        self.events.write().push(event);
        Ok(())
    }
}

// ===== Test environment =====

pub struct TestEnv {
    pub service: Arc<Service>,
    pub configs: Arc<MockConfigRepo>,
    pub history: Arc<MockPayHistoryRepo>,
    pub calculations: Arc<MockCalculationRepo>,
    pub events: Arc<RecordingPublisher>,
    pub ctx: SecurityContext,
    pub pay_group_id: Uuid,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(settings: Config) -> Self {
        let configs = Arc::new(MockConfigRepo::default());
        let history = Arc::new(MockPayHistoryRepo::default());
        let calculations = Arc::new(MockCalculationRepo::new(configs.clone()));
        let events = Arc::new(RecordingPublisher::default());
        let service = Arc::new(Service::new(
            configs.clone(),
            history.clone(),
            calculations.clone(),
            events.clone(),
            settings,
        ));

        Self {
            service,
            configs,
            history,
            calculations,
            events,
            ctx: SecurityContext::new(Uuid::new_v4(), Uuid::new_v4()),
            pay_group_id: Uuid::new_v4(),
        }
    }

    /// Q1 2024, given increase
    pub fn new_config(&self, increase_type: IncreaseType, value: &str) -> NewRetroPayConfig {
        NewRetroPayConfig {
            name: "Q1 2024 retro increase".to_string(),
            pay_group_id: self.pay_group_id,
            effective_start_date: date(2024, 1, 1),
            effective_end_date: date(2024, 3, 31),
            increase: IncreaseSpec {
                increase_type,
                increase_value: dec(value),
            },
        }
    }

    pub async fn create_config(&self, increase_type: IncreaseType, value: &str) -> RetroPayConfig {
        self.service
            .create_config(&self.ctx, self.new_config(increase_type, value))
            .await
            .expect("Failed to create config")
    }

    /// Biweekly pay entry in the environment's pay group and tenant
    pub fn entry(&self, employee: &TestEmployee, cycle: i32, element: &str, amount: &str) -> PayPeriodEntry {
        let period_start = date(2024, 1, 1) + chrono::Duration::days(14 * i64::from(cycle - 1));
        PayPeriodEntry {
            id: Uuid::new_v4(),
            tenant_id: self.ctx.tenant_id,
            pay_group_id: self.pay_group_id,
            employee_id: employee.id,
            employee_first_name: employee.first_name.clone(),
            employee_last_name: employee.last_name.clone(),
            employee_status: employee.status,
            pay_year: 2024,
            pay_cycle_number: cycle,
            period_start,
            period_end: period_start + chrono::Duration::days(13),
            pay_element: element.to_string(),
            amount: dec(amount),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TestEmployee {
    pub id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub status: EmployeeStatus,
}

impl TestEmployee {
    pub fn new(first: &str, last: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: Some(first.to_string()),
            last_name: Some(last.to_string()),
            status: EmployeeStatus::Active,
        }
    }

    pub fn with_status(mut self, status: EmployeeStatus) -> Self {
        self.status = status;
        self
    }
}
