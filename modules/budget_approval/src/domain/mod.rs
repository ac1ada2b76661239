//! Domain layer - business logic and services

pub mod events;
pub mod repository;
pub mod service;
pub mod workflow;

pub use events::{BudgetApprovalEvent, EventPublisher, NoOpEventPublisher, TracingEventPublisher};
pub use repository::{LevelRepository, PlanRepository};
pub use service::Service;
