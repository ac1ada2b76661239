//! Domain layer - business logic and services

pub mod calculation;
pub mod events;
pub mod format;
pub mod grouping;
pub mod repository;
pub mod service;

pub use events::{EventPublisher, NoOpEventPublisher, RetroPayEvent, TracingEventPublisher};
pub use repository::{CalculationRepository, ConfigRepository, PayHistoryRepository};
pub use service::Service;
