//! API layer: REST transport and in-process client

pub mod native;
pub mod rest;
