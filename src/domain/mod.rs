//! Core domain types and decision logic.

pub mod asset;
pub mod quote;
pub mod holding;
pub mod rules;
pub mod settings;
pub mod score;
pub mod allocation;
pub mod plan;
pub mod rebalance;
pub mod loss_guard;
pub mod radar;
pub mod projection;
pub mod config_validation;
pub mod error;
