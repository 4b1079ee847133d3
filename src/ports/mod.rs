//! Port traits for external collaborators.

pub mod config_port;
pub mod universe_port;
pub mod holdings_port;
pub mod quote_port;
