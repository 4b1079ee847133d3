//! Concrete adapter implementations for the port traits.

pub mod file_config_adapter;
pub mod csv_universe_adapter;
pub mod csv_holdings_adapter;
pub mod csv_quote_adapter;
