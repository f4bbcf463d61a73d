//! Infrastructure layer - cache clients, settings-driven configs and logging

pub mod cache;
pub mod config;
pub mod logging;
