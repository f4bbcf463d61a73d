//! Settings-driven cache configs

mod settings_config;

pub use settings_config::SettingsConfig;
