//! Config command - prints the resolved settings

use crate::config::AppConfig;

/// Print the settings after files and environment are applied
pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}
