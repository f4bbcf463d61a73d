//! Check command - connects to the configured pool and round-trips a value

use clap::Args;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::cache::{CacheConfig, CacheDriver};
use crate::domain::result_set::{CachedResultSet, Operator, WhereClause};
use crate::infrastructure::cache::ClientFactory;
use crate::infrastructure::config::SettingsConfig;
use crate::infrastructure::logging;

type CheckResultSet = CachedResultSet<String>;

/// Arguments for the check command
#[derive(Args, Clone)]
pub struct CheckArgs {
    /// Only register the pool, skip the write/read round trip
    #[arg(long)]
    pub connect_only: bool,
}

/// Run the connectivity check
pub async fn run(args: CheckArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);

    let client = ClientFactory::new()
        .with_max_capacity(config.cache.max_capacity)
        .create(config.cache.client);
    let cache_config = SettingsConfig::<CheckResultSet>::from_settings(&config.cache)?;

    let mut driver = CacheDriver::new(cache_config, client);
    driver.connect().await?;

    let servers: Vec<String> = driver
        .config()
        .server_pairings()
        .iter()
        .map(ToString::to_string)
        .collect();

    info!(client = %config.cache.client, servers = ?servers, "Cache pool registered");

    if args.connect_only {
        return Ok(());
    }

    round_trip(&mut driver).await?;

    info!("Cache check passed");

    Ok(())
}

/// Writes a result set under its checksum and reads it back
async fn round_trip(driver: &mut CacheDriver<SettingsConfig<CheckResultSet>>) -> anyhow::Result<()> {
    let where_clause = WhereClause::new().and("check", Operator::Equals, "typed-cache");

    let mut written = CheckResultSet::new(where_clause.clone());
    written.add("ok".to_string());
    let key = written.create_checksum().to_string();

    driver.set(&written, &key).await?;

    let mut read = CheckResultSet::new(where_clause);
    let found = driver.get(&mut read, &key).await?.is_some();

    driver.delete(&written, &key).await?;

    if !found || read.values().ne(written.values()) {
        anyhow::bail!("Value written to the cache could not be read back");
    }

    Ok(())
}
