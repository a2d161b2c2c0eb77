use std::sync::Arc;

use color_eyre::eyre::Result;
use corteya_api::config::ApiConfig;
use corteya_db::{create_pool, schema::initialize_database, store::SqliteStore};
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Open the local store, creating the file on first run
    let db_pool = create_pool(&config.database_url).await?;
    initialize_database(&db_pool).await?;
    let store = Arc::new(SqliteStore::new(db_pool));

    // Start API server
    corteya_api::start_server(config, store).await?;

    Ok(())
}
