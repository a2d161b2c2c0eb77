use color_eyre::eyre::Result;
use dotenv::dotenv;
use corteya_db::schema::initialize_database;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://corteya.db".to_string());

    println!("Opening local store {}...", database_url);
    let db_pool = corteya_db::create_pool(&database_url).await?;

    println!("Initializing schema...");
    initialize_database(&db_pool).await?;
    println!("Schema initialized successfully.");

    Ok(())
}
