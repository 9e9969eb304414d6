use anyhow::Context;
use catalog_api::db::{MIGRATIONS_DIR, create_orm_conn, create_pool, run_migrations};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
    let pool = create_pool(&database_url).await?;
    let orm = create_orm_conn(&pool);
    run_migrations(&orm, MIGRATIONS_DIR).await?;
    println!("Migrations applied");
    Ok(())
}
