//! Migration CLI tool.
//!
//! Reads `DATABASE_URL` and applies or reverts the forum schema, e.g.
//! `migration up` or `migration status`.

use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    cli::run_cli(migration::Migrator).await;
}
