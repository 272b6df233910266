use migration::Migrator;
use sea_orm_migration::cli;

/// Reads `DATABASE_URL`; run `migration up` / `migration down` / `migration status`.
#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
