use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(banquet_admin_migration::Migrator).await;
}
