//! Migrate command - schema management from the CLI.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    let result = match args.action {
        MigrateAction::Up => db.migrate_up().await.map(|_| {
            tracing::info!("All pending migrations applied");
        }),
        MigrateAction::Down => db.migrate_down().await.map(|_| {
            tracing::info!("Last migration rolled back");
        }),
        MigrateAction::Status => db.migrate_status().await.map(|statuses| {
            for status in statuses {
                println!(
                    "{:<60} {}",
                    status.name,
                    if status.applied { "applied" } else { "pending" }
                );
            }
        }),
        MigrateAction::Fresh => {
            tracing::warn!("Dropping all tables and re-running every migration");
            db.migrate_fresh().await.map(|_| {
                tracing::info!("Schema rebuilt from scratch");
            })
        }
    };

    result.map_err(|e| AppError::internal(e.to_string()))
}
