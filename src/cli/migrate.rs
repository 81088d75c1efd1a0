// src/cli/migrate.rs — Database migration command
//
// Migrations run automatically whenever the store is opened; this command
// shows where a database stands and can undo the latest step.

use std::path::Path;

use rusqlite::Connection;

use crate::store::schema;

/// Show migration status, roll back the latest migration, or apply pending ones.
pub fn run_migrate(db_path: &Path, status_only: bool, rollback: bool) -> anyhow::Result<()> {
    if !db_path.exists() && (status_only || rollback) {
        println!("No database found at: {}", db_path.display());
        println!("Run `tincture migrate` to create it.");
        return Ok(());
    }

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let conn = Connection::open(db_path)?;

    if status_only {
        return show_migration_status(&conn, db_path);
    }

    if rollback {
        match schema::rollback_last(&conn)? {
            Some(version) => println!("Rolled back migration v{version}."),
            None => println!("No migrations to roll back."),
        }
        return Ok(());
    }

    println!("Running database migrations...");
    schema::run_migrations(&conn)?;
    println!("Migrations complete.");
    show_migration_status(&conn, db_path)
}

fn show_migration_status(conn: &Connection, db_path: &Path) -> anyhow::Result<()> {
    let applied = schema::applied_migrations(conn)?;
    let current = applied.last().map(|m| m.version).unwrap_or(0);

    println!("Database: {}", db_path.display());
    println!(
        "Schema version: {} (latest {})",
        current,
        schema::latest_version()
    );

    if applied.is_empty() {
        println!("No migrations have been run yet.");
        return Ok(());
    }

    println!();
    println!("Applied migrations:");
    for m in &applied {
        println!("  v{}: {} (applied {})", m.version, m.name, m.applied_at);
    }
    Ok(())
}
