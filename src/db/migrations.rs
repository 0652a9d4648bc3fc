use anyhow::{bail, Context, Result};
use log::info;
use rusqlite::Connection;

/// Schema scripts in order; entry `i` upgrades the database to version `i + 1`.
const MIGRATIONS: &[(&str, &str)] = &[("schema_v1.sql", include_str!("schemas/schema_v1.sql"))];

pub const CURRENT_SCHEMA_VERSION: i32 = MIGRATIONS.len() as i32;

/// Bring the predictions schema up to `CURRENT_SCHEMA_VERSION` in a single
/// transaction, tracking progress in `PRAGMA user_version`.
pub fn run_migrations(conn: &mut Connection) -> Result<()> {
    let stored: i32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .context("failed to read user_version pragma")?;

    let pending = match usize::try_from(stored) {
        Ok(applied) if applied <= MIGRATIONS.len() => &MIGRATIONS[applied..],
        _ => bail!(
            "database version ({stored}) is not a supported schema (0..={CURRENT_SCHEMA_VERSION})"
        ),
    };
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn
        .transaction()
        .context("failed to open migration transaction")?;
    for (name, script) in pending {
        tx.execute_batch(script)
            .with_context(|| format!("failed to execute {name}"))?;
        info!("Applied migration {name}");
    }
    tx.pragma_update(None, "user_version", CURRENT_SCHEMA_VERSION)
        .context("failed to update user_version pragma")?;
    tx.commit().context("failed to commit migrations")?;

    Ok(())
}
