use anyhow::{bail, Context, Result};
use log::{info, warn};
use rusqlite::{Connection, OpenFlags};
use std::path::PathBuf;

use super::schema_gen::{generate_create_table, generate_insert};
use crate::parser::TableRow;
use crate::schema::TableSchema;

/// Where databases live and which one to use
#[derive(Debug, Clone)]
pub struct DatabaseLocation {
    pub data_dir: PathBuf,
    pub db_name: String,
}

impl DatabaseLocation {
    pub fn new(data_dir: impl Into<PathBuf>, db_name: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            db_name: db_name.into(),
        }
    }

    /// Path of the database file
    pub fn path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.db", self.db_name))
    }

    /// Path of the database file, refusing names that leave the data directory
    pub fn checked_path(&self) -> Result<PathBuf> {
        validate_db_name(&self.db_name)?;
        Ok(self.path())
    }
}

/// A database name is a single file stem inside the data directory
pub fn validate_db_name(name: &str) -> Result<()> {
    if name.is_empty() {
        bail!("Database name is empty");
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        bail!("Invalid database name '{}': path separators are not allowed", name);
    }
    Ok(())
}

/// Create a new, empty database. Fails if it already exists.
pub fn create_database(location: &DatabaseLocation) -> Result<()> {
    let path = location.checked_path()?;
    if !location.data_dir.is_dir() {
        bail!("Data directory {:?} does not exist", location.data_dir);
    }
    if path.exists() {
        bail!("Database '{}' already exists at {:?}", location.db_name, path);
    }

    info!("Creating database {}", location.db_name);
    let conn = Connection::open_with_flags(
        &path,
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
    )
    .with_context(|| format!("Failed to create database {:?}", path))?;

    // SQLite only writes the file header once something is stored
    conn.execute_batch("PRAGMA user_version = 1;")
        .context("Failed to initialise database")?;
    conn.close()
        .map_err(|(_, e)| e)
        .context("Failed to close administrative session")?;

    Ok(())
}

/// Session bound to one database. Statements outside a batch commit on their own.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open an existing database. Fails if it does not exist.
    pub fn connect(location: &DatabaseLocation) -> Result<Self> {
        let path = location.checked_path()?;
        let conn = Connection::open_with_flags(&path, OpenFlags::SQLITE_OPEN_READ_WRITE)
            .with_context(|| format!("Failed to connect to database {:?}", path))?;

        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        Ok(Self { conn })
    }

    /// Create all tables for the given schemas, in order
    pub fn create_tables(&self, schemas: &[&TableSchema]) -> Result<()> {
        info!("Creating {} tables...", schemas.len());

        for schema in schemas {
            let sql = generate_create_table(schema);
            self.conn
                .execute(&sql, [])
                .with_context(|| format!("Failed to create table: {}", schema.name))?;
        }

        Ok(())
    }

    /// Insert all rows in one batch. Any failing row rolls back the whole batch.
    pub fn insert_rows<R: TableRow>(&mut self, rows: &[R]) -> Result<usize> {
        let schema = R::schema();
        let sql = generate_insert(schema);

        let sp = self.conn.savepoint()?;
        {
            let mut stmt = sp.prepare_cached(&sql)?;
            for row in rows {
                for (idx, value) in row.values().iter().enumerate() {
                    value.bind_to(idx + 1, &mut stmt)?;
                }
                stmt.raw_execute()
                    .with_context(|| format!("Failed to insert into {}", schema.name))?;
            }
        }
        sp.commit()?;

        Ok(rows.len())
    }

    /// Run `f` inside one transaction, rolling back everything if it fails
    pub fn atomic<T>(&mut self, f: impl FnOnce(&mut Store) -> Result<T>) -> Result<T> {
        self.conn.execute_batch("BEGIN")?;
        match f(self) {
            Ok(value) => {
                self.conn.execute_batch("COMMIT")?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback) = self.conn.execute_batch("ROLLBACK") {
                    warn!("Rollback failed: {}", rollback);
                }
                Err(e)
            }
        }
    }

    /// Number of rows currently in `table`
    pub fn count_rows(&self, table: &str) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", table);
        self.conn
            .query_row(&sql, [], |row| row.get(0))
            .with_context(|| format!("Failed to count rows in {}", table))
    }
}
