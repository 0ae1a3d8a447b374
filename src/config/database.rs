//! Database connection management for `TechStore`.
//!
//! This module handles branch database connections and table creation using
//! `SeaORM`. Connections carry the configured connect/acquire timeouts so a
//! hung database call surfaces as a `Timeout` error instead of blocking its
//! caller indefinitely. Table creation uses `SeaORM`'s
//! `Schema::create_table_from_entity` method to generate SQL from the entity
//! models, ensuring the database schema matches the Rust struct definitions
//! without manual SQL.

use crate::entities::{Branch, Client, Employee, Inventory, Invoice, InvoiceLine, Product};
use crate::errors::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};
use serde::Deserialize;
use std::time::Duration;

/// Connection tuning shared by every node, loaded from the `[settings]`
/// section of config.toml.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Seconds to wait when opening a connection
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Seconds to wait when acquiring a connection from the pool
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
}

const fn default_connect_timeout() -> u64 {
    5
}

const fn default_acquire_timeout() -> u64 {
    5
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout(),
            acquire_timeout_secs: default_acquire_timeout(),
        }
    }
}

/// Gets the database URL from the environment, falling back to the given
/// node URL. `DATABASE_URL` overrides the registry so a node can be pointed
/// at a different database without editing config.toml.
#[must_use]
pub fn resolve_database_url(node_url: &str) -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| node_url.to_string())
}

/// Establishes a connection to a branch database with the configured
/// timeouts applied.
///
/// # Errors
/// Returns an error if the connection cannot be established within the
/// connect timeout.
pub async fn connect(database_url: &str, settings: &DatabaseSettings) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(database_url);
    options
        .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
        .sqlx_logging(false);

    Database::connect(options).await.map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation
/// from entity definitions.
///
/// Tables are created parents-first so the generated foreign keys always
/// reference an existing table.
///
/// # Errors
/// Returns an error if any CREATE TABLE statement fails.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let branch_table = schema.create_table_from_entity(Branch);
    let product_table = schema.create_table_from_entity(Product);
    let client_table = schema.create_table_from_entity(Client);
    let employee_table = schema.create_table_from_entity(Employee);
    let inventory_table = schema.create_table_from_entity(Inventory);
    let invoice_table = schema.create_table_from_entity(Invoice);
    let invoice_line_table = schema.create_table_from_entity(InvoiceLine);

    db.execute(builder.build(&branch_table)).await?;
    db.execute(builder.build(&product_table)).await?;
    db.execute(builder.build(&client_table)).await?;
    db.execute(builder.build(&employee_table)).await?;
    db.execute(builder.build(&inventory_table)).await?;
    db.execute(builder.build(&invoice_table)).await?;
    db.execute(builder.build(&invoice_line_table)).await?;

    Ok(())
}
