//! Shared test utilities for `TechStore`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{clients, products},
    entities::{self, branch},
    errors::Result,
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Inserts a branch row directly; branch ids are operator-assigned, so tests
/// pick them explicitly.
pub async fn create_test_branch(
    db: &DatabaseConnection,
    id: i64,
    name: &str,
) -> Result<entities::branch::Model> {
    let row = branch::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        address: Set("Av. Principal 1".to_string()),
        phone: Set("04-0000000".to_string()),
        city: Set(name.to_string()),
    };
    row.insert(db).await.map_err(Into::into)
}

/// Creates a test product with sensible defaults and seeds its stock at the
/// given branch.
///
/// # Defaults
/// * `brand`: "Acme"
/// * `price`: 10.0
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
    branch_id: i64,
    initial_quantity: i64,
) -> Result<entities::product::Model> {
    products::create_product(
        db,
        products::ProductFields {
            name: name.to_string(),
            brand: "Acme".to_string(),
            price: 10.0,
        },
        initial_quantity,
        branch_id,
    )
    .await
}

/// Creates a test product with custom brand and price.
pub async fn create_custom_product(
    db: &DatabaseConnection,
    name: &str,
    brand: &str,
    price: f64,
    branch_id: i64,
    initial_quantity: i64,
) -> Result<entities::product::Model> {
    products::create_product(
        db,
        products::ProductFields {
            name: name.to_string(),
            brand: brand.to_string(),
            price,
        },
        initial_quantity,
        branch_id,
    )
    .await
}

/// Registers a test client with sensible defaults.
///
/// # Defaults
/// * `name`: "Cliente de Prueba"
/// * `email`: "cliente@techstore.ec"
pub async fn create_test_client(
    db: &DatabaseConnection,
    branch_id: i64,
) -> Result<entities::client::Model> {
    clients::register_client(
        db,
        clients::NewClient {
            name: "Cliente de Prueba".to_string(),
            address: "Av. Principal 2".to_string(),
            phone: "0990000000".to_string(),
            email: "cliente@techstore.ec".to_string(),
        },
        branch_id,
    )
    .await
}

/// Sets up a complete test environment with one branch.
/// Returns (db, branch) for common test scenarios.
pub async fn setup_with_branch() -> Result<(DatabaseConnection, entities::branch::Model)> {
    let db = setup_test_db().await?;
    let branch = create_test_branch(&db, 1, "Guayaquil").await?;
    Ok((db, branch))
}

/// Sets up a complete test environment with a branch and a product stocked
/// at 10 units. Returns (db, branch, product).
pub async fn setup_with_product() -> Result<(
    DatabaseConnection,
    entities::branch::Model,
    entities::product::Model,
)> {
    let db = setup_test_db().await?;
    let branch = create_test_branch(&db, 1, "Guayaquil").await?;
    let product = create_test_product(&db, "Test Product", branch.id, 10).await?;
    Ok((db, branch, product))
}
