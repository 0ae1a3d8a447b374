//! Unified error types and result handling.
//!
//! Validation errors (`AccessDenied`, `InvalidInput`, `InvalidQuantity`,
//! `EmptyCart`, `ProductUnavailable`, `InsufficientStock`) are raised before
//! any mutating statement runs. Errors surfaced mid-transaction roll the
//! transaction back before propagating, so a half-applied multi-statement
//! change is never observable.

use sea_orm::{ConnAcquireErr, DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Access denied: '{table}' is not in the allow-list")]
    AccessDenied { table: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity { quantity: i64 },

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Product {product_id} is not stocked at branch {branch_id}")]
    ProductUnavailable { product_id: i64, branch_id: i64 },

    #[error("Insufficient stock of '{product}': {available} available, {requested} requested")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    #[error("Product {id} not found")]
    ProductNotFound { id: i64 },

    #[error("Client {id} not found")]
    ClientNotFound { id: i64 },

    #[error("Branch {id} not found")]
    BranchNotFound { id: i64 },

    #[error("Constraint violation: {message}")]
    ConstraintViolation { message: String },

    #[error("Database operation timed out")]
    Timeout,

    #[error("Database error: {message}")]
    System { message: String },
}

impl From<DbErr> for Error {
    fn from(err: DbErr) -> Self {
        if let Some(sql_err) = err.sql_err() {
            match sql_err {
                SqlErr::UniqueConstraintViolation(message)
                | SqlErr::ForeignKeyConstraintViolation(message) => {
                    return Self::ConstraintViolation { message };
                }
                _ => {}
            }
        }
        match err {
            DbErr::ConnectionAcquire(ConnAcquireErr::Timeout) => Self::Timeout,
            other => Self::System {
                message: other.to_string(),
            },
        }
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
