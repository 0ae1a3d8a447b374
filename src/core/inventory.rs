//! Inventory ledger - quantity on hand per (product, branch) pair.
//!
//! All reads and writes go straight through to the branch database; there is
//! no caching layer. A missing row means implied zero stock until the first
//! write creates it. Decrements are conditional at the SQL level so two
//! concurrent sales cannot drive a quantity negative between a stock check
//! and its matching update.

use crate::{
    entities::{Inventory, inventory},
    errors::{Error, Result},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set, TransactionTrait, sea_query::Expr,
};
use tracing::warn;

/// Units on hand for a product at a branch.
///
/// Returns 0 when no inventory row exists, and also 0 on a read error (the
/// storefront treats unknown stock as unsellable rather than failing the
/// page); the swallowed error is logged.
pub async fn get_quantity<C: ConnectionTrait>(db: &C, product_id: i64, branch_id: i64) -> i64 {
    match Inventory::find_by_id((branch_id, product_id)).one(db).await {
        Ok(Some(row)) => row.quantity,
        Ok(None) => 0,
        Err(err) => {
            warn!("Treating stock of product {product_id} at branch {branch_id} as 0: {err}");
            0
        }
    }
}

/// Sets the absolute quantity for a (product, branch) pair, creating the row
/// if it does not exist yet.
///
/// The update and the conditional insert run inside one transaction so the
/// upsert is a single logical operation.
///
/// # Errors
/// Returns `InvalidQuantity` for negative quantities, or a database error.
pub async fn set_quantity(
    db: &DatabaseConnection,
    product_id: i64,
    branch_id: i64,
    quantity: i64,
) -> Result<()> {
    if quantity < 0 {
        return Err(Error::InvalidQuantity { quantity });
    }

    let txn = db.begin().await?;

    let updated = Inventory::update_many()
        .col_expr(inventory::Column::Quantity, Expr::value(quantity))
        .filter(inventory::Column::BranchId.eq(branch_id))
        .filter(inventory::Column::ProductId.eq(product_id))
        .exec(&txn)
        .await?;

    if updated.rows_affected == 0 {
        let row = inventory::ActiveModel {
            branch_id: Set(branch_id),
            product_id: Set(product_id),
            quantity: Set(quantity),
        };
        row.insert(&txn).await?;
    }

    txn.commit().await?;
    Ok(())
}

/// Atomically adjusts the quantity of an existing row by `delta`.
///
/// A single `quantity = quantity + delta` update, adapted for running inside
/// a caller's transaction. Negative deltas additionally require
/// `quantity >= -delta`, so an update that would go negative matches zero
/// rows instead of committing an over-sell. Returns the number of rows
/// affected; callers decrementing stock must treat 0 as failure.
///
/// # Errors
/// Returns a database error; a missing row is reported through the row
/// count, not an error.
pub async fn adjust_quantity<C: ConnectionTrait>(
    db: &C,
    product_id: i64,
    branch_id: i64,
    delta: i64,
) -> Result<u64> {
    let mut update = Inventory::update_many()
        .col_expr(
            inventory::Column::Quantity,
            Expr::col(inventory::Column::Quantity).add(delta),
        )
        .filter(inventory::Column::BranchId.eq(branch_id))
        .filter(inventory::Column::ProductId.eq(product_id));

    if delta < 0 {
        update = update.filter(inventory::Column::Quantity.gte(-delta));
    }

    let result = update.exec(db).await?;
    Ok(result.rows_affected)
}
