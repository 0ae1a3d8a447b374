//! Sales transaction engine - turns a cart into an invoice.
//!
//! Checkout runs in two passes. The pre-validation pass is read-only: it
//! resolves every cart line against the catalog and this branch's stock and
//! stages the prices, so a rejected cart leaves the database untouched with
//! no rollback needed. The commit pass is a single transaction writing the
//! invoice header, one line per cart entry, and the matching stock
//! decrements; any failure inside it rolls the whole sale back. The
//! decrement itself is conditional on remaining stock, so a concurrent sale
//! that won the race fails this transaction instead of driving the quantity
//! negative.

use crate::{
    core::{ids, inventory},
    entities::{Client, Inventory, Product, invoice, invoice_line},
    errors::{Error, Result},
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set, TransactionTrait};
use std::collections::HashSet;

/// One product/quantity pair submitted for checkout.
#[derive(Debug, Clone, Copy)]
pub struct CartLine {
    pub product_id: i64,
    pub quantity: i64,
}

/// A cart line with its price resolved during pre-validation.
struct PricedLine {
    product_id: i64,
    product_name: String,
    quantity: i64,
    unit_price: f64,
    subtotal: f64,
}

/// Records a sale: validates the cart, then atomically writes the invoice
/// header, its lines, and the stock decrements.
///
/// On success the committed invoice is returned; its id is the receipt
/// number and formatting a user-facing receipt is the caller's job.
///
/// # Errors
/// - `EmptyCart` / `InvalidQuantity` / `InvalidInput` for a malformed cart,
///   before any query runs
/// - `ClientNotFound` when the client does not exist
/// - `ProductUnavailable` when a line has no stock row at this branch
/// - `InsufficientStock` when a line requests more than is available,
///   detected either during pre-validation or by the conditional decrement
/// - `ConstraintViolation` / `System` for database failures; the transaction
///   is rolled back and no partial sale is observable
pub async fn checkout(
    db: &DatabaseConnection,
    client_id: i64,
    branch_id: i64,
    cart: &[CartLine],
) -> Result<invoice::Model> {
    if cart.is_empty() {
        return Err(Error::EmptyCart);
    }

    let mut seen = HashSet::new();
    for line in cart {
        if line.quantity <= 0 {
            return Err(Error::InvalidQuantity {
                quantity: line.quantity,
            });
        }
        if !seen.insert(line.product_id) {
            return Err(Error::InvalidInput {
                message: format!("product {} appears more than once in the cart", line.product_id),
            });
        }
    }

    // Pre-validation pass: read-only, nothing to roll back on failure.
    Client::find_by_id(client_id)
        .one(db)
        .await?
        .ok_or(Error::ClientNotFound { id: client_id })?;

    let mut priced = Vec::with_capacity(cart.len());
    let mut total = 0.0;
    for line in cart {
        let (stock, product) = Inventory::find_by_id((branch_id, line.product_id))
            .find_also_related(Product)
            .one(db)
            .await?
            .and_then(|(stock, product)| product.map(|p| (stock, p)))
            .ok_or(Error::ProductUnavailable {
                product_id: line.product_id,
                branch_id,
            })?;

        if stock.quantity < line.quantity {
            return Err(Error::InsufficientStock {
                product: product.name,
                available: stock.quantity,
                requested: line.quantity,
            });
        }

        #[allow(clippy::cast_precision_loss)]
        let subtotal = product.price * line.quantity as f64;
        total += subtotal;
        priced.push(PricedLine {
            product_id: line.product_id,
            product_name: product.name,
            quantity: line.quantity,
            unit_price: product.price,
            subtotal,
        });
    }

    // Commit pass: one transaction for the header, the lines, and the
    // decrements.
    let txn = db.begin().await?;

    let invoice_id = ids::next_invoice_id(&txn, branch_id).await;
    let header = invoice::ActiveModel {
        id: Set(invoice_id),
        date: Set(chrono::Utc::now()),
        total: Set(total),
        client_id: Set(client_id),
        branch_id: Set(branch_id),
    };
    let header = header.insert(&txn).await?;

    for line in &priced {
        let detail = invoice_line::ActiveModel {
            invoice_id: Set(invoice_id),
            product_id: Set(line.product_id),
            branch_id: Set(branch_id),
            quantity: Set(line.quantity),
            unit_price: Set(line.unit_price),
            subtotal: Set(line.subtotal),
        };
        detail.insert(&txn).await?;

        let decremented =
            inventory::adjust_quantity(&txn, line.product_id, branch_id, -line.quantity).await?;
        if decremented == 0 {
            // A concurrent sale took the stock between validation and here.
            let available = inventory::get_quantity(&txn, line.product_id, branch_id).await;
            txn.rollback().await?;
            return Err(Error::InsufficientStock {
                product: line.product_name.clone(),
                available,
                requested: line.quantity,
            });
        }
    }

    txn.commit().await?;
    Ok(header)
}
