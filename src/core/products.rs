//! Product provisioning - catalog rows and their branch stock together.
//!
//! Creating a product always seeds its inventory row for the provisioning
//! branch in the same transaction, so the catalog never lists a product the
//! branch has no ledger entry for. Deleting one removes the dependent
//! inventory rows first; the schema does not cascade on its own.

use crate::{
    core::{ids, inventory},
    entities::{Inventory, Product, inventory as inventory_entity, product},
    errors::{Error, Result},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};

/// Catalog fields for creating or updating a product.
#[derive(Debug, Clone)]
pub struct ProductFields {
    pub name: String,
    pub brand: String,
    pub price: f64,
}

fn validate_fields(fields: &ProductFields) -> Result<()> {
    if fields.name.trim().is_empty() {
        return Err(Error::InvalidInput {
            message: "Product name cannot be empty".to_string(),
        });
    }
    if !fields.price.is_finite() || fields.price < 0.0 {
        return Err(Error::InvalidInput {
            message: format!("Product price must be a non-negative number, got {}", fields.price),
        });
    }
    Ok(())
}

/// Retrieves a specific product by its unique ID.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_product_by_id(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Option<product::Model>> {
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a catalog row and its initial inventory row for one branch, as a
/// single transaction.
///
/// The product id is allocated globally (MAX over the whole catalog) inside
/// the transaction, then both inserts commit or roll back together.
///
/// # Errors
/// Returns `InvalidInput` for an empty name or non-finite/negative price,
/// `InvalidQuantity` for negative initial stock, or a database error (both
/// writes rolled back).
pub async fn create_product(
    db: &DatabaseConnection,
    fields: ProductFields,
    initial_quantity: i64,
    branch_id: i64,
) -> Result<product::Model> {
    validate_fields(&fields)?;
    if initial_quantity < 0 {
        return Err(Error::InvalidQuantity {
            quantity: initial_quantity,
        });
    }

    let txn = db.begin().await?;

    let product_id = ids::next_product_id(&txn).await;
    let row = product::ActiveModel {
        id: Set(product_id),
        name: Set(fields.name.trim().to_string()),
        brand: Set(fields.brand.trim().to_string()),
        price: Set(fields.price),
    };
    let created = row.insert(&txn).await?;

    let stock = inventory_entity::ActiveModel {
        branch_id: Set(branch_id),
        product_id: Set(product_id),
        quantity: Set(initial_quantity),
    };
    stock.insert(&txn).await?;

    txn.commit().await?;
    Ok(created)
}

/// Updates a product's catalog fields, then sets its stock at one branch.
///
/// The two steps are separate statements and deliberately not atomic with
/// respect to each other: a crash between them leaves the new catalog row
/// with the old stock level, which the next stock adjustment corrects. Each
/// step is individually transactional.
///
/// # Errors
/// Returns `InvalidInput`/`InvalidQuantity` for bad fields,
/// `ProductNotFound` when the product does not exist, or a database error.
pub async fn update_product_and_stock(
    db: &DatabaseConnection,
    product_id: i64,
    fields: ProductFields,
    new_quantity: i64,
    branch_id: i64,
) -> Result<product::Model> {
    validate_fields(&fields)?;
    if new_quantity < 0 {
        return Err(Error::InvalidQuantity {
            quantity: new_quantity,
        });
    }

    let mut row: product::ActiveModel = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?
        .into();

    row.name = Set(fields.name.trim().to_string());
    row.brand = Set(fields.brand.trim().to_string());
    row.price = Set(fields.price);
    let updated = row.update(db).await?;

    inventory::set_quantity(db, product_id, branch_id, new_quantity).await?;

    Ok(updated)
}

/// Deletes a product and every inventory row referencing it, in one
/// transaction (manual cascade). Returns the number of catalog rows removed;
/// deleting an unknown product is a no-op reported as 0.
///
/// # Errors
/// Returns a database error; both deletes are rolled back together.
pub async fn delete_product(db: &DatabaseConnection, product_id: i64) -> Result<u64> {
    let txn = db.begin().await?;

    Inventory::delete_many()
        .filter(inventory_entity::Column::ProductId.eq(product_id))
        .exec(&txn)
        .await?;
    let deleted = Product::delete_by_id(product_id).exec(&txn).await?;

    txn.commit().await?;
    Ok(deleted.rows_affected)
}
