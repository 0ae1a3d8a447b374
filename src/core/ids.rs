//! Identifier allocation - MAX+1 ids without a database sequence.
//!
//! Every id in the system except branch ids comes from reading the current
//! maximum of the target table and adding one: product, client, and employee
//! ids are scoped over the whole table, invoice ids over one branch. An
//! empty scope yields 1. This is a read, not a reservation - nothing stops
//! two callers from being handed the same value before either inserts, and
//! the resulting duplicate key surfaces as a constraint violation in
//! whichever transaction commits second. Callers treat the value as a best
//! guess; read errors are swallowed and fall back to 1.

use crate::entities::{Client, Employee, Invoice, Product, client, employee, invoice, product};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QuerySelect};
use tracing::warn;

/// Next usable product id, scoped over the whole catalog.
pub async fn next_product_id<C: ConnectionTrait>(db: &C) -> i64 {
    let max = Product::find()
        .select_only()
        .column_as(product::Column::Id.max(), "max_id")
        .into_tuple::<Option<i64>>()
        .one(db)
        .await;
    unwrap_max("products", max)
}

/// Next usable client id, scoped over the whole table.
pub async fn next_client_id<C: ConnectionTrait>(db: &C) -> i64 {
    let max = Client::find()
        .select_only()
        .column_as(client::Column::Id.max(), "max_id")
        .into_tuple::<Option<i64>>()
        .one(db)
        .await;
    unwrap_max("clients", max)
}

/// Next usable employee id, scoped over the whole table.
pub async fn next_employee_id<C: ConnectionTrait>(db: &C) -> i64 {
    let max = Employee::find()
        .select_only()
        .column_as(employee::Column::Id.max(), "max_id")
        .into_tuple::<Option<i64>>()
        .one(db)
        .await;
    unwrap_max("employees", max)
}

/// Next usable invoice id at one branch. Invoice numbering is local per
/// branch, so the maximum is read under a `branch_id` filter.
pub async fn next_invoice_id<C: ConnectionTrait>(db: &C, branch_id: i64) -> i64 {
    let max = Invoice::find()
        .filter(invoice::Column::BranchId.eq(branch_id))
        .select_only()
        .column_as(invoice::Column::Id.max(), "max_id")
        .into_tuple::<Option<i64>>()
        .one(db)
        .await;
    unwrap_max("invoices", max)
}

fn unwrap_max(table: &str, max: Result<Option<Option<i64>>, sea_orm::DbErr>) -> i64 {
    match max {
        Ok(Some(Some(current_max))) => current_max + 1,
        Ok(_) => 1,
        Err(err) => {
            warn!("Falling back to id 1 for '{table}': {err}");
            1
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};

    #[tokio::test]
    async fn test_next_id_empty_scope_is_one() -> crate::errors::Result<()> {
        let db = setup_test_db().await?;

        assert_eq!(next_product_id(&db).await, 1);
        assert_eq!(next_client_id(&db).await, 1);
        assert_eq!(next_employee_id(&db).await, 1);
        assert_eq!(next_invoice_id(&db, 1).await, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_next_id_is_max_plus_one() -> crate::errors::Result<()> {
        let (db, branch) = setup_with_branch().await?;

        let product = create_test_product(&db, "Teclado", branch.id, 5).await?;
        assert_eq!(next_product_id(&db).await, product.id + 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_next_id_is_a_read_not_a_reservation() -> crate::errors::Result<()> {
        let (db, branch) = setup_with_branch().await?;
        create_test_product(&db, "Monitor", branch.id, 2).await?;

        // Two sequential calls without an intervening insert hand out the
        // same value; under concurrency both callers could insert it.
        let first = next_product_id(&db).await;
        let second = next_product_id(&db).await;
        assert_eq!(first, second);

        Ok(())
    }

    #[tokio::test]
    async fn test_next_invoice_id_scoped_per_branch() -> crate::errors::Result<()> {
        let db = setup_test_db().await?;
        let branch1 = create_test_branch(&db, 1, "Guayaquil").await?;
        let branch2 = create_test_branch(&db, 2, "Quito").await?;

        let product = create_test_product(&db, "Mouse", branch1.id, 10).await?;
        let client = create_test_client(&db, branch1.id).await?;
        crate::core::checkout::checkout(
            &db,
            client.id,
            branch1.id,
            &[crate::core::checkout::CartLine {
                product_id: product.id,
                quantity: 1,
            }],
        )
        .await?;

        // Branch 1 already issued invoice 1; branch 2 starts fresh.
        assert_eq!(next_invoice_id(&db, branch1.id).await, 2);
        assert_eq!(next_invoice_id(&db, branch2.id).await, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_next_id_swallows_read_errors() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_errors([DbErr::Custom("connection lost".to_string())])
            .into_connection();

        // The documented fallback: a failed read yields 1, never an error.
        assert_eq!(next_product_id(&db).await, 1);
    }
}
