//! Generic table gateway - parameterized CRUD over the allow-listed tables.
//!
//! Every operation resolves its table name against the static allow-list and
//! validates the supplied columns against that table's spec before a single
//! byte of SQL is built; an unknown table or column costs zero queries.
//! Statements are assembled with the sea-query builders, so values are always
//! bound, never spliced. Deleting from the products table routes through the
//! provisioning service's manual cascade so no orphaned inventory rows are
//! left behind.

pub mod tables;

pub use tables::{AllowedTable, FieldKind, FieldSpec, TableSpec};

use crate::{
    core::products,
    errors::{Error, Result},
};
use sea_orm::{
    ConnectionTrait, DatabaseConnection, Value,
    sea_query::{Alias, Expr, Query, SimpleExpr},
};
use std::collections::HashSet;
use tracing::{debug, warn};

/// A dynamically typed column value crossing the gateway boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Null,
}

fn resolve(table: &str) -> Result<AllowedTable> {
    AllowedTable::parse(table).ok_or_else(|| Error::AccessDenied {
        table: table.to_string(),
    })
}

/// Converts a gateway value into a bound SQL value, enforcing the column's
/// declared kind. `Null` is only accepted for optional columns.
fn to_sql_value(field: &FieldSpec, value: FieldValue) -> Result<Value> {
    match (field.kind, value) {
        (FieldKind::Integer, FieldValue::Integer(v)) => Ok(Value::BigInt(Some(v))),
        (FieldKind::Float, FieldValue::Float(v)) => Ok(Value::Double(Some(v))),
        #[allow(clippy::cast_precision_loss)]
        (FieldKind::Float, FieldValue::Integer(v)) => Ok(Value::Double(Some(v as f64))),
        (FieldKind::Text, FieldValue::Text(v)) => Ok(Value::String(Some(Box::new(v)))),
        (kind, FieldValue::Null) => {
            if field.required {
                return Err(Error::InvalidInput {
                    message: format!("column '{}' is required and cannot be null", field.name),
                });
            }
            Ok(match kind {
                FieldKind::Integer => Value::BigInt(None),
                FieldKind::Float => Value::Double(None),
                FieldKind::Text => Value::String(None),
            })
        }
        (kind, value) => Err(Error::InvalidInput {
            message: format!("column '{}' expects {kind:?}, got {value:?}", field.name),
        }),
    }
}

/// Validates a field list against a table spec, rejecting unknown and
/// duplicated columns and mismatched kinds.
fn checked_values(
    table: AllowedTable,
    fields: Vec<(String, FieldValue)>,
) -> Result<Vec<(&'static str, Value)>> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(fields.len());
    for (name, value) in fields {
        let field = table.column(&name).ok_or_else(|| Error::AccessDenied {
            table: format!("{}.{name}", table.spec().name),
        })?;
        if !seen.insert(field.name) {
            return Err(Error::InvalidInput {
                message: format!("column '{}' given more than once", field.name),
            });
        }
        out.push((field.name, to_sql_value(field, value)?));
    }
    Ok(out)
}

/// Fetches all rows of an allow-listed table.
///
/// Columns come from the table spec, so the result shape is stable
/// regardless of physical column order.
///
/// # Errors
/// Returns `AccessDenied` for a table outside the allow-list (no query
/// runs), or a database error.
pub async fn fetch(
    db: &DatabaseConnection,
    table: &str,
) -> Result<(Vec<String>, Vec<Vec<FieldValue>>)> {
    let table = resolve(table)?;
    let spec = table.spec();

    let mut stmt = Query::select();
    stmt.from(Alias::new(spec.name));
    for field in spec.fields {
        stmt.column(Alias::new(field.name));
    }

    let backend = db.get_database_backend();
    let results = db.query_all(backend.build(&stmt)).await?;

    let columns = spec.fields.iter().map(|f| f.name.to_string()).collect();
    let mut rows = Vec::with_capacity(results.len());
    for row in results {
        let mut values = Vec::with_capacity(spec.fields.len());
        for field in spec.fields {
            let value = match field.kind {
                FieldKind::Integer => row
                    .try_get::<Option<i64>>("", field.name)?
                    .map_or(FieldValue::Null, FieldValue::Integer),
                FieldKind::Float => row
                    .try_get::<Option<f64>>("", field.name)?
                    .map_or(FieldValue::Null, FieldValue::Float),
                FieldKind::Text => row
                    .try_get::<Option<String>>("", field.name)?
                    .map_or(FieldValue::Null, FieldValue::Text),
            };
            values.push(value);
        }
        rows.push(values);
    }

    Ok((columns, rows))
}

/// Inserts one row into an allow-listed table.
///
/// # Errors
/// Returns `AccessDenied` for an unknown table or column, `InvalidInput`
/// for a missing required column, duplicated column, or kind mismatch (all
/// before any SQL is built), `ConstraintViolation`/`System` from the store.
pub async fn insert(
    db: &DatabaseConnection,
    table: &str,
    fields: Vec<(String, FieldValue)>,
) -> Result<()> {
    let table = resolve(table)?;
    let spec = table.spec();
    let values = checked_values(table, fields)?;

    for field in spec.fields {
        if field.required && !values.iter().any(|(name, _)| *name == field.name) {
            return Err(Error::InvalidInput {
                message: format!("column '{}' is required", field.name),
            });
        }
    }

    let mut stmt = Query::insert();
    stmt.into_table(Alias::new(spec.name));
    stmt.columns(values.iter().map(|(name, _)| Alias::new(*name)));
    stmt.values(values.into_iter().map(|(_, value)| SimpleExpr::from(value)))
        .map_err(|e| Error::System {
            message: e.to_string(),
        })?;

    let backend = db.get_database_backend();
    db.execute(backend.build(&stmt)).await?;
    Ok(())
}

/// Updates one row of an allow-listed table by its id column.
///
/// The id column is silently dropped from the SET clause if present in
/// `fields` - it is only ever used in the WHERE clause, never reassigned.
/// Returns the number of rows affected; updating an unknown id is reported
/// as 0, not an error.
///
/// # Errors
/// Returns `AccessDenied` for an unknown table or column, `InvalidInput`
/// when nothing is left to set or a kind mismatches, or a database error.
pub async fn update(
    db: &DatabaseConnection,
    table: &str,
    fields: Vec<(String, FieldValue)>,
    id_column: &str,
    id_value: FieldValue,
) -> Result<u64> {
    let table = resolve(table)?;
    let spec = table.spec();
    let id_field = table.column(id_column).ok_or_else(|| Error::AccessDenied {
        table: format!("{}.{id_column}", spec.name),
    })?;
    let id_value = to_sql_value(id_field, id_value)?;

    let values = checked_values(table, fields)?;
    let set_pairs: Vec<_> = values
        .into_iter()
        .filter(|(name, _)| *name != id_field.name)
        .collect();
    if set_pairs.is_empty() {
        return Err(Error::InvalidInput {
            message: "no columns to update".to_string(),
        });
    }

    let mut stmt = Query::update();
    stmt.table(Alias::new(spec.name));
    for (name, value) in set_pairs {
        stmt.value(Alias::new(name), value);
    }
    stmt.and_where(Expr::col(Alias::new(id_field.name)).eq(id_value));

    let backend = db.get_database_backend();
    let result = db.execute(backend.build(&stmt)).await?;
    Ok(result.rows_affected())
}

/// Deletes rows of an allow-listed table by an id column.
///
/// The products table routes through the provisioning cascade so dependent
/// inventory rows go first, in the same transaction. Returns the number of
/// rows removed (for products, catalog rows).
///
/// # Errors
/// Returns `AccessDenied` for an unknown table or column, `InvalidInput`
/// for a mis-kinded id (or a non-primary cascade key), or a database error.
pub async fn delete(
    db: &DatabaseConnection,
    table: &str,
    id_column: &str,
    id_value: FieldValue,
) -> Result<u64> {
    let table = resolve(table)?;
    let spec = table.spec();
    let id_field = table.column(id_column).ok_or_else(|| Error::AccessDenied {
        table: format!("{}.{id_column}", spec.name),
    })?;

    if spec.cascade_delete {
        if id_field.name != spec.id_column {
            return Err(Error::InvalidInput {
                message: format!("cascade delete of {} is keyed by '{}'", spec.name, spec.id_column),
            });
        }
        let product_id = match id_value {
            FieldValue::Integer(id) => id,
            other => {
                return Err(Error::InvalidInput {
                    message: format!("column '{}' expects Integer, got {other:?}", id_field.name),
                });
            }
        };
        return products::delete_product(db, product_id).await;
    }

    let id_value = to_sql_value(id_field, id_value)?;
    let mut stmt = Query::delete();
    stmt.from_table(Alias::new(spec.name));
    stmt.and_where(Expr::col(Alias::new(id_field.name)).eq(id_value));

    let backend = db.get_database_backend();
    let result = db.execute(backend.build(&stmt)).await?;
    Ok(result.rows_affected())
}

/// Next usable id for an allow-listed table, optionally scoped to one
/// branch: MAX of the id column plus one, 1 on an empty scope.
///
/// The dynamic counterpart of the typed allocators in `core::ids`, for
/// callers that work in table names. The same caveats apply: this is a read,
/// not a reservation, and read errors are swallowed into the fallback 1.
///
/// # Errors
/// Returns `AccessDenied` for a table outside the allow-list, an unknown id
/// column, or a branch scope on a table without a `branch_id` column - all
/// before any SQL is built. The read itself never fails outward.
pub async fn next_id(
    db: &DatabaseConnection,
    table: &str,
    id_column: &str,
    branch_id: Option<i64>,
) -> Result<i64> {
    let table = resolve(table)?;
    let spec = table.spec();
    let id_field = table.column(id_column).ok_or_else(|| Error::AccessDenied {
        table: format!("{}.{id_column}", spec.name),
    })?;

    let mut stmt = Query::select();
    stmt.from(Alias::new(spec.name))
        .expr_as(Expr::col(Alias::new(id_field.name)).max(), Alias::new("max_id"));
    if let Some(branch_id) = branch_id {
        let scope = table.column("branch_id").ok_or_else(|| Error::AccessDenied {
            table: format!("{}.branch_id", spec.name),
        })?;
        stmt.and_where(Expr::col(Alias::new(scope.name)).eq(branch_id));
    }

    let backend = db.get_database_backend();
    let current_max = match db.query_one(backend.build(&stmt)).await {
        Ok(Some(row)) => row.try_get::<Option<i64>>("", "max_id").unwrap_or_default(),
        Ok(None) => None,
        Err(err) => {
            warn!("Falling back to id 1 for '{}': {err}", spec.name);
            None
        }
    };
    Ok(current_max.map_or(1, |max| max + 1))
}

/// The allow-listed tables actually present in this node's database, minus
/// the node's hidden tables.
///
/// A branch whose database does not carry a table (for example, employees at
/// a branch without employee management) simply does not get it; probe
/// failures are logged and treated as absence.
pub async fn available_tables(
    db: &DatabaseConnection,
    hidden_tables: &[String],
) -> Vec<AllowedTable> {
    let backend = db.get_database_backend();
    let mut available = Vec::new();
    for table in AllowedTable::ALL {
        let spec = table.spec();
        if hidden_tables.iter().any(|h| h.eq_ignore_ascii_case(spec.name)) {
            continue;
        }
        let mut probe = Query::select();
        probe
            .from(Alias::new(spec.name))
            .expr(Expr::col(Alias::new(spec.id_column)).count());
        match db.query_one(backend.build(&probe)).await {
            Ok(_) => available.push(table),
            Err(err) => {
                debug!("Table '{}' not available on this node: {err}", spec.name);
            }
        }
    }
    available
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn text(value: &str) -> FieldValue {
        FieldValue::Text(value.to_string())
    }

    #[tokio::test]
    async fn test_unknown_table_is_denied_without_queries() {
        // An unprimed mock fails on any query, so these passing proves the
        // allow-list check happens before SQL is built.
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        assert!(matches!(
            fetch(&db, "users").await.unwrap_err(),
            Error::AccessDenied { .. }
        ));
        assert!(matches!(
            insert(&db, "users", vec![]).await.unwrap_err(),
            Error::AccessDenied { .. }
        ));
        assert!(matches!(
            update(&db, "users", vec![], "id", FieldValue::Integer(1))
                .await
                .unwrap_err(),
            Error::AccessDenied { .. }
        ));
        assert!(matches!(
            delete(&db, "users", "id", FieldValue::Integer(1))
                .await
                .unwrap_err(),
            Error::AccessDenied { .. }
        ));
    }

    #[tokio::test]
    async fn test_unknown_column_is_denied_without_queries() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = insert(
            &db,
            "clients",
            vec![("password".to_string(), text("hunter2"))],
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::AccessDenied { .. }));

        let result = update(
            &db,
            "clients",
            vec![("name".to_string(), text("Ana"))],
            "password",
            FieldValue::Integer(1),
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::AccessDenied { .. }));
    }

    #[tokio::test]
    async fn test_kind_mismatch_and_missing_required_are_invalid_input() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        // price is a Float column
        let result = insert(
            &db,
            "products",
            vec![
                ("id".to_string(), FieldValue::Integer(1)),
                ("name".to_string(), text("Mouse")),
                ("brand".to_string(), text("Logi")),
                ("price".to_string(), text("cheap")),
            ],
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::InvalidInput { .. }));

        // brand is required
        let result = insert(
            &db,
            "products",
            vec![
                ("id".to_string(), FieldValue::Integer(1)),
                ("name".to_string(), text("Mouse")),
                ("price".to_string(), FieldValue::Float(9.5)),
            ],
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::InvalidInput { .. }));

        // null is only valid for optional columns
        let result = insert(
            &db,
            "clients",
            vec![
                ("id".to_string(), FieldValue::Integer(1)),
                ("name".to_string(), FieldValue::Null),
                ("email".to_string(), text("a@b.ec")),
                ("branch_id".to_string(), FieldValue::Integer(1)),
            ],
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn test_insert_and_fetch_roundtrip() -> crate::errors::Result<()> {
        let db = setup_test_db().await?;

        insert(
            &db,
            "branches",
            vec![
                ("id".to_string(), FieldValue::Integer(1)),
                ("name".to_string(), text("Guayaquil")),
                ("address".to_string(), text("Av. 9 de Octubre 100")),
                ("phone".to_string(), text("04-2000000")),
                ("city".to_string(), text("Guayaquil")),
            ],
        )
        .await?;

        let (columns, rows) = fetch(&db, "branches").await?;
        assert_eq!(columns, vec!["id", "name", "address", "phone", "city"]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], FieldValue::Integer(1));
        assert_eq!(rows[0][1], text("Guayaquil"));

        Ok(())
    }

    #[tokio::test]
    async fn test_insert_with_optional_columns_omitted() -> crate::errors::Result<()> {
        let (db, branch) = setup_with_branch().await?;

        insert(
            &db,
            "employees",
            vec![
                ("id".to_string(), FieldValue::Integer(1)),
                ("name".to_string(), text("Carlos")),
                ("email".to_string(), text("carlos@techstore.ec")),
                ("branch_id".to_string(), FieldValue::Integer(branch.id)),
            ],
        )
        .await?;

        let (_, rows) = fetch(&db, "employees").await?;
        assert_eq!(rows.len(), 1);
        // address and phone come back as nulls
        assert_eq!(rows[0][2], FieldValue::Null);
        assert_eq!(rows[0][3], FieldValue::Null);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_drops_id_from_set_clause() -> crate::errors::Result<()> {
        let (db, branch) = setup_with_branch().await?;

        // The id is in the field map, as a UI form would send it; it must
        // only be used for the WHERE, never reassigned.
        let affected = update(
            &db,
            "branches",
            vec![
                ("id".to_string(), FieldValue::Integer(99)),
                ("name".to_string(), text("Matriz")),
            ],
            "id",
            FieldValue::Integer(branch.id),
        )
        .await?;
        assert_eq!(affected, 1);

        let (_, rows) = fetch(&db, "branches").await?;
        assert_eq!(rows[0][0], FieldValue::Integer(branch.id));
        assert_eq!(rows[0][1], text("Matriz"));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_unknown_id_affects_zero_rows() -> crate::errors::Result<()> {
        let db = setup_test_db().await?;

        let affected = update(
            &db,
            "branches",
            vec![("name".to_string(), text("Nadie"))],
            "id",
            FieldValue::Integer(42),
        )
        .await?;
        assert_eq!(affected, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_with_only_the_id_is_invalid() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = update(
            &db,
            "branches",
            vec![("id".to_string(), FieldValue::Integer(1))],
            "id",
            FieldValue::Integer(1),
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn test_delete_generic_row() -> crate::errors::Result<()> {
        let (db, branch) = setup_with_branch().await?;
        let client = create_test_client(&db, branch.id).await?;

        let removed = delete(&db, "clients", "id", FieldValue::Integer(client.id)).await?;
        assert_eq!(removed, 1);

        let (_, rows) = fetch(&db, "clients").await?;
        assert!(rows.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_product_cascades_through_gateway() -> crate::errors::Result<()> {
        let (db, branch, product) = setup_with_product().await?;

        let removed = delete(&db, "products", "id", FieldValue::Integer(product.id)).await?;
        assert_eq!(removed, 1);

        let (_, product_rows) = fetch(&db, "products").await?;
        assert!(product_rows.is_empty());
        let (_, inventory_rows) = fetch(&db, "inventory_levels").await?;
        assert!(inventory_rows.is_empty());
        assert_eq!(
            crate::core::inventory::get_quantity(&db, product.id, branch.id).await,
            0
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_next_id_over_table_names() -> crate::errors::Result<()> {
        let (db, branch) = setup_with_branch().await?;

        assert_eq!(next_id(&db, "products", "id", None).await?, 1);

        let product = create_test_product(&db, "Mouse", branch.id, 3).await?;
        assert_eq!(next_id(&db, "products", "id", None).await?, product.id + 1);

        // Branch-scoped: invoices are numbered per branch.
        assert_eq!(next_id(&db, "invoices", "id", Some(branch.id)).await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_next_id_validates_its_targets() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        assert!(matches!(
            next_id(&db, "sequences", "id", None).await.unwrap_err(),
            Error::AccessDenied { .. }
        ));
        assert!(matches!(
            next_id(&db, "products", "uuid", None).await.unwrap_err(),
            Error::AccessDenied { .. }
        ));
        // products carry no branch_id column to scope by
        assert!(matches!(
            next_id(&db, "products", "id", Some(1)).await.unwrap_err(),
            Error::AccessDenied { .. }
        ));
    }

    #[tokio::test]
    async fn test_available_tables_respects_hidden_list() -> crate::errors::Result<()> {
        let db = setup_test_db().await?;

        let all = available_tables(&db, &[]).await;
        assert_eq!(all.len(), AllowedTable::ALL.len());

        let hidden = vec!["employees".to_string()];
        let filtered = available_tables(&db, &hidden).await;
        assert_eq!(filtered.len(), AllowedTable::ALL.len() - 1);
        assert!(!filtered.contains(&AllowedTable::Employees));

        Ok(())
    }
}
