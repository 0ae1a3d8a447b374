//! Storefront catalog - what one branch can sell right now.

use crate::{
    entities::{Inventory, Product, inventory, product},
    errors::Result,
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

/// One sellable catalog entry: the product joined with this branch's stock.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    pub product_id: i64,
    pub name: String,
    pub brand: String,
    pub price: f64,
    pub stock: i64,
}

/// Lists the products a branch currently has in stock, ordered by name.
/// Products with no inventory row or zero stock at this branch are omitted.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn storefront_catalog(
    db: &DatabaseConnection,
    branch_id: i64,
) -> Result<Vec<CatalogItem>> {
    let rows = Inventory::find()
        .find_also_related(Product)
        .filter(inventory::Column::BranchId.eq(branch_id))
        .filter(inventory::Column::Quantity.gt(0))
        .order_by_asc(product::Column::Name)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(stock, product)| {
            product.map(|p| CatalogItem {
                product_id: p.id,
                name: p.name,
                brand: p.brand,
                price: p.price,
                stock: stock.quantity,
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_catalog_lists_only_stocked_products() -> Result<()> {
        let (db, branch) = setup_with_branch().await?;
        create_test_product(&db, "Teclado", branch.id, 5).await?;
        create_test_product(&db, "Monitor", branch.id, 0).await?;

        let catalog = storefront_catalog(&db, branch.id).await?;

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].name, "Teclado");
        assert_eq!(catalog[0].stock, 5);

        Ok(())
    }

    #[tokio::test]
    async fn test_catalog_is_per_branch() -> Result<()> {
        let db = setup_test_db().await?;
        let guayaquil = create_test_branch(&db, 1, "Guayaquil").await?;
        let quito = create_test_branch(&db, 2, "Quito").await?;

        let product = create_test_product(&db, "Mouse", guayaquil.id, 8).await?;
        crate::core::inventory::set_quantity(&db, product.id, quito.id, 2).await?;

        let guayaquil_catalog = storefront_catalog(&db, guayaquil.id).await?;
        let quito_catalog = storefront_catalog(&db, quito.id).await?;

        assert_eq!(guayaquil_catalog[0].stock, 8);
        assert_eq!(quito_catalog[0].stock, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_catalog_ordered_by_name() -> Result<()> {
        let (db, branch) = setup_with_branch().await?;
        create_test_product(&db, "Zócalo", branch.id, 1).await?;
        create_test_product(&db, "Audífonos", branch.id, 1).await?;

        let catalog = storefront_catalog(&db, branch.id).await?;

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].name, "Audífonos");
        assert_eq!(catalog[1].name, "Zócalo");

        Ok(())
    }

    #[tokio::test]
    async fn test_catalog_empty_branch() -> Result<()> {
        let (db, branch) = setup_with_branch().await?;

        assert!(storefront_catalog(&db, branch.id).await?.is_empty());

        Ok(())
    }
}
