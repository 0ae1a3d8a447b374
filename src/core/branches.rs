//! Branch rows - seeding on startup, lookup, listing.
//!
//! Branch ids are operator-assigned in the node registry; seeding inserts
//! any branch row the registry knows about that the database does not,
//! leaving existing rows untouched.

use crate::{
    entities::{Branch, branch},
    errors::Result,
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use tracing::info;

/// A branch row to ensure exists, as declared in the node registry.
#[derive(Debug, Clone)]
pub struct BranchSeed {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub city: String,
}

/// Inserts every seed whose id is not present yet.
///
/// # Errors
/// Returns an error if a lookup or insert fails.
pub async fn seed_branches(db: &DatabaseConnection, seeds: &[BranchSeed]) -> Result<()> {
    for seed in seeds {
        if Branch::find_by_id(seed.id).one(db).await?.is_some() {
            continue;
        }
        let row = branch::ActiveModel {
            id: Set(seed.id),
            name: Set(seed.name.clone()),
            address: Set(seed.address.clone()),
            phone: Set(seed.phone.clone()),
            city: Set(seed.city.clone()),
        };
        row.insert(db).await?;
        info!("Seeded branch {} ({})", seed.id, seed.name);
    }
    Ok(())
}

/// Finds a branch by its operator-assigned id.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_branch(db: &DatabaseConnection, branch_id: i64) -> Result<Option<branch::Model>> {
    Branch::find_by_id(branch_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists all branches ordered by id.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_branches(db: &DatabaseConnection) -> Result<Vec<branch::Model>> {
    Branch::find()
        .order_by_asc(branch::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
