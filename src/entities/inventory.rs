//! Inventory entity - Quantity on hand per (branch, product) pair.
//!
//! Rows are created lazily on first stock assignment; a product with no row
//! at a branch has implied zero stock. Quantity stays non-negative at every
//! committed state, enforced by conditional updates rather than a schema
//! constraint.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Inventory database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory_levels")]
pub struct Model {
    /// Branch holding the stock
    #[sea_orm(primary_key, auto_increment = false)]
    pub branch_id: i64,
    /// Product being stocked
    #[sea_orm(primary_key, auto_increment = false)]
    pub product_id: i64,
    /// Units on hand, never negative once committed
    pub quantity: i64,
}

/// Defines relationships between Inventory and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each inventory row belongs to one branch
    #[sea_orm(
        belongs_to = "super::branch::Entity",
        from = "Column::BranchId",
        to = "super::branch::Column::Id"
    )]
    Branch,
    /// Each inventory row belongs to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::branch::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Branch.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
