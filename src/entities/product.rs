//! Product entity - Represents the global catalog shared across branches.
//!
//! A product describes what can be sold; how many units a given branch holds
//! lives in the inventory ledger. Product ids come from the identifier
//! allocator, scoped over the whole table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Allocator-assigned identifier, unique across the whole catalog
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    /// Name of the product (e.g., "Mouse inalámbrico")
    pub name: String,
    /// Manufacturer brand
    pub brand: String,
    /// Unit price in dollars
    pub price: f64,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One product has a stock level per branch
    #[sea_orm(has_many = "super::inventory::Entity")]
    Inventory,
    /// One product appears on many invoice lines
    #[sea_orm(has_many = "super::invoice_line::Entity")]
    InvoiceLines,
}

impl Related<super::inventory::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inventory.def()
    }
}

impl Related<super::invoice_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InvoiceLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
