//! Client entity - Customers registered at a branch or through the storefront.
//!
//! Email doubles as the natural dedup key for storefront registration: a
//! repeat registration with a known email resolves to the existing row.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Client database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "clients")]
pub struct Model {
    /// Allocator-assigned identifier, scoped over the whole table
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    /// Full name
    pub name: String,
    /// Street address, if given
    pub address: Option<String>,
    /// Contact phone number, if given
    pub phone: Option<String>,
    /// Email address, used for storefront lookup
    pub email: String,
    /// Branch the client registered at
    pub branch_id: i64,
}

/// Defines relationships between Client and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each client belongs to one branch
    #[sea_orm(
        belongs_to = "super::branch::Entity",
        from = "Column::BranchId",
        to = "super::branch::Column::Id"
    )]
    Branch,
    /// One client accumulates many invoices
    #[sea_orm(has_many = "super::invoice::Entity")]
    Invoices,
}

impl Related<super::branch::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Branch.def()
    }
}

impl Related<super::invoice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invoices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
