//! Branch entity - Represents one physical store ("node").
//!
//! Each branch runs against its own database instance; branch ids are small
//! stable integers assigned by the operator in the node registry, never by
//! the identifier allocator.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Branch database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "branches")]
pub struct Model {
    /// Operator-assigned branch identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    /// Human-readable branch name (e.g., "Guayaquil")
    pub name: String,
    /// Street address of the store
    pub address: String,
    /// Contact phone number
    pub phone: String,
    /// City the branch operates in
    pub city: String,
}

/// Defines relationships between Branch and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One branch stocks many products
    #[sea_orm(has_many = "super::inventory::Entity")]
    Inventory,
    /// One branch registers many clients
    #[sea_orm(has_many = "super::client::Entity")]
    Clients,
    /// One branch employs many people
    #[sea_orm(has_many = "super::employee::Entity")]
    Employees,
    /// One branch issues many invoices
    #[sea_orm(has_many = "super::invoice::Entity")]
    Invoices,
}

impl Related<super::inventory::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inventory.def()
    }
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Clients.def()
    }
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employees.def()
    }
}

impl Related<super::invoice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invoices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
