//! Invoice entity - The header row of a completed sale.
//!
//! Invoice numbering is local to a branch: ids come from the identifier
//! allocator scoped by `branch_id`, so two branches can each hold an invoice
//! 1 in their own databases. `total` always equals the sum of the line
//! subtotals written in the same transaction.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Invoice database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "invoices")]
pub struct Model {
    /// Allocator-assigned identifier, scoped to the issuing branch
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    /// When the sale was recorded
    pub date: DateTimeUtc,
    /// Sum of all line subtotals in dollars
    pub total: f64,
    /// Client the sale was made to
    pub client_id: i64,
    /// Branch that issued the invoice
    pub branch_id: i64,
}

/// Defines relationships between Invoice and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each invoice belongs to one client
    #[sea_orm(
        belongs_to = "super::client::Entity",
        from = "Column::ClientId",
        to = "super::client::Column::Id"
    )]
    Client,
    /// Each invoice belongs to one branch
    #[sea_orm(
        belongs_to = "super::branch::Entity",
        from = "Column::BranchId",
        to = "super::branch::Column::Id"
    )]
    Branch,
    /// One invoice carries many lines
    #[sea_orm(has_many = "super::invoice_line::Entity")]
    Lines,
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<super::branch::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Branch.def()
    }
}

impl Related<super::invoice_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
