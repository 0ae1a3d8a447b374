//! Invoice line entity - One product position on an invoice.
//!
//! Lines have no identity of their own; the composite key
//! (`invoice_id`, `product_id`, `branch_id`) means a product can appear at
//! most once per invoice. The unit price is captured at sale time, so later
//! catalog price changes do not rewrite history.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Invoice line database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "invoice_lines")]
pub struct Model {
    /// Invoice this line belongs to
    #[sea_orm(primary_key, auto_increment = false)]
    pub invoice_id: i64,
    /// Product sold on this line
    #[sea_orm(primary_key, auto_increment = false)]
    pub product_id: i64,
    /// Branch the invoice was issued at
    #[sea_orm(primary_key, auto_increment = false)]
    pub branch_id: i64,
    /// Units sold
    pub quantity: i64,
    /// Price per unit at sale time, in dollars
    pub unit_price: f64,
    /// `quantity * unit_price`, in dollars
    pub subtotal: f64,
}

/// Defines relationships between InvoiceLine and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line belongs to one invoice
    #[sea_orm(
        belongs_to = "super::invoice::Entity",
        from = "Column::InvoiceId",
        to = "super::invoice::Column::Id"
    )]
    Invoice,
    /// Each line belongs to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::invoice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invoice.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
