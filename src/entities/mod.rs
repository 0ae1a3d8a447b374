//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod branch;
pub mod client;
pub mod employee;
pub mod inventory;
pub mod invoice;
pub mod invoice_line;
pub mod product;

// Re-export specific types to avoid conflicts
pub use branch::{Column as BranchColumn, Entity as Branch, Model as BranchModel};
pub use client::{Column as ClientColumn, Entity as Client, Model as ClientModel};
pub use employee::{Column as EmployeeColumn, Entity as Employee, Model as EmployeeModel};
pub use inventory::{Column as InventoryColumn, Entity as Inventory, Model as InventoryModel};
pub use invoice::{Column as InvoiceColumn, Entity as Invoice, Model as InvoiceModel};
pub use invoice_line::{
    Column as InvoiceLineColumn, Entity as InvoiceLine, Model as InvoiceLineModel,
};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
