/// Branch row seeding and lookup
pub mod branches;
/// Storefront catalog queries
pub mod catalog;
/// Sales transaction engine
pub mod checkout;
/// Storefront client registration and lookup
pub mod clients;
/// MAX+1 identifier allocation
pub mod ids;
/// Per-branch stock ledger
pub mod inventory;
/// Product provisioning and cascade delete
pub mod products;
