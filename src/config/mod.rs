/// Database connection management and schema bootstrap
pub mod database;

/// Node registry loading from config.toml and explicit node selection
pub mod nodes;
