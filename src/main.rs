#![allow(clippy::result_large_err)]

//! Node bootstrap - brings one branch's database up and reports readiness.

use dotenvy::dotenv;
use techstore::config::{database, nodes};
use techstore::core::branches::{self, BranchSeed};
use techstore::errors::Result;
use techstore::gateway;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the node registry and pick the node this process runs as
    let registry = nodes::load_default_registry()
        .inspect_err(|e| error!("Failed to load node registry: {e}"))?;
    let node = nodes::select_node(&registry)?;
    info!("Running as node '{}' (branch {}).", node.name, node.branch_id);

    // 4. Connect to this branch's database
    let database_url = database::resolve_database_url(&node.database_url);
    let db = database::connect(&database_url, &registry.settings)
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to branch database: {e}"))?;

    // 5. Ensure schema and seed the branch rows the registry declares
    database::create_tables(&db)
        .await
        .inspect_err(|e| error!("Failed to create tables: {e}"))?;
    let seeds: Vec<BranchSeed> = registry
        .nodes
        .iter()
        .map(|n| BranchSeed {
            id: n.branch_id,
            name: n.name.clone(),
            address: n.address.clone(),
            phone: n.phone.clone(),
            city: n.city.clone(),
        })
        .collect();
    branches::seed_branches(&db, &seeds).await?;

    // 6. Report which allow-listed tables this node exposes
    let tables = gateway::available_tables(&db, &node.hidden_tables).await;
    let names: Vec<&str> = tables.iter().map(|t| t.spec().name).collect();
    info!("Node ready; tables enabled: {names:?}");

    Ok(())
}
