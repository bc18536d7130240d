use std::error::Error as StdError;

use log::info;

use dv_router::read_config::{load_node_config, read_router_config};
use dv_router::server::RouterServer;
use dv_router::utils::init_logger;

/// Point d'entrée principal du programme
#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn StdError>> {
    init_logger();

    // Chemin explicite, sinon conf/config_<hostname>.toml
    let config = match std::env::args().nth(1) {
        Some(path) => load_node_config(path)?,
        None => read_router_config()?,
    };
    info!("Starting router {} with {} link(s)", config.name, config.links.len());

    let server = RouterServer::bind(config).await?;
    server.run().await?;
    Ok(())
}
