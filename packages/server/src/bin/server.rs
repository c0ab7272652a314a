//! Room status server.
//!
//! Serves the participant count of one Jitsi room as JSON, backed by a cached
//! copy of the Prosody room census.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin peephole-server -- --room-name room1
//! PEEPHOLE_ROOM_NAME=room1 PEEPHOLE_HTTP_ADDR=:8080 XMPP_SERVER=localhost cargo run --bin peephole-server
//! ```

use std::sync::Arc;

use clap::Parser;
use peephole_server::{
    config::ServerConfig,
    infrastructure::census_client::HttpRoomCensusClient,
    ui::Server,
    usecase::{GetRoomStatusUseCase, RoomStatusCache},
};
use peephole_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let config = match ServerConfig::try_parse() {
        Ok(config) => config,
        Err(e) if e.use_stderr() => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
        // --help / --version
        Err(e) => e.exit(),
    };

    // Initialize dependencies in order:
    // 1. RoomCensusClient
    // 2. Cache and UseCase
    // 3. Server

    // 1. Create RoomCensusClient (HTTP implementation)
    let census_client = Arc::new(HttpRoomCensusClient::new(
        &config.census_host,
        config.census_port,
    ));
    let census_url = census_client.url().to_string();

    // 2. Create Cache and UseCase
    let cache = Arc::new(RoomStatusCache::new(
        census_client,
        config.room_name.clone(),
        config.cache_expiry,
    ));
    tracing::info!(
        "Reporting room '{}' from {} (cache expiry {:?})",
        cache.room_name(),
        census_url,
        cache.expiry()
    );
    let get_room_status_usecase = Arc::new(GetRoomStatusUseCase::new(cache));

    // 3. Create and run the server
    let (host, port) = config.listen_addr();
    let server = Server::new(get_room_status_usecase);
    if let Err(e) = server.run(host, port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
