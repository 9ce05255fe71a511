//! Boundary Life engine server.
//!
//! Serves the init/step/toggle protocol as line-delimited JSON over TCP.
//! Each connection drives its own engine.
//!
//! ```bash
//! LIFE_ENGINE_PORT=7878 RUST_LOG=debug cargo run --bin life-engine-server
//! ```

use anyhow::Result;

use boundary_life::adapter::{run_server, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    boundary_life::init_logging("info", None)?;

    let config = ServerConfig::from_env();
    log::info!("engine server config: {:?}", config);

    tokio::select! {
        res = run_server(config, None) => res,
        _ = tokio::signal::ctrl_c() => {
            log::info!("shutting down");
            Ok(())
        }
    }
}
