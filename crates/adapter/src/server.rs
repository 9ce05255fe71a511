//! TCP server exposing the engine protocol to out-of-process hosts.
//!
//! Every connection gets its own engine task, so clients never share a grid.
//! Requests on a connection are handled strictly in order: the next line is
//! not read until the previous reply has been written.

use std::net::SocketAddr;

use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

use crate::engine::spawn_engine;
use crate::wire::{decode_line, encode_outcome, encode_protocol_error, ProtocolError};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Longest accepted request line in bytes (init payloads carry the whole grid).
    pub max_line_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7878,
            max_line_bytes: 64 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// Create from `LIFE_ENGINE_*` environment variables
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();
        let host = env::var("LIFE_ENGINE_HOST").unwrap_or(defaults.host);
        let port = env::var("LIFE_ENGINE_PORT")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.port);
        let max_line_bytes = env::var("LIFE_ENGINE_MAX_LINE")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.max_line_bytes);

        Self {
            host,
            port,
            max_line_bytes,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Accept connections forever.
///
/// When `ready_tx` is given, the bound address is sent on it once listening
/// (useful with port 0).
pub async fn run_server(
    config: ServerConfig,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.bind_addr()).await?;
    let bound = listener.local_addr()?;
    log::info!("engine server listening on {}", bound);
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let mut client_id_counter = 0usize;
    loop {
        let (socket, addr) = listener.accept().await?;
        client_id_counter += 1;
        let client_id = client_id_counter;
        log::info!("client {} connected from {}", client_id, addr);

        let max_line_bytes = config.max_line_bytes;
        tokio::spawn(async move {
            if let Err(e) = handle_client(socket, max_line_bytes).await {
                log::warn!("client {} error: {}", client_id, e);
            }
            log::info!("client {} disconnected", client_id);
        });
    }
}

/// Serve one connection until EOF.
async fn handle_client(socket: TcpStream, max_line_bytes: usize) -> Result<(), ProtocolError> {
    let (reader, mut writer) = socket.into_split();
    let mut reader = BufReader::new(reader);
    let (mut engine, engine_task) = spawn_engine();

    let mut line = Vec::new();
    loop {
        line.clear();
        let n = (&mut reader)
            .take(max_line_bytes as u64 + 1)
            .read_until(b'\n', &mut line)
            .await?;
        if n == 0 {
            break;
        }

        let terminated = line.last() == Some(&b'\n');
        let out = if n - usize::from(terminated) > max_line_bytes {
            log::warn!("dropping request line over {} bytes", max_line_bytes);
            if !terminated {
                // Skip the rest of the oversized line before reading the next one.
                let mut rest = Vec::new();
                reader.read_until(b'\n', &mut rest).await?;
            }
            encode_protocol_error(&ProtocolError::LineTooLong(max_line_bytes))?
        } else {
            match decode_line(&line) {
                Ok(command) => {
                    let outcome = engine.request(command).await;
                    encode_outcome(&outcome)?
                }
                Err(ProtocolError::Empty) => continue,
                Err(e) => {
                    log::warn!("bad request: {}", e);
                    encode_protocol_error(&e)?
                }
            }
        };

        writer.write_all(out.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }

    drop(engine);
    let _ = engine_task.await;
    Ok(())
}
