//! Adapter crate - the engine protocol over TCP
//!
//! Lets a host in another process drive a step engine using the same
//! commands as in-process hosts, framed as line-delimited JSON.
//!
//! # Protocol Flow
//!
//! ```text
//! Client -> Server: {"command":"init","cells":[...],"activeCells":[...],"columnCount":64,...}
//! Server -> Client: {"activeCells":[...],"liveCellCount":812}
//! Client -> Server: {"command":"step","boundaryType":"pulse","pulseWidth":5,"pulseOffset":0}
//! Server -> Client: {"activeCells":[...],"liveCellCount":797}
//! Client -> Server: {"command":"toggle","index":700}
//! Server -> Client: {"activeCells":[...],"liveCellCount":798}
//! ```
//!
//! Each connection owns an independent engine. A bad line gets an error
//! object back and the connection stays open.
//!
//! # Environment Variables
//!
//! - `LIFE_ENGINE_HOST`: bind address (default: "127.0.0.1")
//! - `LIFE_ENGINE_PORT`: port number (default: 7878)
//! - `LIFE_ENGINE_MAX_LINE`: longest accepted request line in bytes (default: 64 MiB)
//!
//! # Testing
//!
//! ```bash
//! nc 127.0.0.1 7878
//! {"command":"init","cells":[0,0,0,1,1,1,0,0,0],"activeCells":[3,4,5],"columnCount":3,"rowCount":3,"boundaryRows":0,"boundaryType":"nothing","pulseWidth":5}
//! ```

pub mod server;
pub mod wire;

pub use boundary_life_engine as engine;
pub use boundary_life_types as types;

pub use server::{run_server, ServerConfig};
pub use wire::{
    decode_command, decode_line, decode_response, encode_outcome, ErrorMessage, ProtocolError,
    Response,
};
