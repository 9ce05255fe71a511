//! TCP endpoint: one engine per connection, one reply line per request.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::sync::oneshot;

use boundary_life::adapter::{run_server, ServerConfig};

async fn start_server() -> SocketAddr {
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        max_line_bytes: 4096,
    };
    let (ready_tx, ready_rx) = oneshot::channel();
    tokio::spawn(async move {
        let _ = run_server(config, Some(ready_tx)).await;
    });
    tokio::time::timeout(Duration::from_secs(2), ready_rx)
        .await
        .expect("server did not signal ready")
        .expect("ready channel dropped")
}

struct Conn {
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
}

impl Conn {
    async fn open(addr: SocketAddr) -> Self {
        let stream = TcpStream::connect(addr).await.expect("connect failed");
        let (read_half, writer) = stream.into_split();
        Self {
            lines: BufReader::new(read_half).lines(),
            writer,
        }
    }

    async fn call(&mut self, line: &str) -> serde_json::Value {
        self.call_bytes(line.as_bytes()).await
    }

    async fn call_bytes(&mut self, line: &[u8]) -> serde_json::Value {
        self.writer.write_all(line).await.unwrap();
        self.writer.write_all(b"\n").await.unwrap();
        self.writer.flush().await.unwrap();

        let reply = tokio::time::timeout(Duration::from_secs(2), self.lines.next_line())
            .await
            .expect("reply timed out")
            .unwrap()
            .expect("connection closed");
        serde_json::from_str(&reply).unwrap()
    }
}

const BLINKER_INIT: &str = r#"{"command":"init","cells":[0,0,0,1,1,1,0,0,0],"activeCells":[3,4,5],"columnCount":3,"rowCount":3,"boundaryRows":0,"boundaryType":"nothing","pulseWidth":5}"#;
const STEP: &str = r#"{"command":"step","boundaryType":"nothing","pulseWidth":5,"pulseOffset":0}"#;

fn sorted_cells(v: &serde_json::Value) -> Vec<u64> {
    let mut cells: Vec<u64> = v["activeCells"]
        .as_array()
        .expect("activeCells")
        .iter()
        .map(|c| c.as_u64().unwrap())
        .collect();
    cells.sort_unstable();
    cells
}

#[tokio::test]
async fn init_step_toggle_round_trip() {
    let addr = start_server().await;
    let mut conn = Conn::open(addr).await;

    let v = conn.call(BLINKER_INIT).await;
    assert_eq!(v["liveCellCount"], 3);

    let v = conn.call(STEP).await;
    assert_eq!(sorted_cells(&v), vec![1, 4, 7]);

    let v = conn.call(r#"{"command":"toggle","index":0}"#).await;
    assert_eq!(sorted_cells(&v), vec![0, 1, 4, 7]);
}

#[tokio::test]
async fn bad_lines_get_errors_and_the_connection_survives() {
    let addr = start_server().await;
    let mut conn = Conn::open(addr).await;

    let v = conn.call("not json").await;
    assert_eq!(v["error"]["code"], "parse_error");

    let v = conn.call(STEP).await;
    assert_eq!(v["error"]["code"], "not_initialized");

    let long = format!(r#"{{"command":"toggle","index":0,"pad":"{}"}}"#, "x".repeat(5000));
    let v = conn.call(&long).await;
    assert_eq!(v["error"]["code"], "line_too_long");

    let v = conn.call(BLINKER_INIT).await;
    assert_eq!(v["liveCellCount"], 3);
}

#[tokio::test]
async fn non_utf8_line_gets_an_error_and_the_connection_survives() {
    let addr = start_server().await;
    let mut conn = Conn::open(addr).await;

    let v = conn.call_bytes(b"{\"command\":\"toggle\",\"index\":\xff}").await;
    assert_eq!(v["error"]["code"], "invalid_utf8");

    // A multibyte character cut by the line cap is still answered.
    let long = format!(r#"{{"pad":"{}"}}"#, "é".repeat(3000));
    let v = conn.call(&long).await;
    assert_eq!(v["error"]["code"], "line_too_long");

    let v = conn.call(BLINKER_INIT).await;
    assert_eq!(v["liveCellCount"], 3);
}

#[tokio::test]
async fn connections_do_not_share_engines() {
    let addr = start_server().await;
    let mut a = Conn::open(addr).await;
    let mut b = Conn::open(addr).await;

    assert_eq!(a.call(BLINKER_INIT).await["liveCellCount"], 3);
    let v = b.call(STEP).await;
    assert_eq!(v["error"]["code"], "not_initialized");

    let v = a.call(STEP).await;
    assert_eq!(sorted_cells(&v), vec![1, 4, 7]);
}
