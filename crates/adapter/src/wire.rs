//! Wire module - line-delimited JSON framing for engine messages
//!
//! One request per line in, one response per line out. A response is either
//! the serialized [`Reply`] or an error object:
//!
//! ```text
//! {"error":{"code":"parse_error","message":"missing field `index`"}}
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::{Command, EngineError, Outcome, Reply};

/// Failures while decoding or writing a line.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed command: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("empty line")]
    Empty,

    #[error("request line longer than {0} bytes")]
    LineTooLong(usize),

    #[error("request line is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProtocolError {
    pub fn code(&self) -> &'static str {
        match self {
            ProtocolError::Malformed(_) => "parse_error",
            ProtocolError::Empty => "empty_line",
            ProtocolError::LineTooLong(_) => "line_too_long",
            ProtocolError::InvalidUtf8(_) => "invalid_utf8",
            ProtocolError::Io(_) => "io_error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// Error response line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub error: ErrorBody,
}

impl ErrorMessage {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                code: code.to_string(),
                message: message.into(),
            },
        }
    }
}

/// Any response line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Reply(Reply),
    Error(ErrorMessage),
}

/// Parse one input line into a command.
pub fn decode_command(line: &str) -> Result<Command, ProtocolError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ProtocolError::Empty);
    }
    Ok(serde_json::from_str(line)?)
}

/// Parse one raw input line. Bytes that are not UTF-8 are a protocol error,
/// not an I/O failure, so the connection can answer and carry on.
pub fn decode_line(line: &[u8]) -> Result<Command, ProtocolError> {
    decode_command(std::str::from_utf8(line)?)
}

/// Serialize an engine outcome as one line (no trailing newline).
pub fn encode_outcome(outcome: &Outcome) -> Result<String, ProtocolError> {
    match outcome {
        Ok(reply) => Ok(serde_json::to_string(reply)?),
        Err(e) => encode_engine_error(e),
    }
}

pub fn encode_engine_error(err: &EngineError) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(&ErrorMessage::new(err.code(), err.to_string()))?)
}

pub fn encode_protocol_error(err: &ProtocolError) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(&ErrorMessage::new(err.code(), err.to_string()))?)
}

/// Parse one response line (client side).
pub fn decode_response(line: &str) -> Result<Response, ProtocolError> {
    Ok(serde_json::from_str(line.trim())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_toggle() {
        let cmd = decode_command(r#"  {"command":"toggle","index":12}  "#).unwrap();
        assert_eq!(cmd, Command::Toggle { index: 12 });
    }

    #[test]
    fn rejects_blank_and_garbage() {
        assert!(matches!(decode_command("   "), Err(ProtocolError::Empty)));
        assert!(matches!(
            decode_command(r#"{"command":"explode"}"#),
            Err(ProtocolError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_non_utf8_bytes() {
        let err = decode_line(b"{\"command\":\"toggle\",\"index\":\xff}\n").unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidUtf8(_)));
        assert_eq!(err.code(), "invalid_utf8");

        let cmd = decode_line(b"{\"command\":\"toggle\",\"index\":3}\n").unwrap();
        assert_eq!(cmd, Command::Toggle { index: 3 });
    }

    #[test]
    fn error_lines_carry_codes() {
        let line = encode_outcome(&Err(EngineError::NotInitialized)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["error"]["code"], "not_initialized");
    }

    #[test]
    fn responses_decode_by_shape() {
        let ok = decode_response(r#"{"activeCells":[1,2],"liveCellCount":2}"#).unwrap();
        assert_eq!(ok, Response::Reply(Reply::new(vec![1, 2])));

        let err = decode_response(r#"{"error":{"code":"busy","message":"x"}}"#).unwrap();
        assert!(matches!(err, Response::Error(e) if e.error.code == "busy"));
    }
}
