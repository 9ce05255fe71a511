//! Protocol module - messages exchanged between host and engine
//!
//! Every request is a [`Command`]; every completed request produces exactly one
//! [`Reply`]. Both serialize to the JSON shapes used by out-of-process hosts:
//!
//! ```text
//! {"command":"init","cells":[0,1,..],"activeCells":[1,..],"columnCount":4,"rowCount":4,
//!  "boundaryRows":1,"boundaryType":"pulse","pulseWidth":5,"pulseOffset":0}
//! {"command":"step","boundaryType":"shift","pulseWidth":5,"pulseOffset":3}
//! {"command":"toggle","index":17}
//! {"activeCells":[5,6,9],"liveCellCount":3}
//! ```
//!
//! `pulseOffset` may be omitted and defaults to 0. Within the process the
//! `init` cell buffer is moved through the channel, never copied.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::core::BoundaryParams;
use crate::types::BoundaryType;

/// Host → engine request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum Command {
    /// Replace all engine state. Replies without advancing a generation.
    #[serde(rename_all = "camelCase")]
    Init {
        cells: Vec<u8>,
        active_cells: Vec<u32>,
        column_count: u32,
        row_count: u32,
        boundary_rows: u32,
        #[serde(with = "wire_boundary")]
        boundary_type: BoundaryType,
        pulse_width: NonZeroU32,
        #[serde(default)]
        pulse_offset: i64,
    },
    /// Advance one generation with the supplied boundary parameters.
    #[serde(rename_all = "camelCase")]
    Step {
        #[serde(with = "wire_boundary")]
        boundary_type: BoundaryType,
        pulse_width: NonZeroU32,
        #[serde(default)]
        pulse_offset: i64,
    },
    /// Flip a single cell.
    Toggle { index: u32 },
}

impl Command {
    /// Build a `step` request from boundary parameters.
    pub fn step(params: BoundaryParams) -> Self {
        Command::Step {
            boundary_type: params.kind,
            pulse_width: params.pulse_width,
            pulse_offset: params.pulse_offset,
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Init { .. } => "init",
            Command::Step { .. } => "step",
            Command::Toggle { .. } => "toggle",
        }
    }
}

/// Engine → host reply to any command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub active_cells: Vec<u32>,
    /// Always `active_cells.len()`.
    pub live_cell_count: usize,
}

impl Reply {
    pub fn new(active_cells: Vec<u32>) -> Self {
        let live_cell_count = active_cells.len();
        Self {
            active_cells,
            live_cell_count,
        }
    }
}

/// Wire form of [`BoundaryType`].
///
/// The engine never rejects a step over the boundary kind: an unrecognized
/// name decodes as `nothing`, so it contributes no neighbours.
mod wire_boundary {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::types::BoundaryType;

    pub fn serialize<S>(kind: &BoundaryType, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(kind.as_str())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BoundaryType, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(BoundaryType::from_str(&s).unwrap_or_else(|| {
            log::warn!("unknown boundary type {:?}; treating as nothing", s);
            BoundaryType::Nothing
        }))
    }
}
