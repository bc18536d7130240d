// This file defines the messages the daemon exchanges with neighbors and with the control CLI.

use serde::{Deserialize, Serialize};

use crate::types::{DataPacket, Destination, Latency};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WireMessage {
    /// One route from the sender's table.
    Advertisement {
        destination: Destination,
        latency: Latency,
    },
    Data(DataPacket),
    /// Command from `dv-cli` (`routing-table`, `links`, `config`).
    Control {
        command: String,
    },
    ControlResponse {
        body: String,
    },
}
