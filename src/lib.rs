// This file defines the library interface for the distance-vector router, exporting the node and its daemon.

pub mod types;
pub mod error;
pub mod core;
pub mod router;
pub mod protocol;
pub mod utils;
pub mod read_config;
pub mod server;
pub mod init;
pub mod tasks;
pub mod packet_loop;

pub use error::{AppError, Result};
pub use router::{DvRouter, Environment, Outbound, Outbox};
pub use types::{DataPacket, Destination, Expiry, Latency, PortId, RouteEntry, Timestamp, INFINITE_METRIC};
pub use utils::config::RouterConfig;
