pub mod protocol_server;

pub use protocol_server::{AppState, RouterServer};
