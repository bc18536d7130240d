// This file serves as the core module: the per-node state the router owns.

pub mod link_registry;
pub mod routing_table;
pub mod history;

pub use link_registry::LinkRegistry;
pub use routing_table::RoutingTable;
pub use history::AdvertisementHistory;
