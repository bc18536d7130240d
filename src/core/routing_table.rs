// This file implements the routing table structure: one best-known route per destination.

use std::collections::BTreeMap;
use std::fmt;

use crate::types::{Destination, PortId, RouteEntry, Timestamp};

/// Destination to best-known route. Iteration order is the destination order.
#[derive(Debug, Default, Clone)]
pub struct RoutingTable {
    routes: BTreeMap<Destination, RouteEntry>,
}

impl RoutingTable {
    pub fn new() -> Self {
        RoutingTable {
            routes: BTreeMap::new(),
        }
    }

    /// Inserts or replaces the route for `entry.destination`, returning the previous one.
    pub fn insert(&mut self, entry: RouteEntry) -> Option<RouteEntry> {
        self.routes.insert(entry.destination.clone(), entry)
    }

    pub fn remove(&mut self, destination: &Destination) -> Option<RouteEntry> {
        self.routes.remove(destination)
    }

    pub fn get(&self, destination: &Destination) -> Option<&RouteEntry> {
        self.routes.get(destination)
    }

    pub fn contains(&self, destination: &Destination) -> bool {
        self.routes.contains_key(destination)
    }

    /// Destinations whose next hop is `port`.
    pub fn routes_via(&self, port: PortId) -> Vec<Destination> {
        self.routes
            .values()
            .filter(|entry| entry.port == port)
            .map(|entry| entry.destination.clone())
            .collect()
    }

    /// Destinations whose entry has expired at `now`.
    pub fn expired(&self, now: Timestamp) -> Vec<Destination> {
        self.routes
            .values()
            .filter(|entry| entry.expire_at.is_expired(now))
            .map(|entry| entry.destination.clone())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteEntry> {
        self.routes.values()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl fmt::Display for RoutingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Routing table ===")?;
        writeln!(f, "Destination     | Port | Latency     | Expires")?;
        writeln!(f, "----------------|------|-------------|--------")?;
        for entry in self.routes.values() {
            writeln!(
                f,
                "{:<15} | {:<4} | {:<11} | {}",
                entry.destination.as_str(),
                entry.port.0,
                entry.latency.to_string(),
                entry.expire_at
            )?;
        }
        Ok(())
    }
}
