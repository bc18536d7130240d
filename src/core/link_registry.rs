// This file tracks the links that are currently up and the latency of each one.

use std::collections::BTreeMap;

use crate::error::{AppError, Result};
use crate::types::PortId;

/// Up links keyed by port. A port is present iff its link is up.
#[derive(Debug, Default, Clone)]
pub struct LinkRegistry {
    links: BTreeMap<PortId, u32>,
}

impl LinkRegistry {
    pub fn new() -> Self {
        LinkRegistry {
            links: BTreeMap::new(),
        }
    }

    /// Records the link as up. Returns the previous latency if the port was already up.
    pub fn add_link(&mut self, port: PortId, latency: u32) -> Option<u32> {
        self.links.insert(port, latency)
    }

    /// Records the link as down. Returns its latency if it was up.
    pub fn remove_link(&mut self, port: PortId) -> Option<u32> {
        self.links.remove(&port)
    }

    pub fn latency(&self, port: PortId) -> Result<u32> {
        self.links
            .get(&port)
            .copied()
            .ok_or(AppError::UnknownPort(port))
    }

    pub fn is_up(&self, port: PortId) -> bool {
        self.links.contains_key(&port)
    }

    /// Up ports in ascending order.
    pub fn all_ports(&self) -> Vec<PortId> {
        self.links.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
