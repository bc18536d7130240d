// Définitions des structures et enums partagées

use serde::{Serialize, Deserialize};
use std::fmt;

/// Default cost ceiling. Any path cost at or above it is unreachable.
pub const INFINITE_METRIC: u32 = 16;

/// Seconds on the environment clock.
pub type Timestamp = u64;

/// Local identifier of an attached link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortId(pub u32);

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A routable destination (typically an attached host).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Destination(pub String);

impl Destination {
    pub fn new(name: impl Into<String>) -> Self {
        Destination(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Destination {
    fn from(name: &str) -> Self {
        Destination(name.to_string())
    }
}

/// Path cost. The derived order puts every finite cost below `Unreachable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Latency {
    Finite(u32),
    Unreachable,
}

impl Latency {
    /// Builds a latency from a raw cost, mapping anything at or above `ceiling` to `Unreachable`.
    pub fn clamped(cost: u64, ceiling: u32) -> Self {
        if cost >= u64::from(ceiling) {
            Latency::Unreachable
        } else {
            Latency::Finite(cost as u32)
        }
    }

    /// Cost of reaching the destination through a link of cost `link`.
    pub fn through(self, link: u32, ceiling: u32) -> Self {
        match self {
            Latency::Finite(cost) => Latency::clamped(u64::from(cost) + u64::from(link), ceiling),
            Latency::Unreachable => Latency::Unreachable,
        }
    }

    /// Re-applies the ceiling to an already built value.
    pub fn capped(self, ceiling: u32) -> Self {
        match self {
            Latency::Finite(cost) => Latency::clamped(u64::from(cost), ceiling),
            Latency::Unreachable => Latency::Unreachable,
        }
    }

    pub fn is_reachable(&self) -> bool {
        matches!(self, Latency::Finite(_))
    }
}

impl fmt::Display for Latency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Latency::Finite(cost) => write!(f, "{}", cost),
            Latency::Unreachable => write!(f, "unreachable"),
        }
    }
}

/// When a route ages out. `Never` sorts after every finite time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expiry {
    At(Timestamp),
    Never,
}

impl Expiry {
    pub fn after(now: Timestamp, ttl: u64) -> Self {
        Expiry::At(now.saturating_add(ttl))
    }

    pub fn is_expired(&self, now: Timestamp) -> bool {
        match self {
            Expiry::At(at) => *at <= now,
            Expiry::Never => false,
        }
    }
}

impl fmt::Display for Expiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expiry::At(at) => write!(f, "{}", at),
            Expiry::Never => write!(f, "never"),
        }
    }
}

/// Best known route to one destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub destination: Destination,
    pub port: PortId,
    pub latency: Latency,
    pub expire_at: Expiry,
}

/// Application payload routed hop by hop toward `destination`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataPacket {
    pub source: Destination,
    pub destination: Destination,
    pub payload: Vec<u8>,
}
