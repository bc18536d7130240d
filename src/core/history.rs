//! Advertisement history used to suppress redundant re-sends.
//!
//! Not routing state: a stale record only costs one suppressed send until
//! the next transmission on that port overwrites it.

use std::collections::HashMap;

use crate::types::{Destination, Latency, PortId};

#[derive(Debug, Default, Clone)]
pub struct AdvertisementHistory {
    sent: HashMap<(PortId, Destination), Latency>,
}

impl AdvertisementHistory {
    pub fn new() -> Self {
        AdvertisementHistory {
            sent: HashMap::new(),
        }
    }

    /// Last latency actually sent on `port` for `destination`.
    pub fn last_sent(&self, port: PortId, destination: &Destination) -> Option<Latency> {
        self.sent.get(&(port, destination.clone())).copied()
    }

    /// A send is redundant when it is not forced and repeats the last value sent.
    pub fn should_send(&self, port: PortId, destination: &Destination, latency: Latency, force: bool) -> bool {
        force || self.last_sent(port, destination) != Some(latency)
    }

    pub fn record(&mut self, port: PortId, destination: &Destination, latency: Latency) {
        self.sent.insert((port, destination.clone()), latency);
    }

    pub fn len(&self) -> usize {
        self.sent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sent.is_empty()
    }
}
