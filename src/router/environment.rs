// Interface entre le routeur et son environnement (envoi, horloge)

use crate::types::{DataPacket, Destination, Latency, PortId, Timestamp};

/// Everything a node needs from the outside world.
pub trait Environment {
    fn send_advertisement(&mut self, port: PortId, destination: &Destination, latency: Latency);

    fn forward(&mut self, packet: DataPacket, port: PortId);

    /// Monotonic clock reading.
    fn now(&self) -> Timestamp;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Advertisement {
        port: PortId,
        destination: Destination,
        latency: Latency,
    },
    Data {
        port: PortId,
        packet: DataPacket,
    },
}

impl Outbound {
    pub fn port(&self) -> PortId {
        match self {
            Outbound::Advertisement { port, .. } => *port,
            Outbound::Data { port, .. } => *port,
        }
    }
}

/// Queues outbound traffic for the driver to deliver after each event.
#[derive(Debug, Default, Clone)]
pub struct Outbox {
    now: Timestamp,
    queued: Vec<Outbound>,
}

impl Outbox {
    pub fn new(now: Timestamp) -> Self {
        Outbox {
            now,
            queued: Vec::new(),
        }
    }

    pub fn set_time(&mut self, now: Timestamp) {
        self.now = now;
    }

    pub fn advance(&mut self, secs: u64) {
        self.now = self.now.saturating_add(secs);
    }

    /// Takes everything queued so far, in send order.
    pub fn drain(&mut self) -> Vec<Outbound> {
        std::mem::take(&mut self.queued)
    }

    pub fn queued(&self) -> &[Outbound] {
        &self.queued
    }

    /// Queued advertisements as `(port, destination, latency)`.
    pub fn advertisements(&self) -> Vec<(PortId, Destination, Latency)> {
        self.queued
            .iter()
            .filter_map(|out| match out {
                Outbound::Advertisement { port, destination, latency } => {
                    Some((*port, destination.clone(), *latency))
                }
                Outbound::Data { .. } => None,
            })
            .collect()
    }

    /// Queued data packets with the port they leave on.
    pub fn forwarded(&self) -> Vec<(PortId, DataPacket)> {
        self.queued
            .iter()
            .filter_map(|out| match out {
                Outbound::Data { port, packet } => Some((*port, packet.clone())),
                Outbound::Advertisement { .. } => None,
            })
            .collect()
    }
}

impl Environment for Outbox {
    fn send_advertisement(&mut self, port: PortId, destination: &Destination, latency: Latency) {
        self.queued.push(Outbound::Advertisement {
            port,
            destination: destination.clone(),
            latency,
        });
    }

    fn forward(&mut self, packet: DataPacket, port: PortId) {
        self.queued.push(Outbound::Data { port, packet });
    }

    fn now(&self) -> Timestamp {
        self.now
    }
}
