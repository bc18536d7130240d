// Installation des routes statiques et relaxation Bellman-Ford

use log::{debug, info};

use super::{DvRouter, Environment};
use crate::error::Result;
use crate::types::{Destination, Expiry, Latency, PortId, RouteEntry};

impl<E: Environment> DvRouter<E> {
    /// Installs a never-expiring route to a directly attached destination.
    pub fn install_static(&mut self, destination: Destination, port: PortId) -> Result<()> {
        let link_latency = self.links.latency(port)?;
        let entry = RouteEntry {
            destination,
            port,
            latency: Latency::clamped(u64::from(link_latency), self.ceiling()),
            expire_at: Expiry::Never,
        };
        info!("Static route: {} -> port {} (latency: {})", entry.destination, port, entry.latency);
        self.table.insert(entry);
        Ok(())
    }

    /// Applies a neighbor's advertisement received on `in_port`.
    ///
    /// Accepted when the destination is new, when it comes from the current
    /// next hop (even if worse), or when it is strictly cheaper. An accepted
    /// update triggers a non-forced advertisement round.
    pub fn on_advertisement(&mut self, destination: Destination, latency: Latency, in_port: PortId) -> Result<()> {
        let link_latency = self.links.latency(in_port)?;
        let candidate = RouteEntry {
            destination,
            port: in_port,
            latency: latency.through(link_latency, self.ceiling()),
            expire_at: Expiry::after(self.env.now(), self.config.route_ttl),
        };

        let accept = match self.table.get(&candidate.destination) {
            None => true,
            Some(existing) if existing.port == in_port => true,
            Some(existing) => candidate.latency < existing.latency,
        };

        if !accept {
            debug!(
                "Rejected route {} via port {} (latency: {})",
                candidate.destination, in_port, candidate.latency
            );
            return Ok(());
        }

        info!(
            "Learned route {} -> port {} (latency: {})",
            candidate.destination, in_port, candidate.latency
        );
        self.table.insert(candidate);
        self.advertise(false, None);
        Ok(())
    }
}
