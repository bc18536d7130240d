// Cycle de vie : expiration des routes et réaction aux changements de lien

use log::{debug, info, warn};

use super::{DvRouter, Environment};
use crate::types::{Expiry, Latency, PortId, Timestamp};

impl<E: Environment> DvRouter<E> {
    /// Ages out entries whose expiry is at or before `now`.
    ///
    /// With `poison_expired`, an expired entry is kept on its port as
    /// unreachable for another TTL instead of being removed.
    pub fn tick(&mut self, now: Timestamp) {
        for destination in self.table.expired(now) {
            let poisoned = match self.table.get(&destination) {
                Some(entry) if self.config.poison_expired => {
                    let mut entry = entry.clone();
                    entry.latency = Latency::Unreachable;
                    entry.expire_at = Expiry::after(now, self.config.route_ttl);
                    Some(entry)
                }
                _ => None,
            };

            match poisoned {
                Some(entry) => {
                    info!("Route expired, poisoning: {} (port {})", destination, entry.port);
                    self.table.insert(entry);
                }
                None => {
                    info!("Route expired, removing: {}", destination);
                    self.table.remove(&destination);
                }
            }
        }
    }

    /// Periodic round: expiry sweep followed by a full forced advertisement.
    pub fn periodic_update(&mut self, now: Timestamp) {
        self.tick(now);
        self.advertise(true, None);
    }

    pub fn on_link_up(&mut self, port: PortId, latency: u32) {
        if let Some(previous) = self.links.add_link(port, latency) {
            warn!("Link on port {} was already up (latency {} -> {})", port, previous, latency);
        } else {
            info!("Link UP on port {} (latency: {})", port, latency);
        }

        if self.config.advertise_on_link_up {
            self.advertise(true, Some(port));
        }
    }

    pub fn on_link_down(&mut self, port: PortId) {
        match self.links.remove_link(port) {
            Some(_) => info!("Link DOWN on port {}", port),
            None => debug!("Link down on port {} which was not up", port),
        }

        let affected = self.table.routes_via(port);
        if affected.is_empty() {
            return;
        }

        if self.config.poison_on_link_down {
            let expire_at = Expiry::after(self.env.now(), self.config.route_ttl);
            for destination in &affected {
                if let Some(entry) = self.table.get(destination) {
                    let mut entry = entry.clone();
                    entry.latency = Latency::Unreachable;
                    entry.expire_at = expire_at;
                    info!("Route poisoning: {} -> unreachable", destination);
                    self.table.insert(entry);
                }
            }
            self.advertise(false, None);
        } else {
            for destination in &affected {
                info!("Removing route {} (port {} down)", destination, port);
                self.table.remove(destination);
            }
        }
    }
}
