// Moteur d'annonces : split horizon, poison reverse et suppression des doublons

use log::{debug, trace};

use super::{DvRouter, Environment};
use crate::types::{Latency, PortId};

impl<E: Environment> DvRouter<E> {
    /// Advertises the table on every up port, or only on `only_port`.
    ///
    /// Unless `force` is set, a value already sent on a port for a
    /// destination is not sent again.
    pub fn advertise(&mut self, force: bool, only_port: Option<PortId>) {
        let ports = match only_port {
            Some(port) => vec![port],
            None => self.links.all_ports(),
        };
        let ceiling = self.ceiling();
        let mut sent = 0usize;

        for entry in self.table.iter() {
            for &port in &ports {
                let latency = if port == entry.port {
                    if self.config.split_horizon {
                        continue;
                    } else if self.config.poison_reverse {
                        Latency::Unreachable
                    } else {
                        entry.latency.capped(ceiling)
                    }
                } else {
                    entry.latency.capped(ceiling)
                };

                if !self.history.should_send(port, &entry.destination, latency, force) {
                    trace!("Suppressed {} ({}) on port {}", entry.destination, latency, port);
                    continue;
                }
                self.env.send_advertisement(port, &entry.destination, latency);
                self.history.record(port, &entry.destination, latency);
                sent += 1;
            }
        }

        if sent > 0 {
            debug!("[SEND] {} advertisement(s) (forced: {}, ports: {:?})", sent, force, ports);
        }
    }
}
