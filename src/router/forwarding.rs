use log::debug;

use super::{DvRouter, Environment};
use crate::types::{DataPacket, PortId};

impl<E: Environment> DvRouter<E> {
    /// Forwards `packet` on the port of its destination's route.
    ///
    /// Unknown and unreachable destinations are dropped silently.
    pub fn on_data_packet(&mut self, packet: DataPacket, in_port: PortId) {
        let out_port = match self.table.get(&packet.destination) {
            Some(entry) if entry.latency.is_reachable() => entry.port,
            Some(_) => {
                debug!("Dropping packet to {} (unreachable, from port {})", packet.destination, in_port);
                return;
            }
            None => {
                debug!("Dropping packet to {} (no route, from port {})", packet.destination, in_port);
                return;
            }
        };
        self.env.forward(packet, out_port);
    }
}
