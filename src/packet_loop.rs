use std::net::SocketAddr;
use std::sync::Arc;

use log::{debug, error, warn};

use crate::error::Result;
use crate::protocol::{PacketParser, WireMessage};
use crate::server::AppState;

pub async fn main_loop(state: Arc<AppState>) -> Result<()> {
    let mut buf = [0; 65_535];
    loop {
        let (len, src_addr) = state.socket.recv_from(&mut buf).await?;
        debug!("Received {} bytes from {}", len, src_addr);
        if let Err(e) = handle_datagram(&state, &buf[..len], src_addr).await {
            error!("Failed to handle datagram from {}: {}", src_addr, e);
        }
    }
}

/// Decodes one datagram and runs the matching entry point.
///
/// Router links come up on the first datagram heard from the neighbor.
pub async fn handle_datagram(state: &Arc<AppState>, data: &[u8], src_addr: SocketAddr) -> Result<()> {
    let message = PacketParser::parse_message(data)?;
    if !PacketParser::validate_message(&message) {
        warn!("Ignoring invalid message from {}", src_addr);
        return Ok(());
    }

    match message {
        WireMessage::Control { command } => {
            debug!("[RECV] control '{}' from {}", command, src_addr);
            let body = state.control(&command).await;
            return state.send_to(&WireMessage::ControlResponse { body }, src_addr).await;
        }
        WireMessage::ControlResponse { .. } => {
            debug!("Ignoring control response from {}", src_addr);
            return Ok(());
        }
        _ => {}
    }

    let (port, link_latency) = match state.node.link_to(&src_addr) {
        Some(link) => (link.port, link.latency),
        None => {
            warn!("Ignoring message from unknown peer {}", src_addr);
            return Ok(());
        }
    };
    state.mark_heard(port).await;

    state
        .dispatch(move |router| {
            if !router.links().is_up(port) {
                router.on_link_up(port, link_latency);
            }
            match message {
                WireMessage::Advertisement { destination, latency } => {
                    debug!("[RECV] {} ({}) on port {}", destination, latency, port);
                    router.on_advertisement(destination, latency, port)
                }
                WireMessage::Data(packet) => {
                    router.on_data_packet(packet, port);
                    Ok(())
                }
                WireMessage::Control { .. } | WireMessage::ControlResponse { .. } => Ok(()),
            }
        })
        .await
}
