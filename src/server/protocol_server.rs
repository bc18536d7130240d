// This file implements the daemon around one router node: shared state, outbound delivery and control replies.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use log::{debug, error, info, warn};
use tokio::net::UdpSocket;
use tokio::sync::Mutex;

use crate::error::{AppError, Result};
use crate::protocol::{PacketParser, WireMessage};
use crate::read_config::NodeConfig;
use crate::router::{DvRouter, Outbound, Outbox};
use crate::types::{PortId, Timestamp};

/// État partagé du démon
pub struct AppState {
    pub node: NodeConfig,
    pub router: Mutex<DvRouter<Outbox>>,
    pub last_heard: Mutex<HashMap<PortId, Instant>>,
    pub socket: Arc<UdpSocket>,
    started: Instant,
}

impl AppState {
    /// Builds the node and brings up every host link with its static route.
    pub fn new(node: NodeConfig, socket: Arc<UdpSocket>) -> Result<Self> {
        let mut router = DvRouter::new(node.policy.clone(), Outbox::new(0))?;
        for link in &node.links {
            if let Some(host) = &link.host {
                router.on_link_up(link.port, link.latency);
                router.install_static(host.clone(), link.port)?;
            }
        }
        // Nothing to deliver yet: no router link is up.
        router.environment_mut().drain();

        Ok(AppState {
            node,
            router: Mutex::new(router),
            last_heard: Mutex::new(HashMap::new()),
            socket,
            started: Instant::now(),
        })
    }

    /// Seconds since the daemon started.
    pub fn now(&self) -> Timestamp {
        self.started.elapsed().as_secs()
    }

    /// Runs one event against the node, then delivers whatever it queued.
    pub async fn dispatch<F>(&self, event: F) -> Result<()>
    where
        F: FnOnce(&mut DvRouter<Outbox>) -> Result<()>,
    {
        let (result, outbound) = {
            let mut router = self.router.lock().await;
            router.environment_mut().set_time(self.now());
            let result = event(&mut *router);
            (result, router.environment_mut().drain())
        };
        self.deliver(outbound).await;
        result
    }

    pub async fn mark_heard(&self, port: PortId) {
        self.last_heard.lock().await.insert(port, Instant::now());
    }

    async fn deliver(&self, outbound: Vec<Outbound>) {
        for out in outbound {
            let port = out.port();
            let addr = match self.node.link(port) {
                Some(link) => link.neighbor,
                None => {
                    warn!("No neighbor configured on port {}, dropping outbound message", port);
                    continue;
                }
            };
            let message = match out {
                Outbound::Advertisement { destination, latency, .. } => {
                    debug!("[SEND] {} ({}) to {} on port {}", destination, latency, addr, port);
                    WireMessage::Advertisement { destination, latency }
                }
                Outbound::Data { packet, .. } => {
                    debug!("[FORWARD] packet for {} to {} on port {}", packet.destination, addr, port);
                    WireMessage::Data(packet)
                }
            };
            if let Err(e) = self.send_to(&message, addr).await {
                error!("Failed to send to {}: {}", addr, e);
            }
        }
    }

    pub async fn send_to(&self, message: &WireMessage, addr: SocketAddr) -> Result<()> {
        let serialized = PacketParser::serialize_message(message)?;
        self.socket.send_to(&serialized, addr).await?;
        Ok(())
    }

    /// Text reply for a `dv-cli` command.
    pub async fn control(&self, command: &str) -> String {
        let router = self.router.lock().await;
        match command.trim() {
            "routing-table" => router.table().to_string(),
            "links" => {
                let mut body = String::from("=== Links ===\n");
                for link in &self.node.links {
                    let state = if router.links().is_up(link.port) { "up" } else { "down" };
                    let _ = writeln!(
                        body,
                        "port {:<4} | {:<21} | latency {:<4} | {}{}",
                        link.port.0,
                        link.neighbor,
                        link.latency,
                        state,
                        link.host.as_ref().map(|h| format!(" (host {})", h)).unwrap_or_default()
                    );
                }
                body
            }
            "config" => toml::to_string_pretty(router.config())
                .unwrap_or_else(|e| format!("Failed to render config: {}", e)),
            other => format!("Unknown command: {} (routing-table, links, config)", other),
        }
    }
}

pub struct RouterServer {
    state: Arc<AppState>,
}

impl RouterServer {
    pub async fn bind(node: NodeConfig) -> Result<Self> {
        let socket = crate::init::init_socket(node.listen).await?;
        info!("Router {} bound to {}", node.name, node.listen);
        let state = Arc::new(AppState::new(node, socket)?);
        Ok(RouterServer { state })
    }

    pub fn state(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.state.socket.local_addr().map_err(AppError::from)
    }

    /// Starts the periodic tasks and serves datagrams until the socket fails.
    pub async fn run(&self) -> Result<()> {
        crate::tasks::spawn_timer_task(self.state());
        crate::tasks::spawn_link_timeout_task(self.state());
        crate::packet_loop::main_loop(self.state()).await
    }
}
