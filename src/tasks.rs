use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{error, warn};
use rand::Rng;

use crate::server::AppState;
use crate::types::PortId;

/// Periodic round every `timer_interval_secs` plus a random jitter.
pub fn spawn_timer_task(state: Arc<AppState>) {
    tokio::spawn(async move {
        let base = Duration::from_secs(state.node.timer_interval_secs);
        loop {
            let jitter = rand::thread_rng().gen_range(0..=state.node.timer_jitter_ms);
            tokio::time::sleep(base + Duration::from_millis(jitter)).await;

            let now = state.now();
            if let Err(e) = state
                .dispatch(|router| {
                    router.periodic_update(now);
                    Ok(())
                })
                .await
            {
                error!("Periodic update failed: {}", e);
            }
        }
    });
}

/// Takes down router links whose neighbor has been silent for `link_timeout_secs`.
pub fn spawn_link_timeout_task(state: Arc<AppState>) {
    tokio::spawn(async move {
        let timeout = Duration::from_secs(state.node.link_timeout_secs);
        let mut interval = tokio::time::interval((timeout / 2).max(Duration::from_secs(1)));
        loop {
            interval.tick().await;
            check_link_timeouts(&state, timeout).await;
        }
    });
}

/// Takes down every router link silent for longer than `timeout`.
///
/// The last-heard map stays locked from the silence check until the link is
/// down, so a datagram marked heard in between keeps its link up.
pub async fn check_link_timeouts(state: &Arc<AppState>, timeout: Duration) {
    let router_ports: Vec<PortId> = state
        .node
        .links
        .iter()
        .filter(|link| link.host.is_none())
        .map(|link| link.port)
        .collect();

    for port in router_ports {
        let last_heard = state.last_heard.lock().await;
        let silent = last_heard
            .get(&port)
            .map_or(false, |heard| Instant::now().duration_since(*heard) > timeout);
        if !silent {
            continue;
        }

        let result = state
            .dispatch(|router| {
                if router.links().is_up(port) {
                    warn!("Neighbor on port {} is DOWN (timeout)", port);
                    router.on_link_down(port);
                }
                Ok(())
            })
            .await;
        drop(last_heard);

        if let Err(e) = result {
            error!("Failed to take down port {}: {}", port, e);
        }
    }
}
