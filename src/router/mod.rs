//! Distance-vector router node.
//!
//! A [`DvRouter`] owns its link registry, routing table and advertisement
//! history, and is driven one event at a time by an external driver through
//! its entry points:
//!
//! - [`DvRouter::install_static`]
//! - [`DvRouter::on_data_packet`]
//! - [`DvRouter::on_advertisement`]
//! - [`DvRouter::on_link_up`] / [`DvRouter::on_link_down`]
//! - [`DvRouter::tick`] and [`DvRouter::periodic_update`]
//!
//! Outbound traffic and the clock go through the [`Environment`] the node
//! was built with.

pub mod environment;

mod advertise;
mod forwarding;
mod lifecycle;
mod update;

pub use environment::{Environment, Outbound, Outbox};

use log::info;

use crate::core::{AdvertisementHistory, LinkRegistry, RoutingTable};
use crate::error::Result;
use crate::utils::config::RouterConfig;

pub struct DvRouter<E: Environment> {
    config: RouterConfig,
    links: LinkRegistry,
    table: RoutingTable,
    history: AdvertisementHistory,
    env: E,
}

impl<E: Environment> DvRouter<E> {
    /// Builds a node with no links and an empty table.
    ///
    /// Fails with `ConfigError` when the policy is inconsistent.
    pub fn new(config: RouterConfig, env: E) -> Result<Self> {
        config.validate()?;
        info!(
            "Router starting (ttl: {}s, split_horizon: {}, poison_reverse: {}, infinity: {})",
            config.route_ttl, config.split_horizon, config.poison_reverse, config.infinity
        );
        Ok(DvRouter {
            config,
            links: LinkRegistry::new(),
            table: RoutingTable::new(),
            history: AdvertisementHistory::new(),
            env,
        })
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn links(&self) -> &LinkRegistry {
        &self.links
    }

    pub fn table(&self) -> &RoutingTable {
        &self.table
    }

    pub fn history(&self) -> &AdvertisementHistory {
        &self.history
    }

    pub fn environment(&self) -> &E {
        &self.env
    }

    pub fn environment_mut(&mut self) -> &mut E {
        &mut self.env
    }

    fn ceiling(&self) -> u32 {
        self.config.infinity
    }
}
