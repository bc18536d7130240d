pub mod logger;
pub mod config;

pub use logger::init_logger;
pub use config::RouterConfig;
