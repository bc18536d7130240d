// Initialisation du logger

use log::debug;

/// Defaults `RUST_LOG` to `info` and installs `env_logger`.
///
/// A second call leaves the installed logger in place.
pub fn init_logger() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    if let Err(e) = env_logger::try_init() {
        debug!("Logger already installed: {}", e);
    }
}
