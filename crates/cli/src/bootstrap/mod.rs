mod config;
mod logging;

pub use config::{ensure_root, load_config};
pub use logging::init_logging;
