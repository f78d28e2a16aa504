pub mod dns;
pub mod errors;
pub mod forwarding;
pub mod logging;
pub mod paths;
pub mod root;

pub use dns::DnsScanConfig;
pub use errors::ConfigError;
pub use forwarding::ForwardingConfig;
pub use logging::LoggingConfig;
pub use paths::PathsConfig;
pub use root::{CliOverrides, Config};
