pub mod forward_watchdog;
pub mod runner;

pub use forward_watchdog::ForwardWatchdogJob;
pub use runner::JobRunner;
