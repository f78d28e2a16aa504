//! Non-interactive entry points, run by systemd and cron.
mod apply;
mod dns_check;
mod forward_daemon;

pub use apply::apply;
pub use dns_check::dns_check;
pub use forward_daemon::forward_daemon;
