mod forward_drivers;
mod tunnel_runtimes;

pub use forward_drivers::ForwardDrivers;
pub use tunnel_runtimes::TunnelRuntimes;
