pub mod network_manager;
pub mod probe;
pub mod resolv_conf;
pub mod resolved;
pub mod system_dns;

pub use network_manager::NetworkManagerApplier;
pub use probe::NslookupProbe;
pub use resolv_conf::ResolvConfApplier;
pub use resolved::ResolvedApplier;
pub use system_dns::HostDnsReader;
