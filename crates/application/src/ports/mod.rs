mod dns_apply;
mod dns_selection_repository;
mod forward_driver;
mod global_state_repository;
mod port_inspector;
mod resolver_probe;
mod scan_observer;
mod scheduler;
mod service_supervisor;
mod system_dns_reader;
mod tunnel_repository;
mod tunnel_runtime;

pub use dns_apply::DnsApplyMechanism;
pub use dns_selection_repository::DnsSelectionRepository;
pub use forward_driver::ForwardDriver;
pub use global_state_repository::GlobalStateRepository;
pub use port_inspector::{ListenerInfo, PortInspector};
pub use resolver_probe::ResolverProbe;
pub use scan_observer::{NoopScanObserver, ScanEvent, ScanObserver};
pub use scheduler::Scheduler;
pub use service_supervisor::ServiceSupervisor;
pub use system_dns_reader::SystemDnsReader;
pub use tunnel_repository::TunnelRepository;
pub use tunnel_runtime::TunnelRuntime;
