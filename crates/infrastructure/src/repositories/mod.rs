pub mod dns_selection_repository;
pub mod global_state_repository;
pub mod tunnel_repository;
pub mod yaml_store;

pub use dns_selection_repository::YamlDnsSelectionRepository;
pub use global_state_repository::YamlGlobalStateRepository;
pub use tunnel_repository::YamlTunnelRepository;
pub use yaml_store::YamlDocument;
