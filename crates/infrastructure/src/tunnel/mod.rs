pub mod easytier;
pub mod l2tp;
pub mod peer_table;

pub use easytier::EasyTierRuntime;
pub use l2tp::L2tpRuntime;
pub use peer_table::parse_peer_table;
