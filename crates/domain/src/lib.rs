//! VortexL2 Domain Layer
pub mod config;
pub mod dns_candidate;
pub mod dns_score;
pub mod dns_selection;
pub mod errors;
pub mod forward;
pub mod peer;
pub mod schedule;
pub mod tunnel;

pub use config::{CliOverrides, Config};
pub use dns_candidate::{default_catalog, normalize_catalog, CandidateServer};
pub use dns_score::{pick_best, round_tenth, ProbeResult, ScoreResult};
pub use dns_selection::DnsSelection;
pub use errors::DomainError;
pub use forward::{parse_port_list, BatchOutcome, ForwardEntry, ForwardMode, ForwardStatus};
pub use peer::PeerInfo;
pub use schedule::{CronInterval, ScheduledTask, ServiceUnit};
pub use tunnel::{EasyTierTunnel, Forwardable, L2tpTunnel, TunnelConfig, TunnelMode};
