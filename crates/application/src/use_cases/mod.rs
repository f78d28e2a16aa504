pub mod dns;
pub mod forwards;
pub mod tunnels;

pub use dns::{
    ApplyDnsUseCase, AppliedDns, DnsScanReport, DnsStatus, GetDnsStatusUseCase,
    MeasureLatencyUseCase, ScanAndApplyDnsUseCase, ScheduleDnsCheckUseCase,
    ScoreCandidatesUseCase, DNS_CHECK_TASK,
};
pub use forwards::{
    AddForwardsUseCase, ListForwardsUseCase, ReloadForwardsUseCase, RemoveForwardsUseCase,
    SetRemoteTargetUseCase, StartForwardsUseCase, SwitchForwardModeUseCase, FORWARD_DAEMON_UNIT,
};
pub use tunnels::{
    ApplyReport, ApplyTunnelsUseCase, CreateTunnelUseCase, DeleteTunnelUseCase, GetPeersUseCase,
    ListTunnelsUseCase, RestartTunnelUseCase, ScheduleTunnelRestartUseCase, TunnelSummary,
    TUNNEL_RESTART_TASK,
};
