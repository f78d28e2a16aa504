use super::Adapters;
use std::sync::Arc;
use std::time::Duration;
use vortexl2_application::use_cases::{
    AddForwardsUseCase, ApplyDnsUseCase, ApplyTunnelsUseCase, CreateTunnelUseCase,
    DeleteTunnelUseCase, GetDnsStatusUseCase, GetPeersUseCase, ListForwardsUseCase,
    ListTunnelsUseCase, MeasureLatencyUseCase, ReloadForwardsUseCase, RemoveForwardsUseCase,
    RestartTunnelUseCase, ScanAndApplyDnsUseCase, ScheduleDnsCheckUseCase,
    ScheduleTunnelRestartUseCase, ScoreCandidatesUseCase, SetRemoteTargetUseCase, StartForwardsUseCase,
    SwitchForwardModeUseCase,
};
use vortexl2_domain::{default_catalog, normalize_catalog, Config};

pub struct UseCases {
    pub scan_dns: Arc<ScanAndApplyDnsUseCase>,
    pub dns_status: Arc<GetDnsStatusUseCase>,
    pub schedule_dns: Arc<ScheduleDnsCheckUseCase>,

    pub add_forwards: Arc<AddForwardsUseCase>,
    pub remove_forwards: Arc<RemoveForwardsUseCase>,
    pub list_forwards: Arc<ListForwardsUseCase>,
    pub start_forwards: Arc<StartForwardsUseCase>,
    pub reload_forwards: Arc<ReloadForwardsUseCase>,
    pub switch_forward_mode: Arc<SwitchForwardModeUseCase>,
    pub set_remote_target: Arc<SetRemoteTargetUseCase>,

    pub create_tunnel: Arc<CreateTunnelUseCase>,
    pub delete_tunnel: Arc<DeleteTunnelUseCase>,
    pub list_tunnels: Arc<ListTunnelsUseCase>,
    pub restart_tunnel: Arc<RestartTunnelUseCase>,
    pub get_peers: Arc<GetPeersUseCase>,
    pub apply_tunnels: Arc<ApplyTunnelsUseCase>,
    pub schedule_restart: Arc<ScheduleTunnelRestartUseCase>,
}

impl UseCases {
    pub fn new(config: &Config, a: &Adapters) -> Self {
        let binary = config.paths.self_binary.to_string_lossy().into_owned();

        let measure = Arc::new(MeasureLatencyUseCase::new(
            a.probe.clone(),
            Duration::from_millis(config.dns.probe_timeout_ms),
            config.dns.probe_repetitions,
        ));
        let score = Arc::new(ScoreCandidatesUseCase::new(
            measure,
            &config.dns.validation_domains(),
            config.dns.effective_workers(),
        ));
        let apply_dns = Arc::new(ApplyDnsUseCase::new(
            a.dns_appliers.clone(),
            a.dns_selection.clone(),
        ));

        Self {
            scan_dns: Arc::new(ScanAndApplyDnsUseCase::new(
                normalize_catalog(&default_catalog()),
                score,
                apply_dns,
            )),
            dns_status: Arc::new(GetDnsStatusUseCase::new(
                a.dns_reader.clone(),
                a.dns_selection.clone(),
                a.scheduler.clone(),
            )),
            schedule_dns: Arc::new(ScheduleDnsCheckUseCase::new(
                a.scheduler.clone(),
                a.dns_selection.clone(),
                &binary,
            )),

            add_forwards: Arc::new(AddForwardsUseCase::new(
                a.tunnels.clone(),
                a.state.clone(),
                a.drivers.clone(),
            )),
            remove_forwards: Arc::new(RemoveForwardsUseCase::new(
                a.tunnels.clone(),
                a.state.clone(),
                a.drivers.clone(),
            )),
            list_forwards: Arc::new(ListForwardsUseCase::new(
                a.tunnels.clone(),
                a.state.clone(),
                a.drivers.clone(),
            )),
            start_forwards: Arc::new(StartForwardsUseCase::new(
                a.state.clone(),
                a.drivers.clone(),
            )),
            reload_forwards: Arc::new(ReloadForwardsUseCase::new(
                a.state.clone(),
                a.drivers.clone(),
            )),
            switch_forward_mode: Arc::new(SwitchForwardModeUseCase::new(
                a.state.clone(),
                a.drivers.clone(),
                a.supervisor.clone(),
                &binary,
            )),
            set_remote_target: Arc::new(SetRemoteTargetUseCase::new(
                a.tunnels.clone(),
                a.state.clone(),
                a.drivers.clone(),
            )),

            create_tunnel: Arc::new(CreateTunnelUseCase::new(
                a.tunnels.clone(),
                a.runtimes.clone(),
            )),
            delete_tunnel: Arc::new(DeleteTunnelUseCase::new(
                a.tunnels.clone(),
                a.state.clone(),
                a.drivers.clone(),
                a.runtimes.clone(),
            )),
            list_tunnels: Arc::new(ListTunnelsUseCase::new(
                a.tunnels.clone(),
                a.state.clone(),
                a.runtimes.clone(),
            )),
            restart_tunnel: Arc::new(RestartTunnelUseCase::new(
                a.tunnels.clone(),
                a.runtimes.clone(),
            )),
            get_peers: Arc::new(GetPeersUseCase::new(a.tunnels.clone(), a.runtimes.clone())),
            apply_tunnels: Arc::new(ApplyTunnelsUseCase::new(
                a.tunnels.clone(),
                a.state.clone(),
                a.drivers.clone(),
                a.runtimes.clone(),
            )),
            schedule_restart: Arc::new(ScheduleTunnelRestartUseCase::new(
                a.scheduler.clone(),
                a.tunnels.clone(),
                a.runtimes.clone(),
            )),
        }
    }
}
