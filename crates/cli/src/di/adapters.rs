use std::sync::Arc;
use std::time::Duration;
use vortexl2_application::ports::DnsApplyMechanism;
use vortexl2_application::services::{ForwardDrivers, TunnelRuntimes};
use vortexl2_domain::Config;
use vortexl2_infrastructure::dns::{
    HostDnsReader, NetworkManagerApplier, NslookupProbe, ResolvConfApplier, ResolvedApplier,
};
use vortexl2_infrastructure::forwarding::{HaproxyDriver, SocatDriver};
use vortexl2_infrastructure::repositories::{
    YamlDnsSelectionRepository, YamlGlobalStateRepository, YamlTunnelRepository,
};
use vortexl2_infrastructure::system::{
    CronScheduler, SsPortInspector, SystemdSupervisor, TokioCommandRunner,
};
use vortexl2_infrastructure::tunnel::{EasyTierRuntime, L2tpRuntime};

pub struct Adapters {
    pub tunnels: Arc<YamlTunnelRepository>,
    pub state: Arc<YamlGlobalStateRepository>,
    pub dns_selection: Arc<YamlDnsSelectionRepository>,
    pub supervisor: Arc<SystemdSupervisor>,
    pub scheduler: Arc<CronScheduler>,
    pub probe: Arc<NslookupProbe>,
    pub dns_reader: Arc<HostDnsReader>,
    /// Tried in order until one succeeds
    pub dns_appliers: Vec<Arc<dyn DnsApplyMechanism>>,
    pub drivers: ForwardDrivers,
    pub runtimes: TunnelRuntimes,
}

impl Adapters {
    pub fn new(config: &Config) -> Self {
        let paths = &config.paths;
        let runner = Arc::new(TokioCommandRunner::new(Duration::from_secs(
            config.forwarding.command_timeout_secs,
        )));

        let tunnels = Arc::new(YamlTunnelRepository::new(paths.tunnels_dir()));
        let supervisor = Arc::new(SystemdSupervisor::new(runner.clone(), &paths.systemd_dir));
        let inspector = Arc::new(SsPortInspector::new(runner.clone()));

        let drivers = ForwardDrivers::new(
            Arc::new(HaproxyDriver::new(
                tunnels.clone(),
                runner.clone(),
                inspector.clone(),
                &paths.haproxy_config,
            )),
            Arc::new(SocatDriver::new(
                tunnels.clone(),
                runner.clone(),
                inspector,
                Duration::from_millis(config.forwarding.settle_delay_ms),
            )),
        );

        let runtimes = TunnelRuntimes::new(
            Arc::new(L2tpRuntime::new(runner.clone())),
            Arc::new(EasyTierRuntime::new(
                runner.clone(),
                supervisor.clone(),
                &paths.easytier_core,
                &paths.easytier_cli,
            )),
        );

        let dns_appliers: Vec<Arc<dyn DnsApplyMechanism>> = vec![
            Arc::new(ResolvedApplier::new(runner.clone())),
            Arc::new(NetworkManagerApplier::new(runner.clone())),
            Arc::new(ResolvConfApplier::new(&paths.resolv_conf)),
        ];

        Self {
            tunnels,
            state: Arc::new(YamlGlobalStateRepository::new(paths.global_state_file())),
            dns_selection: Arc::new(YamlDnsSelectionRepository::new(paths.dns_state_file())),
            supervisor,
            scheduler: Arc::new(CronScheduler::new(&paths.cron_dir)),
            probe: Arc::new(NslookupProbe::new(runner.clone())),
            dns_reader: Arc::new(HostDnsReader::new(runner, &paths.resolv_conf)),
            dns_appliers,
            drivers,
            runtimes,
        }
    }
}
