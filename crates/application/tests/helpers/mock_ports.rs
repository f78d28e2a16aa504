#![allow(dead_code)]
#![allow(unused_imports)]

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::net::IpAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::RwLock;
use vortexl2_application::ports::{
    DnsApplyMechanism, DnsSelectionRepository, ForwardDriver, GlobalStateRepository,
    ResolverProbe, ScanEvent, ScanObserver, Scheduler, ServiceSupervisor, SystemDnsReader,
    TunnelRepository, TunnelRuntime,
};
use vortexl2_application::services::{ForwardDrivers, TunnelRuntimes};
use vortexl2_domain::{
    BatchOutcome, CronInterval, DnsSelection, DomainError, EasyTierTunnel, ForwardEntry,
    ForwardMode, ForwardStatus, Forwardable, L2tpTunnel, PeerInfo, ScheduledTask, ServiceUnit,
    TunnelConfig, TunnelMode,
};

/// Ordered record of side effects shared between mocks.
#[derive(Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<String>>>);

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: impl Into<String>) {
        self.0.lock().unwrap().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn position(&self, event: &str) -> Option<usize> {
        self.events().iter().position(|e| e == event)
    }
}

// ============================================================================
// DNS
// ============================================================================

#[derive(Clone)]
pub struct MockResolverProbe {
    latencies: Arc<RwLock<HashMap<(String, String), Vec<u64>>>>,
    delays: Arc<RwLock<HashMap<String, u64>>>,
    calls: Arc<RwLock<Vec<(String, String)>>>,
    call_count: Arc<AtomicU64>,
}

impl MockResolverProbe {
    pub fn new() -> Self {
        Self {
            latencies: Arc::new(RwLock::new(HashMap::new())),
            delays: Arc::new(RwLock::new(HashMap::new())),
            calls: Arc::new(RwLock::new(Vec::new())),
            call_count: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Each attempt pops the next value; the last one repeats.
    /// Unconfigured pairs time out.
    pub async fn set_latencies(&self, domain: &str, server: &str, ms: &[u64]) {
        self.latencies
            .write()
            .await
            .insert((domain.to_string(), server.to_string()), ms.to_vec());
    }

    /// Real wall-clock delay before answering for `server`.
    pub async fn set_delay(&self, server: &str, ms: u64) {
        self.delays.write().await.insert(server.to_string(), ms);
    }

    pub async fn calls(&self) -> Vec<(String, String)> {
        self.calls.read().await.clone()
    }

    pub async fn calls_for_domain(&self, domain: &str) -> usize {
        self.calls
            .read()
            .await
            .iter()
            .filter(|(d, _)| d == domain)
            .count()
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ResolverProbe for MockResolverProbe {
    async fn resolve(
        &self,
        domain: &str,
        server: &str,
        _timeout: Duration,
    ) -> Result<Duration, DomainError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        self.calls
            .write()
            .await
            .push((domain.to_string(), server.to_string()));

        let delay = self.delays.read().await.get(server).copied();
        if let Some(ms) = delay {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }

        let mut latencies = self.latencies.write().await;
        match latencies.get_mut(&(domain.to_string(), server.to_string())) {
            Some(values) if !values.is_empty() => {
                let ms = if values.len() > 1 {
                    values.remove(0)
                } else {
                    values[0]
                };
                Ok(Duration::from_millis(ms))
            }
            _ => Err(DomainError::CommandTimeout(format!(
                "nslookup {} {}",
                domain, server
            ))),
        }
    }
}

#[derive(Clone)]
pub struct MockDnsApply {
    name: &'static str,
    available: Arc<RwLock<bool>>,
    should_fail: Arc<RwLock<bool>>,
    apply_count: Arc<AtomicU64>,
    log: EventLog,
}

impl MockDnsApply {
    pub fn new(name: &'static str, log: EventLog) -> Self {
        Self {
            name,
            available: Arc::new(RwLock::new(true)),
            should_fail: Arc::new(RwLock::new(false)),
            apply_count: Arc::new(AtomicU64::new(0)),
            log,
        }
    }

    pub async fn set_available(&self, available: bool) {
        *self.available.write().await = available;
    }

    pub async fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.write().await = should_fail;
    }

    pub fn apply_count(&self) -> u64 {
        self.apply_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl DnsApplyMechanism for MockDnsApply {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn check_available(&self) -> Result<(), DomainError> {
        self.log.push(format!("{}:check", self.name));
        if *self.available.read().await {
            Ok(())
        } else {
            Err(DomainError::ToolMissing(self.name.to_string()))
        }
    }

    async fn apply(&self, address: IpAddr) -> Result<String, DomainError> {
        self.apply_count.fetch_add(1, Ordering::Relaxed);
        self.log.push(format!("{}:apply", self.name));
        if *self.should_fail.read().await {
            return Err(DomainError::CommandFailed {
                command: self.name.to_string(),
                stderr: format!("{} rejected {}", self.name, address),
            });
        }
        Ok(format!("{} set to {}", self.name, address))
    }
}

#[derive(Clone)]
pub struct MockSystemDnsReader {
    current: Arc<RwLock<Option<String>>>,
}

impl MockSystemDnsReader {
    pub fn new(current: Option<&str>) -> Self {
        Self {
            current: Arc::new(RwLock::new(current.map(str::to_string))),
        }
    }
}

#[async_trait]
impl SystemDnsReader for MockSystemDnsReader {
    async fn current_dns(&self) -> Result<Option<String>, DomainError> {
        Ok(self.current.read().await.clone())
    }
}

#[derive(Clone)]
pub struct MockDnsSelectionRepository {
    selection: Arc<RwLock<DnsSelection>>,
    save_count: Arc<AtomicU64>,
}

impl MockDnsSelectionRepository {
    pub fn new() -> Self {
        Self {
            selection: Arc::new(RwLock::new(DnsSelection::default())),
            save_count: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn current(&self) -> DnsSelection {
        self.selection.read().await.clone()
    }

    pub fn save_count(&self) -> u64 {
        self.save_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl DnsSelectionRepository for MockDnsSelectionRepository {
    async fn load(&self) -> Result<DnsSelection, DomainError> {
        Ok(self.selection.read().await.clone())
    }

    async fn save(&self, selection: &DnsSelection) -> Result<(), DomainError> {
        self.save_count.fetch_add(1, Ordering::Relaxed);
        *self.selection.write().await = selection.clone();
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<ScanEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ScanEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Addresses of scored/failed events, in delivery order.
    pub fn candidate_order(&self) -> Vec<String> {
        self.events()
            .iter()
            .filter_map(|e| match e {
                ScanEvent::Scored { result, .. } => Some(result.candidate.address.to_string()),
                ScanEvent::Failed { candidate, .. } => Some(candidate.address.to_string()),
                _ => None,
            })
            .collect()
    }
}

impl ScanObserver for RecordingObserver {
    fn on_event(&self, event: &ScanEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

// ============================================================================
// State
// ============================================================================

#[derive(Clone)]
pub struct MockTunnelRepository {
    tunnels: Arc<RwLock<BTreeMap<String, TunnelConfig>>>,
    save_count: Arc<AtomicU64>,
    log: EventLog,
}

impl MockTunnelRepository {
    pub fn new(log: EventLog) -> Self {
        Self {
            tunnels: Arc::new(RwLock::new(BTreeMap::new())),
            save_count: Arc::new(AtomicU64::new(0)),
            log,
        }
    }

    pub async fn with_tunnels(log: EventLog, tunnels: Vec<TunnelConfig>) -> Self {
        let repo = Self::new(log);
        {
            let mut map = repo.tunnels.write().await;
            for t in tunnels {
                map.insert(t.name().to_string(), t);
            }
        }
        repo
    }

    pub async fn stored(&self, name: &str) -> Option<TunnelConfig> {
        self.tunnels.read().await.get(name).cloned()
    }

    pub fn save_count(&self) -> u64 {
        self.save_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl TunnelRepository for MockTunnelRepository {
    async fn list(&self) -> Result<Vec<TunnelConfig>, DomainError> {
        Ok(self.tunnels.read().await.values().cloned().collect())
    }

    async fn get(&self, name: &str) -> Result<Option<TunnelConfig>, DomainError> {
        Ok(self.tunnels.read().await.get(name).cloned())
    }

    async fn save(&self, tunnel: &TunnelConfig) -> Result<(), DomainError> {
        self.save_count.fetch_add(1, Ordering::Relaxed);
        self.log.push(format!("repo:save:{}", tunnel.name()));
        self.tunnels
            .write()
            .await
            .insert(tunnel.name().to_string(), tunnel.clone());
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), DomainError> {
        self.log.push(format!("repo:delete:{}", name));
        self.tunnels.write().await.remove(name);
        Ok(())
    }
}

#[derive(Clone)]
pub struct MockGlobalState {
    forward_mode: Arc<RwLock<ForwardMode>>,
    tunnel_mode: Arc<RwLock<TunnelMode>>,
    log: EventLog,
}

impl MockGlobalState {
    pub fn new(forward_mode: ForwardMode, tunnel_mode: TunnelMode, log: EventLog) -> Self {
        Self {
            forward_mode: Arc::new(RwLock::new(forward_mode)),
            tunnel_mode: Arc::new(RwLock::new(tunnel_mode)),
            log,
        }
    }
}

#[async_trait]
impl GlobalStateRepository for MockGlobalState {
    async fn forward_mode(&self) -> Result<ForwardMode, DomainError> {
        Ok(*self.forward_mode.read().await)
    }

    async fn set_forward_mode(&self, mode: ForwardMode) -> Result<(), DomainError> {
        self.log.push(format!("state:forward_mode:{}", mode));
        *self.forward_mode.write().await = mode;
        Ok(())
    }

    async fn tunnel_mode(&self) -> Result<TunnelMode, DomainError> {
        Ok(*self.tunnel_mode.read().await)
    }

    async fn set_tunnel_mode(&self, mode: TunnelMode) -> Result<(), DomainError> {
        self.log.push(format!("state:tunnel_mode:{}", mode));
        *self.tunnel_mode.write().await = mode;
        Ok(())
    }
}

// ============================================================================
// Forwarding
// ============================================================================

#[derive(Clone)]
pub struct MockForwardDriver {
    mode: ForwardMode,
    failing_ports: Arc<RwLock<HashSet<u16>>>,
    held_ports: Arc<RwLock<HashSet<u16>>>,
    tool_missing: Arc<RwLock<bool>>,
    live: Arc<RwLock<HashSet<u16>>>,
    log: EventLog,
}

impl MockForwardDriver {
    pub fn new(mode: ForwardMode, log: EventLog) -> Self {
        Self {
            mode,
            failing_ports: Arc::new(RwLock::new(HashSet::new())),
            held_ports: Arc::new(RwLock::new(HashSet::new())),
            tool_missing: Arc::new(RwLock::new(false)),
            live: Arc::new(RwLock::new(HashSet::new())),
            log,
        }
    }

    pub async fn fail_port(&self, port: u16) {
        self.failing_ports.write().await.insert(port);
    }

    /// `start_all` fails as a whole, as when the forwarding binary is absent.
    pub async fn remove_tool(&self) {
        *self.tool_missing.write().await = true;
    }

    /// `stop_all` leaves this port live and reports it as failed.
    pub async fn hold_port(&self, port: u16) {
        self.held_ports.write().await.insert(port);
    }

    pub async fn live_ports(&self) -> HashSet<u16> {
        self.live.read().await.clone()
    }
}

#[async_trait]
impl ForwardDriver for MockForwardDriver {
    fn mode(&self) -> ForwardMode {
        self.mode
    }

    async fn create(
        &self,
        tunnel: &mut TunnelConfig,
        port: u16,
    ) -> Result<ForwardEntry, DomainError> {
        if self.failing_ports.read().await.contains(&port) {
            return Err(DomainError::PortInUse {
                port,
                owner: Some("nginx (PID: 99)".to_string()),
            });
        }
        let entry = tunnel.add_port(port)?;
        self.live.write().await.insert(port);
        self.log.push(format!("{}:create:{}", self.mode, port));
        Ok(entry)
    }

    async fn remove(&self, tunnel: &mut TunnelConfig, port: u16) -> Result<(), DomainError> {
        if !tunnel.is_forwarded(port) {
            return Err(DomainError::NotForwarded {
                tunnel: tunnel.name().to_string(),
                port,
            });
        }
        self.live.write().await.remove(&port);
        tunnel.remove_port(port)?;
        self.log.push(format!("{}:remove:{}", self.mode, port));
        Ok(())
    }

    async fn list_forwards(&self) -> Result<Vec<ForwardStatus>, DomainError> {
        let live = self.live.read().await;
        let mut rows: Vec<ForwardStatus> = live
            .iter()
            .map(|&port| ForwardStatus {
                port,
                tunnel: "mock".to_string(),
                remote: format!("10.0.0.2:{}", port),
                live: true,
                process: Some(self.mode.to_string()),
            })
            .collect();
        rows.sort_by_key(|r| r.port);
        Ok(rows)
    }

    async fn start_all(&self) -> Result<BatchOutcome, DomainError> {
        self.log.push(format!("{}:start_all", self.mode));
        if *self.tool_missing.read().await {
            return Err(DomainError::ToolMissing(self.mode.to_string()));
        }
        Ok(BatchOutcome {
            succeeded: self.live.read().await.len(),
            failures: Vec::new(),
        })
    }

    async fn stop_all(&self) -> Result<BatchOutcome, DomainError> {
        self.log.push(format!("{}:stop_all", self.mode));
        let held = self.held_ports.read().await;
        let mut live = self.live.write().await;
        let mut outcome = BatchOutcome::default();
        let mut ports: Vec<u16> = live.iter().copied().collect();
        ports.sort_unstable();
        for port in ports {
            if held.contains(&port) {
                outcome
                    .failures
                    .push((port, format!("port still held by {} (PID: 7)", self.mode)));
            } else {
                live.remove(&port);
                outcome.succeeded += 1;
            }
        }
        Ok(outcome)
    }

    async fn validate_and_reload(&self) -> Result<String, DomainError> {
        self.log.push(format!("{}:reload", self.mode));
        Ok("Configuration valid".to_string())
    }
}

pub fn mock_drivers(log: &EventLog) -> (MockForwardDriver, MockForwardDriver, ForwardDrivers) {
    let proxy = MockForwardDriver::new(ForwardMode::Proxy, log.clone());
    let relay = MockForwardDriver::new(ForwardMode::Relay, log.clone());
    let drivers = ForwardDrivers::new(Arc::new(proxy.clone()), Arc::new(relay.clone()));
    (proxy, relay, drivers)
}

#[derive(Clone)]
pub struct MockSupervisor {
    installed: Arc<RwLock<HashMap<String, ServiceUnit>>>,
    log: EventLog,
}

impl MockSupervisor {
    pub fn new(log: EventLog) -> Self {
        Self {
            installed: Arc::new(RwLock::new(HashMap::new())),
            log,
        }
    }

    pub async fn unit(&self, name: &str) -> Option<ServiceUnit> {
        self.installed.read().await.get(name).cloned()
    }
}

#[async_trait]
impl ServiceSupervisor for MockSupervisor {
    async fn install(&self, unit: &ServiceUnit) -> Result<(), DomainError> {
        self.log.push(format!("unit:install:{}", unit.name));
        self.installed
            .write()
            .await
            .insert(unit.name.clone(), unit.clone());
        Ok(())
    }

    async fn uninstall(&self, name: &str) -> Result<(), DomainError> {
        self.log.push(format!("unit:uninstall:{}", name));
        self.installed.write().await.remove(name);
        Ok(())
    }

    async fn enable(&self, name: &str) -> Result<(), DomainError> {
        self.log.push(format!("unit:enable:{}", name));
        Ok(())
    }

    async fn disable(&self, name: &str) -> Result<(), DomainError> {
        self.log.push(format!("unit:disable:{}", name));
        Ok(())
    }

    async fn start(&self, name: &str) -> Result<(), DomainError> {
        self.log.push(format!("unit:start:{}", name));
        Ok(())
    }

    async fn stop(&self, name: &str) -> Result<(), DomainError> {
        self.log.push(format!("unit:stop:{}", name));
        Ok(())
    }

    async fn restart(&self, name: &str) -> Result<(), DomainError> {
        self.log.push(format!("unit:restart:{}", name));
        Ok(())
    }

    async fn is_active(&self, name: &str) -> bool {
        self.installed.read().await.contains_key(name)
    }

    async fn recent_logs(&self, name: &str, _lines: usize) -> Result<String, DomainError> {
        Ok(format!("logs for {}", name))
    }
}

#[derive(Clone)]
pub struct MockScheduler {
    tasks: Arc<RwLock<HashMap<String, ScheduledTask>>>,
}

impl MockScheduler {
    pub fn new() -> Self {
        Self {
            tasks: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn task(&self, name: &str) -> Option<ScheduledTask> {
        self.tasks.read().await.get(name).cloned()
    }
}

#[async_trait]
impl Scheduler for MockScheduler {
    async fn install(&self, task: &ScheduledTask) -> Result<(), DomainError> {
        self.tasks
            .write()
            .await
            .insert(task.name.clone(), task.clone());
        Ok(())
    }

    async fn remove(&self, name: &str) -> Result<(), DomainError> {
        self.tasks.write().await.remove(name);
        Ok(())
    }

    async fn status(&self, name: &str) -> Result<Option<CronInterval>, DomainError> {
        Ok(self.tasks.read().await.get(name).map(|t| t.interval))
    }
}

// ============================================================================
// Tunnels
// ============================================================================

#[derive(Clone)]
pub struct MockTunnelRuntime {
    mode: TunnelMode,
    failing: Arc<RwLock<HashSet<String>>>,
    running: Arc<RwLock<HashSet<String>>>,
    start_count: Arc<AtomicU64>,
    log: EventLog,
}

impl MockTunnelRuntime {
    pub fn new(mode: TunnelMode, log: EventLog) -> Self {
        Self {
            mode,
            failing: Arc::new(RwLock::new(HashSet::new())),
            running: Arc::new(RwLock::new(HashSet::new())),
            start_count: Arc::new(AtomicU64::new(0)),
            log,
        }
    }

    pub async fn fail_tunnel(&self, name: &str) {
        self.failing.write().await.insert(name.to_string());
    }

    pub fn start_count(&self) -> u64 {
        self.start_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl TunnelRuntime for MockTunnelRuntime {
    fn mode(&self) -> TunnelMode {
        self.mode
    }

    fn unit_name(&self, tunnel: &TunnelConfig) -> Option<String> {
        match self.mode {
            TunnelMode::Easytier => Some(format!("vortexl2-easytier-{}", tunnel.name())),
            TunnelMode::L2tpv3 => None,
        }
    }

    async fn start(&self, tunnel: &TunnelConfig) -> Result<String, DomainError> {
        self.start_count.fetch_add(1, Ordering::Relaxed);
        self.log.push(format!("runtime:start:{}", tunnel.name()));
        if self.failing.read().await.contains(tunnel.name()) {
            return Err(DomainError::ServiceError(format!(
                "{} failed to start",
                tunnel.name()
            )));
        }
        self.running.write().await.insert(tunnel.name().to_string());
        Ok(format!("Tunnel {} started", tunnel.name()))
    }

    async fn stop(&self, tunnel: &TunnelConfig) -> Result<(), DomainError> {
        self.running.write().await.remove(tunnel.name());
        Ok(())
    }

    async fn restart(&self, tunnel: &TunnelConfig) -> Result<String, DomainError> {
        self.log.push(format!("runtime:restart:{}", tunnel.name()));
        self.running.write().await.insert(tunnel.name().to_string());
        Ok(format!("Tunnel {} restarted", tunnel.name()))
    }

    async fn is_running(&self, tunnel: &TunnelConfig) -> bool {
        self.running.read().await.contains(tunnel.name())
    }

    async fn teardown(&self, tunnel: &TunnelConfig) -> Result<(), DomainError> {
        self.log.push(format!("runtime:teardown:{}", tunnel.name()));
        self.running.write().await.remove(tunnel.name());
        Ok(())
    }

    async fn peers(&self, _tunnel: &TunnelConfig) -> Result<Vec<PeerInfo>, DomainError> {
        Ok(vec![PeerInfo {
            ipv4: Some("10.155.155.2".to_string()),
            hostname: Some("node2".to_string()),
            ..PeerInfo::default()
        }])
    }
}

pub fn mock_runtimes(log: &EventLog) -> (MockTunnelRuntime, MockTunnelRuntime, TunnelRuntimes) {
    let l2tp = MockTunnelRuntime::new(TunnelMode::L2tpv3, log.clone());
    let easytier = MockTunnelRuntime::new(TunnelMode::Easytier, log.clone());
    let runtimes = TunnelRuntimes::new(Arc::new(l2tp.clone()), Arc::new(easytier.clone()));
    (l2tp, easytier, runtimes)
}

// ============================================================================
// Builders
// ============================================================================

pub fn l2tp_tunnel(name: &str, remote: Option<&str>, ports: &[u16]) -> TunnelConfig {
    let mut t = L2tpTunnel::new(name);
    t.local_ip = "198.51.100.1".parse().ok();
    t.remote_ip = "203.0.113.10".parse().ok();
    t.interface_ip = Some("10.30.30.1/30".to_string());
    t.remote_forward_ip = remote.and_then(|r| r.parse().ok());
    t.forwarded_ports = ports.iter().copied().collect();
    TunnelConfig::L2tpv3(t)
}

pub fn easytier_tunnel(name: &str, configured: bool) -> TunnelConfig {
    let mut t = EasyTierTunnel::new(name);
    if configured {
        t.peer_ip = "203.0.113.20".parse().ok();
    }
    TunnelConfig::Easytier(t)
}
