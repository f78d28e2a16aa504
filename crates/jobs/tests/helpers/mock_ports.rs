use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use vortexl2_application::ports::{ForwardDriver, GlobalStateRepository, TunnelRepository};
use vortexl2_application::services::ForwardDrivers;
use vortexl2_application::use_cases::{ListForwardsUseCase, StartForwardsUseCase};
use vortexl2_domain::{
    BatchOutcome, DomainError, ForwardEntry, ForwardMode, ForwardStatus, TunnelConfig, TunnelMode,
};

pub struct MockGlobalState {
    forward_mode: RwLock<ForwardMode>,
}

impl MockGlobalState {
    pub fn new(mode: ForwardMode) -> Self {
        Self {
            forward_mode: RwLock::new(mode),
        }
    }
}

#[async_trait]
impl GlobalStateRepository for MockGlobalState {
    async fn forward_mode(&self) -> Result<ForwardMode, DomainError> {
        Ok(*self.forward_mode.read().await)
    }

    async fn set_forward_mode(&self, mode: ForwardMode) -> Result<(), DomainError> {
        *self.forward_mode.write().await = mode;
        Ok(())
    }

    async fn tunnel_mode(&self) -> Result<TunnelMode, DomainError> {
        Ok(TunnelMode::L2tpv3)
    }

    async fn set_tunnel_mode(&self, _mode: TunnelMode) -> Result<(), DomainError> {
        Ok(())
    }
}

#[derive(Default)]
pub struct EmptyTunnelRepository;

#[async_trait]
impl TunnelRepository for EmptyTunnelRepository {
    async fn list(&self) -> Result<Vec<TunnelConfig>, DomainError> {
        Ok(Vec::new())
    }

    async fn get(&self, _name: &str) -> Result<Option<TunnelConfig>, DomainError> {
        Ok(None)
    }

    async fn save(&self, _tunnel: &TunnelConfig) -> Result<(), DomainError> {
        Ok(())
    }

    async fn delete(&self, _name: &str) -> Result<(), DomainError> {
        Ok(())
    }
}

/// Forwards whose liveness the test flips; `start_all` revives them all.
pub struct MockRelayDriver {
    forwards: Arc<RwLock<Vec<ForwardStatus>>>,
    start_all_calls: AtomicU64,
    list_calls: AtomicU64,
    should_fail: AtomicBool,
}

impl MockRelayDriver {
    pub fn new(ports: &[u16]) -> Self {
        let forwards = ports
            .iter()
            .map(|&port| ForwardStatus {
                port,
                tunnel: "edge".to_string(),
                remote: format!("10.30.30.2:{}", port),
                live: true,
                process: Some("socat (PID: 100)".to_string()),
            })
            .collect();
        Self {
            forwards: Arc::new(RwLock::new(forwards)),
            start_all_calls: AtomicU64::new(0),
            list_calls: AtomicU64::new(0),
            should_fail: AtomicBool::new(false),
        }
    }

    pub async fn kill(&self, port: u16) {
        for forward in self.forwards.write().await.iter_mut() {
            if forward.port == port {
                forward.live = false;
                forward.process = None;
            }
        }
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn start_all_calls(&self) -> u64 {
        self.start_all_calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> u64 {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ForwardDriver for MockRelayDriver {
    fn mode(&self) -> ForwardMode {
        ForwardMode::Relay
    }

    async fn create(
        &self,
        _tunnel: &mut TunnelConfig,
        port: u16,
    ) -> Result<ForwardEntry, DomainError> {
        Err(DomainError::ForwarderFailed {
            port,
            reason: "not supported by mock".to_string(),
        })
    }

    async fn remove(&self, _tunnel: &mut TunnelConfig, _port: u16) -> Result<(), DomainError> {
        Ok(())
    }

    async fn list_forwards(&self) -> Result<Vec<ForwardStatus>, DomainError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::ToolMissing("ss".to_string()));
        }
        Ok(self.forwards.read().await.clone())
    }

    async fn start_all(&self) -> Result<BatchOutcome, DomainError> {
        self.start_all_calls.fetch_add(1, Ordering::SeqCst);
        let mut outcome = BatchOutcome::default();
        for forward in self.forwards.write().await.iter_mut() {
            forward.live = true;
            outcome.record(forward.port, Ok(()));
        }
        Ok(outcome)
    }

    async fn stop_all(&self) -> Result<BatchOutcome, DomainError> {
        Ok(BatchOutcome::default())
    }

    async fn validate_and_reload(&self) -> Result<String, DomainError> {
        Ok("valid".to_string())
    }
}

pub struct WatchdogParts {
    pub driver: Arc<MockRelayDriver>,
    pub list: Arc<ListForwardsUseCase>,
    pub start: Arc<StartForwardsUseCase>,
}

pub fn watchdog_parts(mode: ForwardMode, ports: &[u16]) -> WatchdogParts {
    let driver = Arc::new(MockRelayDriver::new(ports));
    let state = Arc::new(MockGlobalState::new(mode));
    let drivers = ForwardDrivers::new(driver.clone(), driver.clone());

    WatchdogParts {
        list: Arc::new(ListForwardsUseCase::new(
            Arc::new(EmptyTunnelRepository),
            state.clone(),
            drivers.clone(),
        )),
        start: Arc::new(StartForwardsUseCase::new(state, drivers)),
        driver,
    }
}
