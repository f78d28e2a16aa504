use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Invalid port: {0}")]
    InvalidPort(String),

    #[error("Invalid tunnel name: {0}")]
    InvalidTunnelName(String),

    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    #[error("Tunnel not found: {0}")]
    TunnelNotFound(String),

    #[error("Tunnel already exists: {0}")]
    TunnelAlreadyExists(String),

    #[error("Tunnel '{0}' is not fully configured")]
    TunnelNotConfigured(String),

    #[error("Port {port} is already forwarded on tunnel '{tunnel}'")]
    AlreadyForwarded { tunnel: String, port: u16 },

    #[error("Port {port} is not forwarded on tunnel '{tunnel}'")]
    NotForwarded { tunnel: String, port: u16 },

    #[error("Remote forward IP not configured for tunnel '{0}'")]
    RemoteTargetMissing(String),

    #[error("Port {port} is already in use by: {}", owner.as_deref().unwrap_or("unknown process"))]
    PortInUse { port: u16, owner: Option<String> },

    #[error("Port forwarding is disabled; select a forward mode first")]
    ForwardingDisabled,

    #[error("Could not stop {mode} forwards, mode left unchanged: {details}")]
    ModeSwitchIncomplete { mode: String, details: String },

    #[error("Proxy configuration is invalid: {0}")]
    ProxyConfigInvalid(String),

    #[error("Forwarder failed on port {port}: {reason}")]
    ForwarderFailed { port: u16, reason: String },

    #[error("No DNS server could resolve both test domains")]
    NoCandidateAvailable,

    #[error("Failed to apply DNS: {0}")]
    DnsApplyExhausted(String),

    #[error("Required tool not found: {0}")]
    ToolMissing(String),

    #[error("Command `{command}` failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("Command `{0}` timed out")]
    CommandTimeout(String),

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Scheduler error: {0}")]
    SchedulerError(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
