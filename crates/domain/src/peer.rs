use serde::{Deserialize, Serialize};

/// One row of the EasyTier peer table. Columns reported as `-` are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerInfo {
    pub ipv4: Option<String>,
    pub hostname: Option<String>,
    pub cost: Option<String>,
    pub latency_ms: Option<String>,
    pub loss: Option<String>,
    pub rx: Option<String>,
    pub tx: Option<String>,
    pub tunnel_type: Option<String>,
    pub nat_type: Option<String>,
}

impl PeerInfo {
    /// The local node shows up in its own table with cost `Local`.
    pub fn is_local(&self) -> bool {
        self.cost
            .as_deref()
            .is_some_and(|c| c.eq_ignore_ascii_case("local"))
    }
}
