use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// A named DNS server eligible for latency scoring.
///
/// Names are not unique: providers usually publish a primary and a secondary address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateServer {
    pub name: Arc<str>,
    pub address: Arc<str>,
}

impl CandidateServer {
    pub fn new(name: &str, address: &str) -> Self {
        Self {
            name: Arc::from(name),
            address: Arc::from(address),
        }
    }
}

const UNSPECIFIED_V4: &str = "0.0.0.0";

/// Trim entries, drop empty and unspecified addresses, and keep only the first
/// occurrence of every address (catalog order is preserved).
pub fn normalize_catalog(raw: &[CandidateServer]) -> Vec<CandidateServer> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(raw.len());
    let mut out = Vec::with_capacity(raw.len());

    for candidate in raw {
        let address = candidate.address.trim();
        if address.is_empty() || address == UNSPECIFIED_V4 {
            continue;
        }
        if !seen.insert(address) {
            continue;
        }
        out.push(CandidateServer::new(candidate.name.trim(), address));
    }

    out
}

const RAW_CATALOG: &[(&str, &str)] = &[
    ("Radar", "10.202.10.10"),
    ("Radar", "10.202.10.11"),
    ("403 Online", "10.202.10.202"),
    ("403 Online", "10.202.10.102"),
    ("Begzar", "185.55.226.26"),
    ("Begzar", "185.55.225.25"),
    ("Shecan", "178.22.122.100"),
    ("Shecan", "185.51.200.2"),
    ("Shatel", "85.15.1.14"),
    ("Shatel", "85.15.1.15"),
    ("Electro", "78.157.42.100"),
    ("Electro", "78.157.42.101"),
    ("HostIran", "172.29.2.100"),
    ("Server IR", "194.104.158.48"),
    ("Server IR", "194.104.158.78"),
    ("Level3", "209.244.0.3"),
    ("Level3", "209.244.0.4"),
    ("OpenDNS", "208.67.222.222"),
    ("OpenDNS", "208.67.220.220"),
    ("Gaming DNS 1", "78.157.42.100"),
    ("Gaming DNS 1", "185.43.135.1"),
    ("Gaming DNS 2", "156.154.70.1"),
    ("Gaming DNS 2", "156.154.71.1"),
    ("Gaming DNS 3", "149.112.112.112"),
    ("Gaming DNS 3", "149.112.112.10"),
    ("Gaming DNS 4", "185.108.22.133"),
    ("Gaming DNS 4", "185.108.22.134"),
    ("Gaming DNS 5", "85.214.41.206"),
    ("Gaming DNS 5", "89.15.250.41"),
    ("Gaming DNS 6", "9.9.9.9"),
    ("Gaming DNS 6", "109.69.8.51"),
    ("Gaming DNS 7", "8.26.56.26"),
    ("Gaming DNS 7", "8.26.247.20"),
    ("Gaming DNS 8", "185.121.177.177"),
    ("Gaming DNS 8", "169.239.202.202"),
    ("Gaming DNS 9", "185.231.182.126"),
    ("Gaming DNS 10", "46.16.216.25"),
    ("Gaming DNS 11", "185.213.182.126"),
    ("Gaming DNS 12", "199.85.127.10"),
    ("Gaming DNS 13", "91.239.100.100"),
    ("Gaming DNS 13", "37.152.182.112"),
    ("Gaming DNS 14", "8.20.247.20"),
    ("Gaming DNS 15", "1.1.1.1"),
    ("Gaming DNS 16", "87.135.66.81"),
    ("Gaming DNS 16", "76.76.10.4"),
    ("TCI / Shatel / Asiatech / Rightel", "89.233.43.71"),
    ("Pars Online", "46.224.1.221"),
    ("Pars Online", "46.224.1.220"),
    ("MCI", "208.67.220.200"),
    ("Irancell", "74.82.42.42"),
    ("TCI", "8.8.8.8"),
    ("TCI", "8.8.4.4"),
    ("TCI", "4.4.4.4"),
    ("TCI", "4.2.2.4"),
    ("TCI", "195.46.39.39"),
    ("TCI", "195.46.39.40"),
    ("Mobinnet", "10.44.8.8"),
    ("Other operators", "199.85.126.10"),
    ("Cloudflare", "1.1.1.1"),
    ("Cloudflare", "1.0.0.1"),
    ("Google", "8.8.8.8"),
    ("Google", "8.8.4.4"),
    ("Quad9", "9.9.9.9"),
    ("Quad9", "149.112.112.112"),
];

/// Built-in catalog, un-normalized.
pub fn default_catalog() -> Vec<CandidateServer> {
    RAW_CATALOG
        .iter()
        .map(|(name, address)| CandidateServer::new(name, address))
        .collect()
}
