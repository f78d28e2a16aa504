mod apply_dns;
mod get_dns_status;
mod measure_latency;
mod scan_and_apply;
mod schedule_dns_check;
mod score_candidates;

pub use apply_dns::{AppliedDns, ApplyDnsUseCase};
pub use get_dns_status::{DnsStatus, GetDnsStatusUseCase};
pub use measure_latency::MeasureLatencyUseCase;
pub use scan_and_apply::{DnsScanReport, ScanAndApplyDnsUseCase};
pub use schedule_dns_check::{ScheduleDnsCheckUseCase, DNS_CHECK_TASK};
pub use score_candidates::ScoreCandidatesUseCase;
