use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use vortexl2_application::ports::NoopScanObserver;
use vortexl2_application::use_cases::{
    ApplyDnsUseCase, GetDnsStatusUseCase, MeasureLatencyUseCase, ScanAndApplyDnsUseCase,
    ScheduleDnsCheckUseCase, ScoreCandidatesUseCase, DNS_CHECK_TASK,
};
use vortexl2_domain::{CandidateServer, CronInterval, DomainError};

mod helpers;
use helpers::{
    EventLog, MockDnsApply, MockDnsSelectionRepository, MockResolverProbe, MockScheduler,
    MockSystemDnsReader,
};

fn addr(s: &str) -> IpAddr {
    s.parse().unwrap()
}

struct Mechanisms {
    log: EventLog,
    resolved: MockDnsApply,
    nm: MockDnsApply,
    resolv_conf: MockDnsApply,
    repo: MockDnsSelectionRepository,
}

impl Mechanisms {
    fn new() -> Self {
        let log = EventLog::new();
        Self {
            resolved: MockDnsApply::new("resolved", log.clone()),
            nm: MockDnsApply::new("networkmanager", log.clone()),
            resolv_conf: MockDnsApply::new("resolv.conf", log.clone()),
            repo: MockDnsSelectionRepository::new(),
            log,
        }
    }

    fn use_case(&self) -> ApplyDnsUseCase {
        ApplyDnsUseCase::new(
            vec![
                Arc::new(self.resolved.clone()),
                Arc::new(self.nm.clone()),
                Arc::new(self.resolv_conf.clone()),
            ],
            Arc::new(self.repo.clone()),
        )
    }
}

// ============================================================================
// Applier
// ============================================================================

#[tokio::test]
async fn test_apply_stops_at_first_success() {
    let m = Mechanisms::new();

    let applied = m.use_case().execute(addr("1.1.1.1"), "Cloudflare").await.unwrap();

    assert_eq!(applied.mechanism, "resolved");
    assert_eq!(m.nm.apply_count(), 0);
    assert_eq!(m.resolv_conf.apply_count(), 0);

    let selection = m.repo.current().await;
    assert_eq!(selection.current_dns, Some(addr("1.1.1.1")));
    assert_eq!(selection.current_dns_name.as_deref(), Some("Cloudflare"));
    assert!(selection.last_check.is_some());
}

#[tokio::test]
async fn test_apply_falls_back_in_order() {
    let m = Mechanisms::new();
    m.resolved.set_available(false).await;
    m.nm.set_should_fail(true).await;

    let applied = m.use_case().execute(addr("9.9.9.9"), "Quad9").await.unwrap();

    assert_eq!(applied.mechanism, "resolv.conf");
    assert_eq!(
        m.log.events(),
        vec![
            "resolved:check",
            "networkmanager:check",
            "networkmanager:apply",
            "resolv.conf:check",
            "resolv.conf:apply",
        ]
    );
    assert_eq!(m.resolved.apply_count(), 0);
    assert_eq!(m.repo.save_count(), 1);
}

#[tokio::test]
async fn test_apply_exhausted_keeps_last_diagnostic() {
    let m = Mechanisms::new();
    m.resolved.set_should_fail(true).await;
    m.nm.set_available(false).await;
    m.resolv_conf.set_should_fail(true).await;

    let err = m.use_case().execute(addr("8.8.8.8"), "Google").await.unwrap_err();

    match err {
        DomainError::DnsApplyExhausted(diag) => assert!(diag.starts_with("resolv.conf")),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(m.repo.save_count(), 0);
    assert!(m.repo.current().await.current_dns.is_none());
}

// ============================================================================
// Scan + apply
// ============================================================================

fn scan_use_case(probe: &MockResolverProbe, m: &Mechanisms, catalog: Vec<CandidateServer>) -> ScanAndApplyDnsUseCase {
    let measure = Arc::new(MeasureLatencyUseCase::new(
        Arc::new(probe.clone()),
        Duration::from_millis(100),
        1,
    ));
    let score = Arc::new(ScoreCandidatesUseCase::new(
        measure,
        &["chatgpt.com", "one.one.one.one"],
        2,
    ));
    ScanAndApplyDnsUseCase::new(catalog, score, Arc::new(m.use_case()))
}

#[tokio::test]
async fn test_scan_applies_fastest() {
    let probe = MockResolverProbe::new();
    for (server, ms) in [("10.0.0.1", 30), ("10.0.0.2", 12)] {
        probe.set_latencies("chatgpt.com", server, &[ms]).await;
        probe.set_latencies("one.one.one.one", server, &[ms]).await;
    }
    let m = Mechanisms::new();
    let catalog = vec![
        CandidateServer::new("Slow", "10.0.0.1"),
        CandidateServer::new("Fast", "10.0.0.2"),
    ];

    let report = scan_use_case(&probe, &m, catalog)
        .execute(&NoopScanObserver)
        .await
        .unwrap();

    assert_eq!(report.best.candidate.name.as_ref(), "Fast");
    assert_eq!(report.best.score, 12.0);
    assert_eq!(report.reachable, 2);
    assert_eq!(m.repo.current().await.current_dns, Some(addr("10.0.0.2")));
}

#[tokio::test]
async fn test_scan_with_no_reachable_server_applies_nothing() {
    let probe = MockResolverProbe::new();
    let m = Mechanisms::new();
    let catalog = vec![CandidateServer::new("Dead", "192.0.2.1")];

    let err = scan_use_case(&probe, &m, catalog)
        .execute(&NoopScanObserver)
        .await
        .unwrap_err();

    assert_eq!(err, DomainError::NoCandidateAvailable);
    assert!(m.log.events().is_empty());
}

// ============================================================================
// Scheduling and status
// ============================================================================

#[tokio::test]
async fn test_set_interval_persists_and_schedules() {
    let scheduler = MockScheduler::new();
    let repo = MockDnsSelectionRepository::new();
    let use_case = ScheduleDnsCheckUseCase::new(
        Arc::new(scheduler.clone()),
        Arc::new(repo.clone()),
        "/usr/local/bin/vortexl2",
    );

    use_case.set_interval(6).await.unwrap();

    assert_eq!(repo.current().await.check_interval_hours, 6);
    let task = scheduler.task(DNS_CHECK_TASK).await.unwrap();
    assert_eq!(task.interval, CronInterval::Hours(6));
    assert_eq!(task.cron_line(), "0 */6 * * * root /usr/local/bin/vortexl2 dns-check");
}

#[tokio::test]
async fn test_set_interval_out_of_range() {
    let scheduler = MockScheduler::new();
    let repo = MockDnsSelectionRepository::new();
    let use_case = ScheduleDnsCheckUseCase::new(Arc::new(scheduler.clone()), Arc::new(repo.clone()), "vortexl2");

    assert!(matches!(use_case.set_interval(0).await, Err(DomainError::InvalidInterval(_))));
    assert!(matches!(use_case.set_interval(25).await, Err(DomainError::InvalidInterval(_))));
    assert_eq!(repo.save_count(), 0);
    assert!(scheduler.task(DNS_CHECK_TASK).await.is_none());
}

#[tokio::test]
async fn test_enable_uses_stored_interval_then_disable() {
    let scheduler = MockScheduler::new();
    let repo = MockDnsSelectionRepository::new();
    let use_case = ScheduleDnsCheckUseCase::new(Arc::new(scheduler.clone()), Arc::new(repo.clone()), "vortexl2");

    assert_eq!(use_case.enable().await.unwrap(), 4);
    assert!(scheduler.task(DNS_CHECK_TASK).await.is_some());

    use_case.disable().await.unwrap();
    assert!(scheduler.task(DNS_CHECK_TASK).await.is_none());
}

#[tokio::test]
async fn test_dns_status() {
    let scheduler = MockScheduler::new();
    let repo = MockDnsSelectionRepository::new();
    ScheduleDnsCheckUseCase::new(Arc::new(scheduler.clone()), Arc::new(repo.clone()), "vortexl2")
        .set_interval(2)
        .await
        .unwrap();

    let status = GetDnsStatusUseCase::new(
        Arc::new(MockSystemDnsReader::new(Some("1.1.1.1"))),
        Arc::new(repo.clone()),
        Arc::new(scheduler.clone()),
    )
    .execute()
    .await
    .unwrap();

    assert_eq!(status.system_dns.as_deref(), Some("1.1.1.1"));
    assert_eq!(status.selection.check_interval_hours, 2);
    assert_eq!(status.schedule, Some(CronInterval::Hours(2)));
}
