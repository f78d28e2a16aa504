use vortexl2_domain::PeerInfo;

const BOX_DRAWING: &[char] = &['┌', '├', '└', '─', '┬', '┴', '┼'];

/// Rows of the box-drawn table printed by `easytier-cli peer`.
///
/// ```text
/// ┌────────────┬──────────┬───────┬─────────┬──────┬────────┬────────┬────────┬──────────┐
/// │ ipv4       │ hostname │ cost  │ lat(ms) │ loss │ rx     │ tx     │ tunnel │ NAT      │
/// ├────────────┼──────────┼───────┼─────────┼──────┼────────┼────────┼────────┼──────────┤
/// │ 10.155.1.2 │ edge     │ p2p   │ 12.40   │ 0.0% │ 1.2 MB │ 800 kB │ tcp    │ FullCone │
/// └────────────┴──────────┴───────┴─────────┴──────┴────────┴────────┴────────┴──────────┘
/// ```
///
/// Rows with fewer than seven cells are skipped; `-` cells become `None`.
pub fn parse_peer_table(output: &str) -> Vec<PeerInfo> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with('│'))
        .filter(|line| !line.contains(BOX_DRAWING))
        .filter(|line| {
            let lower = line.to_lowercase();
            !lower.contains("ipv4") && !lower.contains("hostname")
        })
        .filter_map(parse_row)
        .collect()
}

fn parse_row(line: &str) -> Option<PeerInfo> {
    let cells: Vec<&str> = line
        .split('│')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect();

    if cells.len() < 7 {
        return None;
    }

    let cell = |i: usize| {
        cells
            .get(i)
            .filter(|c| **c != "-")
            .map(|c| c.to_string())
    };

    Some(PeerInfo {
        ipv4: cell(0),
        hostname: cell(1),
        cost: cell(2),
        latency_ms: cell(3),
        loss: cell(4),
        rx: cell(5),
        tx: cell(6),
        tunnel_type: cell(7),
        nat_type: cell(8),
    })
}
