//! App co-open tracking that drives the auto-tile placement.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{config::WindowManagerConfig, model::AppKind};

/// Persisted open statistics. Counters only ever grow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageStats {
    pub open_counts: BTreeMap<AppKind, u32>,
    /// Keyed by [`pair_key`].
    pub pair_usage: BTreeMap<String, u32>,
    pub last_opened: BTreeMap<AppKind, u64>,
}

/// Order-independent key for the pair `{a, b}`.
pub fn pair_key(a: &AppKind, b: &AppKind) -> String {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    format!("{lo}|{hi}")
}

/// Records an open of `kind` at `now_ms` and returns the auto-tile partner, if any.
///
/// Every other app opened strictly less than `pair_window_ms` ago has its pair counter bumped.
/// The first of those (in key order) whose counter reaches the threshold is returned; later
/// qualifying apps are still counted but not returned.
pub fn record_open(
    stats: &mut UsageStats,
    kind: &AppKind,
    now_ms: u64,
    config: &WindowManagerConfig,
) -> Option<AppKind> {
    *stats.open_counts.entry(kind.clone()).or_insert(0) += 1;

    let recent: Vec<AppKind> = stats
        .last_opened
        .iter()
        .filter(|(other, opened_at)| {
            *other != kind && now_ms.saturating_sub(**opened_at) < config.pair_window_ms
        })
        .map(|(other, _)| other.clone())
        .collect();

    let mut partner = None;
    for other in recent {
        let count = stats.pair_usage.entry(pair_key(kind, &other)).or_insert(0);
        *count += 1;
        if *count >= config.pair_threshold && partner.is_none() {
            partner = Some(other);
        }
    }

    stats.last_opened.insert(kind.clone(), now_ms);
    partner
}
