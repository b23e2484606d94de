//! Top-K selection over one tick's process snapshot.

use sysmon_core::ProcessSample;

/// Synthetic Windows entry that reports idle time as CPU usage. Always excluded.
pub const IDLE_SENTINEL: &str = "System Idle Process";

/// Ranking key: raw CPU percent.
pub fn by_cpu(p: &ProcessSample) -> f64 {
    p.cpu_percent as f64
}

/// Ranking key: resident memory in bytes.
pub fn by_memory(p: &ProcessSample) -> f64 {
    p.memory_bytes as f64
}

/// The `k` entries with the largest `key`, descending.
///
/// The sort is stable, so equal keys keep their snapshot order. `NaN` keys rank
/// last. Asking for more entries than exist returns the whole snapshot.
pub fn rank<F>(snapshot: &[ProcessSample], key: F, k: usize) -> Vec<ProcessSample>
where
    F: Fn(&ProcessSample) -> f64,
{
    let sort_key = |p: &ProcessSample| {
        let v = key(p);
        if v.is_nan() { f64::NEG_INFINITY } else { v }
    };

    let mut ranked: Vec<&ProcessSample> = snapshot.iter().collect();
    ranked.sort_by(|a, b| sort_key(b).total_cmp(&sort_key(a)));
    ranked.into_iter().take(k).cloned().collect()
}

/// Drop [`IDLE_SENTINEL`] and any entry named in `extra` before ranking.
pub fn exclude(snapshot: Vec<ProcessSample>, extra: &[String]) -> Vec<ProcessSample> {
    snapshot
        .into_iter()
        .filter(|p| p.name != IDLE_SENTINEL && !extra.iter().any(|n| *n == p.name))
        .collect()
}

/// Top `k` by CPU with each `cpu_percent` divided by `logical_cores`, since the
/// OS reports per-process usage summed across cores.
pub fn top_cpu(snapshot: &[ProcessSample], k: usize, logical_cores: usize) -> Vec<ProcessSample> {
    let cores = logical_cores.max(1) as f32;
    let mut ranked = rank(snapshot, by_cpu, k);
    for p in &mut ranked {
        p.cpu_percent /= cores;
    }
    ranked
}

/// Top `k` by resident memory. CPU values are left as reported.
pub fn top_memory(snapshot: &[ProcessSample], k: usize) -> Vec<ProcessSample> {
    rank(snapshot, by_memory, k)
}
