//! The OS metrics capability the sampler pulls from.

use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System};
use sysmon_core::{MonitorError, ProcessSample, Result};

/// Memory totals at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualMemory {
    /// Used share of physical memory (0.0 – 100.0).
    pub percent: f32,
    pub total_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CpuFrequency {
    pub current_mhz: f64,
}

/// Instantaneous host metrics.
///
/// `refresh` is called once at the start of every tick; the getters then read
/// from that refresh, so one tick sees one consistent view of the host.
pub trait MetricsSource {
    /// Re-read everything from the OS.
    fn refresh(&mut self) {}

    /// Global CPU usage (0.0 – 100.0).
    fn cpu_percent(&self) -> f32;

    fn virtual_memory(&self) -> VirtualMemory;

    /// Logical CPUs when `logical` is set, physical cores otherwise.
    fn cpu_count(&self, logical: bool) -> usize;

    fn cpu_frequency(&self) -> Result<CpuFrequency>;

    /// One entry per process. A process that can't be read yields an `Err`
    /// entry; callers skip it rather than failing the tick.
    fn list_processes(&self) -> Vec<Result<ProcessSample>>;
}

/// [`MetricsSource`] backed by `sysinfo`.
pub struct SysinfoSource {
    sys: System,
}

impl SysinfoSource {
    /// Takes a first reading so CPU deltas are meaningful on the first tick.
    pub fn new() -> Self {
        let mut source = Self { sys: System::new() };
        source.refresh();
        source
    }
}

impl Default for SysinfoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsSource for SysinfoSource {
    fn refresh(&mut self) {
        self.sys.refresh_cpu_all();
        self.sys.refresh_memory();
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true, // drop processes that exited since the last tick
            ProcessRefreshKind::nothing().with_cpu().with_memory(),
        );
    }

    fn cpu_percent(&self) -> f32 {
        self.sys.global_cpu_usage()
    }

    fn virtual_memory(&self) -> VirtualMemory {
        let total = self.sys.total_memory();
        let available = self.sys.available_memory();
        VirtualMemory {
            percent: used_percent(total, available),
            total_bytes: total,
        }
    }

    fn cpu_count(&self, logical: bool) -> usize {
        let logical_count = self.sys.cpus().len();
        if logical {
            logical_count
        } else {
            System::physical_core_count().unwrap_or(logical_count)
        }
    }

    fn cpu_frequency(&self) -> Result<CpuFrequency> {
        self.sys
            .cpus()
            .first()
            .map(|c| c.frequency())
            .filter(|&mhz| mhz > 0)
            .map(|mhz| CpuFrequency { current_mhz: mhz as f64 })
            .ok_or_else(|| MonitorError::Probe("CPU frequency not reported".into()))
    }

    fn list_processes(&self) -> Vec<Result<ProcessSample>> {
        self.sys
            .processes()
            .iter()
            // Linux lists threads as tasks of their parent; count processes only.
            .filter(|(_, p)| p.thread_kind().is_none())
            .map(|(pid, p)| {
                let name = p.name().to_string_lossy();
                // An exited process can leave an entry with no readable name.
                if name.is_empty() {
                    return Err(MonitorError::ProcessVanished { pid: pid.as_u32() });
                }
                Ok(ProcessSample::new(name.into_owned(), p.cpu_usage(), p.memory()))
            })
            .collect()
    }
}

/// Share of `total` not available for new allocations, as a percentage.
fn used_percent(total: u64, available: u64) -> f32 {
    if total == 0 {
        return 0.0;
    }
    (total.saturating_sub(available) as f64 / total as f64 * 100.0) as f32
}
