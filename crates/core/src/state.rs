use chrono::{DateTime, Local};

/// Central application state — all widgets read from this snapshot.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Latest tick produced by the monitor task. `None` until the first tick.
    pub report: Option<TickReport>,
    /// CPU / GPU names, resolved once at startup.
    pub descriptor: Option<SystemDescriptor>,
}

/// One process as seen at a single tick.
///
/// Rebuilt from scratch every tick; processes are not tracked across ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessSample {
    pub name: String,
    /// Raw CPU usage as reported by the OS, summed across cores (may exceed 100).
    pub cpu_percent: f32,
    /// Resident set size in bytes.
    pub memory_bytes: u64,
}

impl ProcessSample {
    pub fn new(name: impl Into<String>, cpu_percent: f32, memory_bytes: u64) -> Self {
        Self {
            name: name.into(),
            cpu_percent,
            memory_bytes,
        }
    }
}

/// Everything the monitor hands to the UI after one sampling pass.
///
/// The monitor task owns the rolling windows; the UI only ever receives copies.
#[derive(Debug, Clone)]
pub struct TickReport {
    /// Global CPU usage history, oldest first (0.0 – 100.0).
    pub cpu_history: Vec<f32>,
    /// Memory usage history, oldest first (0.0 – 100.0).
    pub memory_history: Vec<f32>,
    /// Busiest processes by CPU, with `cpu_percent` already divided by the core count.
    pub top_cpu: Vec<ProcessSample>,
    /// Largest processes by resident memory. `cpu_percent` is left raw.
    pub top_memory: Vec<ProcessSample>,
    /// Total physical memory in bytes.
    pub total_memory: u64,
    /// Logical CPU count.
    pub logical_cores: usize,
    /// Current CPU frequency, `None` when the platform doesn't report one.
    pub cpu_frequency_mhz: Option<f64>,
    /// Process entries dropped this tick because they could not be read.
    pub skipped: usize,
    pub sampled_at: DateTime<Local>,
}

impl TickReport {
    /// Topology line shown under the CPU chart, e.g. `"CPU: 8 cores, 2400.00 MHz"`.
    pub fn cpu_summary(&self) -> String {
        match self.cpu_frequency_mhz {
            Some(mhz) => format!("CPU: {} cores, {mhz:.2} MHz", self.logical_cores),
            None => SystemDescriptor::UNKNOWN_CPU.to_string(),
        }
    }
}

/// Static host description, resolved once and never re-queried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemDescriptor {
    pub cpu_name: String,
    /// Either a GPU model name or one of the `GPU_*` sentinels.
    pub gpu_name: String,
}

impl SystemDescriptor {
    pub const UNKNOWN_CPU: &'static str = "Unknown CPU";
    /// No GPU capability exists on this host.
    pub const GPU_NOT_SUPPORTED: &'static str = "GPU: not supported";
    /// The capability exists but reported no devices.
    pub const GPU_NOT_FOUND: &'static str = "GPU: Not found";

    /// Multi-line status block: CPU model, GPU model, total memory.
    pub fn status_text(&self, total_memory: u64) -> String {
        const GIB: f64 = (1u64 << 30) as f64;
        format!(
            "CPU: {}\n{}\nMemory: {:.2} GB",
            self.cpu_name,
            self.gpu_name,
            total_memory as f64 / GIB
        )
    }
}

impl Default for SystemDescriptor {
    fn default() -> Self {
        Self {
            cpu_name: Self::UNKNOWN_CPU.to_string(),
            gpu_name: Self::GPU_NOT_SUPPORTED.to_string(),
        }
    }
}
