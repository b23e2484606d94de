use crate::history::RollingWindow;
use crate::rank;
use crate::source::MetricsSource;
use chrono::Local;
use sysmon_config::SamplingConfig;
use sysmon_core::{ProcessSample, TickReport};
use tracing::debug;

/// Owns the rolling windows and turns one [`MetricsSource`] reading into a
/// [`TickReport`].
pub struct Sampler<S> {
    source:   S,
    cpu:      RollingWindow,
    memory:   RollingWindow,
    top_n:    usize,
    excluded: Vec<String>,
}

impl<S: MetricsSource> Sampler<S> {
    pub fn new(source: S, config: &SamplingConfig) -> Self {
        Self {
            source,
            cpu:      RollingWindow::zeroed(config.capacity()),
            memory:   RollingWindow::zeroed(config.capacity()),
            top_n:    config.top_n,
            excluded: config.excluded_processes.clone(),
        }
    }

    /// Sample once, push into both windows and rank the process snapshot.
    pub fn tick(&mut self) -> TickReport {
        self.source.refresh();

        let cpu = self.source.cpu_percent();
        let memory = self.source.virtual_memory();
        self.cpu.push(cpu);
        self.memory.push(memory.percent);
        debug!(cpu = self.cpu.latest(), memory = self.memory.latest(), "sampled");

        let (snapshot, skipped) = self.snapshot();
        let snapshot = rank::exclude(snapshot, &self.excluded);
        let logical_cores = self.source.cpu_count(true);

        let cpu_frequency_mhz = match self.source.cpu_frequency() {
            Ok(freq) => Some(freq.current_mhz),
            Err(e) => {
                debug!("CPU frequency unavailable: {e}");
                None
            }
        };

        TickReport {
            cpu_history:    self.cpu.as_slice().to_vec(),
            memory_history: self.memory.as_slice().to_vec(),
            top_cpu:        rank::top_cpu(&snapshot, self.top_n, logical_cores),
            top_memory:     rank::top_memory(&snapshot, self.top_n),
            total_memory:   memory.total_bytes,
            logical_cores,
            cpu_frequency_mhz,
            skipped,
            sampled_at: Local::now(),
        }
    }

    /// Readable processes plus the number of entries that had to be skipped.
    fn snapshot(&self) -> (Vec<ProcessSample>, usize) {
        let mut skipped = 0;
        let snapshot: Vec<ProcessSample> = self
            .source
            .list_processes()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(p) => Some(p),
                Err(e) => {
                    debug!("skipping process: {e}");
                    skipped += 1;
                    None
                }
            })
            .collect();
        (snapshot, skipped)
    }
}

/// Where the monitor is in its tick cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TickState {
    #[default]
    Idle,
    Sampling,
}

/// Single-slot gate: a tick that arrives while another is in flight is dropped,
/// never queued.
#[derive(Debug, Default)]
pub struct TickGate {
    state:   TickState,
    dropped: u64,
}

impl TickGate {
    /// `Idle → Sampling`. Returns `false` (and counts a drop) if already sampling.
    pub fn try_begin(&mut self) -> bool {
        match self.state {
            TickState::Idle => {
                self.state = TickState::Sampling;
                true
            }
            TickState::Sampling => {
                self.dropped += 1;
                false
            }
        }
    }

    /// `Sampling → Idle`.
    pub fn finish(&mut self) {
        self.state = TickState::Idle;
    }

    pub fn state(&self) -> TickState {
        self.state
    }

    /// Ticks dropped so far because a sample was still running.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}
