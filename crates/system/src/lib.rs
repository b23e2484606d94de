pub mod descriptor;
pub mod format;
pub mod gpu;
pub mod history;
pub mod rank;
pub mod sampler;
pub mod source;

pub use history::RollingWindow;
pub use sampler::{Sampler, TickGate, TickState};
pub use source::{MetricsSource, SysinfoSource};

use std::time::Duration;
use sysmon_config::SamplingConfig;
use sysmon_core::TickReport;
use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{info, warn};

/// Spawn a background Tokio task that samples the host every
/// `config.interval_ms` milliseconds and forwards [`TickReport`]s through the
/// returned channel.
///
/// The task stops automatically when the receiver is dropped.
pub fn spawn_monitor(config: &SamplingConfig) -> mpsc::Receiver<TickReport> {
    let interval = Duration::from_millis(config.interval_ms());
    info!(
        interval_ms = config.interval_ms(),
        history = config.capacity(),
        top_n = config.top_n,
        "starting system monitor"
    );
    spawn_sampler(Sampler::new(SysinfoSource::new(), config), interval)
}

/// Drive `sampler` on a fixed `interval`.
///
/// Process enumeration blocks, so each sample runs on the blocking pool. The
/// sampler itself is moved there and back, so the windows are only ever
/// touched by one thread at a time. Ticks that fire while a sample is still
/// running are dropped by the [`TickGate`].
pub fn spawn_sampler<S>(sampler: Sampler<S>, interval: Duration) -> mpsc::Receiver<TickReport>
where
    S: MetricsSource + Send + 'static,
{
    let (tx, rx) = mpsc::channel(4);

    tokio::spawn(async move {
        let (done_tx, mut done_rx) = mpsc::channel::<(Sampler<S>, TickReport)>(1);
        let mut idle = Some(sampler);
        let mut gate = TickGate::default();
        // First sample after one full interval so CPU usage has a baseline.
        let mut ticker = time::interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if !gate.try_begin() {
                        warn!(dropped = gate.dropped(), "sample still running; tick dropped");
                        continue;
                    }
                    let Some(mut sampler) = idle.take() else {
                        gate.finish();
                        continue;
                    };
                    let done = done_tx.clone();
                    tokio::task::spawn_blocking(move || {
                        let report = sampler.tick();
                        let _ = done.blocking_send((sampler, report));
                    });
                }
                Some((sampler, report)) = done_rx.recv() => {
                    idle = Some(sampler);
                    gate.finish();
                    if tx.send(report).await.is_err() {
                        break; // all receivers dropped
                    }
                }
            }
        }

        info!("system monitor stopped");
    });

    rx
}
