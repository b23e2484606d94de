//! Desktop window for `sysmon`.
//!
//! Owns the Iced application loop and wires together all background tasks:
//! - System monitor (rolling CPU / memory windows, top processes)
//! - One-shot CPU / GPU descriptor lookup
//! - Config file watcher (live reload on change)

use futures::channel::mpsc::Sender;
use iced::{
    widget::{column, container, row},
    Element, Length, Size, Subscription, Task,
};
use std::time::Duration;
use sysmon_config::{default_path, load as load_config, ConfigWatcher, MonitorConfig, SamplingConfig};
use sysmon_core::{event::Message, state::AppState, SystemDescriptor};
use sysmon_theme::Theme;
use sysmon_widgets::{ChartWidget, Metric, ProcessListWidget, Ranking, StatusWidget};
use tracing::{debug, info, warn};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Open the monitor window.  Returns when the window is closed.
pub fn run() -> iced::Result {
    let config = load_config(default_path()).unwrap_or_else(|e| {
        warn!("{e}; using defaults");
        MonitorConfig::default()
    });
    let size = Size::new(config.window.width as f32, config.window.height as f32);

    iced::application(move || Monitor::new(config.clone()), Monitor::update, Monitor::view)
        .title(Monitor::title)
        .subscription(Monitor::subscription)
        .style(Monitor::style)
        .window_size(size)
        .run()
}

// ── State ─────────────────────────────────────────────────────────────────────

struct Monitor {
    state:      AppState,
    config:     MonitorConfig,
    theme:      Theme,
    cpu_chart:  ChartWidget,
    mem_chart:  ChartWidget,
    status:     StatusWidget,
    cpu_list:   ProcessListWidget,
    mem_list:   ProcessListWidget,
}

impl Monitor {
    fn new(config: MonitorConfig) -> (Self, Task<Message>) {
        let theme = Theme::from_config(&config.theme);
        let rows  = config.sampling.top_n;

        let monitor = Self {
            state:     AppState::default(),
            config,
            theme,
            cpu_chart: ChartWidget::new(Metric::Cpu),
            mem_chart: ChartWidget::new(Metric::Memory),
            status:    StatusWidget::new(),
            cpu_list:  ProcessListWidget::new(Ranking::Cpu, rows),
            mem_list:  ProcessListWidget::new(Ranking::Memory, rows),
        };

        // Resolve CPU / GPU names once, off the UI thread (may spawn wmic / nvidia-smi).
        let describe = Task::perform(
            async { tokio::task::spawn_blocking(sysmon_system::descriptor::detect).await },
            |result| match result {
                Ok(descriptor) => Message::DescriptorResolved(descriptor),
                Err(e) => {
                    warn!("Descriptor lookup aborted: {e}");
                    Message::DescriptorResolved(SystemDescriptor::default())
                }
            },
        );

        (monitor, describe)
    }

    fn title(&self) -> String {
        self.config.window.title.clone()
    }

    // ── Update ────────────────────────────────────────────────────────────────

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SystemReport(report) => {
                if report.skipped > 0 {
                    debug!(skipped = report.skipped, "processes skipped this tick");
                }
                self.state.report = Some(report);
            }
            Message::DescriptorResolved(descriptor) => {
                // Resolved once for the lifetime of the process.
                if self.state.descriptor.is_none() {
                    self.state.descriptor = Some(descriptor);
                }
            }
            Message::ConfigReloaded => match load_config(default_path()) {
                Ok(cfg) => self.apply_config(cfg),
                Err(e) => warn!("Config reload failed: {e}"),
            },
        }
        Task::none()
    }

    fn apply_config(&mut self, cfg: MonitorConfig) {
        if cfg.sampling != self.config.sampling {
            info!("Sampling settings changed; restarting monitor");
        }
        self.theme    = Theme::from_config(&cfg.theme);
        self.cpu_list = ProcessListWidget::new(Ranking::Cpu, cfg.sampling.top_n);
        self.mem_list = ProcessListWidget::new(Ranking::Memory, cfg.sampling.top_n);
        self.config   = cfg;
        info!("Config reloaded");
    }

    // ── View ──────────────────────────────────────────────────────────────────

    fn view(&self) -> Element<'_, Message> {
        let gap = self.theme.gap as f32;

        let charts = column![
            self.cpu_chart.view(&self.state, &self.theme),
            self.mem_chart.view(&self.state, &self.theme),
        ]
        .spacing(gap)
        .height(Length::FillPortion(3));

        let lists = row![
            container(self.cpu_list.view(&self.state, &self.theme)).width(Length::Fill),
            container(self.mem_list.view(&self.state, &self.theme)).width(Length::Fill),
        ]
        .spacing(gap * 2.0);

        let body = column![
            charts,
            self.status.view(&self.state, &self.theme),
            lists,
        ]
        .spacing(gap);

        container(body)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(self.theme.padding)
            .into()
    }

    // ── Subscriptions ─────────────────────────────────────────────────────────

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            // Keyed on the sampling settings: a change restarts the monitor.
            Subscription::run_with(self.config.sampling.clone(), system_stream),
            Subscription::run(config_stream),
        ])
    }

    // ── Style ─────────────────────────────────────────────────────────────────

    fn style(&self, _theme: &iced::Theme) -> iced::theme::Style {
        iced::theme::Style {
            background_color: self.theme.background.to_iced(),
            text_color: self.theme.foreground.to_iced(),
        }
    }
}

// ── Subscription streams ──────────────────────────────────────────────────────
//
// Each free function acts as both the stream builder AND the identity key for
// the subscription; Iced uses the function pointer (plus any data) to
// deduplicate subscriptions across redraws.

/// Samples the host on the configured interval and forwards each report.
fn system_stream(config: &SamplingConfig) -> impl iced::futures::Stream<Item = Message> {
    let config = config.clone();
    iced::stream::channel(4, move |mut sender: Sender<Message>| async move {
        let mut rx = sysmon_system::spawn_monitor(&config);

        while let Some(report) = rx.recv().await {
            let _ = sender.try_send(Message::SystemReport(report));
        }

        // Monitor task exited — shouldn't happen; stall rather than crash.
        loop {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
    })
}

/// Watches `~/.config/sysmon/sysmon.toml` for writes and sends `ConfigReloaded`.
fn config_stream() -> impl iced::futures::Stream<Item = Message> {
    iced::stream::channel(1, |mut sender: Sender<Message>| async move {
        let (_watcher, mut rx) = ConfigWatcher::spawn(default_path());

        while rx.recv().await.is_some() {
            let _ = sender.try_send(Message::ConfigReloaded);
        }

        loop {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
    })
}
