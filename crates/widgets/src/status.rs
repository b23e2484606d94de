use iced::{widget::{column, text}, Element};
use sysmon_core::{event::Message, state::AppState};
use sysmon_theme::Theme;

/// Host description block: CPU model, GPU model, total memory, last update.
#[derive(Debug, Default)]
pub struct StatusWidget;

impl StatusWidget {
    pub fn new() -> Self {
        Self
    }

    /// The three-line host description. CPU/GPU lines show a placeholder
    /// until the descriptor resolves, the memory line until the first tick.
    pub fn text(state: &AppState) -> String {
        match (&state.descriptor, &state.report) {
            (Some(d), Some(report)) => d.status_text(report.total_memory),
            (Some(d), None) => format!("CPU: {}\n{}\nMemory: …", d.cpu_name, d.gpu_name),
            (None, _) => "CPU: …\nGPU: …\nMemory: …".to_string(),
        }
    }

    pub fn view<'a>(&'a self, state: &'a AppState, theme: &'a Theme) -> Element<'a, Message> {
        let updated = state
            .report
            .as_ref()
            .map(|r| format!("Updated {}", r.sampled_at.format("%H:%M:%S")))
            .unwrap_or_else(|| "Waiting for first sample".to_string());

        column![
            text(Self::text(state)).size(theme.font_size - 1.0),
            text(updated)
                .size(theme.font_size - 2.0)
                .color(theme.muted().to_iced()),
        ]
        .spacing(2.0)
        .into()
    }
}
