use iced::{widget::{column, text}, Element};
use sysmon_core::{event::Message, state::AppState};
use sysmon_system::format::{cpu_line, memory_line, padded_rows};
use sysmon_theme::Theme;

/// Which ranked list to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ranking {
    Cpu,
    Memory,
}

/// Fixed number of rows listing the top processes; unused rows show a
/// placeholder so the layout doesn't jump.
#[derive(Debug)]
pub struct ProcessListWidget {
    ranking: Ranking,
    rows:    usize,
}

impl ProcessListWidget {
    pub fn new(ranking: Ranking, rows: usize) -> Self {
        Self { ranking, rows }
    }

    /// Rows as displayed.
    pub fn lines(&self, state: &AppState) -> Vec<String> {
        let report = state.report.as_ref();
        match self.ranking {
            Ranking::Cpu => padded_rows(
                report.map_or(&[][..], |r| r.top_cpu.as_slice()),
                self.rows,
                cpu_line,
            ),
            Ranking::Memory => padded_rows(
                report.map_or(&[][..], |r| r.top_memory.as_slice()),
                self.rows,
                memory_line,
            ),
        }
    }

    pub fn view<'a>(&'a self, state: &'a AppState, theme: &'a Theme) -> Element<'a, Message> {
        let rows = self
            .lines(state)
            .into_iter()
            .map(|line| text(line).size(theme.font_size).into());

        column(rows).spacing(2.0).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use sysmon_core::{ProcessSample, TickReport};
    use sysmon_system::format::PLACEHOLDER;

    fn state() -> AppState {
        AppState {
            report: Some(TickReport {
                cpu_history: Vec::new(),
                memory_history: Vec::new(),
                top_cpu: vec![ProcessSample::new("rustc", 87.5, 1 << 30)],
                top_memory: vec![
                    ProcessSample::new("firefox", 3.0, 1536 << 20),
                    ProcessSample::new("rustc", 350.0, 1 << 30),
                ],
                total_memory: 16 << 30,
                logical_cores: 4,
                cpu_frequency_mhz: None,
                skipped: 0,
                sampled_at: Local::now(),
            }),
            descriptor: None,
        }
    }

    #[test]
    fn cpu_rows() {
        let list = ProcessListWidget::new(Ranking::Cpu, 3);
        assert_eq!(list.lines(&state()), vec!["rustc: CPU 87.50%", PLACEHOLDER, PLACEHOLDER]);
    }

    #[test]
    fn memory_rows() {
        let list = ProcessListWidget::new(Ranking::Memory, 2);
        assert_eq!(
            list.lines(&state()),
            vec!["firefox: Memory 1536.00 MB", "rustc: Memory 1024.00 MB"]
        );
    }

    #[test]
    fn before_first_tick_all_placeholders() {
        let list = ProcessListWidget::new(Ranking::Memory, 5);
        assert_eq!(list.lines(&AppState::default()), vec![PLACEHOLDER; 5]);
    }
}
