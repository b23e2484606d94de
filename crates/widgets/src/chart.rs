use iced::{
    mouse,
    widget::{
        canvas::{self, Frame, Geometry, Path, Stroke},
        column, text,
    },
    Element, Length, Point, Rectangle, Renderer, Size,
};
use sysmon_core::{event::Message, state::AppState};
use sysmon_theme::{ChartStyle, Theme};

/// Which rolling window a chart plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Cpu,
    Memory,
}

impl Metric {
    fn title(self) -> &'static str {
        match self {
            Metric::Cpu => "CPU Usage (%)",
            Metric::Memory => "Memory Usage (%)",
        }
    }
}

/// Scrolling 0–100 % line chart of one rolling window.
#[derive(Debug)]
pub struct ChartWidget {
    metric: Metric,
}

impl ChartWidget {
    pub fn new(metric: Metric) -> Self {
        Self { metric }
    }

    pub fn view<'a>(&'a self, state: &'a AppState, theme: &'a Theme) -> Element<'a, Message> {
        let samples = state
            .report
            .as_ref()
            .map(|r| match self.metric {
                Metric::Cpu => r.cpu_history.clone(),
                Metric::Memory => r.memory_history.clone(),
            })
            .unwrap_or_default();

        let mut header = column![text(self.metric.title()).size(theme.font_size)];

        // CPU topology caption, once a tick has reported it.
        if let (Metric::Cpu, Some(report)) = (self.metric, &state.report) {
            header = header.push(
                text(report.cpu_summary())
                    .size(theme.font_size - 2.0)
                    .color(theme.muted().to_iced()),
            );
        }

        let plot = canvas::Canvas::new(Series {
            samples,
            style: theme.chart_style(),
        })
        .width(Length::Fill)
        .height(Length::Fill);

        column![header, plot]
            .spacing(theme.gap as f32 / 2.0)
            .height(Length::Fill)
            .into()
    }
}

/// Canvas program for one series.
struct Series {
    samples: Vec<f32>,
    style:   ChartStyle,
}

impl<M> canvas::Program<M> for Series {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let size = bounds.size();

        frame.fill_rectangle(Point::ORIGIN, size, self.style.background.to_iced());

        for pct in [25.0, 50.0, 75.0] {
            let y = y_for(pct, size.height);
            frame.stroke(
                &Path::line(Point::new(0.0, y), Point::new(size.width, y)),
                Stroke::default()
                    .with_color(self.style.grid.to_iced())
                    .with_width(1.0),
            );
        }

        let points = plot_points(&self.samples, size);
        if points.len() >= 2 {
            let line = Path::new(|b| {
                b.move_to(points[0]);
                for p in &points[1..] {
                    b.line_to(*p);
                }
            });
            frame.stroke(
                &line,
                Stroke::default()
                    .with_color(self.style.line.to_iced())
                    .with_width(self.style.line_width),
            );
        }

        vec![frame.into_geometry()]
    }
}

/// Map samples to canvas coordinates: x spreads the window across the full
/// width, y is a fixed 0–100 % scale (values outside are clamped for drawing).
fn plot_points(samples: &[f32], size: Size) -> Vec<Point> {
    let step = if samples.len() > 1 {
        size.width / (samples.len() - 1) as f32
    } else {
        0.0
    };
    samples
        .iter()
        .enumerate()
        .map(|(i, v)| Point::new(i as f32 * step, y_for(*v, size.height)))
        .collect()
}

fn y_for(percent: f32, height: f32) -> f32 {
    height - percent.clamp(0.0, 100.0) / 100.0 * height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_span_width_and_invert_y() {
        let pts = plot_points(&[0.0, 50.0, 100.0], Size::new(200.0, 100.0));
        assert_eq!(
            pts,
            vec![Point::new(0.0, 100.0), Point::new(100.0, 50.0), Point::new(200.0, 0.0)]
        );
    }

    #[test]
    fn out_of_range_values_are_clamped_when_drawn() {
        let pts = plot_points(&[150.0, -5.0], Size::new(10.0, 10.0));
        assert_eq!(pts[0].y, 0.0);
        assert_eq!(pts[1].y, 10.0);
    }

    #[test]
    fn single_sample_sits_at_origin_x() {
        let pts = plot_points(&[25.0], Size::new(80.0, 40.0));
        assert_eq!(pts, vec![Point::new(0.0, 30.0)]);
    }

    #[test]
    fn titles() {
        assert_eq!(Metric::Cpu.title(), "CPU Usage (%)");
        assert_eq!(Metric::Memory.title(), "Memory Usage (%)");
    }
}
