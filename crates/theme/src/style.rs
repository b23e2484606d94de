use crate::colors::Color;

/// Visual settings for one line chart.
#[derive(Debug, Clone)]
pub struct ChartStyle {
    /// Plot area fill.
    pub background: Color,
    /// Series line.
    pub line: Color,
    /// Horizontal 25 % gridlines.
    pub grid: Color,
    pub line_width: f32,
}
