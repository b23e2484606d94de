use serde::{Deserialize, Serialize};

/// Root configuration structure parsed from `sysmon.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Tick period, window length and ranking settings.
    pub sampling: SamplingConfig,
    /// Top-level window settings.
    pub window: WindowConfig,
    /// Theme / visual settings.
    pub theme: ThemeConfig,
}

/// Everything the background monitor task needs.
///
/// `Hash` lets the UI restart the monitor stream only when one of these changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Milliseconds between ticks.
    pub interval_ms: u64,
    /// Rolling-window capacity (number of samples per chart).
    pub history_len: usize,
    /// How many processes each ranked list shows.
    pub top_n: usize,
    /// Extra process names dropped before ranking, on top of the built-in
    /// `"System Idle Process"`.
    pub excluded_processes: Vec<String>,
}

impl SamplingConfig {
    /// Window capacity, never below one.
    pub fn capacity(&self) -> usize {
        self.history_len.max(1)
    }

    /// Tick period, never below 100 ms.
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms.max(100)
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            interval_ms: 4_000,
            history_len: 60,
            top_n: 5,
            excluded_processes: Vec::new(),
        }
    }
}

/// Main window settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Initial width in logical pixels.
    pub width: u32,
    /// Initial height in logical pixels.
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "System Monitor".to_string(),
            width: 530,
            height: 400,
        }
    }
}

/// Theme / styling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Window background color (hex, e.g. `"#121212"`).
    pub background: String,
    /// Chart panel background.
    pub panel: String,
    /// Primary text/foreground color.
    pub foreground: String,
    /// Chart line color.
    pub accent: String,
    /// Font size in points.
    pub font_size: f32,
    /// Chart line width (pixels).
    pub line_width: f32,
    /// Outer padding (pixels).
    pub padding: u16,
    /// Gap between sections (pixels).
    pub gap: u16,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background: "#121212".to_string(),
            panel:      "#2d2d2d".to_string(),
            foreground: "#e0e0e0".to_string(),
            accent:     "#0066cc".to_string(),
            font_size:  13.0,
            line_width: 2.0,
            padding:    8,
            gap:        6,
        }
    }
}
