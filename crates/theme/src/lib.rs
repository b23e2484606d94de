pub mod colors;
pub mod style;

pub use colors::Color;
pub use style::ChartStyle;

use sysmon_config::ThemeConfig;

/// Compiled theme derived from [`ThemeConfig`].
///
/// All colors are pre-parsed from hex strings into normalised `[0, 1]` RGBA.
/// Calling [`Theme::from_config`] is infallible — invalid color strings fall
/// back to the built-in dark palette.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub panel:      Color,
    pub foreground: Color,
    pub accent:     Color,
    pub font_size:  f32,
    pub line_width: f32,
    pub padding:    u16,
    pub gap:        u16,
}

impl Theme {
    /// Build a [`Theme`] from the config file's `[theme]` section.
    pub fn from_config(cfg: &ThemeConfig) -> Self {
        Self {
            background: Color::from_hex(&cfg.background).unwrap_or(Color::BLACK),
            panel:      Color::from_hex(&cfg.panel).unwrap_or(Color::GRAY),
            foreground: Color::from_hex(&cfg.foreground).unwrap_or(Color::LIGHT),
            accent:     Color::from_hex(&cfg.accent).unwrap_or(Color::BLUE),
            font_size:  cfg.font_size.max(6.0),
            line_width: cfg.line_width.max(0.5),
            padding:    cfg.padding,
            gap:        cfg.gap,
        }
    }

    /// Secondary text (placeholders, timestamps).
    pub fn muted(&self) -> Color {
        self.foreground.with_alpha(0.55)
    }

    pub fn chart_style(&self) -> ChartStyle {
        ChartStyle {
            background: self.panel,
            line:       self.accent,
            grid:       self.foreground.with_alpha(0.12),
            line_width: self.line_width,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_colors_fall_back() {
        let cfg = ThemeConfig {
            accent: "not-a-color".into(),
            ..ThemeConfig::default()
        };
        assert_eq!(Theme::from_config(&cfg).accent, Color::BLUE);
    }

    #[test]
    fn chart_style_uses_accent_line() {
        let theme = Theme::default();
        let style = theme.chart_style();
        assert_eq!(style.line, theme.accent);
        assert_eq!(style.line_width, 2.0);
    }
}
