/// Normalised RGBA colour (each channel in `[0.0, 1.0]`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Self = Self { r: 0.071, g: 0.071, b: 0.071, a: 1.0 }; // #121212
    pub const GRAY:  Self = Self { r: 0.176, g: 0.176, b: 0.176, a: 1.0 }; // #2d2d2d
    pub const LIGHT: Self = Self { r: 0.878, g: 0.878, b: 0.878, a: 1.0 }; // #e0e0e0
    pub const BLUE:  Self = Self { r: 0.0,   g: 0.4,   b: 0.8,   a: 1.0 }; // #0066cc

    /// Parse a CSS-style hex color string (`#RRGGBB` or `#RRGGBBAA`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }

        let channel = |i: usize| -> Option<f32> {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .ok()
                .map(|v| v as f32 / 255.0)
        };

        let a = match hex.len() {
            6 => 1.0,
            8 => channel(6)?,
            _ => return None,
        };

        Some(Self { r: channel(0)?, g: channel(2)?, b: channel(4)?, a })
    }

    /// Convert to an [`iced::Color`] for use in Iced widgets.
    #[inline]
    pub fn to_iced(self) -> iced::Color {
        iced::Color::from_rgba(self.r, self.g, self.b, self.a)
    }

    /// Return a copy with the alpha channel set to `alpha`.
    #[inline]
    #[must_use]
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha.clamp(0.0, 1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rgb() {
        let c = Color::from_hex("#0066cc").unwrap();
        assert_eq!(c.r, 0.0);
        assert!((c.g - 0.4).abs() < 1e-6);
        assert!((c.b - 0.8).abs() < 1e-6);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn parses_rgba_without_hash() {
        let c = Color::from_hex("ffffff00").unwrap();
        assert_eq!(c.a, 0.0);
    }

    #[test]
    fn rejects_garbage() {
        assert!(Color::from_hex("#12345").is_none());
        assert!(Color::from_hex("#gggggg").is_none());
        assert!(Color::from_hex("#ééé").is_none());
    }

    #[test]
    fn alpha_is_clamped() {
        assert_eq!(Color::LIGHT.with_alpha(3.0).a, 1.0);
    }
}
