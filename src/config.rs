use serde::Deserialize;

use crate::types::Color;

/// Construction-time settings for a [`crate::Pencil`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PencilConfig {
    /// Screen pixels per cell edge.
    pub pixel_size: u32,
    pub color: Color,
}

impl Default for PencilConfig {
    fn default() -> Self {
        Self { pixel_size: 1, color: Color::BLACK }
    }
}

impl PencilConfig {
    pub fn with_pixel_size(mut self, pixel_size: u32) -> Self {
        self.pixel_size = pixel_size;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PencilConfig::default();
        assert_eq!(config.pixel_size, 1);
        assert_eq!(config.color, Color::BLACK);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: PencilConfig = serde_json::from_str(r#"{ "pixelSize": 4 }"#).unwrap();
        assert_eq!(config, PencilConfig::default().with_pixel_size(4));

        let config: PencilConfig = serde_json::from_str(r#"{ "color": "tomato" }"#).unwrap();
        assert_eq!(config.color, Color::rgb(255, 99, 71));
        assert_eq!(config.pixel_size, 1);
    }
}
