use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::ColorParseError;
use crate::shape::Tool;

/// Tunables of a canvas engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Side of the square resize handle at an image's bottom-right corner
    pub handle_size: f32,
    /// Smallest width or height an image can be resized to
    pub min_image_size: f32,
    /// Largest share of the viewport a freshly pasted image may cover
    pub paste_max_fraction: f32,
    pub min_line_width: f32,
    pub max_line_width: f32,
    /// Slides a deck may hold
    pub max_slides: usize,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            handle_size: 20.0,
            min_image_size: 2.0,
            paste_max_fraction: 0.5,
            min_line_width: 1.0,
            max_line_width: 20.0,
            max_slides: 20,
        }
    }
}

/// What the shell's tool controls currently say.
///
/// Read when an action is committed, so every committed action carries the
/// style that was active at that moment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    pub tool: Tool,
    pub color: Color32,
    pub line_width: f32,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            tool: Tool::Freehand,
            color: Color32::BLACK,
            line_width: 2.0,
        }
    }
}

/// Parse a `#rrggbb` or `#rrggbbaa` color input value.
pub fn parse_color(value: &str) -> Result<Color32, ColorParseError> {
    Color32::from_hex(value.trim()).map_err(|_| ColorParseError {
        value: value.to_owned(),
    })
}

/// Hex form of `color`, as a color input would show it.
pub fn color_to_hex(color: Color32) -> String {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    if a == u8::MAX {
        format!("#{r:02x}{g:02x}{b:02x}")
    } else {
        format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_input_value() {
        assert_eq!(parse_color("#ff0000"), Ok(Color32::from_rgb(255, 0, 0)));
        assert_eq!(parse_color(" #000000 "), Ok(Color32::BLACK));
    }

    #[test]
    fn test_parse_color_rejects_garbage() {
        let err = parse_color("blue-ish").unwrap_err();
        assert_eq!(err.value, "blue-ish");
    }

    #[test]
    fn test_hex_formatting() {
        assert_eq!(color_to_hex(Color32::from_rgb(1, 2, 255)), "#0102ff");
    }

    #[test]
    fn test_default_tool_settings() {
        let settings = ToolSettings::default();
        assert_eq!(settings.tool, Tool::Freehand);
        assert_eq!(settings.color, Color32::BLACK);
        assert_eq!(settings.line_width, 2.0);
        assert_eq!(CanvasConfig::default().handle_size, 20.0);
    }
}
