//! Per-system theme declarations.

use marquee_core::Color;
use marquee_widgets::ListColors;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Static layout parameters for one system.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Views the theme declares ("basic", "detailed", "video", "system")
    #[serde(default)]
    pub views: Vec<String>,
    /// Hex colors by element name
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
}

impl Theme {
    /// Whether the theme declares `view`.
    #[must_use]
    pub fn has_view(&self, view: &str) -> bool {
        self.views.iter().any(|v| v == view)
    }

    /// Color for `element`. Malformed values are logged and ignored.
    #[must_use]
    pub fn color(&self, element: &str) -> Option<Color> {
        let hex = self.colors.get(element)?;
        match Color::from_hex(hex) {
            Ok(color) => Some(color),
            Err(e) => {
                log::warn!("theme color '{element}' = '{hex}': {e}");
                None
            }
        }
    }

    /// Text-list palette, themed where the theme says so.
    #[must_use]
    pub fn list_colors(&self) -> ListColors {
        let defaults = ListColors::default();
        ListColors {
            primary: self.color("primary").unwrap_or(defaults.primary),
            secondary: self.color("secondary").unwrap_or(defaults.secondary),
            selected: self.color("selected").or(defaults.selected),
            selector: self.color("selector").unwrap_or(defaults.selector),
        }
    }

    /// Color for `element` or `fallback`.
    #[must_use]
    pub fn color_or(&self, element: &str, fallback: Color) -> Color {
        self.color(element).unwrap_or(fallback)
    }
}
