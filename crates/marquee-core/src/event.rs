//! Normalized logical input.
//!
//! Device mapping happens upstream; widgets only ever see these buttons.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Logical controller button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    /// D-pad up
    Up,
    /// D-pad down
    Down,
    /// D-pad left
    Left,
    /// D-pad right
    Right,
    /// Confirm / "a"
    Accept,
    /// Cancel / "b"
    Back,
    /// Opens the menu
    Start,
    /// Secondary action
    Select,
    /// Page up (shoulder)
    PageUp,
    /// Page down (shoulder)
    PageDown,
}

impl Button {
    /// Unit direction for d-pad buttons as `(dx, dy)`.
    #[must_use]
    pub const fn direction(self) -> Option<(i32, i32)> {
        match self {
            Self::Up => Some((0, -1)),
            Self::Down => Some((0, 1)),
            Self::Left => Some((-1, 0)),
            Self::Right => Some((1, 0)),
            _ => None,
        }
    }

    /// Name shown in help prompts.
    #[must_use]
    pub const fn prompt_name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::Accept => "a",
            Self::Back => "b",
            Self::Start => "start",
            Self::Select => "select",
            Self::PageUp => "l",
            Self::PageDown => "r",
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prompt_name())
    }
}

/// Error returned when a button name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown button: {0}")]
pub struct UnknownButton(pub String);

impl FromStr for Button {
    type Err = UnknownButton;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "a" | "accept" => Ok(Self::Accept),
            "b" | "back" => Ok(Self::Back),
            "start" => Ok(Self::Start),
            "select" => Ok(Self::Select),
            "l" | "pageup" => Ok(Self::PageUp),
            "r" | "pagedown" => Ok(Self::PageDown),
            _ => Err(UnknownButton(s.to_string())),
        }
    }
}

/// A single button transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    /// Which button changed
    pub button: Button,
    /// `true` on press, `false` on release
    pub pressed: bool,
}

impl Input {
    /// A button press.
    #[must_use]
    pub const fn press(button: Button) -> Self {
        Self {
            button,
            pressed: true,
        }
    }

    /// A button release.
    #[must_use]
    pub const fn release(button: Button) -> Self {
        Self {
            button,
            pressed: false,
        }
    }

    /// Whether this is a press of `button`.
    #[must_use]
    pub fn is_press(&self, button: Button) -> bool {
        self.pressed && self.button == button
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_direction() {
        assert_eq!(Button::Up.direction(), Some((0, -1)));
        assert_eq!(Button::Right.direction(), Some((1, 0)));
        assert_eq!(Button::Accept.direction(), None);
    }

    #[test]
    fn test_button_from_str() {
        assert_eq!("A".parse::<Button>(), Ok(Button::Accept));
        assert_eq!("pagedown".parse::<Button>(), Ok(Button::PageDown));
        assert!("jump".parse::<Button>().is_err());
    }

    #[test]
    fn test_button_display_roundtrips_through_parse() {
        for b in [Button::Up, Button::Back, Button::Start, Button::PageUp] {
            assert_eq!(b.to_string().parse::<Button>(), Ok(b));
        }
    }

    #[test]
    fn test_input_is_press() {
        assert!(Input::press(Button::Start).is_press(Button::Start));
        assert!(!Input::release(Button::Start).is_press(Button::Start));
        assert!(!Input::press(Button::Select).is_press(Button::Start));
    }
}
