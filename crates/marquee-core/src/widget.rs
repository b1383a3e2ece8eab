//! Widget trait and related types.
//!
//! Widgets are stored as `Box<dyn Widget>` and driven by their owner: input
//! flows down, `update` advances time, `render` issues draw calls through a
//! [`Canvas`].

use crate::draw::Transform2D;
use crate::event::Input;
use crate::geometry::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_WIDGET_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WidgetId(pub u64);

impl WidgetId {
    /// Create a new widget ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Allocate a process-unique ID.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_WIDGET_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Identity and placement shared by every widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Widget identity
    pub id: WidgetId,
    /// Position relative to the parent
    pub position: Point,
    /// Allocated size
    pub size: Size,
}

impl Frame {
    /// Create a frame with a fresh ID at the origin.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            id: WidgetId::next(),
            position: Point::ORIGIN,
            size,
        }
    }

    /// Bounds in parent coordinates.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    /// Transform into this frame's local space given the parent transform.
    #[must_use]
    pub fn transform(&self, parent: &Transform2D) -> Transform2D {
        Transform2D::translate(self.position.x, self.position.y).then(parent)
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new(Size::ZERO)
    }
}

/// A button/label pair shown in the help bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpPrompt {
    /// Button name, e.g. "a" or "up/down"
    pub button: String,
    /// What the button does
    pub label: String,
}

impl HelpPrompt {
    /// Create a new prompt.
    #[must_use]
    pub fn new(button: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            button: button.into(),
            label: label.into(),
        }
    }
}

/// Core widget trait that all UI elements implement.
pub trait Widget {
    /// Identity and placement.
    fn frame(&self) -> &Frame;

    /// Mutable identity and placement.
    fn frame_mut(&mut self) -> &mut Frame;

    /// Handle a button event. Returns `true` when consumed.
    fn input(&mut self, _input: &Input) -> bool {
        false
    }

    /// Advance time.
    fn update(&mut self, _delta_ms: u32) {}

    /// Issue draw calls. `parent` maps this widget's parent space to the screen.
    fn render(&self, canvas: &mut dyn Canvas, parent: &Transform2D);

    /// Called when the widget becomes the focused cell.
    fn on_focus_gained(&mut self) {}

    /// Called when the widget stops being the focused cell.
    fn on_focus_lost(&mut self) {}

    /// Move an embedded cursor. Returns `true` when the cursor moved.
    fn move_cursor(&mut self, _dir: (i32, i32)) -> bool {
        false
    }

    /// Prompts describing the inputs this widget handles.
    fn help_prompts(&self) -> Vec<HelpPrompt> {
        Vec::new()
    }

    /// Widget identity.
    fn id(&self) -> WidgetId {
        self.frame().id
    }

    /// Position relative to the parent.
    fn position(&self) -> Point {
        self.frame().position
    }

    /// Move the widget within its parent.
    fn set_position(&mut self, position: Point) {
        self.frame_mut().position = position;
    }

    /// Allocated size.
    fn size(&self) -> Size {
        self.frame().size
    }

    /// Resize the widget.
    fn set_size(&mut self, size: Size) {
        self.frame_mut().size = size;
    }
}

/// Canvas trait for paint operations.
///
/// This is a minimal abstraction over the rendering backend.
pub trait Canvas {
    /// Set the transform applied to subsequent draw calls.
    fn set_transform(&mut self, transform: Transform2D);

    /// Draw a filled rectangle.
    fn fill_rect(&mut self, rect: Rect, color: crate::Color);

    /// Draw text.
    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle);

    /// Draw a line between two points.
    fn draw_line(&mut self, from: Point, to: Point, color: crate::Color, width: f32);

    /// Push a clip region in screen coordinates.
    fn push_clip(&mut self, rect: Rect);

    /// Pop the clip region.
    fn pop_clip(&mut self);
}

/// Text style for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in pixels
    pub size: f32,
    /// Text color
    pub color: crate::Color,
    /// Font weight
    pub weight: FontWeight,
}

impl TextStyle {
    /// Default style in a given color.
    #[must_use]
    pub fn colored(color: crate::Color) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 16.0,
            color: crate::Color::BLACK,
            weight: FontWeight::Normal,
        }
    }
}

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontWeight {
    /// Normal (400)
    Normal,
    /// Bold (700)
    Bold,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dummy {
        frame: Frame,
    }

    impl Widget for Dummy {
        fn frame(&self) -> &Frame {
            &self.frame
        }

        fn frame_mut(&mut self) -> &mut Frame {
            &mut self.frame
        }

        fn render(&self, _canvas: &mut dyn Canvas, _parent: &Transform2D) {}
    }

    #[test]
    fn test_widget_id_next_is_unique() {
        let a = WidgetId::next();
        let b = WidgetId::next();
        assert_ne!(a, b);
    }

    #[test]
    fn test_widget_default_geometry() {
        let mut w = Dummy {
            frame: Frame::new(Size::new(10.0, 20.0)),
        };
        w.set_position(Point::new(5.0, 5.0));
        assert_eq!(w.position(), Point::new(5.0, 5.0));
        assert_eq!(w.size(), Size::new(10.0, 20.0));
        assert_eq!(w.frame().bounds(), Rect::new(5.0, 5.0, 10.0, 20.0));
        assert!(!w.input(&Input::press(crate::Button::Accept)));
        assert!(w.help_prompts().is_empty());
    }

    #[test]
    fn test_frame_transform_applies_parent_last() {
        let mut frame = Frame::default();
        frame.position = Point::new(10.0, 0.0);
        let t = frame.transform(&Transform2D::scale(2.0, 2.0));
        assert_eq!(t.apply(Point::ORIGIN), Point::new(20.0, 0.0));
    }

    #[test]
    fn test_text_style_colored() {
        let style = TextStyle::colored(crate::Color::WHITE);
        assert_eq!(style.size, 16.0);
        assert_eq!(style.weight, FontWeight::Normal);
    }
}
