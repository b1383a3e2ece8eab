//! Test harness for Marquee widgets.
//!
//! ```
//! use marquee_core::{Button, Canvas, Frame, Transform2D, Widget};
//! use marquee_test::Harness;
//!
//! struct Blank(Frame);
//!
//! impl Widget for Blank {
//!     fn frame(&self) -> &Frame { &self.0 }
//!     fn frame_mut(&mut self) -> &mut Frame { &mut self.0 }
//!     fn render(&self, _: &mut dyn Canvas, _: &Transform2D) {}
//! }
//!
//! let mut harness = Harness::new(Blank(Frame::default()));
//! harness.press(Button::Accept).tick(16);
//! assert!(!harness.last_consumed());
//! ```

mod harness;

pub use harness::Harness;
