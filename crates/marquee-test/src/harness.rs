//! Drives a single widget with button presses and frame ticks.

use marquee_core::{
    Button, DrawCommand, HelpPrompt, Input, Rect, RecordingCanvas, Size, Transform2D, Widget,
};

/// Test harness for interacting with Marquee widgets.
pub struct Harness<W: Widget> {
    /// Widget being tested
    root: W,
    /// Viewport the widget is sized to
    viewport: Rect,
    /// Result of the last `press`
    last_consumed: bool,
    /// Total simulated time
    elapsed_ms: u64,
}

impl<W: Widget> Harness<W> {
    /// Create a new harness, sizing the widget to a 1280x720 viewport.
    pub fn new(root: W) -> Self {
        let mut harness = Self {
            root,
            viewport: Rect::new(0.0, 0.0, 1280.0, 720.0),
            last_consumed: false,
            elapsed_ms: 0,
        };
        harness.fit_viewport();
        harness
    }

    /// Set the viewport size and resize the widget to it.
    #[must_use]
    pub fn viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = Rect::new(0.0, 0.0, width, height);
        self.fit_viewport();
        self
    }

    fn fit_viewport(&mut self) {
        self.root
            .set_size(Size::new(self.viewport.width, self.viewport.height));
    }

    // === Input Simulation ===

    /// Press and release a button. Records whether the press was consumed.
    pub fn press(&mut self, button: Button) -> &mut Self {
        self.last_consumed = self.root.input(&Input::press(button));
        self.root.input(&Input::release(button));
        self
    }

    /// Press several buttons in order.
    pub fn press_all(&mut self, buttons: &[Button]) -> &mut Self {
        for &button in buttons {
            self.press(button);
        }
        self
    }

    /// Advance simulated time by one frame of `ms`.
    pub fn tick(&mut self, ms: u32) -> &mut Self {
        self.root.update(ms);
        self.elapsed_ms += u64::from(ms);
        self
    }

    /// Advance `frames` frames of `ms` each.
    pub fn run_frames(&mut self, frames: u32, ms: u32) -> &mut Self {
        for _ in 0..frames {
            self.tick(ms);
        }
        self
    }

    // === Queries ===

    /// Whether the last press was consumed by the widget.
    #[must_use]
    pub const fn last_consumed(&self) -> bool {
        self.last_consumed
    }

    /// Total simulated time.
    #[must_use]
    pub const fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// The widget under test.
    #[must_use]
    pub const fn widget(&self) -> &W {
        &self.root
    }

    /// Mutable access to the widget under test.
    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.root
    }

    /// Render the widget into a fresh recording canvas.
    #[must_use]
    pub fn render(&self) -> RecordingCanvas {
        let mut canvas = RecordingCanvas::new();
        self.root.render(&mut canvas, &Transform2D::identity());
        canvas
    }

    /// All text the widget renders, in draw order.
    #[must_use]
    pub fn rendered_text(&self) -> Vec<String> {
        self.render()
            .commands()
            .iter()
            .filter_map(DrawCommand::text)
            .map(str::to_string)
            .collect()
    }

    /// Current help prompts.
    #[must_use]
    pub fn help_prompts(&self) -> Vec<HelpPrompt> {
        self.root.help_prompts()
    }

    // === Assertions ===

    /// Assert that some rendered text contains `needle`.
    ///
    /// # Panics
    ///
    /// Panics if no rendered text contains `needle`.
    pub fn assert_renders(&self, needle: &str) -> &Self {
        let texts = self.rendered_text();
        assert!(
            texts.iter().any(|t| t.contains(needle)),
            "Expected rendered text containing '{needle}' but got {texts:?}"
        );
        self
    }

    /// Assert that no rendered text contains `needle`.
    ///
    /// # Panics
    ///
    /// Panics if some rendered text contains `needle`.
    pub fn assert_not_renders(&self, needle: &str) -> &Self {
        let texts = self.rendered_text();
        assert!(
            !texts.iter().any(|t| t.contains(needle)),
            "Expected no rendered text containing '{needle}' but got {texts:?}"
        );
        self
    }

    /// Assert that a prompt for `button` is offered.
    ///
    /// # Panics
    ///
    /// Panics if no prompt names `button`.
    pub fn assert_prompt(&self, button: &str) -> &Self {
        let prompts = self.help_prompts();
        assert!(
            prompts.iter().any(|p| p.button == button),
            "Expected a '{button}' prompt but got {prompts:?}"
        );
        self
    }

    /// Assert that the last press was consumed.
    ///
    /// # Panics
    ///
    /// Panics if the last press was ignored.
    pub fn assert_consumed(&self) -> &Self {
        assert!(self.last_consumed, "Expected the last press to be consumed");
        self
    }
}
