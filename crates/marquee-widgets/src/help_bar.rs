//! Bottom bar listing the inputs the top layer accepts.

use marquee_core::{Canvas, Color, Frame, HelpPrompt, Point, Rect, Size, TextStyle, Transform2D, Widget};

/// Horizontal strip of `button: label` prompts.
#[derive(Debug, Clone)]
pub struct HelpBar {
    frame: Frame,
    prompts: Vec<HelpPrompt>,
    style: TextStyle,
    background: Color,
    spacing: f32,
}

impl HelpBar {
    /// Create an empty bar.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frame: Frame::new(Size::new(0.0, 32.0)),
            prompts: Vec::new(),
            style: TextStyle::colored(Color::from_rgba_u32(0x7777_77FF)),
            background: Color::TRANSPARENT,
            spacing: 24.0,
        }
    }

    /// Set the text color.
    #[must_use]
    pub const fn color(mut self, color: Color) -> Self {
        self.style.color = color;
        self
    }

    /// Replace the prompts.
    pub fn set_prompts(&mut self, prompts: Vec<HelpPrompt>) {
        self.prompts = prompts;
    }

    /// Current prompts.
    #[must_use]
    pub fn prompts(&self) -> &[HelpPrompt] {
        &self.prompts
    }

    /// Rendered prompt strings.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.prompts
            .iter()
            .map(|p| format!("{}: {}", p.button, p.label))
            .collect()
    }
}

impl Default for HelpBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for HelpBar {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn render(&self, canvas: &mut dyn Canvas, parent: &Transform2D) {
        if self.prompts.is_empty() {
            return;
        }
        canvas.set_transform(self.frame.transform(parent));
        if self.background.a > 0.0 {
            canvas.fill_rect(Rect::from_size(self.frame.size), self.background);
        }
        // rough advance per glyph, the backend measures real text
        let advance = self.style.size * 0.6;
        let mut x = 0.0;
        for label in self.labels() {
            canvas.draw_text(&label, Point::new(x, 0.0), &self.style);
            x += label.chars().count() as f32 * advance + self.spacing;
        }
    }
}
