//! Image widget.
//!
//! Asset decoding happens in the rendering backend; this widget draws a
//! framed placeholder naming its source, which is all a recording canvas
//! can show.

use marquee_core::{Canvas, Color, Frame, Point, Rect, Size, TextStyle, Transform2D, Widget};

/// What the image frame displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageKind {
    /// Still thumbnail
    #[default]
    Thumbnail,
    /// Video preview (also shows the thumbnail until playback starts)
    Video,
}

/// Image widget showing a thumbnail or video preview.
#[derive(Debug, Clone)]
pub struct Image {
    frame: Frame,
    kind: ImageKind,
    source: Option<String>,
    background: Color,
    label_style: TextStyle,
}

impl Image {
    /// Create an empty image frame.
    #[must_use]
    pub fn new(kind: ImageKind) -> Self {
        Self {
            frame: Frame::new(Size::new(256.0, 256.0)),
            kind,
            source: None,
            background: Color::from_rgba_u32(0x0000_0040),
            label_style: TextStyle::colored(Color::WHITE),
        }
    }

    /// Set the frame background.
    #[must_use]
    pub const fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Image kind.
    #[must_use]
    pub const fn kind(&self) -> ImageKind {
        self.kind
    }

    /// Current source path.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Replace the source path. `None` clears the image.
    pub fn set_source(&mut self, source: Option<String>) {
        self.source = source;
    }
}

impl Widget for Image {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn render(&self, canvas: &mut dyn Canvas, parent: &Transform2D) {
        let Some(source) = &self.source else {
            return;
        };
        canvas.set_transform(self.frame.transform(parent));
        canvas.fill_rect(Rect::from_size(self.frame.size), self.background);
        let name = source.rsplit(['/', '\\']).next().unwrap_or(source.as_str());
        let label = match self.kind {
            ImageKind::Thumbnail => format!("[image] {name}"),
            ImageKind::Video => format!("[video] {name}"),
        };
        canvas.draw_text(&label, Point::ORIGIN, &self.label_style);
    }
}
