//! Scrolling list of text entries with a cursor.

use marquee_core::{
    Button, Canvas, Color, Frame, HelpPrompt, Input, Point, Rect, Size, TextStyle, Transform2D,
    Widget,
};

/// Rows moved by `PageUp` / `PageDown`.
pub const PAGE_STEP: i32 = 10;

/// Which palette color an entry uses when not selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryColor {
    /// Games
    #[default]
    Primary,
    /// Folders
    Secondary,
}

/// One list row.
#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry<T> {
    /// Displayed name
    pub name: String,
    /// Owner data
    pub data: T,
    /// Palette slot
    pub color: EntryColor,
    /// Stand-in row shown when there is nothing real to list
    pub placeholder: bool,
}

impl<T> ListEntry<T> {
    /// Create a regular entry.
    pub fn new(name: impl Into<String>, data: T, color: EntryColor) -> Self {
        Self {
            name: name.into(),
            data,
            color,
            placeholder: false,
        }
    }

    /// Create a placeholder entry.
    pub fn placeholder(name: impl Into<String>, data: T) -> Self {
        Self {
            name: name.into(),
            data,
            color: EntryColor::Secondary,
            placeholder: true,
        }
    }
}

/// Colors used by a [`TextList`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListColors {
    /// Unselected game rows
    pub primary: Color,
    /// Unselected folder and placeholder rows
    pub secondary: Color,
    /// Text of the selected row; `None` keeps the row's own color
    pub selected: Option<Color>,
    /// Selection bar
    pub selector: Color,
}

impl Default for ListColors {
    fn default() -> Self {
        Self {
            primary: Color::from_rgba_u32(0x0000_FFFF),
            secondary: Color::from_rgba_u32(0x00FF_00FF),
            selected: None,
            selector: Color::from_rgba_u32(0x0000_00FF),
        }
    }
}

/// Text list widget.
#[derive(Debug, Clone)]
pub struct TextList<T> {
    frame: Frame,
    entries: Vec<ListEntry<T>>,
    cursor: usize,
    colors: ListColors,
    style: TextStyle,
    line_spacing: f32,
}

impl<T> TextList<T> {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frame: Frame::new(Size::new(400.0, 400.0)),
            entries: Vec::new(),
            cursor: 0,
            colors: ListColors::default(),
            style: TextStyle::default(),
            line_spacing: 1.5,
        }
    }

    /// Set colors.
    #[must_use]
    pub fn colors(mut self, colors: ListColors) -> Self {
        self.colors = colors;
        self
    }

    /// Set font size.
    #[must_use]
    pub fn font_size(mut self, size: f32) -> Self {
        self.style.size = size;
        self
    }

    /// Append an entry.
    pub fn add(&mut self, entry: ListEntry<T>) {
        self.entries.push(entry);
    }

    /// Remove every entry and reset the cursor.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries.
    #[must_use]
    pub fn entries(&self) -> &[ListEntry<T>] {
        &self.entries
    }

    /// Cursor index.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Entry under the cursor.
    #[must_use]
    pub fn selected(&self) -> Option<&ListEntry<T>> {
        self.entries.get(self.cursor)
    }

    /// Move the cursor to `index`, clamped to the list.
    pub fn set_cursor(&mut self, index: usize) {
        self.cursor = index.min(self.entries.len().saturating_sub(1));
    }

    /// Move the cursor to the first entry matching `pred`. Returns `false`
    /// (cursor unchanged) when nothing matches.
    pub fn set_cursor_where(&mut self, pred: impl Fn(&ListEntry<T>) -> bool) -> bool {
        match self.entries.iter().position(pred) {
            Some(index) => {
                self.cursor = index;
                true
            }
            None => false,
        }
    }

    /// Move the cursor by `delta` rows. Single steps wrap around the ends,
    /// larger steps stop at them.
    pub fn scroll(&mut self, delta: i32) {
        let len = self.entries.len() as i32;
        if len == 0 {
            return;
        }
        let target = self.cursor as i32 + delta;
        let next = if delta.abs() == 1 {
            target.rem_euclid(len)
        } else {
            target.clamp(0, len - 1)
        };
        self.cursor = next as usize;
    }

    /// Height of one row.
    #[must_use]
    pub fn row_height(&self) -> f32 {
        self.style.size * self.line_spacing
    }

    /// Centre of the cursor row, relative to the widget.
    #[must_use]
    pub fn cursor_center(&self) -> Point {
        let (start, _) = self.visible_range();
        let row = self.row_height();
        let offset = self.cursor.saturating_sub(start) as f32;
        Point::new(self.frame.size.width / 2.0, offset * row + row / 2.0)
    }

    /// Rows that fit fully inside the widget.
    #[must_use]
    pub fn visible_rows(&self) -> usize {
        let row = self.row_height();
        if row <= 0.0 {
            return 0;
        }
        (self.frame.size.height / row).max(0.0) as usize
    }

    /// First and one-past-last visible entry, keeping the cursor centred
    /// where possible.
    #[must_use]
    pub fn visible_range(&self) -> (usize, usize) {
        let screen = self.visible_rows();
        let len = self.entries.len();
        let mut start = 0usize;
        if len >= screen {
            start = self.cursor.saturating_sub(screen / 2).min(len - screen);
        }
        (start, (start + screen).min(len))
    }

    fn color_for(&self, index: usize, entry: &ListEntry<T>) -> Color {
        if index == self.cursor {
            if let Some(selected) = self.colors.selected {
                return selected;
            }
        }
        match entry.color {
            EntryColor::Primary => self.colors.primary,
            EntryColor::Secondary => self.colors.secondary,
        }
    }
}

impl<T> Default for TextList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Widget for TextList<T> {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn input(&mut self, input: &Input) -> bool {
        if self.entries.is_empty() || !input.pressed {
            return false;
        }
        let delta = match input.button {
            Button::Down => 1,
            Button::Up => -1,
            Button::PageDown => PAGE_STEP,
            Button::PageUp => -PAGE_STEP,
            _ => return false,
        };
        self.scroll(delta);
        true
    }

    fn render(&self, canvas: &mut dyn Canvas, parent: &Transform2D) {
        if self.entries.is_empty() {
            return;
        }
        let trans = self.frame.transform(parent);
        let (start, end) = self.visible_range();
        let row = self.row_height();

        canvas.set_transform(trans);
        if (start..end).contains(&self.cursor) {
            let y = (self.cursor - start) as f32 * row;
            canvas.fill_rect(
                Rect::new(0.0, y, self.frame.size.width, row),
                self.colors.selector,
            );
        }

        // scroll bar
        let visible = end - start;
        if visible < self.entries.len() {
            let total_height = visible as f32 * row;
            let bar = (visible as f32 / self.entries.len() as f32 * total_height).max(row);
            let ratio = self.cursor as f32 / self.entries.len() as f32;
            canvas.fill_rect(
                Rect::new(-6.0, ratio * (total_height - bar), 2.0, bar),
                self.colors.primary,
            );
        }

        canvas.push_clip(trans.apply_rect(&Rect::from_size(self.frame.size)));
        for (offset, index) in (start..end).enumerate() {
            let entry = &self.entries[index];
            let style = TextStyle {
                color: self.color_for(index, entry),
                ..self.style.clone()
            };
            canvas.draw_text(&entry.name, Point::new(0.0, offset as f32 * row), &style);
        }
        canvas.pop_clip();
    }

    fn help_prompts(&self) -> Vec<HelpPrompt> {
        vec![HelpPrompt::new("up/down", "choose")]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_core::{DrawCommand, RecordingCanvas};
    use proptest::prelude::*;

    fn list_of(n: usize) -> TextList<usize> {
        let mut list = TextList::new();
        for i in 0..n {
            list.add(ListEntry::new(format!("game {i}"), i, EntryColor::Primary));
        }
        list
    }

    #[test]
    fn test_single_steps_wrap() {
        let mut list = list_of(3);
        list.scroll(-1);
        assert_eq!(list.cursor(), 2);
        list.scroll(1);
        assert_eq!(list.cursor(), 0);
    }

    #[test]
    fn test_page_steps_clamp() {
        let mut list = list_of(25);
        list.scroll(PAGE_STEP);
        list.scroll(PAGE_STEP);
        list.scroll(PAGE_STEP);
        assert_eq!(list.cursor(), 24);
        list.scroll(-100);
        assert_eq!(list.cursor(), 0);
    }

    #[test]
    fn test_input_on_empty_list_is_ignored() {
        let mut list: TextList<()> = TextList::new();
        assert!(!list.input(&Input::press(Button::Down)));
    }

    #[test]
    fn test_input_consumes_navigation_only() {
        let mut list = list_of(2);
        assert!(list.input(&Input::press(Button::Down)));
        assert!(!list.input(&Input::release(Button::Down)));
        assert!(!list.input(&Input::press(Button::Accept)));
        assert_eq!(list.cursor(), 1);
    }

    #[test]
    fn test_visible_range_centres_cursor() {
        let mut list = list_of(50);
        // 24px rows, 240px tall: 10 rows
        list.set_size(Size::new(300.0, 240.0));
        list.set_cursor(20);
        assert_eq!(list.visible_range(), (15, 25));
        list.set_cursor(49);
        assert_eq!(list.visible_range(), (40, 50));
        list.set_cursor(1);
        assert_eq!(list.visible_range(), (0, 10));
    }

    #[test]
    fn test_cursor_center_follows_scroll() {
        let mut list = list_of(50);
        list.set_size(Size::new(300.0, 240.0));
        assert_eq!(list.cursor_center(), Point::new(150.0, 12.0));
        list.set_cursor(20);
        // row 5 of the window starting at 15
        assert_eq!(list.cursor_center(), Point::new(150.0, 132.0));
    }

    #[test]
    fn test_set_cursor_where() {
        let mut list = list_of(5);
        assert!(list.set_cursor_where(|e| e.data == 3));
        assert_eq!(list.selected().map(|e| e.data), Some(3));
        assert!(!list.set_cursor_where(|e| e.data == 99));
        assert_eq!(list.cursor(), 3);
    }

    #[test]
    fn test_render_uses_selected_color_and_clip() {
        let mut list = list_of(2).colors(ListColors {
            selected: Some(Color::WHITE),
            ..ListColors::default()
        });
        list.set_size(Size::new(100.0, 100.0));
        let mut canvas = RecordingCanvas::new();
        list.render(&mut canvas, &Transform2D::identity());

        let colors: Vec<Color> = canvas
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { style, .. } => Some(style.color),
                _ => None,
            })
            .collect();
        assert_eq!(colors, vec![Color::WHITE, ListColors::default().primary]);
        assert_eq!(canvas.clip_depth(), 0);
        assert!(canvas
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::PushClip { .. })));
    }

    #[test]
    fn test_placeholder_entry() {
        let mut list: TextList<Option<u32>> = TextList::new();
        list.add(ListEntry::placeholder("<no entries>", None));
        assert!(list.selected().is_some_and(|e| e.placeholder));
    }

    proptest! {
        #[test]
        fn prop_cursor_stays_in_bounds(len in 1usize..40, moves in prop::collection::vec(prop_oneof![Just(1), Just(-1), Just(PAGE_STEP), Just(-PAGE_STEP)], 0..60)) {
            let mut list = list_of(len);
            for m in moves {
                list.scroll(m);
                prop_assert!(list.cursor() < len);
            }
        }
    }
}
