//! Horizontal carousel of enabled systems.

use super::{View, ViewCommand};
use crate::library::GameLibrary;
use marquee_core::{
    Button, Canvas, Color, Frame, HelpPrompt, Input, Point, Rect, Size, Transform2D, Widget,
};
use marquee_widgets::Text;

#[derive(Debug, Clone)]
struct CarouselEntry {
    name: String,
    full_name: String,
    game_count: usize,
}

/// System selection screen.
#[derive(Debug)]
pub struct SystemView {
    frame: Frame,
    entries: Vec<CarouselEntry>,
    cursor: usize,
    title: Text,
    info: Text,
    background: Color,
    command: Option<ViewCommand>,
}

impl SystemView {
    /// Build the carousel over the library's enabled systems.
    #[must_use]
    pub fn new(library: &dyn GameLibrary, screen: Size) -> Self {
        let entries = library
            .systems()
            .iter()
            .filter(|s| s.enabled)
            .map(|s| CarouselEntry {
                name: s.name.clone(),
                full_name: s.full_name.clone(),
                game_count: s.displayed_game_count(),
            })
            .collect();

        let mut view = Self {
            frame: Frame::new(screen),
            entries,
            cursor: 0,
            title: Text::new("").font_size(48.0),
            info: Text::new("").color(Color::from_rgba_u32(0x6666_66FF)),
            background: Color::WHITE,
            command: None,
        };
        view.layout();
        view.refresh();
        view
    }

    /// Select `name`. Returns `false` when it is not in the carousel.
    pub fn go_to_system(&mut self, name: &str) -> bool {
        match self.entries.iter().position(|e| e.name == name) {
            Some(index) => {
                self.cursor = index;
                self.refresh();
                true
            }
            None => {
                log::warn!("system {name} is not in the carousel");
                false
            }
        }
    }

    /// Name of the selected system.
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.entries.get(self.cursor).map(|e| e.name.as_str())
    }

    /// Number of systems in the carousel.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the carousel is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn layout(&mut self) {
        let size = self.frame.size;
        self.title.set_size(Size::new(size.width, 72.0));
        self.title.set_position(Point::new(0.0, size.height * 0.4));
        self.info.set_size(Size::new(size.width, 24.0));
        self.info.set_position(Point::new(0.0, size.height * 0.4 + 96.0));
    }

    fn refresh(&mut self) {
        match self.entries.get(self.cursor) {
            Some(entry) => {
                self.title.set_content(entry.full_name.clone());
                let noun = if entry.game_count == 1 { "game" } else { "games" };
                self.info
                    .set_content(format!("{} {noun} available", entry.game_count));
            }
            None => {
                self.title.set_content("No systems");
                self.info.set_content("");
            }
        }
    }

    fn step(&mut self, delta: i32) {
        let len = self.entries.len() as i32;
        if len == 0 {
            return;
        }
        self.cursor = (self.cursor as i32 + delta).rem_euclid(len) as usize;
        self.refresh();
        // the controller moves the carousel and the camera
        if let Some(name) = self.selected().map(str::to_string) {
            self.command = Some(ViewCommand::GoToSystemView(name));
        }
    }
}

impl Widget for SystemView {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn set_size(&mut self, size: Size) {
        self.frame.size = size;
        self.layout();
    }

    fn input(&mut self, input: &Input) -> bool {
        if !input.pressed {
            return false;
        }
        match input.button {
            Button::Left => self.step(-1),
            Button::Right => self.step(1),
            Button::Accept => {
                let Some(name) = self.selected().map(str::to_string) else {
                    return false;
                };
                self.command = Some(ViewCommand::GoToGameList(name));
            }
            Button::Select => self.command = Some(ViewCommand::RandomGame),
            _ => return false,
        }
        true
    }

    fn render(&self, canvas: &mut dyn Canvas, parent: &Transform2D) {
        let trans = self.frame.transform(parent);
        canvas.set_transform(trans);
        canvas.fill_rect(Rect::from_size(self.frame.size), self.background);
        self.title.render(canvas, &trans);
        self.info.render(canvas, &trans);
    }

    fn help_prompts(&self) -> Vec<HelpPrompt> {
        vec![
            HelpPrompt::new("left/right", "choose"),
            HelpPrompt::new("a", "select"),
            HelpPrompt::new("select", "random"),
        ]
    }
}

impl View for SystemView {
    fn take_command(&mut self) -> Option<ViewCommand> {
        self.command.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::{FileData, SystemCatalog, SystemData};
    use marquee_test::Harness;

    fn library() -> SystemCatalog {
        SystemCatalog::new(vec![
            SystemData::new("nes").with_games(vec![FileData::game("Zelda", "/nes/zelda")]),
            SystemData::new("off").disabled(),
            SystemData::new("snes"),
        ])
    }

    #[test]
    fn test_carousel_skips_disabled() {
        let view = SystemView::new(&library(), Size::new(1280.0, 720.0));
        assert_eq!(view.len(), 2);
        assert_eq!(view.selected(), Some("nes"));
    }

    #[test]
    fn test_left_right_wrap() {
        let mut harness = Harness::new(SystemView::new(&library(), Size::new(1280.0, 720.0)));
        harness.press(Button::Left).assert_consumed();
        assert_eq!(harness.widget().selected(), Some("snes"));
        harness.assert_renders("0 games available");
        harness.press(Button::Right);
        assert_eq!(harness.widget().selected(), Some("nes"));
        harness.assert_renders("1 game available");
    }

    #[test]
    fn test_step_requests_system_view() {
        let mut view = SystemView::new(&library(), Size::new(1280.0, 720.0));
        assert!(view.input(&Input::press(Button::Right)));
        assert_eq!(
            view.take_command(),
            Some(ViewCommand::GoToSystemView("snes".to_string()))
        );
        assert_eq!(view.take_command(), None);
    }

    #[test]
    fn test_accept_requests_game_list() {
        let mut view = SystemView::new(&library(), Size::new(1280.0, 720.0));
        assert!(view.go_to_system("snes"));
        assert!(view.input(&Input::press(Button::Accept)));
        assert_eq!(
            view.take_command(),
            Some(ViewCommand::GoToGameList("snes".to_string()))
        );
        assert_eq!(view.take_command(), None);
    }

    #[test]
    fn test_go_to_unknown_system() {
        let mut view = SystemView::new(&library(), Size::new(1280.0, 720.0));
        assert!(!view.go_to_system("off"));
        assert_eq!(view.selected(), Some("nes"));
    }

    #[test]
    fn test_empty_carousel() {
        let view = SystemView::new(&SystemCatalog::default(), Size::new(640.0, 480.0));
        assert!(view.is_empty());
        let mut harness = Harness::new(view);
        harness.assert_renders("No systems");
        harness.press(Button::Accept);
        assert!(!harness.last_consumed());
    }
}
