//! Presentation loop: the view controller at the bottom, the menu overlay
//! above it and the help bar on top.

use crate::controller::ViewController;
use marquee_core::{
    Button, Canvas, Frame, HelpPrompt, Input, Point, Size, Transform2D, Widget,
};
use marquee_widgets::{HelpBar, MessageBox};
use std::fmt;

const MENU_SIZE: Size = Size::new(640.0, 240.0);
const HELP_HEIGHT: f32 = 32.0;

/// Entries of the `Start` menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Jump to a random game
    RandomGame,
    /// Return to the system carousel
    BackToSystems,
    /// Dismiss the menu
    Close,
}

/// Owns the view controller and the overlays drawn above it.
pub struct Window {
    frame: Frame,
    controller: ViewController,
    menu: Option<MessageBox<MenuAction>>,
    help: HelpBar,
    frames: u64,
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("controller", &self.controller)
            .field("menu_open", &self.menu.is_some())
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}

impl Window {
    /// Wrap `controller`, sized to its screen.
    #[must_use]
    pub fn new(controller: ViewController) -> Self {
        let size = controller.size();
        let mut window = Self {
            frame: Frame::new(size),
            controller,
            menu: None,
            help: HelpBar::new(),
            frames: 0,
        };
        window.layout();
        window.refresh_help();
        window
    }

    /// The view controller.
    #[must_use]
    pub const fn controller(&self) -> &ViewController {
        &self.controller
    }

    /// Mutable view controller.
    pub fn controller_mut(&mut self) -> &mut ViewController {
        &mut self.controller
    }

    /// Whether the menu overlay is open.
    #[must_use]
    pub const fn is_menu_open(&self) -> bool {
        self.menu.is_some()
    }

    /// The open menu.
    #[must_use]
    pub const fn menu(&self) -> Option<&MessageBox<MenuAction>> {
        self.menu.as_ref()
    }

    /// Prompts currently shown in the help bar.
    #[must_use]
    pub fn help_bar(&self) -> &HelpBar {
        &self.help
    }

    /// Frames run through [`run_frame`](Self::run_frame).
    #[must_use]
    pub const fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Open the `Start` menu.
    pub fn open_menu(&mut self) {
        let mut menu = MessageBox::new(
            "MAIN MENU",
            vec![
                ("RANDOM GAME".to_string(), MenuAction::RandomGame),
                ("SYSTEMS".to_string(), MenuAction::BackToSystems),
                ("CLOSE".to_string(), MenuAction::Close),
            ],
        );
        menu.set_size(MENU_SIZE);
        self.menu = Some(menu);
        self.layout();
        self.refresh_help();
    }

    /// Close the menu without choosing.
    pub fn close_menu(&mut self) {
        self.menu = None;
        self.refresh_help();
    }

    /// Feed one frame: inputs in order, then `delta_ms` of time, then a
    /// render into `canvas`.
    pub fn run_frame(&mut self, inputs: &[Input], delta_ms: u32, canvas: &mut dyn Canvas) {
        for input in inputs {
            self.input(input);
        }
        self.update(delta_ms);
        self.render(canvas, &Transform2D::identity());
        self.frames += 1;
    }

    fn layout(&mut self) {
        let size = self.frame.size;
        self.help.set_position(Point::new(0.0, size.height - HELP_HEIGHT));
        self.help.set_size(Size::new(size.width, HELP_HEIGHT));
        if let Some(menu) = &mut self.menu {
            menu.set_position(Point::new(
                (size.width - MENU_SIZE.width) / 2.0,
                (size.height - MENU_SIZE.height) / 2.0,
            ));
        }
    }

    fn refresh_help(&mut self) {
        let prompts = self.help_prompts();
        self.help.set_prompts(prompts);
    }

    fn menu_input(&mut self, input: &Input) -> bool {
        let Some(menu) = &mut self.menu else {
            return false;
        };
        if input.is_press(Button::Start) {
            self.close_menu();
            return true;
        }

        let consumed = menu.input(input);
        if let Some(action) = menu.take_choice() {
            self.close_menu();
            self.perform(action);
        } else if menu.is_closed() {
            self.close_menu();
        }
        consumed
    }

    fn perform(&mut self, action: MenuAction) {
        log::info!("menu: {action:?}");
        let result = match action {
            MenuAction::RandomGame => self.controller.go_to_random_game(),
            MenuAction::BackToSystems => match self.controller.state().system() {
                Some(system) => {
                    let system = system.to_string();
                    self.controller.go_to_system_view(&system)
                }
                None => Ok(()),
            },
            MenuAction::Close => Ok(()),
        };
        if let Err(err) = result {
            log::warn!("{err}");
        }
    }
}

impl Widget for Window {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn set_size(&mut self, size: Size) {
        self.frame.size = size;
        self.controller.set_size(size);
        self.layout();
    }

    fn input(&mut self, input: &Input) -> bool {
        let consumed = if self.menu.is_some() {
            self.menu_input(input)
        } else {
            let consumed = self.controller.input(input);
            if self.controller.take_menu_request() {
                self.open_menu();
            }
            consumed
        };
        self.refresh_help();
        consumed
    }

    fn update(&mut self, delta_ms: u32) {
        self.controller.update(delta_ms);
        if let Some(menu) = &mut self.menu {
            menu.update(delta_ms);
        }
        self.refresh_help();
    }

    fn render(&self, canvas: &mut dyn Canvas, parent: &Transform2D) {
        self.controller.render(canvas, parent);
        if let Some(menu) = &self.menu {
            menu.render(canvas, parent);
        }
        self.help.render(canvas, parent);
    }

    fn help_prompts(&self) -> Vec<HelpPrompt> {
        match &self.menu {
            Some(menu) => menu.help_prompts(),
            None => self.controller.help_prompts(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::MemoryAudio;
    use crate::config::{keys, MemorySettings};
    use crate::controller::{Services, ViewState};
    use crate::launcher::MemoryLauncher;
    use crate::library::{FileData, SystemCatalog, SystemData};
    use marquee_core::RecordingCanvas;
    use marquee_test::Harness;
    use std::sync::Arc;

    fn window() -> Window {
        let catalog = SystemCatalog::new(vec![
            SystemData::new("nes").with_games(vec![FileData::game("Contra", "/nes/contra")]),
            SystemData::new("snes").with_games(vec![FileData::game("Mario", "/snes/mario")]),
        ]);
        let services = Services {
            settings: Arc::new(MemorySettings::new().with(keys::TRANSITION_STYLE, "instant")),
            audio: Arc::new(MemoryAudio::with_seed(0)),
            launcher: Arc::new(MemoryLauncher::new()),
        };
        let mut controller =
            ViewController::new(Box::new(catalog), services, Size::new(1280.0, 720.0));
        controller.go_to_start().unwrap();
        Window::new(controller)
    }

    #[test]
    fn test_start_opens_and_closes_menu() {
        let mut harness = Harness::new(window());
        harness.tick(1);
        harness.press(Button::Start).assert_consumed();
        assert!(harness.widget().is_menu_open());
        harness.assert_renders("MAIN MENU").assert_prompt("b");

        harness.press(Button::Start);
        assert!(!harness.widget().is_menu_open());
        harness.assert_not_renders("MAIN MENU");
    }

    #[test]
    fn test_back_closes_menu() {
        let mut harness = Harness::new(window());
        harness.press(Button::Start).press(Button::Back);
        assert!(!harness.widget().is_menu_open());
        // the controller never saw the back press
        assert_eq!(
            harness.widget().controller().state(),
            &ViewState::SystemSelect("nes".into())
        );
    }

    #[test]
    fn test_menu_random_game() {
        let mut harness = Harness::new(window());
        harness.press(Button::Start).press(Button::Accept);
        assert!(!harness.widget().is_menu_open());
        assert!(harness.widget().controller().state().is_game_list());
    }

    #[test]
    fn test_menu_back_to_systems() {
        let mut window = window();
        window.controller_mut().go_to_game_list("snes").unwrap();
        let mut harness = Harness::new(window);
        harness.press_all(&[Button::Start, Button::Right, Button::Accept]);
        assert_eq!(
            harness.widget().controller().state(),
            &ViewState::SystemSelect("snes".into())
        );
    }

    #[test]
    fn test_help_bar_tracks_top_layer() {
        let mut window = window();
        assert!(window.help_bar().labels().contains(&"start: menu".to_string()));
        window.open_menu();
        assert!(window.help_bar().labels().contains(&"b: close".to_string()));
        window.close_menu();
        assert!(window.help_bar().labels().contains(&"start: menu".to_string()));
    }

    #[test]
    fn test_run_frame_renders_help_bar() {
        let mut window = window();
        let mut canvas = RecordingCanvas::new();
        window.run_frame(&[], 16, &mut canvas);
        assert_eq!(window.frame_count(), 1);
        assert!(canvas.contains_text("start: menu"));
        assert!(canvas.contains_text("1 game available"));
    }
}
