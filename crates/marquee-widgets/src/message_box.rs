//! Modal choice box: a title over a grid of buttons.

use crate::{Button, CellOptions, ComponentGrid, Text, UpdatePolicy};
use marquee_core::{Canvas, Color, Frame, HelpPrompt, Input, Rect, Size, Transform2D, Widget, WidgetId};
use marquee_layout::{Borders, GridArea, GridCoord};

const COLUMNS: i32 = 2;

/// A titled set of choices, two buttons per row.
///
/// `A` is the action returned when a button is accepted. The box never acts
/// on its own; the owner polls [`MessageBox::take_choice`] and
/// [`MessageBox::is_closed`] after forwarding input.
pub struct MessageBox<A> {
    frame: Frame,
    grid: ComponentGrid,
    actions: Vec<(WidgetId, A)>,
    choice: Option<A>,
    closed: bool,
    background: Color,
}

impl<A: Clone> MessageBox<A> {
    /// Build a box with `title` and one button per `(label, action)`.
    pub fn new(title: impl Into<String>, choices: Vec<(String, A)>) -> Self {
        let rows = 1 + (choices.len() as i32 + COLUMNS - 1) / COLUMNS;
        let mut grid = ComponentGrid::new(GridCoord::new(COLUMNS, rows.max(1)));
        grid.set_entry(
            Box::new(Text::new(title)),
            GridArea::cell(0, 0).spanning(COLUMNS, 1),
            CellOptions::new()
                .focusable(false)
                .resize(false)
                .borders(Borders::BOTTOM)
                .update(UpdatePolicy::Never),
        );

        let mut actions = Vec::with_capacity(choices.len());
        for (index, (label, action)) in choices.into_iter().enumerate() {
            let index = index as i32;
            let area = GridArea::cell(index % COLUMNS, 1 + index / COLUMNS);
            let id = grid.set_entry(
                Box::new(Button::new(label)),
                area,
                CellOptions::new().resize(false),
            );
            actions.push((id, action));
        }

        Self {
            frame: Frame::new(Size::new(640.0, 240.0)),
            grid,
            actions,
            choice: None,
            closed: false,
            background: Color::from_rgba_u32(0xEFEF_EFFF),
        }
    }

    /// Take the accepted action, if any.
    pub fn take_choice(&mut self) -> Option<A> {
        self.choice.take()
    }

    /// Whether the user backed out of the box.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Action bound to the focused button.
    #[must_use]
    pub fn focused_action(&self) -> Option<&A> {
        let id = self.grid.focused_id()?;
        self.actions
            .iter()
            .find(|(action_id, _)| *action_id == id)
            .map(|(_, action)| action)
    }

    /// The underlying grid.
    #[must_use]
    pub const fn grid(&self) -> &ComponentGrid {
        &self.grid
    }
}

impl<A: Clone> Widget for MessageBox<A> {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn set_size(&mut self, size: Size) {
        self.frame.size = size;
        self.grid.set_size(size);
    }

    fn input(&mut self, input: &Input) -> bool {
        if input.is_press(marquee_core::Button::Accept) {
            if let Some(action) = self.focused_action().cloned() {
                log::debug!("message box choice accepted");
                self.choice = Some(action);
                return true;
            }
        }
        if input.is_press(marquee_core::Button::Back) {
            log::debug!("message box closed");
            self.closed = true;
            return true;
        }
        self.grid.input(input)
    }

    fn update(&mut self, delta_ms: u32) {
        self.grid.update(delta_ms);
    }

    fn render(&self, canvas: &mut dyn Canvas, parent: &Transform2D) {
        let trans = self.frame.transform(parent);
        canvas.set_transform(trans);
        canvas.fill_rect(Rect::from_size(self.frame.size), self.background);
        self.grid.render(canvas, &trans);
    }

    fn help_prompts(&self) -> Vec<HelpPrompt> {
        let mut prompts = self.grid.help_prompts();
        prompts.push(HelpPrompt::new("b", "close"));
        prompts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_core::Button as Key;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Choice {
        Launch,
        Cancel,
        Skip,
    }

    fn three() -> MessageBox<Choice> {
        let mut mb = MessageBox::new(
            "Launch game?",
            vec![
                ("yes".to_string(), Choice::Launch),
                ("no".to_string(), Choice::Cancel),
                ("later".to_string(), Choice::Skip),
            ],
        );
        mb.set_size(Size::new(600.0, 300.0));
        mb
    }

    #[test]
    fn test_first_button_focused() {
        let mb = three();
        assert_eq!(mb.focused_action(), Some(&Choice::Launch));
        assert_eq!(mb.grid().cursor(), GridCoord::new(0, 1));
    }

    #[test]
    fn test_accept_records_choice_once() {
        let mut mb = three();
        assert!(mb.input(&Input::press(Key::Right)));
        assert!(mb.input(&Input::press(Key::Accept)));
        assert_eq!(mb.take_choice(), Some(Choice::Cancel));
        assert_eq!(mb.take_choice(), None);
        assert!(!mb.is_closed());
    }

    #[test]
    fn test_down_fans_out_to_lone_button() {
        let mut mb = three();
        mb.input(&Input::press(Key::Right));
        assert!(mb.input(&Input::press(Key::Down)));
        assert_eq!(mb.focused_action(), Some(&Choice::Skip));
    }

    #[test]
    fn test_up_from_buttons_skips_title() {
        let mut mb = three();
        assert!(!mb.input(&Input::press(Key::Up)));
        assert_eq!(mb.focused_action(), Some(&Choice::Launch));
    }

    #[test]
    fn test_back_closes() {
        let mut mb = three();
        assert!(mb.input(&Input::press(Key::Back)));
        assert!(mb.is_closed());
        assert_eq!(mb.take_choice(), None);
    }

    #[test]
    fn test_prompts() {
        let mb = three();
        let buttons: Vec<String> = mb.help_prompts().into_iter().map(|p| p.button).collect();
        assert_eq!(buttons, vec!["a", "up/down/left/right", "b"]);
    }
}
