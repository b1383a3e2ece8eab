//! Per-system game lists.
//!
//! A BASIC list is a title over a [`TextList`]. DETAILED and VIDEO lists
//! lay the same list out on a grid next to an image panel and a
//! description. Folders are entered in place; the view keeps a stack of
//! `(child index, parent cursor)` pairs so backing out restores the row
//! the user came from.

use super::{View, ViewCommand};
use crate::library::{FileData, FileKind, SystemData};
use marquee_core::{
    Button, Canvas, Color, Frame, HelpPrompt, Input, Point, Rect, Size, Transform2D, Widget,
};
use marquee_layout::{Borders, GridArea, GridLayout, TrackSize};
use marquee_widgets::{EntryColor, Image, ImageKind, ListEntry, Text, TextList};
use std::path::{Path, PathBuf};

/// Presentation of a game list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameListKind {
    /// Text list only
    Basic,
    /// List with artwork and description
    Detailed,
    /// List with a video preview and description
    Video,
}

/// Row payload of the game list.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ListItem {
    path: PathBuf,
    kind: FileKind,
}

const COLUMNS: [TrackSize; 2] = [TrackSize::Percent(0.5), TrackSize::Auto];
const ROWS: [TrackSize; 3] = [
    TrackSize::Percent(0.15),
    TrackSize::Percent(0.55),
    TrackSize::Auto,
];
const LIST_AREA: GridArea = GridArea::cell(0, 1).spanning(1, 2);
const IMAGE_AREA: GridArea = GridArea::cell(1, 1);
const DESCRIPTION_AREA: GridArea = GridArea::cell(1, 2);

/// Detail panels of DETAILED and VIDEO lists.
#[derive(Debug, Clone)]
struct InfoPanel {
    image: Image,
    description: Text,
}

/// Game list of one system.
#[derive(Debug)]
pub struct GameListView {
    frame: Frame,
    kind: GameListKind,
    system: String,
    root: FileData,
    folders: Vec<(usize, usize)>,
    title: Text,
    list: TextList<ListItem>,
    info: Option<InfoPanel>,
    separators: Vec<(Point, Point)>,
    debug_grid: bool,
    background: Color,
    visible: bool,
    metadata_refreshes: usize,
    command: Option<ViewCommand>,
}

impl GameListView {
    /// Build the view over `system`'s game tree.
    #[must_use]
    pub fn new(system: &SystemData, kind: GameListKind, screen: Size, debug_grid: bool) -> Self {
        let info = match kind {
            GameListKind::Basic => None,
            GameListKind::Detailed => Some(ImageKind::Thumbnail),
            GameListKind::Video => Some(ImageKind::Video),
        }
        .map(|image| InfoPanel {
            image: Image::new(image),
            description: Text::new("").color(Color::from_rgba_u32(0x6666_66FF)),
        });

        let mut view = Self {
            frame: Frame::new(screen),
            kind,
            system: system.name.clone(),
            root: system.root.clone(),
            folders: Vec::new(),
            title: Text::new(system.full_name.clone()).font_size(32.0),
            list: TextList::new().colors(system.theme.list_colors()),
            info,
            separators: Vec::new(),
            debug_grid,
            background: system.theme.color_or("background", Color::WHITE),
            visible: false,
            metadata_refreshes: 0,
            command: None,
        };
        view.layout();
        view.populate();
        view
    }

    /// Presentation kind.
    #[must_use]
    pub const fn kind(&self) -> GameListKind {
        self.kind
    }

    /// Owning system.
    #[must_use]
    pub fn system(&self) -> &str {
        &self.system
    }

    /// Whether the view is current.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// How many metadata change notifications the view has handled.
    #[must_use]
    pub const fn metadata_refreshes(&self) -> usize {
        self.metadata_refreshes
    }

    /// Folder nesting depth, 0 at the system root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.folders.len()
    }

    /// Names of the rows currently listed.
    #[must_use]
    pub fn entry_names(&self) -> Vec<&str> {
        self.list.entries().iter().map(|e| e.name.as_str()).collect()
    }

    /// Path under the cursor. `None` on a placeholder.
    #[must_use]
    pub fn cursor_path(&self) -> Option<PathBuf> {
        self.list
            .selected()
            .filter(|e| !e.placeholder)
            .map(|e| e.data.path.clone())
    }

    /// The file under the cursor.
    #[must_use]
    pub fn selected_file(&self) -> Option<&FileData> {
        let path = self.cursor_path()?;
        self.root.find(&path)
    }

    /// The tree this view lists.
    #[must_use]
    pub const fn root(&self) -> &FileData {
        &self.root
    }

    /// Move the cursor to `path`, entering the folders that contain it.
    /// Returns `false` (view unchanged) when the path is not listed.
    pub fn set_cursor(&mut self, path: &Path) -> bool {
        let Some(indices) = self.root.find_path(path) else {
            log::warn!("{} is not in the {} game list", path.display(), self.system);
            return false;
        };
        if self.root.descend(&indices).map_or(true, |f| f.hidden) {
            return false;
        }

        let previous = (self.folders.clone(), self.list.cursor());
        self.folders.clear();
        self.populate();
        for &index in &indices[..indices.len() - 1] {
            let Some(folder) = self.current_folder().children.get(index) else {
                break;
            };
            let folder_path = folder.path.clone();
            if !self.list.set_cursor_where(|e| e.data.path == folder_path) || !self.enter_folder() {
                self.folders = previous.0;
                self.populate();
                self.list.set_cursor(previous.1);
                return false;
            }
        }
        self.list.set_cursor_where(|e| e.data.path == path);
        self.refresh_info();
        true
    }

    /// A game's metadata changed on disk.
    pub fn on_file_changed(&mut self, path: &Path) {
        log::debug!("metadata changed: {}", path.display());
        self.metadata_refreshes += 1;
        self.refresh_info();
    }

    fn current_folder(&self) -> &FileData {
        let indices: Vec<usize> = self.folders.iter().map(|(index, _)| *index).collect();
        self.root.descend(&indices).unwrap_or(&self.root)
    }

    fn populate(&mut self) {
        let folder = self.current_folder();
        let mut entries: Vec<ListEntry<ListItem>> = folder
            .displayed_children()
            .map(|child| {
                let color = if child.kind == FileKind::Folder {
                    EntryColor::Secondary
                } else {
                    EntryColor::Primary
                };
                let item = ListItem {
                    path: child.path.clone(),
                    kind: child.kind,
                };
                ListEntry::new(child.name.clone(), item, color)
            })
            .collect();
        if entries.is_empty() {
            let stand_in = FileData::placeholder(folder.path.clone());
            entries.push(ListEntry::placeholder(
                stand_in.name,
                ListItem {
                    path: stand_in.path,
                    kind: FileKind::Placeholder,
                },
            ));
        }

        self.list.clear();
        for entry in entries {
            self.list.add(entry);
        }
        self.refresh_info();
    }

    fn enter_folder(&mut self) -> bool {
        let Some(entry) = self.list.selected() else {
            return false;
        };
        if entry.data.kind != FileKind::Folder {
            return false;
        }
        let path = entry.data.path.clone();
        let Some(index) = self
            .current_folder()
            .children
            .iter()
            .position(|c| c.path == path)
        else {
            return false;
        };
        self.folders.push((index, self.list.cursor()));
        self.populate();
        true
    }

    fn exit_folder(&mut self) -> bool {
        let Some((_, cursor)) = self.folders.pop() else {
            return false;
        };
        self.populate();
        self.list.set_cursor(cursor);
        self.refresh_info();
        true
    }

    fn refresh_info(&mut self) {
        let Some(info) = &self.info else {
            return;
        };
        let (source, description) = match self.selected_file() {
            Some(file) => {
                let source = match info.image.kind() {
                    ImageKind::Video => file.video.clone().or_else(|| file.thumbnail.clone()),
                    ImageKind::Thumbnail => file.thumbnail.clone(),
                };
                (source, file.description.clone())
            }
            None => (None, String::new()),
        };
        if let Some(info) = &mut self.info {
            info.image.set_source(source);
            info.description.set_content(description);
        }
    }

    fn layout(&mut self) {
        let size = self.frame.size;
        let grid = GridLayout::compute(&COLUMNS, &ROWS, size);
        let header = grid.area_bounds(&GridArea::cell(0, 0).spanning(2, 1));
        self.title.set_position(Point::new(header.x, header.y));
        self.title.set_size(Size::new(header.width, header.height));

        let list_bounds = if self.info.is_some() {
            grid.area_bounds(&LIST_AREA)
        } else {
            grid.area_bounds(&GridArea::cell(0, 1).spanning(2, 2))
        };
        place(&mut self.list, inset(list_bounds, 0.05));

        if let Some(info) = &mut self.info {
            place(&mut info.image, inset(grid.area_bounds(&IMAGE_AREA), 0.1));
            place(&mut info.description, inset(grid.area_bounds(&DESCRIPTION_AREA), 0.05));
        }

        self.separators = Borders::BOTTOM.lines(&header);
        if self.debug_grid {
            for column in 0..COLUMNS.len() as i32 {
                for row in 0..ROWS.len() as i32 {
                    let bounds = grid.area_bounds(&GridArea::cell(column, row));
                    self.separators.extend(Borders::ALL.lines(&bounds));
                }
            }
        }
    }
}

fn inset(bounds: Rect, fraction: f32) -> Rect {
    let dx = bounds.width * fraction;
    let dy = bounds.height * fraction;
    Rect::new(
        bounds.x + dx,
        bounds.y + dy,
        bounds.width - 2.0 * dx,
        bounds.height - 2.0 * dy,
    )
}

fn place(widget: &mut dyn Widget, bounds: Rect) {
    widget.set_position(bounds.origin());
    widget.set_size(bounds.size());
}

impl Widget for GameListView {
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
            Button::Up | Button::Down | Button::PageUp | Button::PageDown => {
                let moved = self.list.input(input);
                self.refresh_info();
                return moved;
            }
            Button::Accept => {
                let Some(item) = self.list.selected().map(|e| e.data.clone()) else {
                    return false;
                };
                match item.kind {
                    FileKind::Game => {
                        let center = self.list.position() + self.list.cursor_center();
                        self.command = Some(ViewCommand::Launch {
                            game: item.path,
                            center,
                        });
                    }
                    FileKind::Folder => {
                        self.enter_folder();
                    }
                    FileKind::Placeholder => return false,
                }
            }
            Button::Back => {
                if !self.exit_folder() {
                    self.command = Some(ViewCommand::GoToSystemView(self.system.clone()));
                }
            }
            Button::Right => self.command = Some(ViewCommand::NextGameList),
            Button::Left => self.command = Some(ViewCommand::PrevGameList),
            Button::Select => self.command = Some(ViewCommand::RandomGame),
            _ => return false,
        }
        true
    }

    fn update(&mut self, delta_ms: u32) {
        self.list.update(delta_ms);
        if let Some(info) = &mut self.info {
            info.image.update(delta_ms);
        }
    }

    fn render(&self, canvas: &mut dyn Canvas, parent: &Transform2D) {
        let trans = self.frame.transform(parent);
        canvas.set_transform(trans);
        canvas.fill_rect(Rect::from_size(self.frame.size), self.background);
        for (from, to) in &self.separators {
            canvas.draw_line(*from, *to, Color::SEPARATOR, 2.0);
        }

        self.title.render(canvas, &trans);
        self.list.render(canvas, &trans);
        if let Some(info) = &self.info {
            info.image.render(canvas, &trans);
            info.description.render(canvas, &trans);
        }
    }

    fn help_prompts(&self) -> Vec<HelpPrompt> {
        let mut prompts = self.list.help_prompts();
        prompts.push(HelpPrompt::new("left/right", "system"));
        prompts.push(HelpPrompt::new("a", "launch"));
        prompts.push(HelpPrompt::new("b", "back"));
        prompts.push(HelpPrompt::new("select", "random"));
        prompts
    }
}

impl View for GameListView {
    fn on_show(&mut self) {
        self.visible = true;
        self.refresh_info();
    }

    fn on_hide(&mut self) {
        self.visible = false;
    }

    fn take_command(&mut self) -> Option<ViewCommand> {
        self.command.take()
    }
}
