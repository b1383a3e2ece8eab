//! Grid container with a single movable focus cursor.
//!
//! Cells hold boxed widgets at an integer position with an integer span.
//! Input goes to the focused cell first; whatever it leaves unconsumed moves
//! the cursor with the directional navigator from `marquee_layout`.

use marquee_core::{
    Button, Canvas, Color, Frame, HelpPrompt, Input, Point, Size, Transform2D, Widget, WidgetId,
};
use marquee_layout::{
    navigate, probe, Borders, CellMap, FocusGrid, GridArea, GridCoord, GridLayout, TrackSize,
    Wrap,
};

/// When a cell's widget receives `update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdatePolicy {
    /// Every frame
    #[default]
    Always,
    /// Only while the cell holds the cursor
    WhenSelected,
    /// Never
    Never,
}

/// Placement options for [`ComponentGrid::set_entry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellOptions {
    /// Whether the cell can take the cursor
    pub focusable: bool,
    /// Whether the widget is resized to fill its area
    pub resize: bool,
    /// Separator edges
    pub borders: Borders,
    /// Update policy
    pub update: UpdatePolicy,
}

impl CellOptions {
    /// Focusable, resized, no borders, always updated.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            focusable: true,
            resize: true,
            borders: Borders::NONE,
            update: UpdatePolicy::Always,
        }
    }

    /// Set focusability.
    #[must_use]
    pub const fn focusable(mut self, focusable: bool) -> Self {
        self.focusable = focusable;
        self
    }

    /// Set whether the widget is resized to its area.
    #[must_use]
    pub const fn resize(mut self, resize: bool) -> Self {
        self.resize = resize;
        self
    }

    /// Set separator edges.
    #[must_use]
    pub const fn borders(mut self, borders: Borders) -> Self {
        self.borders = borders;
        self
    }

    /// Set the update policy.
    #[must_use]
    pub const fn update(mut self, update: UpdatePolicy) -> Self {
        self.update = update;
        self
    }
}

impl Default for CellOptions {
    fn default() -> Self {
        Self::new()
    }
}

struct GridEntry {
    widget: Box<dyn Widget>,
    resize: bool,
    borders: Borders,
    update: UpdatePolicy,
}

/// Grid of widgets with a focus cursor.
pub struct ComponentGrid {
    frame: Frame,
    map: CellMap,
    entries: Vec<GridEntry>,
    columns: Vec<TrackSize>,
    rows: Vec<TrackSize>,
    cursor: GridCoord,
    wrap: Wrap,
    debug_grid: bool,
    separators: Vec<(Point, Point)>,
    separator_color: Color,
}

impl ComponentGrid {
    /// Create an empty grid of `dimensions` columns and rows.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is not positive.
    #[must_use]
    pub fn new(dimensions: GridCoord) -> Self {
        let map = CellMap::new(dimensions);
        Self {
            frame: Frame::default(),
            map,
            entries: Vec::new(),
            columns: vec![TrackSize::Auto; dimensions.x as usize],
            rows: vec![TrackSize::Auto; dimensions.y as usize],
            cursor: GridCoord::default(),
            wrap: Wrap::No,
            debug_grid: false,
            separators: Vec::new(),
            separator_color: Color::SEPARATOR,
        }
    }

    /// Set the wrap mode of the linear probe.
    #[must_use]
    pub const fn with_wrap(mut self, wrap: Wrap) -> Self {
        self.wrap = wrap;
        self
    }

    /// Draw separators on every cell edge.
    #[must_use]
    pub fn with_debug_grid(mut self, debug_grid: bool) -> Self {
        self.debug_grid = debug_grid;
        self.update_separators();
        self
    }

    /// Columns and rows.
    #[must_use]
    pub fn dimensions(&self) -> GridCoord {
        self.map.grid_size()
    }

    /// Set a column's width.
    ///
    /// # Panics
    ///
    /// Panics if the column is out of range or a percentage is outside
    /// `[0, 1]`.
    pub fn set_column_width(&mut self, col: usize, width: TrackSize) {
        assert!(col < self.columns.len(), "column {col} out of range");
        assert_valid_track(width);
        self.columns[col] = width;
        self.relayout();
    }

    /// Set a row's height.
    ///
    /// # Panics
    ///
    /// Panics if the row is out of range or a percentage is outside `[0, 1]`.
    pub fn set_row_height(&mut self, row: usize, height: TrackSize) {
        assert!(row < self.rows.len(), "row {row} out of range");
        assert_valid_track(height);
        self.rows[row] = height;
        self.relayout();
    }

    /// Place a widget. The first focusable cell placed takes the cursor.
    ///
    /// # Panics
    ///
    /// Panics if the area leaves the grid or overlaps another cell.
    pub fn set_entry(
        &mut self,
        widget: Box<dyn Widget>,
        area: GridArea,
        options: CellOptions,
    ) -> WidgetId {
        let id = widget.id();
        self.map.place(area, options.focusable);
        self.entries.push(GridEntry {
            widget,
            resize: options.resize,
            borders: options.borders,
            update: options.update,
        });

        if !self.cursor_valid() && options.focusable {
            let from = self.cursor;
            self.cursor = area.pos;
            self.cursor_moved(from, area.pos);
        }

        let layout = self.layout();
        let index = self.entries.len() - 1;
        self.place_entry(&layout, index);
        self.update_separators();
        id
    }

    /// Widget covering `coord`.
    #[must_use]
    pub fn cell_at(&self, coord: GridCoord) -> Option<&dyn Widget> {
        self.map
            .index_at(coord)
            .map(|i| self.entries[i].widget.as_ref())
    }

    /// Cursor position.
    #[must_use]
    pub const fn cursor(&self) -> GridCoord {
        self.cursor
    }

    /// Whether the cursor rests on a focusable cell.
    #[must_use]
    pub fn cursor_valid(&self) -> bool {
        self.map.is_focusable(self.cursor)
    }

    /// Widget under the cursor.
    #[must_use]
    pub fn focused(&self) -> Option<&dyn Widget> {
        self.cell_at(self.cursor)
    }

    /// ID of the widget under the cursor.
    #[must_use]
    pub fn focused_id(&self) -> Option<WidgetId> {
        self.focused().map(Widget::id)
    }

    /// Find a widget by ID.
    #[must_use]
    pub fn widget(&self, id: WidgetId) -> Option<&dyn Widget> {
        self.entries
            .iter()
            .find(|e| e.widget.id() == id)
            .map(|e| e.widget.as_ref())
    }

    /// Move the cursor to the first focusable cell.
    pub fn reset_cursor(&mut self) {
        if let Some(pos) = self.map.first_focusable() {
            let from = self.cursor;
            self.cursor = pos;
            self.cursor_moved(from, pos);
        }
    }

    /// Move the cursor to the cell holding widget `id`.
    ///
    /// # Panics
    ///
    /// Panics if no cell holds the widget.
    pub fn set_cursor_to(&mut self, id: WidgetId) {
        let Some(index) = self.entries.iter().position(|e| e.widget.id() == id) else {
            panic!("widget {id:?} is not in this grid");
        };
        let from = self.cursor;
        let to = self.map.cells()[index].area.pos;
        self.cursor = to;
        self.cursor_moved(from, to);
    }

    /// Linear probe of the grid's own cells along `dir`.
    pub fn move_cursor_self(&mut self, dir: GridCoord) -> bool {
        self.move_to(probe(&self.map, self.cursor, dir, self.wrap))
    }

    fn move_to(&mut self, target: Option<GridCoord>) -> bool {
        match target {
            Some(to) => {
                let from = self.cursor;
                self.cursor = to;
                self.cursor_moved(from, to);
                true
            }
            None => false,
        }
    }

    fn cursor_moved(&mut self, from: GridCoord, to: GridCoord) {
        if let Some(i) = self.map.index_at(from) {
            self.entries[i].widget.on_focus_lost();
        }
        if let Some(i) = self.map.index_at(to) {
            self.entries[i].widget.on_focus_gained();
        }
    }

    fn focused_mut(&mut self) -> Option<&mut Box<dyn Widget>> {
        let index = self.map.index_at(self.cursor)?;
        Some(&mut self.entries[index].widget)
    }

    fn layout(&self) -> GridLayout {
        GridLayout::compute(&self.columns, &self.rows, self.frame.size)
    }

    fn place_entry(&mut self, layout: &GridLayout, index: usize) {
        let area = self.map.cells()[index].area;
        let bounds = layout.area_bounds(&area);
        let entry = &mut self.entries[index];
        if entry.resize {
            entry.widget.set_size(bounds.size());
        }
        let position = layout.centered_in(&area, entry.widget.size());
        entry.widget.set_position(position);
    }

    fn relayout(&mut self) {
        let layout = self.layout();
        for index in 0..self.entries.len() {
            self.place_entry(&layout, index);
        }
        self.update_separators();
    }

    fn update_separators(&mut self) {
        let layout = self.layout();
        self.separators = self
            .entries
            .iter()
            .zip(self.map.cells())
            .flat_map(|(entry, cell)| {
                let borders = if self.debug_grid {
                    Borders::ALL
                } else {
                    entry.borders
                };
                borders.lines(&layout.area_bounds(&cell.area))
            })
            .collect();
    }

    /// Separator segments in grid-local coordinates.
    #[must_use]
    pub fn separators(&self) -> &[(Point, Point)] {
        &self.separators
    }
}

fn assert_valid_track(track: TrackSize) {
    if let TrackSize::Percent(p) = track {
        assert!((0.0..=1.0).contains(&p), "track percentage {p} outside [0, 1]");
    }
}

impl Widget for ComponentGrid {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn set_size(&mut self, size: Size) {
        self.frame.size = size;
        self.relayout();
    }

    fn input(&mut self, input: &Input) -> bool {
        if let Some(widget) = self.focused_mut() {
            if widget.input(input) {
                return true;
            }
        }
        if !input.pressed {
            return false;
        }
        match input.button {
            Button::Up | Button::Down => {
                let dir = GridCoord::from(input.button.direction().unwrap_or_default());
                self.move_to(navigate(&self.map, self.cursor, dir, self.wrap))
            }
            Button::Left | Button::Right => {
                self.move_cursor(input.button.direction().unwrap_or_default())
            }
            _ => false,
        }
    }

    fn update(&mut self, delta_ms: u32) {
        let focused = self.map.index_at(self.cursor);
        for (index, entry) in self.entries.iter_mut().enumerate() {
            let run = match entry.update {
                UpdatePolicy::Always => true,
                UpdatePolicy::WhenSelected => focused == Some(index),
                UpdatePolicy::Never => false,
            };
            if run {
                entry.widget.update(delta_ms);
            }
        }
    }

    fn render(&self, canvas: &mut dyn Canvas, parent: &Transform2D) {
        let trans = self.frame.transform(parent);
        for entry in &self.entries {
            entry.widget.render(canvas, &trans);
        }
        if !self.separators.is_empty() {
            canvas.set_transform(trans);
            for &(from, to) in &self.separators {
                canvas.draw_line(from, to, self.separator_color, 1.0);
            }
        }
    }

    fn on_focus_gained(&mut self) {
        if let Some(widget) = self.focused_mut() {
            widget.on_focus_gained();
        }
    }

    fn on_focus_lost(&mut self) {
        if let Some(widget) = self.focused_mut() {
            widget.on_focus_lost();
        }
    }

    fn move_cursor(&mut self, dir: (i32, i32)) -> bool {
        if let Some(widget) = self.focused_mut() {
            if widget.move_cursor(dir) {
                return true;
            }
        }
        self.move_cursor_self(GridCoord::from(dir))
    }

    fn help_prompts(&self) -> Vec<HelpPrompt> {
        let mut prompts = self.focused().map(Widget::help_prompts).unwrap_or_default();

        let size = self.dimensions();
        let mut vertical = size.y > 1;
        let mut horizontal = size.x > 1;
        for prompt in &prompts {
            match prompt.button.as_str() {
                "up/down/left/right" => {
                    vertical = false;
                    horizontal = false;
                }
                "up/down" => vertical = false,
                "left/right" => horizontal = false,
                _ => {}
            }
        }

        let combined = match (vertical, horizontal) {
            (true, true) => Some("up/down/left/right"),
            (false, true) => Some("left/right"),
            (true, false) => Some("up/down"),
            (false, false) => None,
        };
        if let Some(button) = combined {
            prompts.push(HelpPrompt::new(button, "choose"));
        }
        prompts
    }
}
