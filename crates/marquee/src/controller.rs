//! Top-level view state machine.
//!
//! The controller owns every screen, the camera [`Stage`] and its animator.
//! Screens live at fixed world positions: the system carousel on the row at
//! `y = screen height`, each system's game list at
//! `(system index * screen width, 2 * screen height)`. Moving between
//! screens is a camera transition.

use crate::audio::{apply_music_policy, init_background_music, AudioPlayer};
use crate::config::{SettingsStore, TransitionStyle};
use crate::error::ShellError;
use crate::launcher::{LaunchRequest, Launcher};
use crate::library::GameLibrary;
use crate::random;
use crate::transition::{
    launch_animation, launch_durations, play_view_transition, FadePhase, Stage,
};
use crate::views::{select_view_kind, GameListView, SystemView, View, ViewCommand};
use marquee_core::{
    Animator, Button, Canvas, Color, FinishedCallback, Frame, HelpPrompt, Input, Point, Rect,
    Size, Transform2D, Widget, SLOT_PRIMARY, SLOT_SECONDARY,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Which screen is current.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    /// Nothing shown yet
    #[default]
    Nothing,
    /// System carousel on a system
    SystemSelect(String),
    /// A system's game list
    GameList(String),
}

impl ViewState {
    /// Current system, if any.
    #[must_use]
    pub fn system(&self) -> Option<&str> {
        match self {
            Self::Nothing => None,
            Self::SystemSelect(name) | Self::GameList(name) => Some(name),
        }
    }

    /// Whether a game list is current.
    #[must_use]
    pub const fn is_game_list(&self) -> bool {
        matches!(self, Self::GameList(_))
    }
}

/// Collaborators shared with launch callbacks.
#[derive(Clone)]
pub struct Services {
    /// Read-only settings
    pub settings: Arc<dyn SettingsStore>,
    /// Background music
    pub audio: Arc<dyn AudioPlayer>,
    /// Game launcher
    pub launcher: Arc<dyn Launcher>,
}

impl fmt::Debug for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}

/// Owns the screens and sequences every move between them.
pub struct ViewController {
    frame: Frame,
    library: Box<dyn GameLibrary>,
    services: Services,
    state: ViewState,
    system_view: Option<SystemView>,
    game_lists: BTreeMap<String, GameListView>,
    stage: Stage,
    animator: Animator<Stage>,
    rng: StdRng,
    menu_requested: bool,
    music_initialized: bool,
}

impl fmt::Debug for ViewController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewController")
            .field("state", &self.state)
            .field("stage", &self.stage)
            .field("game_lists", &self.game_lists.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl ViewController {
    /// Create a controller for a screen of `screen` size. Nothing is shown
    /// until [`go_to_start`](Self::go_to_start).
    #[must_use]
    pub fn new(library: Box<dyn GameLibrary>, services: Services, screen: Size) -> Self {
        Self {
            frame: Frame::new(screen),
            library,
            services,
            state: ViewState::Nothing,
            system_view: None,
            game_lists: BTreeMap::new(),
            stage: Stage::default(),
            animator: Animator::new(),
            rng: StdRng::from_entropy(),
            menu_requested: false,
            music_initialized: false,
        }
    }

    /// Seed the random-game generator.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Current screen.
    #[must_use]
    pub const fn state(&self) -> &ViewState {
        &self.state
    }

    /// Camera, fade and input latch.
    #[must_use]
    pub const fn stage(&self) -> &Stage {
        &self.stage
    }

    /// World-to-screen camera.
    #[must_use]
    pub const fn camera(&self) -> &Transform2D {
        &self.stage.camera
    }

    /// Overlay alpha.
    #[must_use]
    pub const fn fade_opacity(&self) -> f32 {
        self.stage.fade_opacity
    }

    /// Fade progress.
    #[must_use]
    pub const fn fade_phase(&self) -> FadePhase {
        self.stage.fade_phase
    }

    /// Whether input is being swallowed.
    #[must_use]
    pub const fn is_input_locked(&self) -> bool {
        self.stage.input_locked
    }

    /// Whether any transition is running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animator.is_any_playing()
    }

    /// The game library.
    #[must_use]
    pub fn library(&self) -> &dyn GameLibrary {
        self.library.as_ref()
    }

    /// Shared collaborators.
    #[must_use]
    pub const fn services(&self) -> &Services {
        &self.services
    }

    /// The system carousel, once built.
    #[must_use]
    pub const fn system_view(&self) -> Option<&SystemView> {
        self.system_view.as_ref()
    }

    /// A built game list.
    #[must_use]
    pub fn game_list(&self, system: &str) -> Option<&GameListView> {
        self.game_lists.get(system)
    }

    /// Number of game lists built so far.
    #[must_use]
    pub fn game_list_count(&self) -> usize {
        self.game_lists.len()
    }

    /// Whether `Start` was pressed since the last call.
    pub fn take_menu_request(&mut self) -> bool {
        std::mem::take(&mut self.menu_requested)
    }

    fn screen(&self) -> Size {
        self.frame.size
    }

    fn current_view(&self) -> Option<&dyn View> {
        match &self.state {
            ViewState::Nothing => None,
            ViewState::SystemSelect(_) => self.system_view.as_ref().map(|v| v as &dyn View),
            ViewState::GameList(name) => self.game_lists.get(name).map(|v| v as &dyn View),
        }
    }

    fn current_view_mut(&mut self) -> Option<&mut dyn View> {
        match &self.state {
            ViewState::Nothing => None,
            ViewState::SystemSelect(_) => self.system_view.as_mut().map(|v| v as &mut dyn View),
            ViewState::GameList(name) => self.game_lists.get_mut(name).map(|v| v as &mut dyn View),
        }
    }

    fn hide_current(&mut self) {
        if let Some(view) = self.current_view_mut() {
            view.on_hide();
        }
    }

    fn system_view_mut(&mut self) -> &mut SystemView {
        let screen = self.screen();
        let library = self.library.as_ref();
        self.system_view.get_or_insert_with(|| {
            let mut view = SystemView::new(library, screen);
            view.set_position(Point::new(0.0, screen.height));
            view
        })
    }

    fn build_game_list(&self, system: &str) -> Result<GameListView, ShellError> {
        let index = self
            .library
            .index_of(system)
            .ok_or_else(|| ShellError::UnknownSystem(system.to_string()))?;
        let data = self
            .library
            .systems()
            .get(index)
            .ok_or_else(|| ShellError::UnknownSystem(system.to_string()))?;
        let settings = &self.services.settings;
        let kind = select_view_kind(data, settings.gamelist_view_style());
        let screen = self.screen();

        log::info!("building {kind:?} game list for {system}");
        let mut view = GameListView::new(data, kind, screen, settings.debug_grid());
        view.set_position(Point::new(index as f32 * screen.width, screen.height * 2.0));
        Ok(view)
    }

    fn game_list_view_mut(&mut self, system: &str) -> Result<&mut GameListView, ShellError> {
        if !self.game_lists.contains_key(system) {
            let view = self.build_game_list(system)?;
            self.game_lists.insert(system.to_string(), view);
        }
        self.game_lists
            .get_mut(system)
            .ok_or_else(|| ShellError::UnknownSystem(system.to_string()))
    }

    fn enabled_index(&self, system: &str) -> Result<usize, ShellError> {
        let Some(data) = self.library.system(system) else {
            log::warn!("unknown system {system}");
            return Err(ShellError::UnknownSystem(system.to_string()));
        };
        if !data.enabled {
            log::warn!("system {system} is disabled");
            return Err(ShellError::precondition(format!("system {system} is disabled")));
        }
        self.library
            .index_of(system)
            .ok_or_else(|| ShellError::UnknownSystem(system.to_string()))
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Show the first screen and start the background music.
    ///
    /// The last selected system is restored with a fade when it still
    /// exists and is enabled; otherwise the first enabled system is shown
    /// with the configured transition.
    ///
    /// # Errors
    ///
    /// Fails when no system is enabled.
    pub fn go_to_start(&mut self) -> Result<(), ShellError> {
        let last = self.services.settings.last_system_selected();
        let restored = self
            .library
            .system(&last)
            .filter(|s| s.enabled)
            .map(|s| s.name.clone());

        match restored {
            Some(name) => self.go_to_system_view_with(&name, TransitionStyle::Fade)?,
            None => {
                let Some(first) = self.library.first_enabled().map(|s| s.name.clone()) else {
                    log::warn!("no enabled systems to start on");
                    return Err(ShellError::precondition("no enabled systems"));
                };
                self.go_to_system_view(&first)?;
            }
        }

        if !self.music_initialized {
            init_background_music(
                self.services.audio.as_ref(),
                self.services.settings.as_ref(),
            );
            self.music_initialized = true;
        }
        Ok(())
    }

    /// Show the carousel on `system` with the configured transition.
    ///
    /// # Errors
    ///
    /// Fails for unknown or disabled systems, leaving the state unchanged.
    pub fn go_to_system_view(&mut self, system: &str) -> Result<(), ShellError> {
        let style = self.services.settings.transition_style();
        self.go_to_system_view_with(system, style)
    }

    /// Show the carousel on `system` with an explicit transition.
    ///
    /// # Errors
    ///
    /// Fails for unknown or disabled systems, leaving the state unchanged.
    pub fn go_to_system_view_with(
        &mut self,
        system: &str,
        style: TransitionStyle,
    ) -> Result<(), ShellError> {
        let index = self.enabled_index(system)?;

        self.hide_current();
        self.state = ViewState::SystemSelect(system.to_string());
        log::info!("system view: {system}");
        apply_music_policy(
            self.services.audio.as_ref(),
            self.services.settings.as_ref(),
            false,
        );

        let screen = self.screen();
        let view = self.system_view_mut();
        view.set_position(Point::new(index as f32 * screen.width, view.position().y));
        view.go_to_system(system);
        view.on_show();
        let target = view.position();
        play_view_transition(&mut self.animator, &mut self.stage, target, style);
        Ok(())
    }

    /// Show `system`'s game list, building it on first use.
    ///
    /// # Errors
    ///
    /// Fails for unknown or disabled systems, leaving the state unchanged.
    pub fn go_to_game_list(&mut self, system: &str) -> Result<(), ShellError> {
        let index = self.enabled_index(system)?;
        let screen = self.screen();

        if matches!(self.state, ViewState::SystemSelect(_)) {
            // slide the carousel under the target list and keep the camera
            // on it so the transition starts from where the user is looking
            if let Some(view) = &mut self.system_view {
                let before = view.position();
                view.set_position(Point::new(index as f32 * screen.width, before.y));
                let offset = view.position().x - before.x;
                let translation = self.stage.camera.translation();
                self.stage
                    .camera
                    .set_translation(Point::new(translation.x - offset, translation.y));
            }
        }

        // build first so a failure leaves everything as it was
        self.game_list_view_mut(system)?;

        self.hide_current();
        self.state = ViewState::GameList(system.to_string());
        log::info!("game list: {system}");
        apply_music_policy(
            self.services.audio.as_ref(),
            self.services.settings.as_ref(),
            true,
        );

        let style = self.services.settings.transition_style();
        let view = self.game_list_view_mut(system)?;
        view.on_show();
        let target = view.position();
        play_view_transition(&mut self.animator, &mut self.stage, target, style);
        Ok(())
    }

    /// Move to the next enabled system's game list.
    ///
    /// # Errors
    ///
    /// Fails unless a game list is current.
    pub fn go_to_next_game_list(&mut self) -> Result<(), ShellError> {
        self.step_game_list(true)
    }

    /// Move to the previous enabled system's game list.
    ///
    /// # Errors
    ///
    /// Fails unless a game list is current.
    pub fn go_to_prev_game_list(&mut self) -> Result<(), ShellError> {
        self.step_game_list(false)
    }

    fn step_game_list(&mut self, forward: bool) -> Result<(), ShellError> {
        let ViewState::GameList(current) = &self.state else {
            log::warn!("sibling game list requested outside a game list");
            return Err(ShellError::precondition(
                "sibling game lists need a current game list",
            ));
        };
        let sibling = if forward {
            self.library.next_enabled(current)
        } else {
            self.library.prev_enabled(current)
        };
        let Some(name) = sibling.map(|s| s.name.clone()) else {
            return Err(ShellError::UnknownSystem(current.clone()));
        };
        self.go_to_game_list(&name)
    }

    /// Jump to a uniformly random game.
    ///
    /// # Errors
    ///
    /// Fails when no eligible system has a displayed game.
    pub fn go_to_random_game(&mut self) -> Result<(), ShellError> {
        let excluded = self.services.settings.random_excluded_systems();
        let Some((system, index)) = random::pick(self.library.as_ref(), &excluded, &mut self.rng)
        else {
            log::warn!("no games to pick from");
            return Err(ShellError::precondition("no games to pick from"));
        };
        let game = self
            .library
            .system(&system)
            .and_then(|s| s.displayed_games().get(index).map(|g| g.path.clone()))
            .ok_or_else(|| ShellError::UnknownSystem(system.clone()))?;

        log::info!("random game: {} in {system}", game.display());
        self.go_to_game_list(&system)?;
        self.game_list_view_mut(&system)?.set_cursor(&game);
        Ok(())
    }

    // =========================================================================
    // Launch
    // =========================================================================

    /// Launch `game` of the current system, zooming toward `center` (view
    /// coordinates).
    ///
    /// Input stays locked until the forward animation ends and the launcher
    /// returns; the reverse animation then plays with input unlocked.
    ///
    /// # Errors
    ///
    /// Fails without side effects when `game` is not a game of the current
    /// system.
    ///
    /// # Panics
    ///
    /// Panics if no view is current.
    pub fn launch(&mut self, game: &Path, center: Point) -> Result<(), ShellError> {
        let request = self
            .state
            .system()
            .and_then(|name| self.library.system(name))
            .and_then(|system| {
                system
                    .root
                    .find(game)
                    .filter(|file| file.is_game())
                    .map(|file| LaunchRequest {
                        system: system.name.clone(),
                        command: system.command.clone(),
                        game: file.path.clone(),
                        name: file.name.clone(),
                    })
            });
        let Some(request) = request else {
            log::error!("tried to launch {}, which is not a game", game.display());
            return Err(ShellError::precondition(format!(
                "{} is not a game",
                game.display()
            )));
        };

        let style = self.services.settings.transition_style();
        let music_enabled = self.services.settings.music_enabled();
        let audio = Arc::clone(&self.services.audio);
        let was_playing = audio.is_playing();
        if music_enabled {
            audio.pause();
        }

        let Some(position) = self.current_view().map(|v| v.position()) else {
            panic!("launch requested with no current view");
        };
        self.hide_current();

        let (forward, back) = launch_durations(style);
        let screen = self.screen();
        let mut home = self.stage.camera;
        home.set_translation(-position);
        let center = center + position;

        self.animator.cancel(SLOT_SECONDARY);
        self.stage.input_locked = true;
        log::info!("launching {} ({style:?})", request.name);

        let launcher = Arc::clone(&self.services.launcher);
        let on_finished: FinishedCallback<Stage> = Box::new(move |stage, animator| {
            if let Err(err) = launcher.launch(&request) {
                log::error!("{err}");
            }
            // an interrupted view transition never reached its target
            stage.camera = home;
            stage.fade_phase = FadePhase::Idle;
            stage.input_locked = false;
            let reverse = launch_animation(style, stage, center, screen, back);
            animator.set_animation(SLOT_PRIMARY, reverse, 0, None, true);
            stage.changed_files.push((request.system, request.game));
            if was_playing && music_enabled {
                audio.resume();
            }
        });
        let animation = launch_animation(style, &self.stage, center, screen, forward);
        self.animator
            .set_animation(SLOT_PRIMARY, animation, 0, Some(on_finished), false);
        Ok(())
    }

    // =========================================================================
    // Commands and reloads
    // =========================================================================

    /// Carry out a view's request.
    ///
    /// # Errors
    ///
    /// Propagates the failure of the operation the command maps to.
    pub fn handle_command(&mut self, command: ViewCommand) -> Result<(), ShellError> {
        log::debug!("view command: {command:?}");
        match command {
            ViewCommand::GoToGameList(system) => self.go_to_game_list(&system),
            ViewCommand::GoToSystemView(system) => self.go_to_system_view(&system),
            ViewCommand::NextGameList => self.go_to_next_game_list(),
            ViewCommand::PrevGameList => self.go_to_prev_game_list(),
            ViewCommand::Launch { game, center } => self.launch(&game, center),
            ViewCommand::RandomGame => self.go_to_random_game(),
        }
    }

    /// A game's metadata changed. Lists that were never built ignore it.
    pub fn on_file_changed(&mut self, system: &str, game: &Path) {
        match self.game_lists.get_mut(system) {
            Some(view) => view.on_file_changed(game),
            None => log::debug!("no {system} game list to refresh"),
        }
    }

    /// Rebuild `system`'s game list, keeping its cursor unless it sat on a
    /// placeholder. Lists that were never built are left alone.
    ///
    /// # Errors
    ///
    /// Fails when the system no longer exists.
    pub fn reload_game_list_view(
        &mut self,
        system: &str,
        reload_theme: bool,
    ) -> Result<(), ShellError> {
        let Some(old) = self.game_lists.remove(system) else {
            return Ok(());
        };
        let cursor = old.cursor_path();
        if reload_theme {
            self.library.reload_theme(system);
        }

        let current = self.state == ViewState::GameList(system.to_string());
        let view = self.game_list_view_mut(system)?;
        if let Some(path) = cursor {
            view.set_cursor(&path);
        }
        if current {
            view.on_show();
        }
        Ok(())
    }

    /// Rebuild every built view and the carousel, then restore the current
    /// screen.
    ///
    /// # Errors
    ///
    /// Fails when a system with a built list no longer exists, or when
    /// nothing was shown and no system is enabled.
    pub fn reload_all(&mut self) -> Result<(), ShellError> {
        let cursors: Vec<(String, Option<PathBuf>)> = self
            .game_lists
            .iter()
            .map(|(name, view)| (name.clone(), view.cursor_path()))
            .collect();
        self.game_lists.clear();
        log::info!("reloading {} game lists", cursors.len());

        for (system, cursor) in cursors {
            self.library.reload_theme(&system);
            let view = self.game_list_view_mut(&system)?;
            if let Some(path) = cursor {
                view.set_cursor(&path);
            }
        }
        self.system_view = None;

        match self.state.clone() {
            ViewState::GameList(system) => {
                self.game_list_view_mut(&system)?.on_show();
                Ok(())
            }
            ViewState::SystemSelect(system) => self.go_to_system_view(&system),
            ViewState::Nothing => {
                let first = self
                    .library
                    .first_enabled()
                    .map(|s| s.name.clone())
                    .ok_or_else(|| ShellError::precondition("no enabled systems"))?;
                self.go_to_system_view(&first)
            }
        }
    }

    /// Build every enabled system's game list up front.
    ///
    /// # Errors
    ///
    /// Fails when a list cannot be built.
    pub fn preload(&mut self) -> Result<(), ShellError> {
        let names: Vec<String> = self
            .library
            .systems()
            .iter()
            .filter(|s| s.enabled)
            .map(|s| s.name.clone())
            .collect();
        for name in names {
            self.game_list_view_mut(&name)?;
        }
        Ok(())
    }

    /// Camera window in world coordinates.
    #[must_use]
    pub fn visible_rect(&self, parent: &Transform2D) -> Rect {
        let screen = self.screen();
        let trans = parent.then(&self.stage.camera);
        let Some(inverse) = trans.inverse() else {
            return Rect::from_size(screen);
        };
        let start = inverse.apply(Point::ORIGIN);
        let end = inverse.apply(Point::new(screen.width, screen.height));
        Rect::new(start.x, start.y, end.x - start.x, end.y - start.y)
    }
}

impl Widget for ViewController {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn input(&mut self, input: &Input) -> bool {
        if self.stage.input_locked {
            return true;
        }
        if input.is_press(Button::Start) {
            self.menu_requested = true;
            return true;
        }

        let Some(view) = self.current_view_mut() else {
            return false;
        };
        let consumed = view.input(input);
        if let Some(command) = view.take_command() {
            if let Err(err) = self.handle_command(command) {
                log::warn!("{err}");
            }
        }
        consumed
    }

    fn update(&mut self, delta_ms: u32) {
        if let Some(view) = self.current_view_mut() {
            view.update(delta_ms);
        }
        self.animator.update(&mut self.stage, delta_ms);

        let changed = std::mem::take(&mut self.stage.changed_files);
        if !changed.is_empty() {
            for (system, game) in changed {
                self.on_file_changed(&system, &game);
            }
            // the view was hidden for the launch
            if let Some(view) = self.current_view_mut() {
                view.on_show();
            }
        }
    }

    fn render(&self, canvas: &mut dyn Canvas, parent: &Transform2D) {
        let trans = parent.then(&self.stage.camera);
        let visible = self.visible_rect(parent);

        if let Some(view) = &self.system_view {
            if overlaps(&view.frame().bounds(), &visible) {
                view.render(canvas, &trans);
            }
        }
        for view in self.game_lists.values() {
            if overlaps(&view.frame().bounds(), &visible) {
                view.render(canvas, &trans);
            }
        }

        if self.stage.fade_opacity > 0.0 {
            canvas.set_transform(*parent);
            canvas.fill_rect(
                Rect::from_size(self.screen()),
                Color::BLACK.with_alpha(self.stage.fade_opacity),
            );
        }
    }

    fn help_prompts(&self) -> Vec<HelpPrompt> {
        let mut prompts = self
            .current_view()
            .map(|v| v.help_prompts())
            .unwrap_or_default();
        prompts.push(HelpPrompt::new("start", "menu"));
        prompts
    }
}

/// Screens sharing only an edge with the camera window are off screen.
fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}
