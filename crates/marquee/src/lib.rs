//! Marquee: navigation and presentation for a controller-driven game
//! launcher.
//!
//! The [`Window`] owns a [`ViewController`], which owns every screen and
//! moves a camera between them:
//!
//! - the system carousel ([`SystemView`]) and one game list per system
//!   ([`GameListView`]), built on first use
//! - fade, slide and instant transitions animated on a [`Stage`]
//! - the launch sequence, which locks input, pauses music and hands the
//!   game to a [`Launcher`]
//!
//! Settings, audio and the launcher are traits ([`SettingsStore`],
//! [`AudioPlayer`], [`Launcher`]) with in-memory implementations for tests
//! and headless runs.
//!
//! ```
//! use marquee::{
//!     FileData, MemoryAudio, MemoryLauncher, MemorySettings, Services, SystemCatalog,
//!     SystemData, ViewController, ViewState, Window,
//! };
//! use marquee_core::{Size, Widget};
//! use std::sync::Arc;
//!
//! let catalog = SystemCatalog::new(vec![
//!     SystemData::new("nes").with_games(vec![FileData::game("Contra", "/nes/contra")]),
//! ]);
//! let services = Services {
//!     settings: Arc::new(MemorySettings::new()),
//!     audio: Arc::new(MemoryAudio::new()),
//!     launcher: Arc::new(MemoryLauncher::new()),
//! };
//! let mut controller = ViewController::new(Box::new(catalog), services, Size::new(1280.0, 720.0));
//! controller.go_to_start()?;
//! let mut window = Window::new(controller);
//! window.update(16);
//! assert_eq!(window.controller().state(), &ViewState::SystemSelect("nes".into()));
//! # Ok::<(), marquee::ShellError>(())
//! ```

pub mod audio;
pub mod config;
pub mod controller;
pub mod error;
pub mod launcher;
pub mod library;
pub mod random;
pub mod theme;
pub mod transition;
pub mod views;
pub mod window;

pub use audio::{AudioPlayer, MemoryAudio, MusicAction, PlaybackMode, PlaybackStatus};
pub use config::{
    keys, GamelistViewStyle, MemorySettings, SettingValue, Settings, SettingsStore,
    TransitionStyle,
};
pub use controller::{Services, ViewController, ViewState};
pub use error::{ConfigError, ShellError};
pub use launcher::{CommandLauncher, LaunchRequest, Launcher, MemoryLauncher};
pub use library::{FileData, FileKind, GameLibrary, SystemCatalog, SystemData};
pub use theme::Theme;
pub use transition::{FadePhase, Stage};
pub use views::{GameListKind, GameListView, SystemView, View, ViewCommand};
pub use window::{MenuAction, Window};
