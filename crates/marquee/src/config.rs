//! Settings: the typed TOML file and the read-only lookup trait the shell
//! consumes.
//!
//! The controller reads settings at the moment it needs them, never caching,
//! so a store can change between operations.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Setting keys.
pub mod keys {
    /// Screen transition style
    pub const TRANSITION_STYLE: &str = "TransitionStyle";
    /// Forced game-list view kind
    pub const GAMELIST_VIEW_STYLE: &str = "GamelistViewStyle";
    /// Background music on/off
    pub const BACKGROUND_MUSIC_ENABLED: &str = "BackgroundMusicEnabled";
    /// Pause music while a game list is shown
    pub const VIDEO_PREVIEW_PAUSE_BG_MUSIC: &str = "VideoPreviewPauseBGMusic";
    /// Music volume, 0 to 100
    pub const BACKGROUND_MUSIC_VOLUME: &str = "BackgroundMusicVolume";
    /// System shown at start
    pub const LAST_SYSTEM_SELECTED: &str = "LastSystemSelected";
    /// Draw every grid separator
    pub const DEBUG_GRID: &str = "DebugGrid";
    /// Systems never picked by the random game
    pub const RANDOM_GAME_EXCLUDED_SYSTEMS: &str = "RandomGameExcludedSystems";
    /// Folder scanned for background music
    pub const MUSIC_FOLDER: &str = "MusicFolder";
}

// =============================================================================
// Enumerated settings
// =============================================================================

/// How the camera moves between screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionStyle {
    /// Fade to black, cut, fade back
    #[default]
    Fade,
    /// Camera slide
    Slide,
    /// Camera slide, same motion as `Slide`
    #[serde(rename = "simple slide")]
    SimpleSlide,
    /// Cut
    Instant,
}

impl TransitionStyle {
    /// Whether the camera moves with a slide.
    #[must_use]
    pub const fn is_slide(self) -> bool {
        matches!(self, Self::Slide | Self::SimpleSlide)
    }
}

impl FromStr for TransitionStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fade" => Ok(Self::Fade),
            "slide" => Ok(Self::Slide),
            "simple slide" => Ok(Self::SimpleSlide),
            "instant" => Ok(Self::Instant),
            other => Err(ConfigError::InvalidValue {
                key: keys::TRANSITION_STYLE.to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Which game-list view to build for a system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamelistViewStyle {
    /// Pick from the system's content
    #[default]
    Automatic,
    /// Text list only
    Basic,
    /// List with artwork and description
    Detailed,
    /// List with video preview
    Video,
}

impl FromStr for GamelistViewStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "automatic" => Ok(Self::Automatic),
            "basic" => Ok(Self::Basic),
            "detailed" => Ok(Self::Detailed),
            "video" => Ok(Self::Video),
            other => Err(ConfigError::InvalidValue {
                key: keys::GAMELIST_VIEW_STYLE.to_string(),
                value: other.to_string(),
            }),
        }
    }
}

// =============================================================================
// SettingsStore
// =============================================================================

/// Read-only key/value settings lookups.
///
/// The typed accessors fall back to the documented defaults when a key is
/// missing or holds something unusable.
pub trait SettingsStore: Send + Sync {
    /// String value of `key`.
    fn get_string(&self, key: &str) -> Option<String>;

    /// Boolean value of `key`.
    fn get_bool(&self, key: &str) -> Option<bool>;

    /// Integer value of `key`.
    fn get_int(&self, key: &str) -> Option<i64>;

    /// List value of `key`.
    fn get_list(&self, key: &str) -> Option<Vec<String>>;

    /// `TransitionStyle`; unrecognised styles cut instantly.
    fn transition_style(&self) -> TransitionStyle {
        self.get_string(keys::TRANSITION_STYLE)
            .map_or_else(TransitionStyle::default, |s| {
                s.parse().unwrap_or_else(|_| {
                    log::warn!("unknown transition style '{s}', using instant");
                    TransitionStyle::Instant
                })
            })
    }

    /// `GamelistViewStyle`; unrecognised styles mean automatic.
    fn gamelist_view_style(&self) -> GamelistViewStyle {
        self.get_string(keys::GAMELIST_VIEW_STYLE)
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// `BackgroundMusicEnabled`, default on.
    fn music_enabled(&self) -> bool {
        self.get_bool(keys::BACKGROUND_MUSIC_ENABLED).unwrap_or(true)
    }

    /// `VideoPreviewPauseBGMusic`, default off.
    fn pause_music_in_game_list(&self) -> bool {
        self.get_bool(keys::VIDEO_PREVIEW_PAUSE_BG_MUSIC)
            .unwrap_or(false)
    }

    /// `BackgroundMusicVolume`, clamped to 0..=100.
    fn music_volume(&self) -> u8 {
        self.get_int(keys::BACKGROUND_MUSIC_VOLUME)
            .map_or(DEFAULT_VOLUME, |v| v.clamp(0, 100) as u8)
    }

    /// `LastSystemSelected`, empty when unset.
    fn last_system_selected(&self) -> String {
        self.get_string(keys::LAST_SYSTEM_SELECTED)
            .unwrap_or_default()
    }

    /// `DebugGrid`, default off.
    fn debug_grid(&self) -> bool {
        self.get_bool(keys::DEBUG_GRID).unwrap_or(false)
    }

    /// `RandomGameExcludedSystems`.
    fn random_excluded_systems(&self) -> Vec<String> {
        self.get_list(keys::RANDOM_GAME_EXCLUDED_SYSTEMS)
            .unwrap_or_else(default_excluded_systems)
    }

    /// `MusicFolder`.
    fn music_folder(&self) -> PathBuf {
        self.get_string(keys::MUSIC_FOLDER)
            .map_or_else(default_music_folder, PathBuf::from)
    }
}

const DEFAULT_VOLUME: u8 = 80;

fn default_excluded_systems() -> Vec<String> {
    vec!["retropie".to_string()]
}

fn default_music_folder() -> PathBuf {
    std::env::var_os("HOME")
        .map_or_else(PathBuf::new, PathBuf::from)
        .join(".marquee")
        .join("music")
}

const fn default_true() -> bool {
    true
}

const fn default_volume() -> u8 {
    DEFAULT_VOLUME
}

// =============================================================================
// Settings (TOML file)
// =============================================================================

/// Settings file contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Settings {
    /// Screen transition style
    #[serde(default)]
    pub transition_style: TransitionStyle,
    /// Forced game-list view kind
    #[serde(default)]
    pub gamelist_view_style: GamelistViewStyle,
    /// Background music on/off
    #[serde(default = "default_true")]
    pub background_music_enabled: bool,
    /// Pause music while a game list is shown
    #[serde(default, rename = "VideoPreviewPauseBGMusic")]
    pub video_preview_pause_bg_music: bool,
    /// Music volume, 0 to 100
    #[serde(default = "default_volume")]
    pub background_music_volume: u8,
    /// System shown at start
    #[serde(default)]
    pub last_system_selected: String,
    /// Draw every grid separator
    #[serde(default)]
    pub debug_grid: bool,
    /// Systems never picked by the random game
    #[serde(default = "default_excluded_systems")]
    pub random_game_excluded_systems: Vec<String>,
    /// Folder scanned for background music
    #[serde(default = "default_music_folder")]
    pub music_folder: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            transition_style: TransitionStyle::default(),
            gamelist_view_style: GamelistViewStyle::default(),
            background_music_enabled: true,
            video_preview_pause_bg_music: false,
            background_music_volume: DEFAULT_VOLUME,
            last_system_selected: String::new(),
            debug_grid: false,
            random_game_excluded_systems: default_excluded_systems(),
            music_folder: default_music_folder(),
        }
    }
}

impl Settings {
    /// Parse settings from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_toml_str(&text)?;
        log::info!("loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.background_music_volume > 100 {
            return Err(ConfigError::InvalidValue {
                key: keys::BACKGROUND_MUSIC_VOLUME.to_string(),
                value: self.background_music_volume.to_string(),
            });
        }
        Ok(())
    }
}

impl SettingsStore for Settings {
    fn get_string(&self, key: &str) -> Option<String> {
        match key {
            keys::TRANSITION_STYLE => Some(
                match self.transition_style {
                    TransitionStyle::Fade => "fade",
                    TransitionStyle::Slide => "slide",
                    TransitionStyle::SimpleSlide => "simple slide",
                    TransitionStyle::Instant => "instant",
                }
                .to_string(),
            ),
            keys::GAMELIST_VIEW_STYLE => Some(
                match self.gamelist_view_style {
                    GamelistViewStyle::Automatic => "automatic",
                    GamelistViewStyle::Basic => "basic",
                    GamelistViewStyle::Detailed => "detailed",
                    GamelistViewStyle::Video => "video",
                }
                .to_string(),
            ),
            keys::LAST_SYSTEM_SELECTED => Some(self.last_system_selected.clone()),
            keys::MUSIC_FOLDER => Some(self.music_folder.to_string_lossy().into_owned()),
            _ => None,
        }
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        match key {
            keys::BACKGROUND_MUSIC_ENABLED => Some(self.background_music_enabled),
            keys::VIDEO_PREVIEW_PAUSE_BG_MUSIC => Some(self.video_preview_pause_bg_music),
            keys::DEBUG_GRID => Some(self.debug_grid),
            _ => None,
        }
    }

    fn get_int(&self, key: &str) -> Option<i64> {
        match key {
            keys::BACKGROUND_MUSIC_VOLUME => Some(i64::from(self.background_music_volume)),
            _ => None,
        }
    }

    fn get_list(&self, key: &str) -> Option<Vec<String>> {
        match key {
            keys::RANDOM_GAME_EXCLUDED_SYSTEMS => Some(self.random_game_excluded_systems.clone()),
            _ => None,
        }
    }
}

// =============================================================================
// MemorySettings
// =============================================================================

/// A single stored setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    /// Text
    String(String),
    /// Flag
    Bool(bool),
    /// Number
    Int(i64),
    /// Text list
    List(Vec<String>),
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<Vec<String>> for SettingValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// In-memory settings for testing.
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    values: HashMap<String, SettingValue>,
}

impl MemorySettings {
    /// Create an empty store; every accessor returns its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<SettingValue>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SettingsStore for MemorySettings {
    fn get_string(&self, key: &str) -> Option<String> {
        match self.values.get(key)? {
            SettingValue::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        match self.values.get(key)? {
            SettingValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    fn get_int(&self, key: &str) -> Option<i64> {
        match self.values.get(key)? {
            SettingValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    fn get_list(&self, key: &str) -> Option<Vec<String>> {
        match self.values.get(key)? {
            SettingValue::List(l) => Some(l.clone()),
            _ => None,
        }
    }
}
