//! Background music: the audio-player trait, an in-memory player and the
//! policy deciding whether music plays on each screen.

use crate::config::SettingsStore;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use walkdir::WalkDir;

/// What happens when the playlist reaches its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackMode {
    /// Stop after the last track
    #[default]
    Once,
    /// Start over
    Loop,
}

/// Music playback.
pub trait AudioPlayer: Send + Sync {
    /// Play a single file now.
    fn play(&self, path: &Path);
    /// Pause if playing.
    fn pause(&self);
    /// Resume if paused.
    fn resume(&self);
    /// Stop playback.
    fn stop(&self);
    /// Start the playlist from its first track.
    fn start_playlist(&self);
    /// Append tracks, optionally shuffled.
    fn add_to_playlist(&self, paths: &[PathBuf], shuffle: bool);
    /// Set end-of-playlist behaviour.
    fn set_playback_mode(&self, mode: PlaybackMode);
    /// Volume, 0 to 100.
    fn set_volume(&self, volume: u8);
    /// Whether audio is playing.
    fn is_playing(&self) -> bool;
    /// Whether audio is paused.
    fn is_paused(&self) -> bool;
}

/// Playback state of a [`MemoryAudio`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    /// Nothing started
    #[default]
    Stopped,
    /// Playing
    Playing,
    /// Paused
    Paused,
}

#[derive(Debug, Default)]
struct AudioState {
    playlist: Vec<PathBuf>,
    track: Option<PathBuf>,
    status: PlaybackStatus,
    mode: PlaybackMode,
    volume: u8,
    pauses: usize,
}

/// In-memory audio player for testing.
#[derive(Debug)]
pub struct MemoryAudio {
    state: Mutex<AudioState>,
    rng: Mutex<StdRng>,
}

impl Default for MemoryAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryAudio {
    /// Create a stopped player with an entropy-seeded shuffle.
    #[must_use]
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Create a player whose shuffle order is reproducible.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            state: Mutex::new(AudioState {
                volume: 100,
                ..AudioState::default()
            }),
            rng: Mutex::new(rng),
        }
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut AudioState) -> R) -> R {
        f(&mut self.state.lock().expect("MemoryAudio mutex poisoned"))
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> PlaybackStatus {
        self.with_state(|s| s.status)
    }

    /// Playlist in play order.
    #[must_use]
    pub fn playlist(&self) -> Vec<PathBuf> {
        self.with_state(|s| s.playlist.clone())
    }

    /// Track playing or paused.
    #[must_use]
    pub fn track(&self) -> Option<PathBuf> {
        self.with_state(|s| s.track.clone())
    }

    /// Current volume.
    #[must_use]
    pub fn volume(&self) -> u8 {
        self.with_state(|s| s.volume)
    }

    /// Current playback mode.
    #[must_use]
    pub fn mode(&self) -> PlaybackMode {
        self.with_state(|s| s.mode)
    }

    /// Number of pauses that took effect.
    #[must_use]
    pub fn pause_count(&self) -> usize {
        self.with_state(|s| s.pauses)
    }
}

impl AudioPlayer for MemoryAudio {
    fn play(&self, path: &Path) {
        self.with_state(|s| {
            s.track = Some(path.to_path_buf());
            s.status = PlaybackStatus::Playing;
        });
    }

    fn pause(&self) {
        self.with_state(|s| {
            if s.status == PlaybackStatus::Playing {
                s.status = PlaybackStatus::Paused;
                s.pauses += 1;
            }
        });
    }

    fn resume(&self) {
        self.with_state(|s| {
            if s.status == PlaybackStatus::Paused {
                s.status = PlaybackStatus::Playing;
            }
        });
    }

    fn stop(&self) {
        self.with_state(|s| {
            s.status = PlaybackStatus::Stopped;
            s.track = None;
        });
    }

    fn start_playlist(&self) {
        self.with_state(|s| match s.playlist.first() {
            Some(first) => {
                s.track = Some(first.clone());
                s.status = PlaybackStatus::Playing;
            }
            None => log::debug!("playlist is empty, nothing to start"),
        });
    }

    fn add_to_playlist(&self, paths: &[PathBuf], shuffle: bool) {
        let mut paths = paths.to_vec();
        if shuffle {
            paths.shuffle(&mut *self.rng.lock().expect("MemoryAudio rng poisoned"));
        }
        self.with_state(|s| s.playlist.extend(paths));
    }

    fn set_playback_mode(&self, mode: PlaybackMode) {
        self.with_state(|s| s.mode = mode);
    }

    fn set_volume(&self, volume: u8) {
        self.with_state(|s| s.volume = volume.min(100));
    }

    fn is_playing(&self) -> bool {
        self.status() == PlaybackStatus::Playing
    }

    fn is_paused(&self) -> bool {
        self.status() == PlaybackStatus::Paused
    }
}

// =============================================================================
// Music folder and policy
// =============================================================================

/// Files directly inside `folder`, sorted by name. A missing folder is
/// logged and yields nothing.
#[must_use]
pub fn list_music(folder: &Path) -> Vec<PathBuf> {
    if !folder.is_dir() {
        log::warn!("music folder {} not found", folder.display());
        return Vec::new();
    }
    WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("skipping unreadable music entry: {e}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .collect()
}

/// Queue the music folder, shuffled and looping, and start it when music is
/// enabled.
pub fn init_background_music(audio: &dyn AudioPlayer, settings: &dyn SettingsStore) {
    let files = list_music(&settings.music_folder());
    log::info!("background music: {} tracks", files.len());
    audio.add_to_playlist(&files, true);
    audio.set_playback_mode(PlaybackMode::Loop);
    audio.set_volume(settings.music_volume());
    if settings.music_enabled() {
        audio.start_playlist();
    }
}

/// What to do with the music after a screen change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicAction {
    /// Pause
    Pause,
    /// Resume where it left off
    Resume,
    /// Start the playlist from the top
    Start,
}

/// Decide the music action for a screen change.
#[must_use]
pub const fn music_action(
    enabled: bool,
    in_game_list: bool,
    pause_in_game_list: bool,
    started: bool,
) -> MusicAction {
    if !enabled || (in_game_list && pause_in_game_list) {
        MusicAction::Pause
    } else if started {
        MusicAction::Resume
    } else {
        MusicAction::Start
    }
}

/// Apply [`music_action`] to a player.
pub fn apply_music_policy(audio: &dyn AudioPlayer, settings: &dyn SettingsStore, in_game_list: bool) {
    let started = audio.is_playing() || audio.is_paused();
    let action = music_action(
        settings.music_enabled(),
        in_game_list,
        settings.pause_music_in_game_list(),
        started,
    );
    log::debug!("music policy: {action:?}");
    match action {
        MusicAction::Pause => audio.pause(),
        MusicAction::Resume => audio.resume(),
        MusicAction::Start => audio.start_playlist(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{keys, MemorySettings};

    #[test]
    fn test_music_action_table() {
        assert_eq!(music_action(false, false, false, true), MusicAction::Pause);
        assert_eq!(music_action(true, true, true, true), MusicAction::Pause);
        assert_eq!(music_action(true, true, false, true), MusicAction::Resume);
        assert_eq!(music_action(true, false, true, true), MusicAction::Resume);
        assert_eq!(music_action(true, false, false, false), MusicAction::Start);
    }

    #[test]
    fn test_memory_audio_pause_resume() {
        let audio = MemoryAudio::new();
        audio.add_to_playlist(&[PathBuf::from("a.ogg")], false);
        audio.start_playlist();
        assert!(audio.is_playing());
        audio.pause();
        audio.pause();
        assert!(audio.is_paused());
        assert_eq!(audio.pause_count(), 1);
        audio.resume();
        assert!(audio.is_playing());
        audio.stop();
        assert_eq!(audio.status(), PlaybackStatus::Stopped);
        assert_eq!(audio.track(), None);
    }

    #[test]
    fn test_empty_playlist_does_not_start() {
        let audio = MemoryAudio::new();
        audio.start_playlist();
        assert!(!audio.is_playing());
        audio.play(Path::new("jingle.wav"));
        assert!(audio.is_playing());
    }

    #[test]
    fn test_seeded_shuffle_is_reproducible() {
        let tracks: Vec<PathBuf> = (0..20).map(|i| PathBuf::from(format!("{i}.ogg"))).collect();
        let a = MemoryAudio::with_seed(7);
        let b = MemoryAudio::with_seed(7);
        a.add_to_playlist(&tracks, true);
        b.add_to_playlist(&tracks, true);
        assert_eq!(a.playlist(), b.playlist());

        let mut sorted = a.playlist();
        sorted.sort();
        let mut expected = tracks.clone();
        expected.sort();
        assert_eq!(sorted, expected);
    }

    #[test]
    fn test_list_music_files_only_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.ogg"), b"").unwrap();
        std::fs::write(dir.path().join("a.mp3"), b"").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested").join("c.ogg"), b"").unwrap();

        let files = list_music(dir.path());
        let names: Vec<_> = files
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(names, vec!["a.mp3", "b.ogg"]);
    }

    #[test]
    fn test_list_music_missing_folder() {
        assert!(list_music(Path::new("/nonexistent/marquee/music")).is_empty());
    }

    #[test]
    fn test_init_background_music() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("theme.ogg"), b"").unwrap();
        let settings = MemorySettings::new()
            .with(keys::MUSIC_FOLDER, dir.path().to_str().unwrap())
            .with(keys::BACKGROUND_MUSIC_VOLUME, 40i64);
        let audio = MemoryAudio::with_seed(1);

        init_background_music(&audio, &settings);
        assert_eq!(audio.playlist().len(), 1);
        assert_eq!(audio.mode(), PlaybackMode::Loop);
        assert_eq!(audio.volume(), 40);
        assert!(audio.is_playing());
    }

    #[test]
    fn test_init_background_music_disabled() {
        let settings = MemorySettings::new()
            .with(keys::MUSIC_FOLDER, "/nonexistent")
            .with(keys::BACKGROUND_MUSIC_ENABLED, false);
        let audio = MemoryAudio::new();
        init_background_music(&audio, &settings);
        assert!(!audio.is_playing());
    }

    #[test]
    fn test_apply_policy_starts_then_resumes() {
        let settings = MemorySettings::new().with(keys::VIDEO_PREVIEW_PAUSE_BG_MUSIC, true);
        let audio = MemoryAudio::new();
        audio.add_to_playlist(&[PathBuf::from("a.ogg")], false);

        apply_music_policy(&audio, &settings, false);
        assert!(audio.is_playing());
        apply_music_policy(&audio, &settings, true);
        assert!(audio.is_paused());
        apply_music_policy(&audio, &settings, false);
        assert!(audio.is_playing());
        assert_eq!(audio.track(), Some(PathBuf::from("a.ogg")));
    }
}
