//! Top-level screens: the system carousel and the per-system game lists.

mod game_list;
mod system_view;

pub use game_list::{GameListKind, GameListView};
pub use system_view::SystemView;

use crate::config::GamelistViewStyle;
use crate::library::{FileKind, SystemData};
use marquee_core::{Point, Widget};
use std::path::PathBuf;

/// Request a view makes of the controller after handling input.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewCommand {
    /// Show a system's game list
    GoToGameList(String),
    /// Back to the carousel on a system
    GoToSystemView(String),
    /// Next enabled system's game list
    NextGameList,
    /// Previous enabled system's game list
    PrevGameList,
    /// Launch a game; `center` is the zoom focus in view coordinates
    Launch {
        /// Game path
        game: PathBuf,
        /// Zoom focus
        center: Point,
    },
    /// Jump to a random game
    RandomGame,
}

/// A screen the view controller can show.
///
/// Views never act on the controller directly; they queue a
/// [`ViewCommand`] which the controller takes after forwarding input.
pub trait View: Widget {
    /// The view became current.
    fn on_show(&mut self) {}

    /// The view stopped being current.
    fn on_hide(&mut self) {}

    /// Take the pending command.
    fn take_command(&mut self) -> Option<ViewCommand>;
}

/// Pick the game-list kind for a system.
///
/// A forced style wins. Otherwise a theme with a `video` view and any item
/// with a video gives VIDEO; any item with a thumbnail gives DETAILED; else
/// BASIC.
#[must_use]
pub fn select_view_kind(system: &SystemData, style: GamelistViewStyle) -> GameListKind {
    match style {
        GamelistViewStyle::Basic => return GameListKind::Basic,
        GamelistViewStyle::Detailed => return GameListKind::Detailed,
        GamelistViewStyle::Video => return GameListKind::Video,
        GamelistViewStyle::Automatic => {}
    }

    let theme_has_video = system.theme.has_view("video");
    let mut kind = GameListKind::Basic;
    for file in system
        .root
        .files_recursive(&[FileKind::Game, FileKind::Folder], false)
    {
        if theme_has_video && file.video.is_some() {
            return GameListKind::Video;
        }
        if file.thumbnail.is_some() {
            // keep looking, a later item may have a video
            kind = GameListKind::Detailed;
        }
    }
    kind
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::FileData;
    use crate::theme::Theme;

    fn video_theme() -> Theme {
        Theme {
            views: vec!["basic".into(), "detailed".into(), "video".into()],
            ..Theme::default()
        }
    }

    #[test]
    fn test_thumbnail_gives_detailed() {
        let system = SystemData::new("nes").with_games(vec![
            FileData::game("A", "/a"),
            FileData::game("B", "/b").with_thumbnail("/b.png"),
        ]);
        assert_eq!(
            select_view_kind(&system, GamelistViewStyle::Automatic),
            GameListKind::Detailed
        );
    }

    #[test]
    fn test_video_needs_theme_support() {
        let games = vec![
            FileData::game("A", "/a").with_thumbnail("/a.png"),
            FileData::game("B", "/b").with_video("/b.mp4"),
        ];
        let plain = SystemData::new("nes").with_games(games.clone());
        assert_eq!(
            select_view_kind(&plain, GamelistViewStyle::Automatic),
            GameListKind::Detailed
        );

        let themed = SystemData::new("nes")
            .with_games(games)
            .with_theme(video_theme());
        assert_eq!(
            select_view_kind(&themed, GamelistViewStyle::Automatic),
            GameListKind::Video
        );
    }

    #[test]
    fn test_video_inside_folder_counts() {
        let system = SystemData::new("nes")
            .with_theme(video_theme())
            .with_games(vec![FileData::folder(
                "Hacks",
                "/hacks",
                vec![FileData::game("C", "/hacks/c").with_video("/c.mp4")],
            )]);
        assert_eq!(
            select_view_kind(&system, GamelistViewStyle::Automatic),
            GameListKind::Video
        );
    }

    #[test]
    fn test_no_media_gives_basic() {
        let system = SystemData::new("nes").with_games(vec![FileData::game("A", "/a")]);
        assert_eq!(
            select_view_kind(&system, GamelistViewStyle::Automatic),
            GameListKind::Basic
        );
    }

    #[test]
    fn test_forced_style_wins() {
        let system = SystemData::new("nes").with_games(vec![FileData::game("A", "/a")]);
        assert_eq!(
            select_view_kind(&system, GamelistViewStyle::Video),
            GameListKind::Video
        );
        assert_eq!(
            select_view_kind(&system, GamelistViewStyle::Detailed),
            GameListKind::Detailed
        );
    }
}
