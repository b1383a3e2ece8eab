//! Systems and their game trees.
//!
//! A [`SystemCatalog`] is loaded from TOML:
//!
//! ```toml
//! [[systems]]
//! name = "nes"
//! full_name = "Nintendo Entertainment System"
//! command = "fceux %ROM%"
//!
//! [systems.theme]
//! views = ["basic", "detailed"]
//!
//! [[systems.games]]
//! name = "Zelda"
//! path = "/roms/nes/zelda.nes"
//! thumbnail = "/media/nes/zelda.png"
//! ```

use crate::error::ConfigError;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What a file-tree node is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// Launchable game
    #[default]
    Game,
    /// Folder of games
    Folder,
    /// Stand-in for an empty folder
    Placeholder,
}

/// A node of a system's game tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileData {
    /// Display name
    pub name: String,
    /// Identity of the node
    pub path: PathBuf,
    /// Node kind
    #[serde(default)]
    pub kind: FileKind,
    /// Artwork path
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// Preview video path
    #[serde(default)]
    pub video: Option<String>,
    /// Description text
    #[serde(default)]
    pub description: String,
    /// Hidden nodes are skipped by displayed-only listings
    #[serde(default)]
    pub hidden: bool,
    /// Folder contents
    #[serde(default)]
    pub children: Vec<FileData>,
}

impl FileData {
    fn node(name: impl Into<String>, path: impl Into<PathBuf>, kind: FileKind) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind,
            thumbnail: None,
            video: None,
            description: String::new(),
            hidden: false,
            children: Vec::new(),
        }
    }

    /// A game.
    pub fn game(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::node(name, path, FileKind::Game)
    }

    /// A folder.
    pub fn folder(name: impl Into<String>, path: impl Into<PathBuf>, children: Vec<Self>) -> Self {
        Self {
            children,
            ..Self::node(name, path, FileKind::Folder)
        }
    }

    /// The stand-in listed when a folder has nothing to show.
    pub fn placeholder(path: impl Into<PathBuf>) -> Self {
        Self::node("<no entries found>", path, FileKind::Placeholder)
    }

    /// Set the artwork path.
    #[must_use]
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    /// Set the preview video path.
    #[must_use]
    pub fn with_video(mut self, video: impl Into<String>) -> Self {
        self.video = Some(video.into());
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Mark hidden.
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Whether this is a launchable game.
    #[must_use]
    pub fn is_game(&self) -> bool {
        self.kind == FileKind::Game
    }

    /// Whether this is a placeholder.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.kind == FileKind::Placeholder
    }

    /// Children shown in a list.
    pub fn displayed_children(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter(|c| !c.hidden)
    }

    /// Flattened descendants of the given kinds, depth first, each node
    /// before its contents.
    #[must_use]
    pub fn files_recursive(&self, kinds: &[FileKind], displayed_only: bool) -> Vec<&Self> {
        let mut out = Vec::new();
        self.collect(kinds, displayed_only, &mut out);
        out
    }

    fn collect<'a>(&'a self, kinds: &[FileKind], displayed_only: bool, out: &mut Vec<&'a Self>) {
        for child in &self.children {
            if displayed_only && child.hidden {
                continue;
            }
            if kinds.contains(&child.kind) {
                out.push(child);
            }
            if !child.children.is_empty() {
                child.collect(kinds, displayed_only, out);
            }
        }
    }

    /// Child indices leading from this node to the node at `path`.
    #[must_use]
    pub fn find_path(&self, path: &Path) -> Option<Vec<usize>> {
        for (index, child) in self.children.iter().enumerate() {
            if child.path == path {
                return Some(vec![index]);
            }
            if let Some(mut rest) = child.find_path(path) {
                rest.insert(0, index);
                return Some(rest);
            }
        }
        None
    }

    /// Node reached by following child `indices`.
    #[must_use]
    pub fn descend(&self, indices: &[usize]) -> Option<&Self> {
        indices
            .iter()
            .try_fold(self, |node, &i| node.children.get(i))
    }

    /// Node at `path`.
    #[must_use]
    pub fn find(&self, path: &Path) -> Option<&Self> {
        self.find_path(path).and_then(|indices| self.descend(&indices))
    }
}

/// One emulated system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemData {
    /// Short name, the system's identity
    pub name: String,
    /// Display name
    pub full_name: String,
    /// Disabled systems are skipped by navigation
    pub enabled: bool,
    /// Launch command, `%ROM%` replaced by the game path
    pub command: String,
    /// Theme
    pub theme: Theme,
    /// Root folder
    pub root: FileData,
}

impl SystemData {
    /// Create an enabled system with no games.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            full_name: name.clone(),
            enabled: true,
            command: String::new(),
            theme: Theme::default(),
            root: FileData::folder(name.clone(), format!("/{name}"), Vec::new()),
            name,
        }
    }

    /// Set the root folder's contents.
    #[must_use]
    pub fn with_games(mut self, games: Vec<FileData>) -> Self {
        self.root.children = games;
        self
    }

    /// Set the theme.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the launch command.
    #[must_use]
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    /// Mark disabled.
    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Number of displayed games, folders excluded.
    #[must_use]
    pub fn displayed_game_count(&self) -> usize {
        self.root.files_recursive(&[FileKind::Game], true).len()
    }

    /// Displayed games in list order, the population the random pick
    /// indexes into.
    #[must_use]
    pub fn displayed_games(&self) -> Vec<&FileData> {
        self.root.files_recursive(&[FileKind::Game], true)
    }
}

// =============================================================================
// GameLibrary
// =============================================================================

/// Ordered systems.
pub trait GameLibrary: Send + Sync {
    /// All systems in display order.
    fn systems(&self) -> &[SystemData];

    /// Re-read a system's theme from wherever it came from.
    fn reload_theme(&mut self, _system: &str) {}

    /// System by name.
    fn system(&self, name: &str) -> Option<&SystemData> {
        self.systems().iter().find(|s| s.name == name)
    }

    /// Position of a system.
    fn index_of(&self, name: &str) -> Option<usize> {
        self.systems().iter().position(|s| s.name == name)
    }

    /// First enabled system.
    fn first_enabled(&self) -> Option<&SystemData> {
        self.systems().iter().find(|s| s.enabled)
    }

    /// Next enabled system after `name`, wrapping; may be `name` itself.
    fn next_enabled(&self, name: &str) -> Option<&SystemData> {
        cycle_enabled(self.systems(), self.index_of(name)?, 1)
    }

    /// Previous enabled system before `name`, wrapping.
    fn prev_enabled(&self, name: &str) -> Option<&SystemData> {
        let len = self.systems().len();
        cycle_enabled(self.systems(), self.index_of(name)?, len.saturating_sub(1))
    }
}

fn cycle_enabled(systems: &[SystemData], start: usize, step: usize) -> Option<&SystemData> {
    let len = systems.len();
    (1..=len)
        .map(|n| &systems[(start + n * step) % len])
        .find(|s| s.enabled)
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    systems: Vec<SystemEntry>,
}

#[derive(Debug, Deserialize)]
struct SystemEntry {
    name: String,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default = "enabled_by_default")]
    enabled: bool,
    #[serde(default)]
    command: String,
    #[serde(default)]
    theme: Theme,
    #[serde(default)]
    games: Vec<FileData>,
}

const fn enabled_by_default() -> bool {
    true
}

impl From<SystemEntry> for SystemData {
    fn from(entry: SystemEntry) -> Self {
        let mut system = Self::new(entry.name)
            .with_games(entry.games)
            .with_theme(entry.theme)
            .with_command(entry.command);
        system.enabled = entry.enabled;
        if let Some(full_name) = entry.full_name {
            system.root.name.clone_from(&full_name);
            system.full_name = full_name;
        }
        system
    }
}

/// Systems loaded from a TOML catalog.
#[derive(Debug, Clone, Default)]
pub struct SystemCatalog {
    systems: Vec<SystemData>,
    source: Option<PathBuf>,
}

impl SystemCatalog {
    /// Catalog over in-memory systems.
    #[must_use]
    pub const fn new(systems: Vec<SystemData>) -> Self {
        Self {
            systems,
            source: None,
        }
    }

    /// Parse a catalog from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let file: CatalogFile = toml::from_str(text)?;
        let systems: Vec<SystemData> = file.systems.into_iter().map(SystemData::from).collect();
        for (i, system) in systems.iter().enumerate() {
            if systems[..i].iter().any(|s| s.name == system.name) {
                return Err(ConfigError::InvalidValue {
                    key: "systems.name".to_string(),
                    value: system.name.clone(),
                });
            }
        }
        Ok(Self::new(systems))
    }

    /// Load a catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let mut catalog = Self::from_toml_str(&text)?;
        catalog.source = Some(path.to_path_buf());
        log::info!(
            "loaded {} systems from {}",
            catalog.systems.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Mutable access to a system, for edits followed by a view reload.
    pub fn system_mut(&mut self, name: &str) -> Option<&mut SystemData> {
        self.systems.iter_mut().find(|s| s.name == name)
    }
}

impl GameLibrary for SystemCatalog {
    fn systems(&self) -> &[SystemData] {
        &self.systems
    }

    fn reload_theme(&mut self, name: &str) {
        let Some(source) = self.source.clone() else {
            return;
        };
        let fresh = match Self::load(&source) {
            Ok(catalog) => catalog,
            Err(e) => {
                log::warn!("theme reload for {name} failed: {e}");
                return;
            }
        };
        let theme = fresh.system(name).map(|s| s.theme.clone());
        if let (Some(theme), Some(system)) = (theme, self.system_mut(name)) {
            system.theme = theme;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn tree() -> FileData {
        FileData::folder(
            "root",
            "/nes",
            vec![
                FileData::game("Zelda", "/nes/zelda.nes"),
                FileData::folder(
                    "Hacks",
                    "/nes/hacks",
                    vec![
                        FileData::game("Zelda II+", "/nes/hacks/z2.nes"),
                        FileData::game("Secret", "/nes/hacks/secret.nes").hidden(),
                    ],
                ),
                FileData::game("Metroid", "/nes/metroid.nes"),
            ],
        )
    }

    #[test]
    fn test_files_recursive_order() {
        let root = tree();
        let names: Vec<&str> = root
            .files_recursive(&[FileKind::Game, FileKind::Folder], false)
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["Zelda", "Hacks", "Zelda II+", "Secret", "Metroid"]);
    }

    #[test]
    fn test_displayed_only_skips_hidden() {
        let root = tree();
        let games = root.files_recursive(&[FileKind::Game], true);
        assert_eq!(games.len(), 3);
        assert!(games.iter().all(|g| !g.hidden));
    }

    #[test]
    fn test_find_path() {
        let root = tree();
        assert_eq!(root.find_path(Path::new("/nes/hacks/z2.nes")), Some(vec![1, 0]));
        assert_eq!(root.find_path(Path::new("/nes/none.nes")), None);
        assert_eq!(
            root.find(Path::new("/nes/metroid.nes")).map(|f| f.name.as_str()),
            Some("Metroid")
        );
    }

    #[test]
    fn test_displayed_game_count() {
        let system = SystemData::new("nes").with_games(tree().children);
        assert_eq!(system.displayed_game_count(), 3);
    }

    fn catalog() -> SystemCatalog {
        SystemCatalog::new(vec![
            SystemData::new("a"),
            SystemData::new("b").disabled(),
            SystemData::new("c"),
        ])
    }

    #[test]
    fn test_next_and_prev_enabled_skip_disabled() {
        let catalog = catalog();
        assert_eq!(catalog.next_enabled("a").map(|s| s.name.as_str()), Some("c"));
        assert_eq!(catalog.next_enabled("c").map(|s| s.name.as_str()), Some("a"));
        assert_eq!(catalog.prev_enabled("a").map(|s| s.name.as_str()), Some("c"));
        assert_eq!(catalog.prev_enabled("c").map(|s| s.name.as_str()), Some("a"));
        assert!(catalog.next_enabled("zzz").is_none());
    }

    #[test]
    fn test_single_system_cycles_to_itself() {
        let catalog = SystemCatalog::new(vec![SystemData::new("only")]);
        assert_eq!(
            catalog.next_enabled("only").map(|s| s.name.as_str()),
            Some("only")
        );
    }

    const CATALOG: &str = r#"
        [[systems]]
        name = "nes"
        full_name = "Nintendo Entertainment System"
        command = "fceux %ROM%"

        [systems.theme]
        views = ["basic", "video"]

        [[systems.games]]
        name = "Zelda"
        path = "/roms/nes/zelda.nes"
        video = "/media/zelda.mp4"

        [[systems.games]]
        name = "Hacks"
        path = "/roms/nes/hacks"
        kind = "folder"

        [[systems.games.children]]
        name = "Zelda II+"
        path = "/roms/nes/hacks/z2.nes"

        [[systems]]
        name = "retropie"
        enabled = false
    "#;

    #[test]
    fn test_catalog_from_toml() {
        let catalog = SystemCatalog::from_toml_str(CATALOG).unwrap();
        assert_eq!(catalog.systems().len(), 2);
        let nes = catalog.system("nes").unwrap();
        assert_eq!(nes.full_name, "Nintendo Entertainment System");
        assert_eq!(nes.command, "fceux %ROM%");
        assert!(nes.theme.has_view("video"));
        assert_eq!(nes.displayed_game_count(), 2);
        assert_eq!(nes.root.children[1].kind, FileKind::Folder);
        assert!(!catalog.system("retropie").unwrap().enabled);
    }

    #[test]
    fn test_duplicate_system_rejected() {
        let err = SystemCatalog::from_toml_str(
            "[[systems]]\nname = \"a\"\n[[systems]]\nname = \"a\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_reload_theme_rereads_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{CATALOG}").unwrap();
        let mut catalog = SystemCatalog::load(file.path()).unwrap();
        catalog.system_mut("nes").unwrap().theme = Theme::default();
        assert!(!catalog.system("nes").unwrap().theme.has_view("video"));

        catalog.reload_theme("nes");
        assert!(catalog.system("nes").unwrap().theme.has_view("video"));
    }
}
