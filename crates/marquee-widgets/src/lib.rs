//! Widgets for Marquee.
//!
//! Leaf widgets ([`Text`], [`Image`], [`Button`], [`HelpBar`], [`TextList`])
//! and the containers built from them ([`ComponentGrid`], [`MessageBox`]).

pub mod button;
pub mod component_grid;
pub mod help_bar;
pub mod image;
pub mod message_box;
pub mod text;
pub mod text_list;

pub use button::Button;
pub use component_grid::{CellOptions, ComponentGrid, UpdatePolicy};
pub use help_bar::HelpBar;
pub use image::{Image, ImageKind};
pub use message_box::MessageBox;
pub use text::Text;
pub use text_list::{EntryColor, ListColors, ListEntry, TextList, PAGE_STEP};
