//! Grid layout and focus navigation for Marquee.
//!
//! - [`grid`]: fixed-dimension tracks, cell areas and separator borders
//! - [`navigator`]: directional focus movement over spanning cells

pub mod grid;
pub mod navigator;

pub use grid::{compute_track_sizes, Borders, GridArea, GridCoord, GridLayout, TrackSize};
pub use navigator::{fan_out, navigate, probe, CellMap, FocusCell, FocusGrid, PlacedCell, Wrap};
