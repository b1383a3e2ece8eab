//! Core types and traits for the Marquee launcher shell.
//!
//! This crate provides foundational types used throughout Marquee:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`], [`Transform2D`]
//! - Color representation: [`Color`]
//! - Logical input: [`Button`], [`Input`]
//! - The [`Widget`] and [`Canvas`] traits plus a [`RecordingCanvas`]
//! - The slot-based [`Animator`]

pub mod animation;
mod canvas;
mod color;
pub mod draw;
mod event;
mod geometry;
pub mod widget;

pub use animation::{
    Animation, Animator, Easing, FinishedCallback, LambdaAnimation, MAX_ANIMATIONS,
    SLOT_PRIMARY, SLOT_SECONDARY,
};
pub use canvas::RecordingCanvas;
pub use color::{Color, ColorParseError};
pub use draw::{DrawCommand, Transform2D};
pub use event::{Button, Input, UnknownButton};
pub use geometry::{Point, Rect, Size};
pub use widget::{Canvas, FontWeight, Frame, HelpPrompt, TextStyle, Widget, WidgetId};
