#![forbid(unsafe_code)]

//! Render kernel for chatviz: styled cells, buffers, and frames.
//!
//! Widgets draw into a [`frame::Frame`], which pairs a [`buffer::Buffer`] with
//! an optional hit grid. The hit grid is what lets overlays tell a click on
//! their backdrop apart from a click on their content: both land on the same
//! cell coordinates, but only the innermost registered region answers a hit
//! test.

pub mod buffer;
pub mod cell;
pub mod frame;
pub mod style;
pub mod text;

pub use style::{Color, Style, StyleFlags};
