//! Chart rendering: ASCII for the terminal report, Plotters for SVG and the TUI.

pub mod ascii;
pub mod svg;

pub use ascii::*;
pub use svg::*;
