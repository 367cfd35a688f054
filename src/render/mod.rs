//! Drawing backends
//!
//! - `defaults`: default sizes and colors
//! - `svg`: the SVG document backend

pub mod defaults;
pub mod svg;

pub use self::svg::{SvgBackend, SvgOptions};
