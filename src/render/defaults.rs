//! Default sizes and settings (pixels unless noted)

use crate::style::Color;

/// Pixels per sketch unit
pub const SCALE: f64 = 50.0;
pub const MARGIN: f64 = 10.0;
pub const ARROW_LENGTH: f64 = 10.0;
pub const ARROW_WIDTH: f64 = 6.0;
/// Side of one fill pattern tile
pub const PATTERN_TILE: f64 = 8.0;
pub const PATTERN_STROKE_WIDTH: f64 = 0.8;
pub const SHADOW_COLOR: Color = Color::Grey;
/// Decimal places kept in emitted coordinates
pub const PRECISION: i32 = 3;
