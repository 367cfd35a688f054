//! Style vocabulary and the [`Stylable`] capability.
//!
//! The enums here are backend-agnostic. Each backend owns its own mapping
//! from these values to drawing tokens (see `render::svg`).

use enum_dispatch::enum_dispatch;

// The `Drawable` dispatch impls are generated next to the trait, so the
// variant types must be nameable here.
use crate::composition::Composition;
use crate::shapes::{Arc, Circle, Curve, Drawable, Line, Rectangle, Spline, Text, Triangle, Wall};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineStyle {
    #[default]
    Solid,
    Dotted,
    DashDot,
    Dashed,
}

/// Named color palette shared by every backend
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Color {
    Grey,
    #[default]
    Black,
    Brown,
    Red,
    Orange,
    Yellow,
    Green,
    Cyan,
    Blue,
    Magenta,
    Purple,
    White,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FillPattern {
    Vertical,
    Horizontal,
    Cross,
    Square,
    Star,
    Dot,
    Circle,
    SmallCircle,
    UpRightToLeft,
    UpLeftToRight,
}

impl FillPattern {
    pub const ALL: [FillPattern; 10] = [
        FillPattern::Vertical,
        FillPattern::Horizontal,
        FillPattern::Cross,
        FillPattern::Square,
        FillPattern::Star,
        FillPattern::Dot,
        FillPattern::Circle,
        FillPattern::SmallCircle,
        FillPattern::UpRightToLeft,
        FillPattern::UpLeftToRight,
    ];
}

/// Where arrowheads go on a curve
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArrowStyle {
    Start,
    End,
    Double,
}

impl ArrowStyle {
    /// `(has_start_head, has_end_head)`
    pub fn heads(self) -> (bool, bool) {
        match self {
            ArrowStyle::Start => (true, false),
            ArrowStyle::End => (false, true),
            ArrowStyle::Double => (true, true),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontFamily {
    Serif,
    #[default]
    Sans,
    Mono,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAlignment {
    Left,
    #[default]
    Center,
    Right,
}

/// Rendering attributes of a shape
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    pub line_style: LineStyle,
    pub line_width: f64,
    pub line_color: Color,
    pub fill_color: Option<Color>,
    pub fill_pattern: Option<FillPattern>,
    pub arrow: Option<ArrowStyle>,
    /// Offset of the drop shadow, in sketch units
    pub shadow: Option<f64>,
}

impl Style {
    pub const DEFAULT_LINE_WIDTH: f64 = 1.0;

    /// Apply one field update. Text-only updates are ignored.
    pub fn apply(&mut self, update: StyleUpdate) {
        match update {
            StyleUpdate::LineStyle(v) => self.line_style = v,
            StyleUpdate::LineWidth(v) => self.line_width = v,
            StyleUpdate::LineColor(v) => self.line_color = v,
            StyleUpdate::FillColor(v) => self.fill_color = v,
            StyleUpdate::FillPattern(v) => {
                self.fill_pattern = v;
                // a pattern needs a background to be drawn on
                if v.is_some() && self.fill_color.is_none() {
                    self.fill_color = Some(Color::White);
                }
            }
            StyleUpdate::Arrow(v) => self.arrow = v,
            StyleUpdate::Shadow(v) => self.shadow = v,
            StyleUpdate::FontSize(_) | StyleUpdate::FontFamily(_) | StyleUpdate::Alignment(_) => {}
        }
    }

    /// Copy with one field updated
    pub fn with(mut self, update: StyleUpdate) -> Self {
        self.apply(update);
        self
    }
}

impl Default for Style {
    fn default() -> Self {
        Style {
            line_style: LineStyle::Solid,
            line_width: Style::DEFAULT_LINE_WIDTH,
            line_color: Color::Black,
            fill_color: None,
            fill_pattern: None,
            arrow: None,
            shadow: None,
        }
    }
}

/// Style of a text label: a base [`Style`] plus font settings
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub style: Style,
    pub font_size: f64,
    pub font_family: FontFamily,
    pub alignment: TextAlignment,
}

impl TextStyle {
    pub const DEFAULT_FONT_SIZE: f64 = 12.0;

    pub fn apply(&mut self, update: StyleUpdate) {
        match update {
            StyleUpdate::FontSize(v) => self.font_size = v,
            StyleUpdate::FontFamily(v) => self.font_family = v,
            StyleUpdate::Alignment(v) => self.alignment = v,
            other => self.style.apply(other),
        }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        TextStyle {
            style: Style::default(),
            font_size: TextStyle::DEFAULT_FONT_SIZE,
            font_family: FontFamily::default(),
            alignment: TextAlignment::default(),
        }
    }
}

/// A single style field assignment.
///
/// Updates are applied to leaf shapes directly, and broadcast to every leaf
/// of a composition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StyleUpdate {
    LineStyle(LineStyle),
    LineWidth(f64),
    LineColor(Color),
    FillColor(Option<Color>),
    FillPattern(Option<FillPattern>),
    Arrow(Option<ArrowStyle>),
    Shadow(Option<f64>),
    FontSize(f64),
    FontFamily(FontFamily),
    Alignment(TextAlignment),
}

/// Anything that carries (or forwards) a [`Style`]
#[enum_dispatch]
pub trait Stylable {
    /// The effective style. Groups have none of their own and report the
    /// default.
    fn style(&self) -> Style;

    /// Apply an update; groups forward it to every contained shape.
    fn apply_style(&mut self, update: StyleUpdate);
}

macro_rules! style_setters {
    ($($set:ident / $with:ident: $ty:ty => $variant:ident),* $(,)?) => {
        /// Fluent setters over [`Stylable`]
        pub trait StyleExt: Stylable + Sized {
            $(
                fn $set(&mut self, value: $ty) -> &mut Self {
                    self.apply_style(StyleUpdate::$variant(value));
                    self
                }

                fn $with(mut self, value: $ty) -> Self {
                    self.apply_style(StyleUpdate::$variant(value));
                    self
                }
            )*
        }
    };
}

style_setters! {
    set_line_style / with_line_style: LineStyle => LineStyle,
    set_line_width / with_line_width: f64 => LineWidth,
    set_line_color / with_line_color: Color => LineColor,
    set_fill_color / with_fill_color: Option<Color> => FillColor,
    set_fill_pattern / with_fill_pattern: Option<FillPattern> => FillPattern,
    set_arrow / with_arrow: Option<ArrowStyle> => Arrow,
    set_shadow / with_shadow: Option<f64> => Shadow,
    set_font_size / with_font_size: f64 => FontSize,
    set_font_family / with_font_family: FontFamily => FontFamily,
    set_alignment / with_alignment: TextAlignment => Alignment,
}

impl<T: Stylable> StyleExt for T {}
