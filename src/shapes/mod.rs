//! Shape primitives and the [`Drawable`] union
//!
//! Each primitive is its own type that knows how to:
//! - expose the polyline it draws as (via [`Shape`])
//! - carry a style (via [`Stylable`])
//! - produce rotated, translated and scaled copies (via [`Transform`])

mod arc;
mod curve;
mod line;
mod polygon;
mod spline;
mod text;
mod wall;

pub use arc::{Arc, Circle};
pub use curve::Curve;
pub use line::Line;
pub use polygon::{Rectangle, Triangle};
pub use spline::Spline;
pub use text::Text;
pub use wall::Wall;

use enum_dispatch::enum_dispatch;

use crate::composition::Composition;
use crate::errors::{Result, SketchError};
use crate::style::{Stylable, Style, StyleUpdate};
use crate::types::{Angle, Point};

/// Geometric transforms. None of them mutate the receiver.
pub trait Transform {
    /// What the transformed value is. Most shapes keep their type; a fitted
    /// spline becomes a plain curve once moved away from its axis.
    type Output;

    fn rotate(&self, angle: impl Into<Angle>, center: Point) -> Self::Output;

    fn translate(&self, vec: Point) -> Self::Output;

    /// Scale about the origin. Fails when the result would be degenerate or
    /// the shape cannot be scaled at all.
    fn scale(&self, factor: f64) -> Result<Self::Output>;
}

/// A primitive drawn as a polyline
pub trait Shape {
    fn curve(&self) -> &Curve;

    fn points(&self) -> &[Point] {
        self.curve().points()
    }
}

/// Every value a figure or composition accepts
#[enum_dispatch(Stylable)]
#[derive(Clone, Debug)]
pub enum Drawable {
    Curve(Curve),
    Line(Line),
    Arc(Arc),
    Circle(Circle),
    Rectangle(Rectangle),
    Triangle(Triangle),
    Spline(Spline),
    Wall(Wall),
    Text(Text),
    Composition(Composition),
}

impl Drawable {
    /// Variant name, for logs and diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Drawable::Curve(_) => "curve",
            Drawable::Line(_) => "line",
            Drawable::Arc(_) => "arc",
            Drawable::Circle(_) => "circle",
            Drawable::Rectangle(_) => "rectangle",
            Drawable::Triangle(_) => "triangle",
            Drawable::Spline(_) => "spline",
            Drawable::Wall(_) => "wall",
            Drawable::Text(_) => "text",
            Drawable::Composition(_) => "composition",
        }
    }

    /// The polyline of any curve-like variant
    pub fn as_curve(&self) -> Option<&Curve> {
        match self {
            Drawable::Curve(s) => Some(s),
            Drawable::Line(s) => Some(s.curve()),
            Drawable::Arc(s) => Some(s.curve()),
            Drawable::Circle(s) => Some(s.curve()),
            Drawable::Rectangle(s) => Some(s.curve()),
            Drawable::Triangle(s) => Some(s.curve()),
            Drawable::Spline(s) => Some(s.curve()),
            Drawable::Wall(s) => Some(s.curve()),
            Drawable::Text(_) | Drawable::Composition(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Drawable::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_composition(&self) -> Option<&Composition> {
        match self {
            Drawable::Composition(c) => Some(c),
            _ => None,
        }
    }
}

impl Transform for Drawable {
    type Output = Drawable;

    fn rotate(&self, angle: impl Into<Angle>, center: Point) -> Drawable {
        let angle = angle.into();
        match self {
            Drawable::Curve(s) => s.rotate(angle, center).into(),
            Drawable::Line(s) => s.rotate(angle, center).into(),
            Drawable::Arc(s) => s.rotate(angle, center).into(),
            Drawable::Circle(s) => s.rotate(angle, center).into(),
            Drawable::Rectangle(s) => s.rotate(angle, center).into(),
            Drawable::Triangle(s) => s.rotate(angle, center).into(),
            Drawable::Spline(s) => s.rotate(angle, center).into(),
            Drawable::Wall(s) => s.rotate(angle, center).into(),
            Drawable::Text(s) => s.rotate(angle, center).into(),
            Drawable::Composition(s) => s.rotate(angle, center).into(),
        }
    }

    fn translate(&self, vec: Point) -> Drawable {
        match self {
            Drawable::Curve(s) => s.translate(vec).into(),
            Drawable::Line(s) => s.translate(vec).into(),
            Drawable::Arc(s) => s.translate(vec).into(),
            Drawable::Circle(s) => s.translate(vec).into(),
            Drawable::Rectangle(s) => s.translate(vec).into(),
            Drawable::Triangle(s) => s.translate(vec).into(),
            Drawable::Spline(s) => s.translate(vec).into(),
            Drawable::Wall(s) => s.translate(vec).into(),
            Drawable::Text(s) => s.translate(vec).into(),
            Drawable::Composition(s) => s.translate(vec).into(),
        }
    }

    fn scale(&self, factor: f64) -> Result<Drawable> {
        Ok(match self {
            Drawable::Curve(s) => s.scale(factor)?.into(),
            Drawable::Line(s) => s.scale(factor)?.into(),
            Drawable::Arc(s) => s.scale(factor)?.into(),
            Drawable::Circle(s) => s.scale(factor)?.into(),
            Drawable::Rectangle(s) => s.scale(factor)?.into(),
            Drawable::Triangle(s) => s.scale(factor)?.into(),
            Drawable::Spline(s) => s.scale(factor)?.into(),
            Drawable::Wall(s) => s.scale(factor)?.into(),
            Drawable::Text(s) => s.scale(factor)?.into(),
            Drawable::Composition(s) => s.scale(factor)?.into(),
        })
    }
}

/// Implement [`Stylable`] for shapes that keep their style on an inner
/// curve reachable through the given field path.
macro_rules! impl_stylable_via_curve {
    ($($ty:ty => $($field:ident).+),* $(,)?) => {
        $(
            impl Stylable for $ty {
                fn style(&self) -> Style {
                    self.$($field).+.style
                }

                fn apply_style(&mut self, update: StyleUpdate) {
                    self.$($field).+.style.apply(update);
                }
            }
        )*
    };
}

impl_stylable_via_curve! {
    Line => curve,
    Arc => curve,
    Circle => arc.curve,
    Rectangle => curve,
    Triangle => curve,
    Spline => curve,
    Wall => curve,
}

/// Scale factors that collapse or corrupt geometry
pub(crate) fn check_scale(factor: f64, shape: &'static str) -> Result<()> {
    if factor == 0.0 || !factor.is_finite() {
        return Err(SketchError::invalid(shape, format!("cannot scale by {factor}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Color, LineStyle};

    #[test]
    fn variants_convert_into_drawable() {
        let line = Line::new(Point::ORIGIN, Point::UNIT_X).unwrap();
        let drawable = Drawable::from(line.clone());
        assert_eq!(drawable.kind(), "line");
        assert_eq!(drawable.as_curve(), Some(line.curve()));

        let text: Drawable = Text::new("t", Point::ORIGIN).into();
        assert!(text.as_text().is_some());
        let group = Drawable::from(Composition::new().add("l", line));
        assert_eq!(group.as_composition().map(Composition::len), Some(1));
    }

    #[test]
    fn style_updates_dispatch_to_the_variant() {
        let mut drawable = Drawable::from(Circle::new(Point::ORIGIN, 1.0).unwrap());
        drawable.apply_style(StyleUpdate::LineColor(Color::Green));
        assert_eq!(drawable.style().line_color, Color::Green);

        let mut group = Drawable::from(
            Composition::new().add("c", Rectangle::new(Point::ORIGIN, 1.0, 1.0).unwrap()),
        );
        group.apply_style(StyleUpdate::LineStyle(LineStyle::Dotted));
        assert_eq!(group.style(), Style::default());
        let Drawable::Composition(inner) = &group else {
            panic!("not a composition");
        };
        assert_eq!(inner.get("c").unwrap().style().line_style, LineStyle::Dotted);
    }
}
